use log::debug;
use wafer_dashboard::controller::SelectionController;
use wafer_dashboard::{ActionView, Artifact, DashboardError, TimeWindow, WaferCard};
use yew::prelude::*;

/// The dashboard session plus one callback per operator action.
#[derive(Clone)]
pub struct Dashboard {
    /// Snapshot of the session for this render.
    pub state: SelectionController,
    pub on_upload: Callback<Artifact>,
    pub on_select_lot: Callback<String>,
    /// Sidebar list click, by wafer id.
    pub on_select_wafer: Callback<String>,
    /// Grid card click.
    pub on_select_card: Callback<WaferCard>,
    pub on_action: Callback<ActionView>,
    pub on_time_window: Callback<TimeWindow>,
    pub on_start_date: Callback<String>,
    pub on_end_date: Callback<String>,
    pub on_submit_range: Callback<()>,
    pub on_cancel_picker: Callback<()>,
    pub on_back: Callback<()>,
}

/// Surface a rejected action: blocking notice for the ones the operator must
/// act on, otherwise just a log line.
fn report(err: &DashboardError) {
    if err.is_user_visible() {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&err.to_string());
        }
    } else {
        debug!("Ignored input: {}", err);
    }
}

/// Build a callback that applies one transition to a copy of the session and
/// stores it. Rejected transitions leave the stored session untouched.
fn transition<T: 'static>(
    handle: &UseStateHandle<SelectionController>,
    apply: impl Fn(&mut SelectionController, T) -> Result<(), DashboardError> + 'static,
) -> Callback<T> {
    let handle = handle.clone();
    Callback::from(move |arg: T| {
        let mut next = (*handle).clone();
        match apply(&mut next, arg) {
            Ok(()) => handle.set(next),
            Err(e) => report(&e),
        }
    })
}

/// Custom hook owning the dashboard session.
#[hook]
pub fn use_dashboard() -> Dashboard {
    let handle: UseStateHandle<SelectionController> = use_state(SelectionController::new);

    Dashboard {
        state: (*handle).clone(),
        on_upload: transition(&handle, |s, artifact: Artifact| {
            s.upload_artifact(&artifact);
            Ok(())
        }),
        on_select_lot: transition(&handle, |s, lot: String| s.select_lot(&lot)),
        on_select_wafer: transition(&handle, |s, wafer: String| {
            s.quick_select_wafer(&wafer, &mut rand::rng())
        }),
        on_select_card: transition(&handle, |s, card: WaferCard| {
            s.select_grid_wafer(&card);
            Ok(())
        }),
        on_action: transition(&handle, |s, view: ActionView| s.set_action_view(view).map(|_| ())),
        on_time_window: transition(&handle, |s, window: TimeWindow| {
            // The range button only opens the picker; the picker's submit commits.
            if window == TimeWindow::TimeRange {
                s.toggle_date_picker();
                Ok(())
            } else {
                s.set_time_window(window, None)
            }
        }),
        on_start_date: transition(&handle, |s, value: String| {
            s.edit_start_date(&value);
            Ok(())
        }),
        on_end_date: transition(&handle, |s, value: String| {
            s.edit_end_date(&value);
            Ok(())
        }),
        on_submit_range: transition(&handle, |s, ()| s.submit_date_range()),
        on_cancel_picker: transition(&handle, |s, ()| {
            s.cancel_date_picker();
            Ok(())
        }),
        on_back: transition(&handle, |s, ()| {
            s.go_back_from_heatmap();
            Ok(())
        }),
    }
}
