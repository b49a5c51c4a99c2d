//! Main module for the wafer defect dashboard using Yew.
//! Wires the sidebar and main content views to the dashboard session.

use wafer_dashboard::controller::MainView;
use yew::prelude::*;

mod components;
mod hooks;

use components::{
    ActionButtons, EntryList, QueryView, StatisticsView, TimeFilter, UploadPanel, WaferGrid,
    WaferHeatmap,
};
use hooks::use_dashboard;

/// Primary application component: sidebar on the left, active view on the right.
#[function_component(App)]
fn app() -> Html {
    let dashboard = use_dashboard();
    let state = &dashboard.state;

    let upload_hint = if state.has_catalog() {
        "Lot을 선택하세요"
    } else {
        "이미지를 업로드하세요"
    };
    // Lots are only listed once something has been uploaded.
    let lot_entries = if state.has_catalog() {
        state.lot_entries()
    } else {
        Vec::new()
    };

    // Uploaded lots are re-classified on every render.
    let main_content = match state.main_view(&mut rand::rng()) {
        MainView::Query {
            window,
            range_label,
            uploaded,
        } => html! { <QueryView {window} {range_label} {uploaded} /> },
        MainView::Statistics(report) => html! { <StatisticsView {report} /> },
        MainView::WaferGrid { lot, cards } => html! {
            <WaferGrid {lot} {cards} on_select={dashboard.on_select_card.clone()} />
        },
        MainView::Heatmap(wafer) => html! {
            <WaferHeatmap {wafer} on_back={dashboard.on_back.clone()} />
        },
    };

    html! {
        <div class="dashboard">
            <aside class="sidebar">
                <UploadPanel on_upload={dashboard.on_upload.clone()} />
                <TimeFilter
                    selected={state.time_window()}
                    picker={state.date_picker().clone()}
                    range_label={state.range_label()}
                    on_select={dashboard.on_time_window.clone()}
                    on_start_date={dashboard.on_start_date.clone()}
                    on_end_date={dashboard.on_end_date.clone()}
                    on_submit={dashboard.on_submit_range.clone()}
                    on_cancel={dashboard.on_cancel_picker.clone()}
                />
                <EntryList
                    title="Lots"
                    entries={lot_entries}
                    placeholder="이미지를 업로드하세요"
                    on_select={dashboard.on_select_lot.clone()}
                />
                <EntryList
                    title="Wafers"
                    entries={state.wafer_entries()}
                    placeholder={upload_hint}
                    on_select={dashboard.on_select_wafer.clone()}
                />
                <ActionButtons
                    current={state.action_view()}
                    has_catalog={state.has_catalog()}
                    on_action={dashboard.on_action.clone()}
                />
            </aside>
            <main class="main-content">
                { main_content }
            </main>
        </div>
    }
}

/// Entry point: installs the panic hook and mounts the dashboard.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
