//! Session state for the dashboard.
//!
//! `SelectionController` owns everything the views read: the catalog, the
//! active view, the selected lot and wafer, and the time window. Fields are
//! private; every change goes through a transition method so that the
//! invalidation rules hold:
//!
//! - a new catalog resets the selected lot to its first lot,
//! - changing lot or view drops the selected wafer,
//! - statistics and wafer-map views need an uploaded artifact,
//! - a custom time range is committed only once both bounds are valid.

use crate::catalog::{wafer_id, Catalog};
use crate::classifier::{
    quick_yield, Classification, DefectClassifier, PatternDefectClassifier, RandomDefectClassifier,
};
use crate::config::{FALLBACK_LOTS, INITIAL_LOT, WAFERS_PER_LOT};
use crate::stats::{CannedStatsProjector, StatsProjector, StatsReport};
use crate::utils::{format_date_range, parse_wafer_id, validate_date_range};
use crate::{ActionView, Artifact, DashboardError, DateRange, TimeWindow, WaferSelection};
use log::{debug, info, warn};
use rand::Rng;

/// A wafer as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaferCard {
    pub lot_label: String,
    pub wafer_id: String,
    pub wafer_number: usize,
    pub classification: Classification,
}

/// Sidebar list row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListEntry {
    pub id: String,
    pub selected: bool,
}

/// Custom range inputs. Edited freely; only `submit_date_range` commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatePicker {
    pub open: bool,
    pub draft: DateRange,
}

/// What the main content area renders.
#[derive(Debug, Clone, PartialEq)]
pub enum MainView {
    Query {
        window: TimeWindow,
        range_label: Option<String>,
        uploaded: Option<String>,
    },
    Statistics(StatsReport),
    WaferGrid {
        lot: String,
        cards: Vec<WaferCard>,
    },
    Heatmap(WaferSelection),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionController {
    view: ActionView,
    selected_lot: String,
    selected_wafer: Option<WaferSelection>,
    time_window: TimeWindow,
    custom_range: Option<DateRange>,
    date_picker: DatePicker,
    catalog: Catalog,
    uploaded: Option<String>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self {
            view: ActionView::Query,
            selected_lot: INITIAL_LOT.to_string(),
            selected_wafer: None,
            time_window: TimeWindow::Today,
            custom_range: None,
            date_picker: DatePicker::default(),
            catalog: Catalog::default(),
            uploaded: None,
        }
    }

    pub fn action_view(&self) -> ActionView {
        self.view
    }

    pub fn selected_lot(&self) -> &str {
        &self.selected_lot
    }

    pub fn selected_wafer(&self) -> Option<&WaferSelection> {
        self.selected_wafer.as_ref()
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    pub fn custom_range(&self) -> Option<&DateRange> {
        self.custom_range.as_ref()
    }

    pub fn date_picker(&self) -> &DatePicker {
        &self.date_picker
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn has_catalog(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Name of the last uploaded file.
    pub fn uploaded(&self) -> Option<&str> {
        self.uploaded.as_deref()
    }

    // ---------- transitions ----------

    /// Replace the catalog with one derived from `artifact`. The view is left
    /// alone.
    pub fn upload_artifact(&mut self, artifact: &Artifact) {
        let catalog = Catalog::generate(artifact);
        if let Some(first) = catalog.first_lot() {
            self.selected_lot = first.to_string();
        }
        self.catalog = catalog;
        self.selected_wafer = None;
        self.uploaded = Some(artifact.name.clone());
        info!(
            "Uploaded '{}', selected lot reset to {}",
            artifact.name, self.selected_lot
        );
    }

    pub fn select_lot(&mut self, lot_id: &str) -> Result<(), DashboardError> {
        if !self.is_known_lot(lot_id) {
            warn!("Ignoring selection of unknown lot {}", lot_id);
            return Err(DashboardError::UnknownLot(lot_id.to_string()));
        }
        debug!("Lot {} -> {}", self.selected_lot, lot_id);
        self.selected_lot = lot_id.to_string();
        self.selected_wafer = None;
        Ok(())
    }

    pub fn select_wafer(&mut self, selection: WaferSelection) {
        debug!("Wafer {} selected ({}%)", selection.lot_id, selection.yield_percent);
        self.selected_wafer = Some(selection);
    }

    /// Grid click: yield comes from the card's classification.
    pub fn select_grid_wafer(&mut self, card: &WaferCard) {
        self.select_wafer(WaferSelection {
            id: card.lot_label.clone(),
            wafer_number: card.wafer_number.to_string(),
            lot_id: format!("{}.{}", card.lot_label, card.wafer_number),
            yield_percent: card.classification.yield_percent,
        });
    }

    /// Sidebar click: yield is a coarse random estimate in the quick-select band.
    pub fn quick_select_wafer<R: Rng>(
        &mut self,
        wafer_id: &str,
        rng: &mut R,
    ) -> Result<(), DashboardError> {
        let belongs = self
            .catalog
            .wafers(&self.selected_lot)
            .is_some_and(|wafers| wafers.iter().any(|w| w == wafer_id));
        if !belongs {
            warn!("Wafer {} is not in lot {}", wafer_id, self.selected_lot);
            return Err(DashboardError::UnknownWafer(wafer_id.to_string()));
        }

        let wafer_number = parse_wafer_id(wafer_id).map_or(1, |(_, n)| n);
        self.select_wafer(WaferSelection {
            id: self.selected_lot.clone(),
            wafer_number: wafer_number.to_string(),
            lot_id: wafer_id.to_string(),
            yield_percent: quick_yield(rng),
        });
        Ok(())
    }

    /// Switch the main view. Returns the view actually committed: asking for
    /// `query` after an upload lands on `statistics`.
    pub fn set_action_view(&mut self, requested: ActionView) -> Result<ActionView, DashboardError> {
        let target = match requested {
            ActionView::Query if self.has_catalog() => ActionView::Statistics,
            // Before an upload even `query` is refused: it only gates data views.
            view if !self.has_catalog() => {
                warn!("View {} requested before any upload", view);
                return Err(DashboardError::NoArtifactUploaded);
            }
            view => view,
        };

        debug!("View {} -> {}", self.view, target);
        self.view = target;
        self.selected_wafer = None;
        Ok(target)
    }

    /// Commit a time window. `TimeRange` needs a complete, ordered range; any
    /// other window drops the custom range.
    pub fn set_time_window(
        &mut self,
        window: TimeWindow,
        range: Option<DateRange>,
    ) -> Result<(), DashboardError> {
        if window == TimeWindow::TimeRange {
            let range = range.ok_or(DashboardError::IncompleteDateRange)?;
            if let Err(e) = validate_date_range(&range) {
                debug!("Withholding time range: {}", e);
                return Err(e);
            }
            self.custom_range = Some(range);
        } else {
            self.custom_range = None;
            self.date_picker.open = false;
        }

        debug!("Time window {} -> {}", self.time_window, window);
        self.time_window = window;
        Ok(())
    }

    pub fn toggle_date_picker(&mut self) {
        self.date_picker.open = !self.date_picker.open;
    }

    pub fn edit_start_date(&mut self, value: &str) {
        self.date_picker.draft.start_date = value.to_string();
    }

    pub fn edit_end_date(&mut self, value: &str) {
        self.date_picker.draft.end_date = value.to_string();
    }

    /// Commit the draft as a `TimeRange` window and close the picker. On error
    /// the picker stays open with the draft intact.
    pub fn submit_date_range(&mut self) -> Result<(), DashboardError> {
        let draft = self.date_picker.draft.clone();
        self.set_time_window(TimeWindow::TimeRange, Some(draft))?;
        self.date_picker.open = false;
        Ok(())
    }

    pub fn cancel_date_picker(&mut self) {
        self.date_picker.open = false;
    }

    /// Leave the heatmap for the wafer grid.
    pub fn go_back_from_heatmap(&mut self) {
        self.selected_wafer = None;
    }

    // ---------- projections ----------

    /// Lots to list: the catalog, or the demonstration lots before an upload.
    pub fn lots(&self) -> Vec<&str> {
        if self.catalog.is_empty() {
            FALLBACK_LOTS.iter().map(|(id, _)| *id).collect()
        } else {
            self.catalog.lots().collect()
        }
    }

    pub fn lot_entries(&self) -> Vec<ListEntry> {
        self.lots()
            .into_iter()
            .map(|id| ListEntry {
                id: id.to_string(),
                selected: id == self.selected_lot,
            })
            .collect()
    }

    /// Wafers of the selected lot for the sidebar. Empty before an upload.
    pub fn wafer_entries(&self) -> Vec<ListEntry> {
        let selected = self.selected_wafer.as_ref().map(|w| w.lot_id.as_str());
        self.catalog
            .wafers(&self.selected_lot)
            .unwrap_or_default()
            .iter()
            .map(|id| ListEntry {
                id: id.clone(),
                selected: selected == Some(id.as_str()),
            })
            .collect()
    }

    /// Classified wafers of the selected lot. Uploaded lots are re-drawn from
    /// `rng` on every call; demonstration lots follow their fixed pattern.
    pub fn wafer_grid<R: Rng>(&self, rng: &mut R) -> Vec<WaferCard> {
        match self.catalog.wafers(&self.selected_lot) {
            Some(wafers) => {
                let mut classifier = RandomDefectClassifier::new(rng);
                classify_cards(&mut classifier, &self.selected_lot, wafers.iter().cloned())
            }
            None => {
                let (label, _) = PatternDefectClassifier::pattern(&self.selected_lot);
                let ids = (1..=WAFERS_PER_LOT).map(|n| wafer_id(label, n));
                classify_cards(&mut PatternDefectClassifier, label, ids)
            }
        }
    }

    pub fn statistics<P: StatsProjector>(&self, projector: &P) -> StatsReport {
        projector.project(self.time_window, self.custom_range.as_ref())
    }

    pub fn range_label(&self) -> Option<String> {
        self.custom_range.as_ref().and_then(format_date_range)
    }

    pub fn main_view<R: Rng>(&self, rng: &mut R) -> MainView {
        match self.view {
            ActionView::Query => MainView::Query {
                window: self.time_window,
                range_label: self.range_label(),
                uploaded: self.uploaded.clone(),
            },
            ActionView::Statistics => MainView::Statistics(self.statistics(&CannedStatsProjector)),
            ActionView::WaferMap => match &self.selected_wafer {
                Some(wafer) => MainView::Heatmap(wafer.clone()),
                None => MainView::WaferGrid {
                    lot: self.selected_lot.clone(),
                    cards: self.wafer_grid(rng),
                },
            },
        }
    }

    fn is_known_lot(&self, lot_id: &str) -> bool {
        if self.catalog.is_empty() {
            FALLBACK_LOTS.iter().any(|(id, _)| *id == lot_id)
        } else {
            self.catalog.contains_lot(lot_id)
        }
    }
}

fn classify_cards<C: DefectClassifier>(
    classifier: &mut C,
    lot_label: &str,
    wafer_ids: impl Iterator<Item = String>,
) -> Vec<WaferCard> {
    wafer_ids
        .enumerate()
        .map(|(i, wafer_id)| {
            let wafer_number = i + 1;
            WaferCard {
                lot_label: lot_label.to_string(),
                classification: classifier.classify(lot_label, wafer_number),
                wafer_id,
                wafer_number,
            }
        })
        .collect()
}
