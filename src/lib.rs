use std::fmt;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod stats;
pub mod utils;

pub use catalog::Catalog;
pub use classifier::{DefectClassifier, DefectType, PatternDefectClassifier, RandomDefectClassifier};
pub use controller::{MainView, SelectionController, WaferCard};
pub use stats::{CannedStatsProjector, StatsProjector, StatsReport};

/// An uploaded wafer-map image, reduced to the metadata the catalog needs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Artifact {
    pub name: String,
    pub size_bytes: u64,
}

impl Artifact {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// The wafer currently opened in the heatmap.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaferSelection {
    /// Lot label shown above the wafer.
    pub id: String,
    pub wafer_number: String,
    /// `<lot>.<n>` from the grid, `<lot>_<n>` from the sidebar list.
    pub lot_id: String,
    #[serde(rename = "yield")]
    pub yield_percent: u8,
}

/// Calendar bounds for the `TIME_RANGE` window, as typed into the date inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// Both bounds filled in (whitespace does not count).
    pub fn is_complete(&self) -> bool {
        !self.start_date.trim().is_empty() && !self.end_date.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "TODAY")]
    Today,
    #[serde(rename = "LAST_24H")]
    Last24h,
    #[serde(rename = "LATEST_25")]
    Latest25,
    #[serde(rename = "LAST_3_WEEKS")]
    Last3Weeks,
    #[serde(rename = "TIME_RANGE")]
    TimeRange,
}

impl TimeWindow {
    /// Display order of the time filter buttons.
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::Today,
        TimeWindow::Last24h,
        TimeWindow::Latest25,
        TimeWindow::Last3Weeks,
        TimeWindow::TimeRange,
    ];

    pub fn token(self) -> &'static str {
        match self {
            TimeWindow::Today => "TODAY",
            TimeWindow::Last24h => "LAST_24H",
            TimeWindow::Latest25 => "LATEST_25",
            TimeWindow::Last3Weeks => "LAST_3_WEEKS",
            TimeWindow::TimeRange => "TIME_RANGE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::Today => "TODAY",
            TimeWindow::Last24h => "Last 24 Hours",
            TimeWindow::Latest25 => "Latest 25",
            TimeWindow::Last3Weeks => "Last 3 Weeks",
            TimeWindow::TimeRange => "Time Range",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Accepts either the token or the button label.
impl FromStr for TimeWindow {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TimeWindow::ALL
            .into_iter()
            .find(|w| w.token() == trimmed || w.label() == trimmed)
            .ok_or_else(|| DashboardError::UnknownTimeWindow(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionView {
    Statistics,
    WaferMap,
    Query,
}

impl ActionView {
    /// Views that only make sense once an artifact has been uploaded.
    pub fn requires_catalog(self) -> bool {
        matches!(self, ActionView::Statistics | ActionView::WaferMap)
    }

    pub fn token(self) -> &'static str {
        match self {
            ActionView::Statistics => "statistics",
            ActionView::WaferMap => "wafer-map",
            ActionView::Query => "query",
        }
    }
}

impl fmt::Display for ActionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Rejected operator input. None of these are faults: the controller stays in
/// its previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    NoArtifactUploaded,
    IncompleteDateRange,
    InvalidDate(String),
    InvertedDateRange { start: String, end: String },
    UnknownLot(String),
    UnknownWafer(String),
    UnknownTimeWindow(String),
}

impl DashboardError {
    /// Whether the shell should block with a notice instead of ignoring the input.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, DashboardError::NoArtifactUploaded)
    }
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::NoArtifactUploaded => {
                write!(f, "Please upload a wafer map image first")
            }
            DashboardError::IncompleteDateRange => {
                write!(f, "Both a start date and an end date are required")
            }
            DashboardError::InvalidDate(value) => {
                write!(f, "Invalid date '{}', expected YYYY-MM-DD", value)
            }
            DashboardError::InvertedDateRange { start, end } => write!(
                f,
                "Start date {} is after end date {}",
                start, end
            ),
            DashboardError::UnknownLot(lot) => write!(f, "Lot '{}' is not in the catalog", lot),
            DashboardError::UnknownWafer(wafer) => {
                write!(f, "Wafer '{}' does not belong to the selected lot", wafer)
            }
            DashboardError::UnknownTimeWindow(token) => {
                write!(f, "Unknown time window '{}'", token)
            }
        }
    }
}

impl std::error::Error for DashboardError {}

/// Statistics projection for JavaScript callers.
///
/// Takes a time window token (`TODAY`, `LAST_24H`, ...) or its button label and
/// returns the serialized `StatsReport`, or an error message string.
#[wasm_bindgen]
pub fn project_statistics(window: &str) -> JsValue {
    let report = match window.parse::<TimeWindow>() {
        Ok(window) => CannedStatsProjector.project(window, None),
        Err(e) => {
            return serde_wasm_bindgen::to_value(&e.to_string()).unwrap_or(JsValue::NULL);
        }
    };
    serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_window_parses_tokens_and_labels() {
        assert_eq!("LAST_24H".parse::<TimeWindow>(), Ok(TimeWindow::Last24h));
        assert_eq!("Last 3 Weeks".parse::<TimeWindow>(), Ok(TimeWindow::Last3Weeks));
        assert_eq!(" TIME_RANGE ".parse::<TimeWindow>(), Ok(TimeWindow::TimeRange));
        assert_eq!(
            "YESTERDAY".parse::<TimeWindow>(),
            Err(DashboardError::UnknownTimeWindow("YESTERDAY".to_string()))
        );
    }

    #[test]
    fn serialized_tokens_match_ui_contract() {
        assert_eq!(serde_json::to_string(&TimeWindow::Last3Weeks).unwrap(), "\"LAST_3_WEEKS\"");
        assert_eq!(serde_json::to_string(&ActionView::WaferMap).unwrap(), "\"wafer-map\"");

        let selection = WaferSelection {
            id: "D101".to_string(),
            wafer_number: "5".to_string(),
            lot_id: "D101_5".to_string(),
            yield_percent: 75,
        };
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["waferNumber"], "5");
        assert_eq!(json["lotId"], "D101_5");
        assert_eq!(json["yield"], 75);
    }

    #[test]
    fn only_missing_upload_is_user_visible() {
        assert!(DashboardError::NoArtifactUploaded.is_user_visible());
        assert!(!DashboardError::IncompleteDateRange.is_user_visible());
        assert!(!DashboardError::UnknownLot("D999".into()).is_user_visible());
    }

    #[test]
    fn date_range_completeness_ignores_whitespace() {
        assert!(DateRange::new("2024-01-01", "2024-01-31").is_complete());
        assert!(!DateRange::new("2024-01-01", "").is_complete());
        assert!(!DateRange::new("  ", "2024-01-31").is_complete());
    }
}
