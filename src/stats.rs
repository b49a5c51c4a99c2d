//! Canned statistics for the dashboard's statistics view.
//!
//! Every time window maps to a fixed literal report. Nothing here looks at the
//! uploaded data or at real dates; a custom date range only changes the
//! display label.

use crate::config::DEFECT_BAR_SCALE;
use crate::utils::format_date_range;
use crate::{DateRange, TimeWindow};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StatCategory {
    Center,
    #[serde(rename = "Edge-Ring")]
    EdgeRing,
    Scratch,
    Donut,
}

impl StatCategory {
    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Center => "Center",
            StatCategory::EdgeRing => "Edge-Ring",
            StatCategory::Scratch => "Scratch",
            StatCategory::Donut => "Donut",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryCount {
    pub category: StatCategory,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub rate_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryShare {
    pub category: StatCategory,
    pub percent: u32,
}

/// One row of the "top defect types" table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankedCategory {
    pub rank: usize,
    pub category: StatCategory,
    pub count: u32,
    /// Share of the summed category counts, one decimal.
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub window: TimeWindow,
    pub total_wafers: u32,
    pub defective_wafers: u32,
    pub defect_rate_percent: f64,
    pub daily_change_percent: f64,
    pub defect_type_counts: Vec<CategoryCount>,
    pub trend_series: Vec<TrendPoint>,
    pub share_breakdown: Vec<CategoryShare>,
    /// Formatted custom range, e.g. `2024. 1. 1. ~ 2024. 1. 31.`
    pub range_label: Option<String>,
}

impl StatsReport {
    pub fn defect_type_total(&self) -> u32 {
        self.defect_type_counts.iter().map(|c| c.count).sum()
    }

    /// Categories by descending count; ties keep table order.
    pub fn ranked_defect_types(&self) -> Vec<RankedCategory> {
        let total = self.defect_type_total();
        let mut sorted = self.defect_type_counts.clone();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));

        sorted
            .into_iter()
            .enumerate()
            .map(|(i, c)| RankedCategory {
                rank: i + 1,
                category: c.category,
                count: c.count,
                percent: round_one_decimal(percent_of(c.count, total)),
            })
            .collect()
    }

    pub fn trend_direction(&self) -> TrendDirection {
        if self.daily_change_percent >= 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        }
    }
}

/// Width of a frequency bar, relative to the fixed chart scale.
pub fn bar_percent(count: u32) -> f64 {
    percent_of(count, DEFECT_BAR_SCALE)
}

fn percent_of(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Source of statistics for a time window.
pub trait StatsProjector {
    fn project(&self, window: TimeWindow, custom_range: Option<&DateRange>) -> StatsReport;
}

struct Projection {
    total: u32,
    defective: u32,
    rate: f64,
    change: f64,
    counts: [(StatCategory, u32); 4],
    trend: [(&'static str, u32); 4],
    share: [(StatCategory, u32); 4],
}

use self::StatCategory::{Center, Donut, EdgeRing, Scratch};

// Also served for LAST_24H.
const DEFAULT_PROJECTION: Projection = Projection {
    total: 1234,
    defective: 196,
    rate: 15.9,
    change: 2.3,
    counts: [(Center, 120), (EdgeRing, 85), (Scratch, 80), (Donut, 60)],
    trend: [("1일", 10), ("2일", 15), ("3일", 7), ("4일", 18)],
    share: [(Center, 40), (Donut, 35), (Scratch, 15), (EdgeRing, 10)],
};

const TODAY_PROJECTION: Projection = Projection {
    total: 456,
    defective: 68,
    rate: 14.9,
    change: -1.2,
    counts: [(Center, 45), (EdgeRing, 12), (Scratch, 8), (Donut, 3)],
    trend: [("오전", 12), ("오후", 8), ("저녁", 15), ("야간", 18)],
    share: [(Center, 66), (EdgeRing, 18), (Scratch, 12), (Donut, 4)],
};

const LATEST_25_PROJECTION: Projection = Projection {
    total: 25,
    defective: 4,
    rate: 16.0,
    change: 0.5,
    counts: [(Center, 2), (EdgeRing, 1), (Scratch, 1), (Donut, 0)],
    trend: [("1시간", 8), ("2시간", 12), ("3시간", 16), ("4시간", 20)],
    share: [(Center, 50), (EdgeRing, 25), (Scratch, 25), (Donut, 0)],
};

const LAST_3_WEEKS_PROJECTION: Projection = Projection {
    total: 2580,
    defective: 412,
    rate: 16.0,
    change: 3.1,
    counts: [(Center, 180), (EdgeRing, 120), (Scratch, 80), (Donut, 32)],
    trend: [("1주차", 12), ("2주차", 18), ("3주차", 14), ("4주차", 20)],
    share: [(Center, 44), (EdgeRing, 29), (Scratch, 19), (Donut, 8)],
};

const TIME_RANGE_PROJECTION: Projection = Projection {
    total: 890,
    defective: 134,
    rate: 15.1,
    change: 1.8,
    counts: [(Center, 65), (EdgeRing, 35), (Scratch, 25), (Donut, 9)],
    trend: [("시작", 8), ("중간1", 12), ("중간2", 18), ("끝", 22)],
    share: [(Center, 48), (EdgeRing, 26), (Scratch, 19), (Donut, 7)],
};

/// Lookup over the literal projection table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CannedStatsProjector;

impl CannedStatsProjector {
    fn table(window: TimeWindow) -> &'static Projection {
        match window {
            TimeWindow::Today => &TODAY_PROJECTION,
            TimeWindow::Last24h => &DEFAULT_PROJECTION,
            TimeWindow::Latest25 => &LATEST_25_PROJECTION,
            TimeWindow::Last3Weeks => &LAST_3_WEEKS_PROJECTION,
            TimeWindow::TimeRange => &TIME_RANGE_PROJECTION,
        }
    }
}

impl StatsProjector for CannedStatsProjector {
    fn project(&self, window: TimeWindow, custom_range: Option<&DateRange>) -> StatsReport {
        let p = Self::table(window);
        StatsReport {
            window,
            total_wafers: p.total,
            defective_wafers: p.defective,
            defect_rate_percent: p.rate,
            daily_change_percent: p.change,
            defect_type_counts: p
                .counts
                .iter()
                .map(|&(category, count)| CategoryCount { category, count })
                .collect(),
            trend_series: p
                .trend
                .iter()
                .map(|&(label, rate_percent)| TrendPoint {
                    label: label.to_string(),
                    rate_percent,
                })
                .collect(),
            share_breakdown: p
                .share
                .iter()
                .map(|&(category, percent)| CategoryShare { category, percent })
                .collect(),
            range_label: custom_range.and_then(format_date_range),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(window: TimeWindow) -> StatsReport {
        CannedStatsProjector.project(window, None)
    }

    #[test]
    fn today_headline_numbers() {
        let report = project(TimeWindow::Today);
        assert_eq!(report.total_wafers, 456);
        assert_eq!(report.defective_wafers, 68);
        assert_eq!(report.defect_rate_percent, 14.9);
        assert_eq!(report.daily_change_percent, -1.2);
        assert_eq!(report.trend_direction(), TrendDirection::Down);
    }

    #[test]
    fn latest_25_headline_numbers() {
        let report = project(TimeWindow::Latest25);
        assert_eq!(report.total_wafers, 25);
        assert_eq!(report.defective_wafers, 4);
        assert_eq!(report.defect_rate_percent, 16.0);
        assert_eq!(report.trend_direction(), TrendDirection::Up);
    }

    #[test]
    fn last_24h_is_the_default_table() {
        let report = project(TimeWindow::Last24h);
        assert_eq!(report.total_wafers, 1234);
        assert_eq!(report.defective_wafers, 196);
        assert_eq!(report.defect_rate_percent, 15.9);
        assert_eq!(report.daily_change_percent, 2.3);
        assert_eq!(report.share_breakdown[1].category, StatCategory::Donut);
    }

    #[test]
    fn every_window_has_four_points_and_full_share() {
        for window in TimeWindow::ALL {
            let report = project(window);
            assert_eq!(report.window, window);
            assert_eq!(report.trend_series.len(), 4);
            assert_eq!(report.defect_type_counts.len(), 4);
            let share: u32 = report.share_breakdown.iter().map(|s| s.percent).sum();
            assert_eq!(share, 100, "{:?}", window);
        }
    }

    #[test]
    fn trend_labels_follow_window() {
        let labels: Vec<String> = project(TimeWindow::Last3Weeks)
            .trend_series
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, vec!["1주차", "2주차", "3주차", "4주차"]);
    }

    #[test]
    fn ranking_sorts_by_count_with_stable_ties() {
        let ranked = project(TimeWindow::Latest25).ranked_defect_types();
        let order: Vec<StatCategory> = ranked.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![StatCategory::Center, StatCategory::EdgeRing, StatCategory::Scratch, StatCategory::Donut]
        );
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].percent, 50.0);
        assert_eq!(ranked[3].percent, 0.0);
    }

    #[test]
    fn ranking_percent_is_rounded_share_of_total() {
        let report = project(TimeWindow::Today);
        assert_eq!(report.defect_type_total(), 68);
        let ranked = report.ranked_defect_types();
        // 45 / 68 = 66.17..
        assert_eq!(ranked[0].percent, 66.2);
        assert_eq!(ranked[3].percent, 4.4);
    }

    #[test]
    fn bar_width_uses_fixed_scale() {
        assert_eq!(bar_percent(100), 25.0);
        assert_eq!(bar_percent(0), 0.0);
    }

    #[test]
    fn custom_range_only_changes_label() {
        let range = DateRange::new("2024-01-01", "2024-01-31");
        let with_range = CannedStatsProjector.project(TimeWindow::TimeRange, Some(&range));
        let without = project(TimeWindow::TimeRange);

        assert_eq!(with_range.range_label.as_deref(), Some("2024. 1. 1. ~ 2024. 1. 31."));
        assert_eq!(without.range_label, None);
        assert_eq!(with_range.total_wafers, without.total_wafers);
        assert_eq!(with_range.trend_series, without.trend_series);
    }
}
