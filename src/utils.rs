use crate::{DashboardError, DateRange};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

// `D101_5` -> ("D101", 5)
static WAFER_ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]\d+)_(\d+)$").unwrap());

/// Split a wafer id into its lot id and 1-based wafer number.
pub fn parse_wafer_id(wafer_id: &str) -> Option<(&str, usize)> {
    let captures = WAFER_ID_REGEX.captures(wafer_id.trim())?;
    let lot = captures.get(1)?.as_str();
    let number = captures[2].parse::<usize>().ok()?;
    if number == 0 {
        return None;
    }
    Some((lot, number))
}

/// Parse a `YYYY-MM-DD` value from a date input.
pub fn parse_date(input: &str) -> Result<NaiveDate, DashboardError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| DashboardError::InvalidDate(trimmed.to_string()))
}

/// Check a submitted range: both bounds present, both real dates, start ≤ end.
pub fn validate_date_range(range: &DateRange) -> Result<(NaiveDate, NaiveDate), DashboardError> {
    if !range.is_complete() {
        return Err(DashboardError::IncompleteDateRange);
    }
    let start = parse_date(&range.start_date)?;
    let end = parse_date(&range.end_date)?;
    if start > end {
        return Err(DashboardError::InvertedDateRange {
            start: range.start_date.trim().to_string(),
            end: range.end_date.trim().to_string(),
        });
    }
    Ok((start, end))
}

/// Korean locale short date, `2024. 1. 5.`
pub fn format_date_ko(date: NaiveDate) -> String {
    format!("{}. {}. {}.", date.year(), date.month(), date.day())
}

/// Display label for a custom range, or `None` unless it validates.
pub fn format_date_range(range: &DateRange) -> Option<String> {
    let (start, end) = validate_date_range(range).ok()?;
    Some(format!("{} ~ {}", format_date_ko(start), format_date_ko(end)))
}

/// `2.3` -> `+2.3%`, `-1.2` -> `-1.2%`
pub fn format_signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}%", value)
    } else {
        format!("{}%", value)
    }
}

/// Thousands separators, `2580` -> `2,580`.
pub fn format_count(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
