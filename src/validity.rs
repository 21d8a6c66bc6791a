//! Membership validity checks
//!
//! Exports and reports carry validity bounds as text in a handful of
//! layouts. Values that cannot be parsed never count as valid.

use crate::error::{Error, Result};
use crate::record::NOT_AVAILABLE;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

// Spreadsheet exports often drop the seconds ("2026/12/31 23:59")
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a validity bound; date-only values mean midnight
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a validity bound, warning when a non-empty value is unreadable
fn parse_bound(value: &str) -> Option<NaiveDateTime> {
    let parsed = parse_datetime(value);
    let value = value.trim();
    if parsed.is_none() && !value.is_empty() && value != NOT_AVAILABLE {
        warn!("Unrecognised validity date '{}', treating as invalid", value);
    }
    parsed
}

/// Parse a reference time given on the command line or in config
pub fn parse_reference_time(value: &str) -> Result<NaiveDateTime> {
    parse_datetime(value).ok_or_else(|| {
        Error::InvalidDate(format!(
            "'{value}' (expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)"
        ))
    })
}

/// True when the end bound is at or after `now`
pub fn is_still_valid(end: Option<&str>, now: NaiveDateTime) -> bool {
    end.and_then(parse_bound).is_some_and(|end| end >= now)
}

/// True when `at` lies within `[start, end]`, both bounds inclusive
pub fn period_covers(start: &str, end: &str, at: NaiveDateTime) -> bool {
    match (parse_bound(start), parse_bound(end)) {
        (Some(start), Some(end)) => start <= at && at <= end,
        _ => false,
    }
}
