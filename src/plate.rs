//! License plate validation
//!
//! Exports carry free-form plate cells. Only values matching the mainland
//! plate layout are grouped; everything else is reported as invalid.

use once_cell::sync::Lazy;
use regex::Regex;

static PLATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[京津沪渝冀豫云辽黑湘皖鲁新苏浙赣鄂桂甘晋蒙陕吉闽贵粤青藏川宁琼使领][A-Z][A-Z0-9]{4,5}[A-Z0-9挂学警港澳]?$",
    )
    .expect("plate pattern is valid")
});

/// Placeholder values spreadsheet tools write for empty cells.
const EMPTY_PLACEHOLDERS: &[&str] = &["nan", "None", "NaN", "null"];

/// Check whether a trimmed value looks like a plate number
pub fn is_valid_plate(plate: &str) -> bool {
    PLATE_REGEX.is_match(plate)
}

/// Trim a raw cell, mapping empty cells and placeholders to `None`
pub fn normalize_cell(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || EMPTY_PLACEHOLDERS.contains(&value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Split a plate list given as commas and/or newlines
pub fn parse_plate_list(text: &str) -> Vec<String> {
    text.split(|c| c == ',' || c == '\n' || c == '，')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
