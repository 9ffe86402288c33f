//! Release date normalization
//!
//! The metadata source reports dates as `DD.MM.YYYY`; the catalog stores ISO
//! `YYYY-MM-DD` so filters and ordering are unambiguous.

use chrono::NaiveDate;

const ACCEPTED_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

/// Normalize a release date to ISO form
///
/// Returns `None` when the value is neither empty nor a recognized date. The
/// empty string is kept as-is (a cleared date).
pub fn normalize_release_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(String::new());
    }

    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}
