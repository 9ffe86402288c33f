//! Verse selection over stored lyrics
//!
//! Verses are separated by one blank line. Verse numbers are 1-based; 0 means
//! the whole text.

use crate::catalog::CatalogError;

/// Parse a raw verse parameter
///
/// Absent or empty means the whole text. Non-numeric and negative values are
/// caller errors.
pub fn parse_verse(raw: Option<&str>) -> Result<usize, CatalogError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0),
        Some(raw) => raw,
    };

    let verse: i64 = raw.parse().map_err(|_| {
        CatalogError::InvalidInput(format!("verse must be an integer, got '{}'", raw))
    })?;

    usize::try_from(verse).map_err(|_| {
        CatalogError::InvalidInput(format!("verse must not be negative, got {}", verse))
    })
}

/// Select a verse from `text`
pub fn select_verse(text: &str, verse: usize) -> Result<String, CatalogError> {
    if verse == 0 {
        return Ok(text.to_string());
    }

    let normalized = text.replace("\r\n", "\n");
    let verses: Vec<&str> = normalized.split("\n\n").collect();

    verses
        .get(verse - 1)
        .map(|v| v.to_string())
        .ok_or_else(|| {
            CatalogError::InvalidInput(format!(
                "verse {} out of range (song has {} verses)",
                verse,
                verses.len()
            ))
        })
}
