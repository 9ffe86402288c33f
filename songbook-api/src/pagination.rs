//! Offset/limit window for catalog listing

use crate::catalog::CatalogError;

/// Optional offset and limit applied after ordering
///
/// No upper bound is enforced on `limit`; a caller may request the whole
/// catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl Page {
    /// Parse raw request values; empty strings count as absent
    ///
    /// # Examples
    /// ```
    /// use songbook_api::pagination::Page;
    ///
    /// let page = Page::parse(Some("20"), None).unwrap();
    /// assert_eq!(page.offset, Some(20));
    /// assert_eq!(page.limit, None);
    ///
    /// assert!(Page::parse(Some("ten"), None).is_err());
    /// ```
    pub fn parse(offset: Option<&str>, limit: Option<&str>) -> Result<Self, CatalogError> {
        Ok(Self {
            offset: parse_bound("offset", offset)?,
            limit: parse_bound("limit", limit)?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.offset.is_none() && self.limit.is_none()
    }
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<i64>, CatalogError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    let value: i64 = raw.parse().map_err(|_| {
        CatalogError::InvalidInput(format!("{} must be an integer, got '{}'", name, raw))
    })?;

    if value < 0 {
        return Err(CatalogError::InvalidInput(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }

    Ok(Some(value))
}
