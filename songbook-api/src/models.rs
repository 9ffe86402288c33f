//! Catalog data types
//!
//! JSON field names follow the public API: `group`, `song`, `releaseDate`,
//! `text`, `link`.

use serde::{Deserialize, Deserializer, Serialize};

/// A song as returned by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Performing group name
    pub group: String,
    /// Song title
    #[serde(rename = "song")]
    pub name: String,
    /// ISO date (`YYYY-MM-DD`) or empty
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    /// Lyrics, verses separated by a blank line
    pub text: String,
    /// External URI
    pub link: String,
}

/// Identifying fields of a song to create
///
/// Any other fields in the request body are accepted and ignored; they are
/// supplied by the enrichment source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSong {
    #[serde(default)]
    pub group: String,
    #[serde(default, rename = "song")]
    pub name: String,
}

/// Song attributes provided by the external metadata source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongDetail {
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Exact-match filter for listing
///
/// `None` disables a predicate. An empty string can therefore never be used
/// as a filter value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongFilter {
    /// Build a filter from raw request values, dropping empty ones
    pub fn from_raw(
        group: Option<String>,
        name: Option<String>,
        release_date: Option<String>,
        text: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            group: non_empty(group),
            name: non_empty(name),
            release_date: non_empty(release_date),
            text: non_empty(text),
            link: non_empty(link),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Presence-aware value of a partial update
///
/// A field absent from the JSON body deserializes (via `#[serde(default)]`) to
/// `Unchanged`; any present string, including `""`, becomes `Set`. JSON
/// `null` is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }

    pub fn as_set(&self) -> Option<&T> {
        match self {
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Unchanged => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(FieldUpdate::Set)
    }
}

/// Partial song update
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SongUpdate {
    #[serde(default)]
    pub group: FieldUpdate<String>,
    #[serde(default, rename = "song")]
    pub name: FieldUpdate<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: FieldUpdate<String>,
    #[serde(default)]
    pub text: FieldUpdate<String>,
    #[serde(default)]
    pub link: FieldUpdate<String>,
}

impl SongUpdate {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        !(self.group.is_set()
            || self.name.is_set()
            || self.release_date.is_set()
            || self.text.is_set()
            || self.link.is_set())
    }

    /// True when the group is the only field set
    pub fn is_group_only(&self) -> bool {
        self.group.is_set()
            && !(self.name.is_set()
                || self.release_date.is_set()
                || self.text.is_set()
                || self.link.is_set())
    }
}
