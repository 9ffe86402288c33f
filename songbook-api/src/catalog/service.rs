//! Catalog operations
//!
//! Caller errors are detected before storage or the metadata source is
//! touched. Storage faults are surfaced as-is and never retried here.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::catalog::authors::{rename_group, resolve_or_create_group};
use crate::catalog::mutator::{update_song, MutationOutcome};
use crate::catalog::query::build_list_query;
use crate::catalog::release_date::normalize_release_date;
use crate::catalog::verses::{parse_verse, select_verse};
use crate::catalog::{CatalogError, CatalogResult};
use crate::db::songs;
use crate::enrichment::{EnrichmentClient, EnrichmentError};
use crate::models::{FieldUpdate, NewSong, Song, SongFilter, SongUpdate};
use crate::pagination::Page;

/// What an update ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Group renamed; all its songs follow
    GroupRenamed,
    /// Song row rewritten
    SongUpdated,
    /// Empty update, nothing written
    Unchanged,
}

/// Composition root for catalog operations
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: SqlitePool,
    enrichment: EnrichmentClient,
}

impl CatalogService {
    pub fn new(db: SqlitePool, enrichment: EnrichmentClient) -> Self {
        Self { db, enrichment }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    /// List songs matching `filter`, ordered by group then song name
    ///
    /// An empty result is `NotFound`.
    pub async fn list(&self, filter: &SongFilter, page: Page) -> CatalogResult<Vec<Song>> {
        debug!(?filter, ?page, "Listing catalog");

        let mut query = build_list_query(filter, page);
        let rows = query.build().fetch_all(&self.db).await?;
        let songs = rows
            .iter()
            .map(songs::song_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        if songs.is_empty() {
            return Err(CatalogError::NotFound("no songs match the filter".to_string()));
        }

        Ok(songs)
    }

    /// Song lyrics, or one verse of them
    pub async fn text(
        &self,
        group: Option<&str>,
        song: Option<&str>,
        verse: Option<&str>,
    ) -> CatalogResult<String> {
        let group = require("author", group)?;
        let song = require("song", song)?;
        let verse = parse_verse(verse)?;

        let text = songs::find_song_text(&self.db, group, song)
            .await?
            .ok_or_else(|| not_found(group, song))?;

        select_verse(&text, verse)
    }

    /// Delete one song
    pub async fn delete(&self, group: Option<&str>, song: Option<&str>) -> CatalogResult<()> {
        let group = require("author", group)?;
        let song = require("song", song)?;

        let deleted = songs::delete_song(&self.db, group, song).await?;
        if deleted == 0 {
            return Err(not_found(group, song));
        }

        info!(group = %group, song = %song, "Deleted song");
        Ok(())
    }

    /// Create a song from its identifying fields plus enriched metadata
    ///
    /// Nothing is written when enrichment fails.
    pub async fn create(&self, new_song: NewSong) -> CatalogResult<Song> {
        let group = require("group", Some(new_song.group.as_str()))?;
        let name = require("song", Some(new_song.name.as_str()))?;

        let detail = self.enrichment.enrich(group, name).await?;

        let release_date = normalize_release_date(&detail.release_date).ok_or_else(|| {
            EnrichmentError::UnexpectedResponse {
                status: 200,
                detail: format!("unrecognized release date '{}'", detail.release_date),
            }
        })?;

        let song = Song {
            group: group.to_string(),
            name: name.to_string(),
            release_date,
            text: detail.text,
            link: detail.link,
        };

        let group_id = resolve_or_create_group(&self.db, &song.group).await?;
        songs::insert_song(&self.db, &group_id, &song)
            .await
            .map_err(|e| {
                CatalogError::from_write(e, || {
                    format!("song '{}' by '{}' already exists", song.name, song.group)
                })
            })?;

        info!(group = %song.group, song = %song.name, "Created song");
        Ok(song)
    }

    /// Rename a group or update one song
    ///
    /// With no song name and only the group set in `update`, the group named
    /// `group` is renamed. Otherwise the song name is required and the song's
    /// fields are updated.
    pub async fn update(
        &self,
        group: Option<&str>,
        song: Option<&str>,
        update: SongUpdate,
    ) -> CatalogResult<UpdateOutcome> {
        let group = require("author", group)?;
        let song = song.filter(|s| !s.is_empty());

        if song.is_none() && update.is_group_only() {
            let new_name = require_set("group", &update.group)?;
            rename_group(&self.db, group, new_name).await?;
            info!(from = %group, to = %new_name, "Renamed group");
            return Ok(UpdateOutcome::GroupRenamed);
        }

        let song = song.ok_or_else(|| {
            CatalogError::InvalidInput(
                "song is required unless only the group is being renamed".to_string(),
            )
        })?;

        let update = validate_update(update)?;
        match update_song(&self.db, group, song, &update).await? {
            MutationOutcome::Updated => Ok(UpdateOutcome::SongUpdated),
            MutationOutcome::Unchanged => Ok(UpdateOutcome::Unchanged),
        }
    }
}

/// Reject missing or empty identifying values
fn require<'a>(name: &str, value: Option<&'a str>) -> CatalogResult<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CatalogError::InvalidInput(format!("{} is required", name)))
}

/// Group and song names may change but never become empty
fn require_set<'a>(name: &str, value: &'a FieldUpdate<String>) -> CatalogResult<&'a str> {
    require(name, value.as_set().map(String::as_str))
}

fn validate_update(mut update: SongUpdate) -> CatalogResult<SongUpdate> {
    if update.group.is_set() {
        require_set("group", &update.group)?;
    }
    if update.name.is_set() {
        require_set("song", &update.name)?;
    }
    if let FieldUpdate::Set(raw) = &update.release_date {
        let normalized = normalize_release_date(raw).ok_or_else(|| {
            CatalogError::InvalidInput(format!("unrecognized releaseDate '{}'", raw))
        })?;
        update.release_date = FieldUpdate::Set(normalized);
    }
    Ok(update)
}

fn not_found(group: &str, song: &str) -> CatalogError {
    CatalogError::NotFound(format!("song '{}' by '{}'", song, group))
}
