//! Partial song updates
//!
//! Only fields present in the update end up in the SET clause, each as a bound
//! parameter. A new group name is resolved (or created) first and the song is
//! re-pointed at that group's id.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::catalog::authors::resolve_or_create_group;
use crate::catalog::{CatalogError, CatalogResult};
use crate::models::SongUpdate;

/// Result of a song update that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The row was rewritten
    Updated,
    /// Nothing to change; the store was not touched
    Unchanged,
}

/// Column values to write, with the group already resolved to an id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongAssignments {
    pub group_id: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongAssignments {
    pub fn is_empty(&self) -> bool {
        self.group_id.is_none()
            && self.name.is_none()
            && self.release_date.is_none()
            && self.text.is_none()
            && self.link.is_none()
    }
}

/// Build the UPDATE for one song, or `None` when there is nothing to set
pub fn build_update_statement<'a>(
    assignments: &'a SongAssignments,
    group: &'a str,
    song: &'a str,
) -> Option<QueryBuilder<'a, Sqlite>> {
    if assignments.is_empty() {
        return None;
    }

    let columns = [
        ("group_id", &assignments.group_id),
        ("name", &assignments.name),
        ("release_date", &assignments.release_date),
        ("text", &assignments.text),
        ("link", &assignments.link),
    ];

    let mut qb = QueryBuilder::new("UPDATE songs SET ");
    for (column, value) in columns {
        if let Some(value) = value {
            qb.push(column).push(" = ").push_bind(value.as_str()).push(", ");
        }
    }
    qb.push("updated_at = CURRENT_TIMESTAMP");

    qb.push(" WHERE name = ")
        .push_bind(song)
        .push(" AND group_id IN (SELECT guid FROM groups WHERE name = ")
        .push_bind(group)
        .push(")");

    Some(qb)
}

/// Apply a partial update to the song addressed by (group, song)
///
/// Zero rows matched is reported as not-found.
pub async fn update_song(
    pool: &SqlitePool,
    group: &str,
    song: &str,
    update: &SongUpdate,
) -> CatalogResult<MutationOutcome> {
    if update.is_empty() {
        debug!(group = %group, song = %song, "Empty update, nothing to do");
        return Ok(MutationOutcome::Unchanged);
    }

    let group_id = match update.group.as_set() {
        Some(new_group) => Some(resolve_or_create_group(pool, new_group).await?),
        None => None,
    };

    let assignments = SongAssignments {
        group_id,
        name: update.name.as_set().cloned(),
        release_date: update.release_date.as_set().cloned(),
        text: update.text.as_set().cloned(),
        link: update.link.as_set().cloned(),
    };

    let Some(mut statement) = build_update_statement(&assignments, group, song) else {
        return Ok(MutationOutcome::Unchanged);
    };

    let result = statement.build().execute(pool).await.map_err(|e| {
        CatalogError::from_write(e, || {
            "another song with the same group and name already exists".to_string()
        })
    })?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::NotFound(format!("song '{}' by '{}'", song, group)));
    }

    debug!(group = %group, song = %song, "Updated song");
    Ok(MutationOutcome::Updated)
}
