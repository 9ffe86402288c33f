//! Group resolution and rename

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{CatalogError, CatalogResult};
use crate::db::groups;

/// Find a group id by name, creating the group on a miss
///
/// Read first, then a conditional insert keyed on the unique name. When two
/// callers race on a new name, the loser's insert is a no-op and the re-read
/// returns the winner's id, so no duplicate group is created.
pub async fn resolve_or_create_group(pool: &SqlitePool, name: &str) -> CatalogResult<String> {
    if let Some(id) = groups::find_group_id(pool, name).await? {
        return Ok(id);
    }

    let guid = Uuid::new_v4().to_string();
    if groups::insert_group_if_absent(pool, &guid, name).await? {
        debug!(group = %name, guid = %guid, "Created group");
        return Ok(guid);
    }

    debug!(group = %name, "Group created concurrently, re-reading id");
    groups::find_group_id(pool, name)
        .await?
        .ok_or(CatalogError::Storage(sqlx::Error::RowNotFound))
}

/// Rename a group; every song under it follows
///
/// Renaming onto an existing group name is a conflict; the two groups are not
/// merged.
pub async fn rename_group(pool: &SqlitePool, old_name: &str, new_name: &str) -> CatalogResult<()> {
    let renamed = groups::rename_group(pool, old_name, new_name)
        .await
        .map_err(|e| {
            CatalogError::from_write(e, || format!("group '{}' already exists", new_name))
        })?;

    if renamed == 0 {
        return Err(CatalogError::NotFound(format!("group '{}'", old_name)));
    }

    debug!(from = %old_name, to = %new_name, "Renamed group");
    Ok(())
}
