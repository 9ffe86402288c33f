//! Song rows
//!
//! Songs are addressed by (group name, song name); the row guid never leaves
//! this module.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::models::Song;

/// Map a listing row (see `catalog::query`) to a song
pub fn song_from_row(row: &SqliteRow) -> sqlx::Result<Song> {
    Ok(Song {
        group: row.try_get("group_name")?,
        name: row.try_get("song_name")?,
        release_date: row.try_get("release_date")?,
        text: row.try_get("text")?,
        link: row.try_get("link")?,
    })
}

/// Fetch the lyrics of one song
pub async fn find_song_text(
    pool: &SqlitePool,
    group: &str,
    song: &str,
) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar(
        r#"
        SELECT s.text
        FROM songs s
        INNER JOIN groups g ON g.guid = s.group_id
        WHERE g.name = ? AND s.name = ?
        "#,
    )
    .bind(group)
    .bind(song)
    .fetch_optional(pool)
    .await
}

/// Insert a song under an existing group
pub async fn insert_song(pool: &SqlitePool, group_id: &str, song: &Song) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO songs (
            guid, group_id, name, release_date, text, link, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(group_id)
    .bind(&song.name)
    .bind(&song.release_date)
    .bind(&song.text)
    .bind(&song.link)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete one song, returning rows affected
pub async fn delete_song(pool: &SqlitePool, group: &str, song: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM songs
        WHERE name = ?
          AND group_id IN (SELECT guid FROM groups WHERE name = ?)
        "#,
    )
    .bind(song)
    .bind(group)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
