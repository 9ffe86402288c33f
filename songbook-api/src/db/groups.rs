//! Group (performing artist) rows

use sqlx::SqlitePool;

/// Look up a group id by exact name
pub async fn find_group_id(pool: &SqlitePool, name: &str) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar("SELECT guid FROM groups WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

/// Insert a group unless one with the same name exists
///
/// Returns true when this call created the row.
pub async fn insert_group_if_absent(
    pool: &SqlitePool,
    guid: &str,
    name: &str,
) -> sqlx::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO groups (guid, name, created_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(name) DO NOTHING
        "#,
    )
    .bind(guid)
    .bind(name)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Rename a group, returning rows affected
pub async fn rename_group(pool: &SqlitePool, old_name: &str, new_name: &str) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE groups SET name = ? WHERE name = ?")
        .bind(new_name)
        .bind(old_name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
