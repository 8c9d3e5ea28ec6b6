use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;

use crate::models::Comparison;

pub async fn list(db: &SqlitePool, user_id: i64) -> Result<Vec<Comparison>, sqlx::Error> {
    sqlx::query_as::<_, Comparison>(
        "SELECT id, course_ids, created_at FROM comparisons WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    user_id: i64,
    course_ids: Vec<i64>,
) -> Result<Comparison, sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    let course_ids = Json(course_ids);

    let result = sqlx::query(
        "INSERT INTO comparisons (user_id, course_ids, created_at) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(&course_ids)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(Comparison {
        id: result.last_insert_rowid(),
        course_ids,
        created_at: now,
    })
}

/// Scoped to the owner: deleting someone else's comparison reports false.
pub async fn delete(db: &SqlitePool, user_id: i64, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comparisons WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
