use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use crate::db::courses;
use crate::models::{CourseDetail, SavedCourseEntry};

#[derive(Debug, FromRow)]
struct SavedCourseRow {
    id: i64,
    course_id: i64,
    created_at: String,
}

pub enum SaveOutcome {
    Created(SavedCourseEntry),
    AlreadySaved,
}

pub async fn list(db: &SqlitePool, user_id: i64) -> Result<Vec<SavedCourseEntry>, sqlx::Error> {
    let rows: Vec<SavedCourseRow> = sqlx::query_as(
        "SELECT id, course_id, created_at FROM saved_courses WHERE user_id = ? ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let ids: Vec<i64> = rows.iter().map(|r| r.course_id).collect();
    let mut details: HashMap<i64, CourseDetail> = courses::find_by_ids(db, &ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            details.remove(&row.course_id).map(|course| SavedCourseEntry {
                id: row.id,
                course,
                created_at: row.created_at,
            })
        })
        .collect())
}

/// Get-or-create keyed on (user, course). The UNIQUE constraint makes
/// this safe against racing saves; the losing insert reports AlreadySaved.
pub async fn save(
    db: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<SaveOutcome, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO saved_courses (user_id, course_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, course_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .bind(&now)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(SaveOutcome::AlreadySaved);
    }

    let course = courses::find(db, course_id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    Ok(SaveOutcome::Created(SavedCourseEntry {
        id: result.last_insert_rowid(),
        course,
        created_at: now,
    }))
}

pub async fn remove(db: &SqlitePool, user_id: i64, course_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM saved_courses WHERE user_id = ? AND course_id = ?")
        .bind(user_id)
        .bind(course_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn is_saved(db: &SqlitePool, user_id: i64, course_id: i64) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT 1 FROM saved_courses WHERE user_id = ? AND course_id = ?")
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(db)
            .await?;

    Ok(row.is_some())
}
