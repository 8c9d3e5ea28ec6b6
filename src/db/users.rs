use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{RegisterRequest, User};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, \
     profile_image_url, study_interest, is_staff, is_superuser, created_at, updated_at";

pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &SqlitePool,
    req: &RegisterRequest,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO users
            (email, password_hash, first_name, last_name, profile_image_url,
            study_interest, is_staff, is_superuser, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, 0, 0, ?, ?)
        "#,
    )
    .bind(&req.email)
    .bind(password_hash)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.profile_image_url)
    .bind(&req.study_interest)
    .bind(&now)
    .bind(&now)
    .execute(db)
    .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        email: req.email.clone(),
        password_hash: password_hash.to_string(),
        first_name: req.first_name.clone(),
        last_name: req.last_name.clone(),
        profile_image_url: req.profile_image_url.clone(),
        study_interest: req.study_interest.clone(),
        is_staff: false,
        is_superuser: false,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn create_session(
    db: &SqlitePool,
    token: &str,
    user_id: i64,
) -> Result<(), sqlx::Error> {
    let now = Utc::now().to_rfc3339();
    sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
        .bind(token)
        .bind(user_id)
        .bind(&now)
        .execute(db)
        .await?;

    Ok(())
}

pub async fn find_by_token(db: &SqlitePool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.email, u.password_hash, u.first_name, u.last_name,
               u.profile_image_url, u.study_interest, u.is_staff, u.is_superuser,
               u.created_at, u.updated_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(db)
    .await
}

pub async fn delete_session(db: &SqlitePool, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
