use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::auth::AuthUser;
use crate::db;
use crate::db::saved::SaveOutcome;
use crate::error::AppError;
use crate::models::{SaveCourseRequest, SavedCourseEntry};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<SavedCourseEntry>>, AppError> {
    let entries = db::saved::list(&state.db, user.id).await?;
    Ok(Json(entries))
}

pub async fn save(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<SaveCourseRequest>,
) -> Result<Response, AppError> {
    // The foreign key does the course-existence check atomically with
    // the insert, so a concurrent delete cannot slip in between.
    match db::saved::save(&state.db, user.id, req.course_id).await {
        Ok(SaveOutcome::Created(entry)) => Ok((StatusCode::CREATED, Json(entry)).into_response()),
        Ok(SaveOutcome::AlreadySaved) => {
            Ok(Json(json!({ "message": "Course already saved" })).into_response())
        }
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(AppError::NotFound),
        Err(e) => Err(e.into()),
    }
}

pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ok = db::saved::remove(&state.db, user.id, course_id).await?;
    if ok {
        Ok(Json(json!({ "message": "Course removed from saved list" })))
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn check(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let is_saved = db::saved::is_saved(&state.db, user.id, course_id).await?;
    Ok(Json(json!({ "isSaved": is_saved })))
}
