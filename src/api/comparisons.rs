use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::auth::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{CompareRequest, Comparison};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Comparison>>, AppError> {
    let comparisons = db::comparisons::list(&state.db, user.id).await?;
    Ok(Json(comparisons))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CompareRequest>,
) -> Result<(StatusCode, Json<Comparison>), AppError> {
    let comparison = db::comparisons::insert(&state.db, user.id, req.course_ids).await?;
    Ok((StatusCode::CREATED, Json(comparison)))
}

pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let ok = db::comparisons::delete(&state.db, user.id, id).await?;
    if ok {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
