use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::{NewUniversityRequest, University, UpdateUniversityRequest};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UniversityQueryParams {
    pub country: Option<String>,
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<UniversityQueryParams>,
) -> Result<Json<Vec<University>>, AppError> {
    let universities = db::universities::list(
        &state.db,
        params.country.as_deref(),
        params.search.as_deref(),
    )
    .await?;
    Ok(Json(universities))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewUniversityRequest>,
) -> Result<(StatusCode, Json<University>), AppError> {
    let university = db::universities::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(university)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<University>, AppError> {
    let university = db::universities::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(university))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUniversityRequest>,
) -> Result<Json<University>, AppError> {
    let university = db::universities::update(&state.db, id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(university))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let ok = db::universities::delete(&state.db, id).await?;
    if ok {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
