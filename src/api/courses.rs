use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::{
    CompareRequest, CourseDetail, CourseSummary, NewCourseRequest, UpdateCourseRequest,
};
use crate::query::{CourseQuery, CourseQueryParams};
use crate::state::AppState;

const DEFAULT_POPULAR_LIMIT: i64 = 6;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<Vec<CourseSummary>>, AppError> {
    let query = CourseQuery::from_params(params)?;
    let courses = db::courses::list(&state.db, &query).await?;
    Ok(Json(courses))
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<String>,
}

pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> Result<Json<Vec<CourseSummary>>, AppError> {
    let limit = match params.limit.as_deref() {
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest("limit must be an integer".to_string()))?
            .clamp(1, crate::query::MAX_LIMIT),
        None => DEFAULT_POPULAR_LIMIT,
    };
    let courses = db::courses::popular(&state.db, limit).await?;
    Ok(Json(courses))
}

pub async fn compare(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<Vec<CourseDetail>>, AppError> {
    let courses = db::courses::find_by_ids(&state.db, &req.course_ids).await?;
    Ok(Json(courses))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<CourseDetail>), AppError> {
    if db::universities::find(&state.db, req.university_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "unknown universityId: {}",
            req.university_id
        )));
    }

    let course = db::courses::insert(&state.db, req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CourseDetail>, AppError> {
    let course = db::courses::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<CourseDetail>, AppError> {
    if let Some(university_id) = req.university_id {
        if db::universities::find(&state.db, university_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "unknown universityId: {university_id}"
            )));
        }
    }

    let course = db::courses::update(&state.db, id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let ok = db::courses::delete(&state.db, id).await?;
    if ok {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
