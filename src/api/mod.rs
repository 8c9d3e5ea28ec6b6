mod auth;
mod comparisons;
mod courses;
mod saved;
mod universities;

use axum::routing::{delete, get, post};
use axum::{Router, extract::State, http::StatusCode};

use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/universities/",
            get(universities::list).post(universities::create),
        )
        .route(
            "/universities/{id}/",
            get(universities::detail)
                .put(universities::update)
                .patch(universities::update)
                .delete(universities::remove),
        )
        .route("/courses/", get(courses::list).post(courses::create))
        .route("/courses/popular/", get(courses::popular))
        .route(
            "/courses/{id}/",
            get(courses::detail)
                .put(courses::update)
                .patch(courses::update)
                .delete(courses::remove),
        )
        .route("/compare-courses/", post(courses::compare))
        .route("/auth/register/", post(auth::register))
        .route("/auth/login/", post(auth::login))
        .route("/auth/logout/", post(auth::logout))
        .route("/auth/user/", get(auth::current_user))
        .route("/saved-courses/", get(saved::list).post(saved::save))
        .route("/saved-courses/{course_id}/", delete(saved::remove))
        .route("/saved-courses/{course_id}/check/", get(saved::check))
        .route(
            "/comparisons/",
            get(comparisons::list).post(comparisons::create),
        )
        .route("/comparisons/{id}/", delete(comparisons::remove))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}
