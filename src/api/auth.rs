use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::auth::{AuthUser, bearer_token, hash_password, verify_password};
use crate::db;
use crate::error::AppError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("invalid email".to_string()));
    }
    if req.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }
    let password_hash = hash_password(&req.password)?;
    // The unique index on email decides the winner of racing
    // registrations; the loser gets the conflict, not a 500.
    let user = match db::users::insert(&state.db, &req, &password_hash).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::Conflict("email already registered".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = Uuid::new_v4().to_string();
    db::users::create_session(&state.db, &token, user.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = db::users::find_by_email(&state.db, &req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let token = Uuid::new_v4().to_string();
    db::users::create_session(&state.db, &token, user.id).await?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    if let Some(token) = bearer_token(&headers) {
        db::users::delete_session(&state.db, token).await?;
    }
    Ok(Json(json!({ "message": "Logged out successfully" })))
}

pub async fn current_user(AuthUser(user): AuthUser) -> Json<UserProfile> {
    Json(user.into())
}
