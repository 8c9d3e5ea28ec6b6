#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use coursefinder::api::router;
use coursefinder::state::AppState;

pub async fn app() -> Router {
    // Single connection so the in-memory database is shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    router(AppState { db: pool })
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };

    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "GET", uri, None, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "POST", uri, None, Some(body)).await
}

pub async fn seed_university(app: &Router, name: &str, country: &str, city: &str) -> i64 {
    let (status, body) = post(
        app,
        "/universities/",
        json!({ "name": name, "country": country, "city": city }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("university id")
}

pub async fn seed_course(app: &Router, university_id: i64, overrides: Value) -> i64 {
    let mut body = json!({
        "title": "Introductory Course",
        "universityId": university_id,
        "level": "Bachelor's",
        "subject": "General Studies",
        "duration": "3 years",
        "format": "On-campus",
    });
    if let (Value::Object(base), Value::Object(extra)) = (&mut body, overrides) {
        for (key, value) in extra {
            base.insert(key, value);
        }
    }

    let (status, body) = post(app, "/courses/", body).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("course id")
}

/// Registers an account and returns its session token.
pub async fn register_user(app: &Router, email: &str) -> String {
    let (status, body) = post(
        app,
        "/auth/register/",
        json!({ "email": email, "password": "correct-horse" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().expect("session token").to_string()
}

pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item["id"].as_i64().expect("item id"))
        .collect()
}
