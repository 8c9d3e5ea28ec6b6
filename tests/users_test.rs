mod common;

use axum::http::StatusCode;
use common::{app, get, ids, post, register_user, request, seed_course, seed_university};
use serde_json::json;

#[tokio::test]
async fn register_login_and_profile() {
    let app = app().await;

    let (status, body) = post(
        &app,
        "/auth/register/",
        json!({
            "email": "ada@example.com",
            "password": "difference-engine",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "studyInterest": "Mathematics",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert!(body["user"]["password"].is_null());
    assert!(body["user"].get("passwordHash").is_none());

    // Duplicate email is rejected.
    let (status, _) = post(
        &app,
        "/auth/register/",
        json!({ "email": "ada@example.com", "password": "difference-engine" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Wrong password is rejected.
    let (status, _) = post(
        &app,
        "/auth/login/",
        json!({ "email": "ada@example.com", "password": "analytical-engine" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post(
        &app,
        "/auth/login/",
        json!({ "email": "ada@example.com", "password": "difference-engine" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = request(&app, "GET", "/auth/user/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["studyInterest"], "Mathematics");

    let (status, _) = request(&app, "POST", "/auth/logout/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&app, "GET", "/auth/user/", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_validates_input() {
    let app = app().await;

    let (status, _) = post(
        &app,
        "/auth/register/",
        json!({ "email": "not-an-email", "password": "long-enough" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/auth/register/",
        json!({ "email": "x@example.com", "password": "short" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_endpoints_require_a_token() {
    let app = app().await;

    for uri in ["/auth/user/", "/saved-courses/", "/comparisons/"] {
        let (status, _) = get(&app, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }

    let (status, _) = request(
        &app,
        "GET",
        "/saved-courses/",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn saving_a_course_is_idempotent() {
    let app = app().await;
    let uni = seed_university(&app, "Uni", "USA", "Boston").await;
    let course = seed_course(&app, uni, json!({ "title": "Databases" })).await;
    let token = register_user(&app, "sam@example.com").await;

    let (status, body) = request(
        &app,
        "GET",
        &format!("/saved-courses/{course}/check/"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isSaved"], false);

    let (status, body) = request(
        &app,
        "POST",
        "/saved-courses/",
        Some(&token),
        Some(json!({ "courseId": course })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["course"]["title"], "Databases");
    assert_eq!(body["course"]["university"]["name"], "Uni");

    // Second save reports the benign outcome instead of erroring.
    let (status, body) = request(
        &app,
        "POST",
        "/saved-courses/",
        Some(&token),
        Some(json!({ "courseId": course })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course already saved");

    let (status, body) = request(&app, "GET", "/saved-courses/", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/saved-courses/{course}/check/"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["isSaved"], true);
}

#[tokio::test]
async fn saved_courses_are_scoped_per_user() {
    let app = app().await;
    let uni = seed_university(&app, "Uni", "USA", "Boston").await;
    let course = seed_course(&app, uni, json!({ "title": "Networks" })).await;
    let alice = register_user(&app, "alice@example.com").await;
    let bob = register_user(&app, "bob@example.com").await;

    let (status, _) = request(
        &app,
        "POST",
        "/saved-courses/",
        Some(&alice),
        Some(json!({ "courseId": course })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = request(&app, "GET", "/saved-courses/", Some(&bob), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/saved-courses/{course}/check/"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(body["isSaved"], false);

    // Bob cannot remove Alice's bookmark.
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/saved-courses/{course}/"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_saved_courses() {
    let app = app().await;
    let uni = seed_university(&app, "Uni", "USA", "Boston").await;
    let course = seed_course(&app, uni, json!({})).await;
    let token = register_user(&app, "sam@example.com").await;

    // Removing before saving is a not-found, not a success.
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/saved-courses/{course}/"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Saving an unknown course is a not-found as well.
    let (status, _) = request(
        &app,
        "POST",
        "/saved-courses/",
        Some(&token),
        Some(json!({ "courseId": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "POST",
        "/saved-courses/",
        Some(&token),
        Some(json!({ "courseId": course })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/saved-courses/{course}/"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Course removed from saved list");

    let (_, body) = request(&app, "GET", "/saved-courses/", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn deleting_a_university_cascades_to_saved_courses() {
    let app = app().await;
    let uni = seed_university(&app, "Doomed", "USA", "Nowhere").await;
    let course = seed_course(&app, uni, json!({})).await;
    let token = register_user(&app, "sam@example.com").await;

    let (status, _) = request(
        &app,
        "POST",
        "/saved-courses/",
        Some(&token),
        Some(json!({ "courseId": course })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request(&app, "DELETE", &format!("/universities/{uni}/"), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = request(&app, "GET", "/saved-courses/", Some(&token), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/saved-courses/{course}/check/"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["isSaved"], false);
}

#[tokio::test]
async fn comparison_lifecycle() {
    let app = app().await;
    let uni = seed_university(&app, "Uni", "USA", "Boston").await;
    let a = seed_course(&app, uni, json!({ "title": "A" })).await;
    let b = seed_course(&app, uni, json!({ "title": "B" })).await;
    let alice = register_user(&app, "alice@example.com").await;
    let bob = register_user(&app, "bob@example.com").await;

    // Unknown ids are accepted; the list is stored verbatim.
    let (status, body) = request(
        &app,
        "POST",
        "/comparisons/",
        Some(&alice),
        Some(json!({ "courseIds": [a, b, 999] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let comparison_id = body["id"].as_i64().unwrap();
    assert_eq!(body["courseIds"], json!([a, b, 999]));

    let (status, body) = request(&app, "GET", "/comparisons/", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![comparison_id]);

    // Bob sees no comparisons and cannot delete Alice's.
    let (_, body) = request(&app, "GET", "/comparisons/", Some(&bob), None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/comparisons/{comparison_id}/"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/comparisons/{comparison_id}/"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/comparisons/{comparison_id}/"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
