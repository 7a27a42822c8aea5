//! API-key identification and role checks.

mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn reads_are_public() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/v1/genres/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn anonymous_write_is_unauthorized() {
    let app = spawn_app().await;

    let (status, body) = app
        .request("POST", "/api/v1/animes/", None, Some(json!({ "name": "Anon" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn unknown_key_is_unauthorized_even_on_reads() {
    let app = spawn_app().await;

    let (status, _) = app.get_as("/api/v1/animes/", "not-a-real-key").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn member_cannot_write_staff_routes() {
    let app = spawn_app().await;

    let (status, _) = app
        .post("/api/v1/genres/", &app.member_key, json!({ "name": "Nope" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post("/api/v1/animes/", &app.contributor_key, json!({ "name": "Nope" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get("/api/v1/genres/").await;
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn contributor_edits_people_but_only_staff_restores() {
    let app = spawn_app().await;

    let (status, _) = app
        .post("/api/v1/persons/", &app.member_key, json!({ "name": "Kana Hanazawa" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            "/api/v1/persons/",
            &app.contributor_key,
            json!({ "name": "Kana Hanazawa" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .delete(&format!("/api/v1/persons/{id}"), &app.contributor_key)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let restore = format!("/api/v1/persons/{id}/restore");
    let (status, _) = app
        .request("POST", &restore, Some(&app.contributor_key), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request("POST", &restore, Some(&app.staff_key), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bearer_token_identifies_user() {
    let app = spawn_app().await;

    let request = axum::http::Request::builder()
        .uri("/api/v1/users/me")
        .header("Authorization", format!("Bearer {}", app.staff_key))
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = app.get_as("/api/v1/users/me", &app.member_key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "yuki");
    assert_eq!(body["data"]["role"], "member");
    assert!(body["data"].get("api_key").is_none());

    let (status, _) = app.get("/api/v1/users/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rotated_key_replaces_the_old_one() {
    let app = spawn_app().await;

    let new_key = app.state.store().regenerate_api_key("yuki").await.unwrap();
    assert_ne!(new_key, app.member_key);

    let (status, _) = app.get_as("/api/v1/users/me", &app.member_key).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get_as("/api/v1/users/me", &new_key).await;
    assert_eq!(status, StatusCode::OK);
}
