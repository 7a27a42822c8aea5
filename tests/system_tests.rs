mod common;

use axum::http::StatusCode;
use common::spawn_app;

#[tokio::test]
async fn health_reports_database_and_version() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "ok");
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn metrics_endpoint_answers_when_recorder_is_absent() {
    let app = spawn_app().await;

    let (status, _) = app.get("/api/v1/metrics").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = spawn_app().await;

    let (status, _) = app.get("/api/v1/podcasts/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = spawn_app().await;

    let request = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/animes/")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "http://localhost:3000"
    );
}
