//! Cache-aside behaviour of list endpoints.

mod common;

use axum::http::StatusCode;
use beehive::models::anime::AnimeInput;
use common::{spawn_app, spawn_app_with};
use serde_json::json;

#[tokio::test]
async fn list_is_served_from_cache_until_a_write_invalidates_it() {
    let app = spawn_app().await;
    app.create_anime(json!({ "name": "Trigun" })).await;

    let (_, body) = app.get("/api/v1/animes/").await;
    assert_eq!(body["data"]["count"], 1);

    // Written behind the API's back, so nothing invalidates the cached page.
    app.state
        .shared
        .anime_service
        .create(AnimeInput::named("Hellsing"))
        .await
        .unwrap();

    let (_, body) = app.get("/api/v1/animes/").await;
    assert_eq!(body["data"]["count"], 1);

    // A write to another kind leaves anime pages alone.
    app.create_named("genres", "Western").await;
    let (_, body) = app.get("/api/v1/animes/").await;
    assert_eq!(body["data"]["count"], 1);

    app.create_anime(json!({ "name": "Gungrave" })).await;
    let (_, body) = app.get("/api/v1/animes/").await;
    assert_eq!(body["data"]["count"], 3);
}

#[tokio::test]
async fn query_parameter_order_shares_a_cache_entry() {
    let app = spawn_app().await;
    app.create_anime(json!({ "name": "Eden of the East" })).await;

    let (_, first) = app.get("/api/v1/animes/?page=1&page_size=5").await;

    app.state
        .shared
        .anime_service
        .create(AnimeInput::named("Paprika"))
        .await
        .unwrap();

    let (_, second) = app.get("/api/v1/animes/?page_size=5&page=1").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn disabled_cache_always_reads_through() {
    let app = spawn_app_with(|config| config.cache.enabled = false).await;
    app.create_anime(json!({ "name": "Nana" })).await;

    let (_, body) = app.get("/api/v1/animes/").await;
    assert_eq!(body["data"]["count"], 1);

    app.state
        .shared
        .anime_service
        .create(AnimeInput::named("Paradise Kiss"))
        .await
        .unwrap();

    let (status, body) = app.get("/api/v1/animes/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 2);
}

#[tokio::test]
async fn review_writes_invalidate_review_listing() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Planetes" })).await;
    let uri = format!("/api/v1/animes/{anime}/reviews");

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"], json!([]));

    app.post(&uri, &app.member_key, json!({ "rating": 9, "comment": "Debris" }))
        .await;

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn fill_started_before_an_invalidation_is_not_stored() {
    let app = spawn_app().await;
    let cache = &app.state.shared.cache;
    let key = "/api/v1/animes/?page=1";

    // The write and its invalidation land while the page is being computed.
    let value = cache
        .fetch(key, || async {
            cache.invalidate(&["/api/v1/animes".to_string()]).await;
            Ok::<_, anyhow::Error>(json!({ "count": 0 }))
        })
        .await
        .unwrap();
    assert_eq!(value, json!({ "count": 0 }));

    let stored = app.state.shared.store.cache_repo().get(key).await.unwrap();
    assert!(stored.is_none());

    let value = cache
        .fetch(key, || async { Ok::<_, anyhow::Error>(json!({ "count": 1 })) })
        .await
        .unwrap();
    assert_eq!(value, json!({ "count": 1 }));

    let stored = app.state.shared.store.cache_repo().get(key).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn clearing_during_a_fill_discards_it() {
    let app = spawn_app().await;
    let cache = &app.state.shared.cache;
    let key = "/api/v1/genres/";

    cache
        .fetch(key, || async {
            cache.clear().await?;
            Ok::<_, anyhow::Error>(json!([]))
        })
        .await
        .unwrap();

    let stored = app.state.shared.store.cache_repo().get(key).await.unwrap();
    assert!(stored.is_none());
}

#[tokio::test]
async fn expiry_past_the_time_range_is_an_error() {
    let app = spawn_app().await;
    let repo = app.state.shared.store.cache_repo();

    let result = repo
        .put("/api/v1/animes/", "{}".to_string(), chrono::Duration::MAX)
        .await;
    assert!(result.is_err());
    assert!(repo.get("/api/v1/animes/").await.unwrap().is_none());

    repo.put("/api/v1/animes/", "{}".to_string(), chrono::Duration::days(365))
        .await
        .unwrap();
    assert!(repo.get("/api/v1/animes/").await.unwrap().is_some());
}

#[tokio::test]
async fn oversized_ttl_is_capped_instead_of_overflowing() {
    let app = spawn_app_with(|config| config.cache.ttl_seconds = u64::MAX).await;
    app.create_anime(json!({ "name": "Akagi" })).await;

    let (status, body) = app.get("/api/v1/animes/").await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let stored = app
        .state
        .shared
        .store
        .cache_repo()
        .get("/api/v1/animes/")
        .await
        .unwrap();
    assert!(stored.is_some());
}
