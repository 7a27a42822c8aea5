//! Playlists and news.

mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn playlist_owner_manages_items() {
    let app = spawn_app().await;
    let first = app.create_anime(json!({ "name": "Serial Experiments Lain" })).await;
    let second = app.create_anime(json!({ "name": "Ergo Proxy" })).await;

    let (status, body) = app
        .post("/api/v1/playlists/", &app.member_key, json!({ "name": "Cyberpunk" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["items"], json!([]));
    let id = body["data"]["id"].as_i64().unwrap();
    let items = format!("/api/v1/playlists/{id}/items");

    for anime in [first, second, first] {
        let (status, _) = app
            .post(&items, &app.member_key, json!({ "anime_id": anime }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app.get(&format!("/api/v1/playlists/{id}")).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .delete(&format!("{items}/{first}"), &app.member_key)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["id"], second);

    let (status, _) = app
        .delete(&format!("{items}/{first}"), &app.member_key)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(&items, &app.member_key, json!({ "anime_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn playlist_is_owner_only() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Akagi" })).await;

    let (_, body) = app
        .post("/api/v1/playlists/", &app.member_key, json!({ "name": "Mahjong" }))
        .await;
    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/playlists/{id}");

    let (status, _) = app
        .post(&format!("{uri}/items"), &app.other_member_key, json!({ "anime_id": anime }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .patch(&uri, &app.other_member_key, json!({ "name": "Mine now" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &app.other_member_key).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .patch(&uri, &app.member_key, json!({ "name": "Gambling" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gambling");

    let (status, _) = app.delete(&uri, &app.member_key).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request("POST", &format!("{uri}/restore"), Some(&app.staff_key), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn anonymous_cannot_create_playlist() {
    let app = spawn_app().await;
    let (status, _) = app
        .request("POST", "/api/v1/playlists/", None, Some(json!({ "name": "Nope" })))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn news_is_staff_written_and_filterable_by_tag() {
    let app = spawn_app().await;

    let article = json!({
        "title": "Season announced",
        "description": "Second season confirmed",
        "content": "Full story.",
        "tag": "anime",
    });

    let (status, _) = app.post("/api/v1/news/", &app.member_key, article.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.post("/api/v1/news/", &app.staff_key, article).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["tag"], "anime");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .post(
            "/api/v1/news/",
            &app.staff_key,
            json!({ "title": "Expo", "description": "Dates", "content": "Soon." }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get("/api/v1/news/?tag=anime").await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["id"], id);

    let (_, body) = app.get("/api/v1/news/?tag=pending").await;
    assert_eq!(body["data"]["count"], 1);

    let (status, _) = app.get("/api/v1/news/?tag=gossip").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .patch(
            &format!("/api/v1/news/{id}"),
            &app.staff_key,
            json!({ "tag": "industry" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tag"], "industry");

    let (status, _) = app
        .post(
            "/api/v1/news/",
            &app.staff_key,
            json!({ "title": "Empty", "description": "x", "content": "  " }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
