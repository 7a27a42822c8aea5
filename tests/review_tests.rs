//! Review lifecycle over the HTTP API.

mod common;

use axum::http::StatusCode;
use beehive::domain::{Rating, ReviewTarget};
use beehive::services::ReviewError;
use common::spawn_app;
use serde_json::json;

fn review(rating: i32, comment: &str) -> serde_json::Value {
    json!({ "rating": rating, "comment": comment })
}

#[tokio::test]
async fn create_and_list_reviews_newest_first() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Ping Pong" })).await;
    let uri = format!("/api/v1/animes/{anime}/reviews");

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, first) = app.post(&uri, &app.member_key, review(9, "Peak")).await;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    assert_eq!(first["data"]["rating"], 9);
    assert_eq!(first["data"]["user"]["username"], "yuki");
    assert_eq!(first["data"]["target"], json!({ "type": "anime", "id": anime }));
    assert_eq!(first["data"]["helpful_count"], 0);

    let (status, second) = app
        .post(&uri, &app.other_member_key, review(7, "Good"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = app.get(&uri).await;
    let ids: Vec<&serde_json::Value> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| &r["id"])
        .collect();
    assert_eq!(ids, [&second["data"]["id"], &first["data"]["id"]]);
}

#[tokio::test]
async fn duplicate_review_is_conflict() {
    let app = spawn_app().await;
    let manga = app.create_manga(json!({ "name": "Vagabond" })).await;
    let uri = format!("/api/v1/mangas/{manga}/reviews");

    let (status, _) = app.post(&uri, &app.member_key, review(10, "Ink")).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.post(&uri, &app.member_key, review(3, "Again")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["rating"], 10);
}

#[tokio::test]
async fn same_user_may_review_anime_and_manga_with_same_id() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Shared id anime" })).await;
    let manga = app.create_manga(json!({ "name": "Shared id manga" })).await;
    assert_eq!(anime, manga);

    let (status, _) = app
        .post(&format!("/api/v1/animes/{anime}/reviews"), &app.member_key, review(6, "Fine"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post(&format!("/api/v1/mangas/{manga}/reviews"), &app.member_key, review(8, "Better"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn invalid_reviews_are_rejected() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Kaiba" })).await;
    let uri = format!("/api/v1/animes/{anime}/reviews");

    for body in [review(0, "Zero"), review(11, "Eleven"), review(5, "   ")] {
        let (status, response) = app.post(&uri, &app.member_key, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{response}");
    }

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn missing_or_unavailable_target_is_not_found() {
    let app = spawn_app().await;

    let (status, _) = app
        .post("/api/v1/animes/999/reviews", &app.member_key, review(5, "Ghost"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/v1/mangas/999/reviews").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let anime = app.create_anime(json!({ "name": "Pulled" })).await;
    let uri = format!("/api/v1/animes/{anime}/reviews");
    let (status, _) = app.post(&uri, &app.member_key, review(8, "Early")).await;
    assert_eq!(status, StatusCode::CREATED);

    app.delete(&format!("/api/v1/animes/{anime}"), &app.staff_key)
        .await;

    let (status, _) = app
        .post(&uri, &app.other_member_key, review(4, "Late"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Existing reviews still resolve their target.
    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn only_owner_can_update_or_delete() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Texhnolyze" })).await;
    let (_, body) = app
        .post(&format!("/api/v1/animes/{anime}/reviews"), &app.member_key, review(6, "Bleak"))
        .await;
    let id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/reviews/{id}");

    let (status, _) = app
        .patch(&uri, &app.other_member_key, json!({ "rating": 1 }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.delete(&uri, &app.staff_key).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"]["rating"], 6);

    let (status, body) = app
        .patch(
            &uri,
            &app.member_key,
            json!({ "rating": 8, "comment": "Grew on me", "is_spoiler": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["rating"], 8);
    assert_eq!(body["data"]["comment"], "Grew on me");
    assert_eq!(body["data"]["is_spoiler"], true);

    let (status, _) = app
        .patch(&uri, &app.member_key, json!({ "rating": 42 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.delete(&uri, &app.member_key).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get(&format!("/api/v1/animes/{anime}/reviews")).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn deleted_review_can_be_written_again() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Haibane Renmei" })).await;
    let uri = format!("/api/v1/animes/{anime}/reviews");

    let (_, body) = app.post(&uri, &app.member_key, review(7, "Quiet")).await;
    let id = body["data"]["id"].as_i64().unwrap();
    app.delete(&format!("/api/v1/reviews/{id}"), &app.member_key)
        .await;

    let (status, body) = app.post(&uri, &app.member_key, review(9, "Rewatched")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["rating"], 9);

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn helpful_and_report_counters_increment() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Kino no Tabi" })).await;
    let (_, body) = app
        .post(&format!("/api/v1/animes/{anime}/reviews"), &app.member_key, review(8, "Calm"))
        .await;
    let id = body["data"]["id"].as_i64().unwrap();

    for key in [&app.other_member_key, &app.staff_key] {
        let (status, _) = app
            .request("POST", &format!("/api/v1/reviews/{id}/helpful"), Some(key), None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/reviews/{id}/report"),
            Some(&app.other_member_key),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["helpful_count"], 2);
    assert_eq!(body["data"]["reported_count"], 1);

    let (status, _) = app
        .request("POST", &format!("/api/v1/reviews/{id}/helpful"), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn my_reviews_lists_only_callers_reviews() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Dennou Coil" })).await;
    let manga = app.create_manga(json!({ "name": "Yotsuba" })).await;

    app.post(&format!("/api/v1/animes/{anime}/reviews"), &app.member_key, review(8, "AR"))
        .await;
    app.post(&format!("/api/v1/mangas/{manga}/reviews"), &app.member_key, review(10, "Joy"))
        .await;
    app.post(&format!("/api/v1/mangas/{manga}/reviews"), &app.other_member_key, review(9, "Fun"))
        .await;

    let (status, body) = app.get_as("/api/v1/users/me/reviews", &app.member_key).await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r["user"]["username"] == "yuki"));
    assert_eq!(reviews[0]["target"]["type"], "manga");
}

#[tokio::test]
async fn storage_rejects_second_review_for_same_target() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Dororo" })).await;
    let target = ReviewTarget::anime(i32::try_from(anime).unwrap());

    let store = &app.state.shared.store;
    let yuki = store.get_user_by_username("yuki").await.unwrap().unwrap();
    let repo = store.review_repo();
    let rating = Rating::new(8).unwrap();

    repo.insert(yuki.id, target, rating, "Hyakkimaru", false)
        .await
        .unwrap();
    let err = repo
        .insert(yuki.id, target, rating, "Again", true)
        .await
        .unwrap_err();
    assert!(
        matches!(ReviewError::from(err), ReviewError::Conflict(_)),
        "second insert must map to a conflict"
    );

    // The guard is per user and per kind.
    let haru = store.get_user_by_username("haru").await.unwrap().unwrap();
    repo.insert(haru.id, target, rating, "Dororo", false)
        .await
        .unwrap();
    let manga = ReviewTarget::manga(target.id);
    repo.insert(yuki.id, manga, rating, "Tezuka", false)
        .await
        .unwrap();

    let (_, body) = app.get(&format!("/api/v1/animes/{anime}/reviews")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}
