//! Catalog CRUD, soft delete and ranking endpoints.

mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn anime_crud_round_trip() {
    let app = spawn_app().await;
    let action = app.create_named("genres", "Action").await;
    let studio = app.create_named("studios", "Madhouse").await;

    let (status, body) = app
        .post(
            "/api/v1/animes/",
            &app.staff_key,
            json!({
                "name": "  Frieren  ",
                "year": 2023,
                "episodes": 28,
                "studio_id": studio,
                "genre_ids": [action, action],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let anime = &body["data"];
    assert_eq!(anime["name"], "Frieren");
    assert_eq!(anime["slug"], "frieren");
    assert_eq!(anime["studio"]["name"], "Madhouse");
    assert_eq!(anime["genres"].as_array().unwrap().len(), 1);
    let id = anime["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/v1/animes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["episodes"], 28);

    let (status, body) = app
        .patch(
            &format!("/api/v1/animes/{id}"),
            &app.staff_key,
            json!({ "name": "Sousou no Frieren", "score": 9.3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["slug"], "sousou-no-frieren");
    assert_eq!(body["data"]["score"], 9.3);
    assert_eq!(body["data"]["year"], 2023);
}

#[tokio::test]
async fn create_rejects_invalid_fields() {
    let app = spawn_app().await;

    let cases = [
        json!({ "name": "   " }),
        json!({ "name": "x".repeat(256) }),
        json!({ "name": "Old", "year": 1850 }),
        json!({ "name": "Negative", "episodes": -1 }),
        json!({ "name": "Score", "score": 11.0 }),
        json!({ "name": "Ghost genre", "genre_ids": [999] }),
        json!({ "name": "Ghost studio", "studio_id": 999 }),
    ];

    for case in cases {
        let (status, body) = app.post("/api/v1/animes/", &app.staff_key, case.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case} -> {body}");
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn unavailable_genre_cannot_be_linked() {
    let app = spawn_app().await;
    let genre = app.create_named("genres", "Retired").await;

    let (status, _) = app
        .delete(&format!("/api/v1/genres/{genre}"), &app.staff_key)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .post(
            "/api/v1/animes/",
            &app.staff_key,
            json!({ "name": "Linked", "genre_ids": [genre] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn soft_delete_hides_and_restore_recovers() {
    let app = spawn_app().await;
    let id = app.create_anime(json!({ "name": "Mushishi" })).await;
    let uri = format!("/api/v1/animes/{id}");

    let (status, _) = app.delete(&uri, &app.staff_key).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Deleting twice is not an error.
    let (status, _) = app.delete(&uri, &app.staff_key).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .patch(&uri, &app.staff_key, json!({ "name": "Mushi-shi" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/v1/animes/").await;
    assert_eq!(body["data"]["count"], 0);

    let (status, body) = app
        .request("POST", &format!("{uri}/restore"), Some(&app.staff_key), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["name"], "Mushishi");

    let (status, _) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleting_unknown_id_is_not_found() {
    let app = spawn_app().await;

    let (status, body) = app.delete("/api/v1/animes/4242", &app.staff_key).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = app.delete("/api/v1/genres/4242", &app.staff_key).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_positive_id_is_rejected() {
    let app = spawn_app().await;
    let (status, _) = app.get("/api/v1/animes/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_paginates_searches_and_orders() {
    let app = spawn_app().await;
    for name in ["Berserk", "Akira", "Claymore", "Another"] {
        app.create_anime(json!({ "name": name })).await;
    }

    let (status, body) = app.get("/api/v1/animes/?page=2&page_size=3").await;
    assert_eq!(status, StatusCode::OK);
    let page = &body["data"];
    assert_eq!(page["count"], 4);
    assert_eq!(page["page"], 2);
    assert_eq!(page["page_size"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["results"].as_array().unwrap().len(), 1);

    let (_, body) = app.get("/api/v1/animes/?ordering=-name").await;
    let names: Vec<&str> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Claymore", "Berserk", "Another", "Akira"]);

    let (_, body) = app.get("/api/v1/animes/?q=an").await;
    let names: Vec<&str> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Another"]);

    let (status, _) = app.get("/api/v1/animes/?ordering=popularity").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn page_size_is_capped() {
    let app = spawn_app().await;
    app.create_anime(json!({ "name": "Solo" })).await;

    let (_, body) = app.get("/api/v1/animes/?page_size=1000").await;
    assert_eq!(body["data"]["page_size"], 100);
}

#[tokio::test]
async fn popular_is_no_content_when_empty() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/v1/animes/popular").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}

#[tokio::test]
async fn popular_orders_by_popularity_then_id() {
    let app = spawn_app().await;
    let low = app.create_anime(json!({ "name": "Low", "popularity": 5 })).await;
    let high = app.create_anime(json!({ "name": "High", "popularity": 90 })).await;
    let tie = app.create_anime(json!({ "name": "Tie", "popularity": 5 })).await;
    let gone = app.create_anime(json!({ "name": "Gone", "popularity": 500 })).await;
    app.delete(&format!("/api/v1/animes/{gone}"), &app.staff_key).await;

    let (status, body) = app.get("/api/v1/animes/popular").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [high, low, tie]);
}

#[tokio::test]
async fn popular_is_capped_at_fifty() {
    let app = spawn_app().await;
    for i in 0..55 {
        app.create_anime(json!({ "name": format!("Show {i}"), "popularity": i }))
            .await;
    }

    let (_, body) = app.get("/api/v1/animes/popular").await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 50);
    assert_eq!(items[0]["popularity"], 54);
}

#[tokio::test]
async fn top_scored_puts_unscored_last() {
    let app = spawn_app().await;
    let unscored = app.create_anime(json!({ "name": "Unscored" })).await;
    let good = app.create_anime(json!({ "name": "Good", "score": 8.1 })).await;
    let best = app.create_anime(json!({ "name": "Best", "score": 9.0 })).await;

    let (_, body) = app.get("/api/v1/animes/top").await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [best, good, unscored]);
}

#[tokio::test]
async fn recommended_uses_summary_projection() {
    let app = spawn_app().await;
    app.create_anime(json!({ "name": "Skip" })).await;
    let picked = app
        .create_anime(json!({ "name": "Pick", "is_recommended": true, "aired_from": "2020-01-01" }))
        .await;

    let (status, body) = app.get("/api/v1/animes/recommended").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], picked);
    assert_eq!(items[0]["aired_from"], "2020-01-01");
    assert!(items[0].get("synopsis").is_none());
}

#[tokio::test]
async fn by_genre_lists_members_and_rejects_unknown_genre() {
    let app = spawn_app().await;
    let drama = app.create_named("genres", "Drama").await;
    let comedy = app.create_named("genres", "Comedy").await;
    let a = app.create_anime(json!({ "name": "A", "genre_ids": [drama] })).await;
    app.create_anime(json!({ "name": "B", "genre_ids": [comedy] })).await;
    let c = app
        .create_anime(json!({ "name": "C", "genre_ids": [drama, comedy] }))
        .await;

    let (_, body) = app.get(&format!("/api/v1/animes/genre/{drama}")).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [a, c]);

    let (status, _) = app.get("/api/v1/animes/genre/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn similar_shares_genre_or_theme_and_excludes_self() {
    let app = spawn_app().await;
    let horror = app.create_named("genres", "Horror").await;
    let school = app.create_named("themes", "School").await;

    let base = app
        .create_anime(json!({ "name": "Base", "genre_ids": [horror], "theme_ids": [school] }))
        .await;
    let both = app
        .create_anime(json!({ "name": "Both", "genre_ids": [horror], "theme_ids": [school] }))
        .await;
    let theme_only = app
        .create_anime(json!({ "name": "Theme only", "theme_ids": [school] }))
        .await;
    app.create_anime(json!({ "name": "Unrelated" })).await;

    let (status, body) = app.get(&format!("/api/v1/animes/{base}/similar")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [both, theme_only]);
}

#[tokio::test]
async fn studio_lists_its_animes() {
    let app = spawn_app().await;
    let studio = app.create_named("studios", "Bones").await;
    let id = app
        .create_anime(json!({ "name": "Mob Psycho", "studio_id": studio }))
        .await;
    app.create_anime(json!({ "name": "Elsewhere" })).await;

    let (status, body) = app.get(&format!("/api/v1/studios/{studio}/animes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["id"], id);

    let (status, _) = app.get("/api/v1/studios/777/animes").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn author_mangas_is_not_found_when_empty() {
    let app = spawn_app().await;
    let author = app.create_named("authors", "Kentaro Miura").await;

    let (status, _) = app.get(&format!("/api/v1/authors/{author}/mangas")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = app
        .create_manga(json!({ "name": "Berserk", "author_id": author, "chapters": 364 }))
        .await;

    let (status, body) = app.get(&format!("/api/v1/authors/{author}/mangas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["results"][0]["id"], id);
    assert_eq!(body["data"]["results"][0]["chapters"], 364);
}

#[tokio::test]
async fn manga_detail_includes_author_and_taxonomy() {
    let app = spawn_app().await;
    let author = app.create_named("authors", "Naoki Urasawa").await;
    let mystery = app.create_named("genres", "Mystery").await;

    let id = app
        .create_manga(json!({
            "name": "Monster",
            "author_id": author,
            "genre_ids": [mystery],
            "volumes": 18,
            "published_from": "1994-12-05",
        }))
        .await;

    let (status, body) = app.get(&format!("/api/v1/mangas/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["author"]["name"], "Naoki Urasawa");
    assert_eq!(body["data"]["genres"][0]["id"], mystery);
    assert_eq!(body["data"]["volumes"], 18);

    let (status, _) = app
        .post("/api/v1/mangas/", &app.staff_key, json!({ "name": "Bad", "chapters": -2 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn taxonomy_names_are_unique() {
    let app = spawn_app().await;
    app.create_named("themes", "Isekai").await;

    let (status, body) = app
        .post("/api/v1/themes/", &app.staff_key, json!({ "name": "Isekai" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, body) = app.get("/api/v1/themes/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["results"][0]["slug"], "isekai");
}

#[tokio::test]
async fn taxonomy_rename_updates_slug() {
    let app = spawn_app().await;
    let id = app.create_named("studios", "Kyoto Animation").await;

    let (status, body) = app
        .patch(
            &format!("/api/v1/studios/{id}"),
            &app.staff_key,
            json!({ "name": "KyoAni" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["name"], "KyoAni");
    assert_eq!(body["data"]["slug"], "kyoani");
}

#[tokio::test]
async fn characters_link_to_anime_and_voices() {
    let app = spawn_app().await;
    let anime = app.create_anime(json!({ "name": "Cowboy Bebop" })).await;

    let (status, body) = app
        .post(
            "/api/v1/characters/",
            &app.contributor_key,
            json!({ "name": "Spike Spiegel", "anime_id": anime }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let character = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(
            "/api/v1/persons/",
            &app.contributor_key,
            json!({ "name": "Koichi Yamadera" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let person = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(
            &format!("/api/v1/characters/{character}/voices"),
            &app.contributor_key,
            json!({ "person_id": person, "language": "Japanese" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = app.get(&format!("/api/v1/animes/{anime}/characters")).await;
    assert_eq!(body["data"][0]["name"], "Spike Spiegel");

    let (status, body) = app.get(&format!("/api/v1/characters/{character}/anime")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], anime);

    let (status, _) = app.get(&format!("/api/v1/characters/{character}/manga")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get(&format!("/api/v1/characters/{character}/voices")).await;
    assert_eq!(body["data"][0]["person"]["id"], person);
    assert_eq!(body["data"][0]["language"], "japanese");

    let (_, body) = app.get(&format!("/api/v1/persons/{person}/voices")).await;
    assert_eq!(body["data"][0]["character"]["id"], character);
}

#[tokio::test]
async fn non_latin_titles_get_distinct_slugs() {
    let app = spawn_app().await;

    let (status, first) = app
        .post("/api/v1/animes/", &app.staff_key, json!({ "name": "進撃の巨人" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    let (status, second) = app
        .post("/api/v1/animes/", &app.staff_key, json!({ "name": "鋼の錬金術師" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{second}");

    assert_eq!(first["data"]["slug"], "untitled");
    assert_eq!(second["data"]["slug"], "untitled-2");

    let (status, body) = app
        .post("/api/v1/mangas/", &app.staff_key, json!({ "name": "ベルセルク" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let (status, body) = app
        .post("/api/v1/mangas/", &app.staff_key, json!({ "name": "よつばと!" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["slug"], "untitled-2");
}

#[tokio::test]
async fn remakes_and_hidden_rows_do_not_block_a_slug() {
    let app = spawn_app().await;
    let original = app.create_anime(json!({ "name": "Hunter x Hunter", "year": 1999 })).await;
    let (status, _) = app
        .delete(&format!("/api/v1/animes/{original}"), &app.staff_key)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .post(
            "/api/v1/animes/",
            &app.staff_key,
            json!({ "name": "Hunter x Hunter", "year": 2011 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["slug"], "hunter-x-hunter-2");

    let (status, body) = app
        .request(
            "POST",
            &format!("/api/v1/animes/{original}/restore"),
            Some(&app.staff_key),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["slug"], "hunter-x-hunter");
}

#[tokio::test]
async fn renaming_keeps_own_slug_and_avoids_others() {
    let app = spawn_app().await;
    app.create_anime(json!({ "name": "Trigun" })).await;
    let stampede = app.create_anime(json!({ "name": "Trigun Stampede" })).await;
    let uri = format!("/api/v1/animes/{stampede}");

    let (status, body) = app
        .patch(&uri, &app.staff_key, json!({ "name": "Trigun" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["slug"], "trigun-2");

    let (status, body) = app
        .patch(&uri, &app.staff_key, json!({ "name": "TRIGUN" }))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["slug"], "trigun-2");
}

#[tokio::test]
async fn page_beyond_any_offset_is_empty() {
    let app = spawn_app().await;
    app.create_anime(json!({ "name": "Ping Pong" })).await;

    let (status, body) = app.get("/api/v1/animes/?page=18446744073709551615").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["count"], 1);
    assert!(body["data"]["results"].as_array().unwrap().is_empty());

    let (status, _) = app
        .get("/api/v1/mangas/?page=18446744073709551615&page_size=1")
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn anime_search_matches_studio_name() {
    let app = spawn_app().await;
    let studio = app.create_named("studios", "Kyoto Animation").await;
    app.create_anime(json!({ "name": "Hyouka", "studio_id": studio })).await;
    app.create_anime(json!({ "name": "Kyousougiga" })).await;

    let (_, body) = app.get("/api/v1/animes/?q=animation").await;
    let names: Vec<&str> = body["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Hyouka"]);

    let (_, body) = app.get("/api/v1/animes/?q=kyo").await;
    assert_eq!(body["data"]["count"], 2);

    let (status, _) = app
        .delete(&format!("/api/v1/studios/{studio}"), &app.staff_key)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = app.get("/api/v1/animes/?q=animation").await;
    assert_eq!(body["data"]["count"], 0);
}

#[tokio::test]
async fn character_search_matches_kanji_name() {
    let app = spawn_app().await;
    let (status, body) = app
        .post(
            "/api/v1/characters/",
            &app.contributor_key,
            json!({ "name": "Levi Ackerman", "name_kanji": "リヴァイ" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, body) = app.get("/api/v1/characters/?q=%E3%83%AA%E3%83%B4%E3%82%A1%E3%82%A4").await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["name"], "Levi Ackerman");
}
