//! Shared harness: one temporary SQLite file per test, three users of each role.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use beehive::api::AppState;
use beehive::config::Config;
use beehive::db::Store;
use beehive::domain::Role;
use beehive::state::SharedState;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
    pub staff_key: String,
    pub contributor_key: String,
    pub member_key: String,
    pub other_member_key: String,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let db_path = std::env::temp_dir().join(format!("beehive-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.observability.metrics_enabled = false;
    configure(&mut config);

    let store = Arc::new(
        Store::new(&config.general.database_path)
            .await
            .expect("failed to open test database"),
    );

    let staff = store.create_user("sakura", Role::Staff).await.unwrap();
    let contributor = store.create_user("kenji", Role::Contributor).await.unwrap();
    let member = store.create_user("yuki", Role::Member).await.unwrap();
    let other = store.create_user("haru", Role::Member).await.unwrap();

    let shared = Arc::new(SharedState::with_store(config, store));
    let state = beehive::api::create_app_state(shared, None);
    let router = beehive::api::router(state.clone());

    TestApp {
        state,
        router,
        staff_key: staff.api_key,
        contributor_key: contributor.api_key,
        member_key: member.api_key,
        other_member_key: other.api_key,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        key: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = key {
            builder = builder.header("X-Api-Key", key);
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", mime::APPLICATION_JSON.as_ref())
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, None).await
    }

    pub async fn get_as(&self, uri: &str, key: &str) -> (StatusCode, Value) {
        self.request("GET", uri, Some(key), None).await
    }

    pub async fn post(&self, uri: &str, key: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(key), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, key: &str, body: Value) -> (StatusCode, Value) {
        self.request("PATCH", uri, Some(key), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, key: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, Some(key), None).await
    }

    /// Creates a named taxonomy entry as staff and returns its id.
    pub async fn create_named(&self, segment: &str, name: &str) -> i64 {
        let (status, body) = self
            .post(
                &format!("/api/v1/{segment}/"),
                &self.staff_key,
                serde_json::json!({ "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "creating {segment}: {body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Creates an anime as staff and returns its id.
    pub async fn create_anime(&self, body: Value) -> i64 {
        let (status, body) = self.post("/api/v1/animes/", &self.staff_key, body).await;
        assert_eq!(status, StatusCode::CREATED, "creating anime: {body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Creates a manga as staff and returns its id.
    pub async fn create_manga(&self, body: Value) -> i64 {
        let (status, body) = self.post("/api/v1/mangas/", &self.staff_key, body).await;
        assert_eq!(status, StatusCode::CREATED, "creating manga: {body}");
        body["data"]["id"].as_i64().unwrap()
    }
}
