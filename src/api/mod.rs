use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{MethodRouter, delete, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AnimeService, MangaService, NewsService, PeopleService, PlaylistService, ResponseCache,
    ReviewService, TaxonomyService,
};
use crate::state::SharedState;

mod anime;
pub mod auth;
mod error;
mod manga;
mod news;
mod observability;
mod people;
mod playlists;
mod reviews;
mod system;
mod taxonomy;
pub mod types;
mod users;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

/// Every route lives under this prefix; cache keys start with it too.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.shared.store
    }

    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.shared.cache
    }

    #[must_use]
    pub fn anime_service(&self) -> &dyn AnimeService {
        self.shared.anime_service.as_ref()
    }

    #[must_use]
    pub fn manga_service(&self) -> &dyn MangaService {
        self.shared.manga_service.as_ref()
    }

    #[must_use]
    pub fn taxonomy_service(&self) -> &dyn TaxonomyService {
        self.shared.taxonomy_service.as_ref()
    }

    #[must_use]
    pub fn people_service(&self) -> &dyn PeopleService {
        self.shared.people_service.as_ref()
    }

    #[must_use]
    pub fn playlist_service(&self) -> &dyn PlaylistService {
        self.shared.playlist_service.as_ref()
    }

    #[must_use]
    pub fn news_service(&self) -> &dyn NewsService {
        self.shared.news_service.as_ref()
    }

    #[must_use]
    pub fn review_service(&self) -> &dyn ReviewService {
        self.shared.review_service.as_ref()
    }
}

/// Cache key prefix covering every response under `/api/v1/{segment}`.
#[must_use]
pub fn route_prefix(segment: &str) -> String {
    format!("{API_PREFIX}/{segment}")
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .merge(catalog_routes())
        .merge(people_routes())
        .merge(community_routes())
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::identify_middleware,
        ))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest(API_PREFIX, api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Registers `method_router` at both `path` and `path/`.
fn collection(
    router: Router<Arc<AppState>>,
    path: &str,
    method_router: MethodRouter<Arc<AppState>>,
) -> Router<Arc<AppState>> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

fn catalog_routes() -> Router<Arc<AppState>> {
    let router = Router::new();
    let router = collection(
        router,
        "/animes",
        get(anime::list_anime).post(anime::create_anime),
    );
    let router = collection(
        router,
        "/mangas",
        get(manga::list_manga).post(manga::create_manga),
    );
    let router = collection(
        router,
        "/genres",
        get(taxonomy::list_genres).post(taxonomy::create_genre),
    );
    let router = collection(
        router,
        "/themes",
        get(taxonomy::list_themes).post(taxonomy::create_theme),
    );
    let router = collection(
        router,
        "/studios",
        get(taxonomy::list_studios).post(taxonomy::create_studio),
    );
    let router = collection(
        router,
        "/authors",
        get(taxonomy::list_authors).post(taxonomy::create_author),
    );

    router
        .route("/animes/popular", get(anime::popular_anime))
        .route("/animes/top", get(anime::top_anime))
        .route("/animes/recommended", get(anime::recommended_anime))
        .route("/animes/genre/{genre_id}", get(anime::anime_by_genre))
        .route(
            "/animes/{id}",
            get(anime::get_anime)
                .patch(anime::update_anime)
                .delete(anime::delete_anime),
        )
        .route("/animes/{id}/restore", post(anime::restore_anime))
        .route("/animes/{id}/similar", get(anime::similar_anime))
        .route("/animes/{id}/characters", get(anime::anime_characters))
        .route(
            "/animes/{id}/reviews",
            get(anime::list_anime_reviews).post(anime::create_anime_review),
        )
        .route("/mangas/popular", get(manga::popular_manga))
        .route("/mangas/top", get(manga::top_manga))
        .route("/mangas/recommended", get(manga::recommended_manga))
        .route("/mangas/genre/{genre_id}", get(manga::manga_by_genre))
        .route(
            "/mangas/{id}",
            get(manga::get_manga)
                .patch(manga::update_manga)
                .delete(manga::delete_manga),
        )
        .route("/mangas/{id}/restore", post(manga::restore_manga))
        .route("/mangas/{id}/similar", get(manga::similar_manga))
        .route("/mangas/{id}/characters", get(manga::manga_characters))
        .route(
            "/mangas/{id}/reviews",
            get(manga::list_manga_reviews).post(manga::create_manga_review),
        )
        .route(
            "/genres/{id}",
            get(taxonomy::get_genre)
                .patch(taxonomy::rename_genre)
                .delete(taxonomy::delete_genre),
        )
        .route("/genres/{id}/restore", post(taxonomy::restore_genre))
        .route(
            "/themes/{id}",
            get(taxonomy::get_theme)
                .patch(taxonomy::rename_theme)
                .delete(taxonomy::delete_theme),
        )
        .route("/themes/{id}/restore", post(taxonomy::restore_theme))
        .route(
            "/studios/{id}",
            get(taxonomy::get_studio)
                .patch(taxonomy::rename_studio)
                .delete(taxonomy::delete_studio),
        )
        .route("/studios/{id}/restore", post(taxonomy::restore_studio))
        .route("/studios/{id}/animes", get(anime::anime_by_studio))
        .route(
            "/authors/{id}",
            get(taxonomy::get_author)
                .patch(taxonomy::rename_author)
                .delete(taxonomy::delete_author),
        )
        .route("/authors/{id}/restore", post(taxonomy::restore_author))
        .route("/authors/{id}/mangas", get(manga::manga_by_author))
}

fn people_routes() -> Router<Arc<AppState>> {
    let router = collection(
        Router::new(),
        "/characters",
        get(people::list_characters).post(people::create_character),
    );
    let router = collection(
        router,
        "/persons",
        get(people::list_persons).post(people::create_person),
    );

    router
        .route(
            "/characters/{id}",
            get(people::get_character)
                .patch(people::update_character)
                .delete(people::delete_character),
        )
        .route("/characters/{id}/restore", post(people::restore_character))
        .route("/characters/{id}/anime", get(people::character_anime))
        .route("/characters/{id}/manga", get(people::character_manga))
        .route(
            "/characters/{id}/voices",
            get(people::character_voices).post(people::add_voice),
        )
        .route(
            "/persons/{id}",
            get(people::get_person)
                .patch(people::update_person)
                .delete(people::delete_person),
        )
        .route("/persons/{id}/restore", post(people::restore_person))
        .route("/persons/{id}/voices", get(people::person_voices))
}

fn community_routes() -> Router<Arc<AppState>> {
    let router = collection(
        Router::new(),
        "/playlists",
        get(playlists::list_playlists).post(playlists::create_playlist),
    );
    let router = collection(
        router,
        "/news",
        get(news::list_news).post(news::create_news),
    );

    router
        .route(
            "/playlists/{id}",
            get(playlists::get_playlist)
                .patch(playlists::rename_playlist)
                .delete(playlists::delete_playlist),
        )
        .route("/playlists/{id}/restore", post(playlists::restore_playlist))
        .route("/playlists/{id}/items", post(playlists::add_item))
        .route(
            "/playlists/{id}/items/{anime_id}",
            delete(playlists::remove_item),
        )
        .route(
            "/news/{id}",
            get(news::get_news)
                .patch(news::update_news)
                .delete(news::delete_news),
        )
        .route("/news/{id}/restore", post(news::restore_news))
        .route(
            "/reviews/{id}",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/reviews/{id}/helpful", post(reviews::mark_helpful))
        .route("/reviews/{id}/report", post(reviews::report_review))
        .route("/users/me", get(users::me))
        .route("/users/me/reviews", get(users::my_reviews))
}
