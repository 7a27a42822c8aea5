use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AnimeService, MangaService, NewsService, PeopleService, PlaylistService, ResponseCache,
    ReviewService, SeaOrmAnimeService, SeaOrmMangaService, SeaOrmNewsService,
    SeaOrmPeopleService, SeaOrmPlaylistService, SeaOrmReviewService, SeaOrmTaxonomyService,
    TaxonomyService,
};

/// Everything a request handler can reach. Built once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Arc<Store>,

    pub cache: Arc<ResponseCache>,

    pub anime_service: Arc<dyn AnimeService>,

    pub manga_service: Arc<dyn MangaService>,

    pub taxonomy_service: Arc<dyn TaxonomyService>,

    pub people_service: Arc<dyn PeopleService>,

    pub playlist_service: Arc<dyn PlaylistService>,

    pub news_service: Arc<dyn NewsService>,

    pub review_service: Arc<dyn ReviewService>,
}

impl SharedState {
    /// Opens the database (running migrations) and wires the services.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, Arc::new(store)))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Arc<Store>) -> Self {
        let cache = Arc::new(ResponseCache::new(store.clone(), &config.cache));

        Self {
            config: Arc::new(config),
            cache,
            anime_service: Arc::new(SeaOrmAnimeService::new(store.clone())),
            manga_service: Arc::new(SeaOrmMangaService::new(store.clone())),
            taxonomy_service: Arc::new(SeaOrmTaxonomyService::new(store.clone())),
            people_service: Arc::new(SeaOrmPeopleService::new(store.clone())),
            playlist_service: Arc::new(SeaOrmPlaylistService::new(store.clone())),
            news_service: Arc::new(SeaOrmNewsService::new(store.clone())),
            review_service: Arc::new(SeaOrmReviewService::new(store.clone())),
            store,
        }
    }
}
