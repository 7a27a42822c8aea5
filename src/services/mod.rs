pub mod cache;
pub use cache::{ResponseCache, cache_key};

pub mod catalog;
pub use catalog::CatalogError;

pub mod anime_service;
pub mod anime_service_impl;
pub use anime_service::AnimeService;
pub use anime_service_impl::SeaOrmAnimeService;

pub mod manga_service;
pub mod manga_service_impl;
pub use manga_service::MangaService;
pub use manga_service_impl::SeaOrmMangaService;

pub mod taxonomy_service;
pub mod taxonomy_service_impl;
pub use taxonomy_service::{TaxonomyKind, TaxonomyService};
pub use taxonomy_service_impl::SeaOrmTaxonomyService;

pub mod people_service;
pub mod people_service_impl;
pub use people_service::PeopleService;
pub use people_service_impl::SeaOrmPeopleService;

pub mod playlist_service;
pub mod playlist_service_impl;
pub use playlist_service::PlaylistService;
pub use playlist_service_impl::SeaOrmPlaylistService;

pub mod news_service;
pub mod news_service_impl;
pub use news_service::NewsService;
pub use news_service_impl::SeaOrmNewsService;

pub mod review_service;
pub mod review_service_impl;
pub use review_service::{ReviewError, ReviewService};
pub use review_service_impl::SeaOrmReviewService;
