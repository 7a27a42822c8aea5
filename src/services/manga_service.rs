//! Domain service for manga catalog operations.

use crate::api::types::{CharacterDto, MangaDto, MangaListDto, MangaSummaryDto, Page};
use crate::domain::{ListQuery, PageRequest};
use crate::models::manga::{MangaInput, MangaPatch};
use crate::services::catalog::CatalogError;

/// Manga counterpart of [`AnimeService`](crate::services::AnimeService); the
/// error contract of each method is the same.
#[async_trait::async_trait]
pub trait MangaService: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Page<MangaListDto>, CatalogError>;

    async fn get(&self, id: i32) -> Result<MangaDto, CatalogError>;

    async fn create(&self, input: MangaInput) -> Result<MangaDto, CatalogError>;

    async fn update(&self, id: i32, patch: MangaPatch) -> Result<MangaDto, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;

    async fn restore(&self, id: i32) -> Result<MangaDto, CatalogError>;

    async fn popular(&self, limit: u64) -> Result<Vec<MangaListDto>, CatalogError>;

    async fn top_scored(&self, limit: u64) -> Result<Vec<MangaListDto>, CatalogError>;

    async fn recommended(&self) -> Result<Vec<MangaSummaryDto>, CatalogError>;

    async fn by_genre(&self, genre_id: i32) -> Result<Vec<MangaSummaryDto>, CatalogError>;

    async fn similar(&self, id: i32) -> Result<Vec<MangaListDto>, CatalogError>;

    async fn characters(&self, id: i32) -> Result<Vec<CharacterDto>, CatalogError>;

    /// Available manga written by the author.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the author is missing or
    ///   unavailable, or has no available manga
    async fn by_author(
        &self,
        author_id: i32,
        page: PageRequest,
    ) -> Result<Page<MangaListDto>, CatalogError>;
}
