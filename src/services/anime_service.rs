//! Domain service for anime catalog operations.
//!
//! This module provides the [`AnimeService`] trait: CRUD over available anime
//! plus the ranking listings (popular, recommended, by genre, similar).

use crate::api::types::{AnimeDto, AnimeListDto, AnimeSummaryDto, CharacterDto, Page};
use crate::domain::{ListQuery, PageRequest};
use crate::models::anime::{AnimeInput, AnimePatch};
use crate::services::catalog::CatalogError;

#[async_trait::async_trait]
pub trait AnimeService: Send + Sync {
    /// Lists available anime, optionally filtered by a name search.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::Database`] on connection failures
    async fn list(&self, query: ListQuery) -> Result<Page<AnimeListDto>, CatalogError>;

    /// Gets an available anime with its genres, themes and studio.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the anime is missing or unavailable
    async fn get(&self, id: i32) -> Result<AnimeDto, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::Validation`] on a blank name, an out-of-range
    ///   year, negative counters or unknown genre/theme/studio ids
    async fn create(&self, input: AnimeInput) -> Result<AnimeDto, CatalogError>;

    /// Applies a partial update to an available anime.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the anime is missing or unavailable
    /// - Returns [`CatalogError::Validation`] with the same rules as `create`
    async fn update(&self, id: i32, patch: AnimePatch) -> Result<AnimeDto, CatalogError>;

    /// Soft delete. Repeating it is not an error.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if no anime has this id
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if no anime has this id
    async fn restore(&self, id: i32) -> Result<AnimeDto, CatalogError>;

    /// Most popular first, ties by ascending id.
    async fn popular(&self, limit: u64) -> Result<Vec<AnimeListDto>, CatalogError>;

    /// Highest score first, unscored last.
    async fn top_scored(&self, limit: u64) -> Result<Vec<AnimeListDto>, CatalogError>;

    async fn recommended(&self) -> Result<Vec<AnimeSummaryDto>, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the genre is missing or unavailable
    async fn by_genre(&self, genre_id: i32) -> Result<Vec<AnimeSummaryDto>, CatalogError>;

    /// Up to 25 anime sharing a genre or theme with `id`.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the anime is missing or unavailable
    async fn similar(&self, id: i32) -> Result<Vec<AnimeListDto>, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the anime is missing or unavailable
    async fn characters(&self, id: i32) -> Result<Vec<CharacterDto>, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the studio is missing or unavailable
    async fn by_studio(
        &self,
        studio_id: i32,
        page: PageRequest,
    ) -> Result<Page<AnimeListDto>, CatalogError>;
}
