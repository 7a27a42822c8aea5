//! User-owned playlists of anime.

use crate::api::types::{Page, PlaylistDto};
use crate::db::User;
use crate::domain::ListQuery;
use crate::models::playlist::{PlaylistInput, PlaylistItemInput};
use crate::services::catalog::CatalogError;

#[async_trait::async_trait]
pub trait PlaylistService: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Page<PlaylistDto>, CatalogError>;

    /// Gets a playlist together with its available anime.
    async fn get(&self, id: i32) -> Result<PlaylistDto, CatalogError>;

    async fn create(&self, owner: &User, input: PlaylistInput) -> Result<PlaylistDto, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::Forbidden`] if `user` does not own the playlist
    async fn rename(
        &self,
        user: &User,
        id: i32,
        input: PlaylistInput,
    ) -> Result<PlaylistDto, CatalogError>;

    async fn delete(&self, user: &User, id: i32) -> Result<(), CatalogError>;

    async fn restore(&self, id: i32) -> Result<PlaylistDto, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::Forbidden`] if `user` does not own the playlist
    /// - Returns [`CatalogError::NotFound`] if the anime is missing or unavailable
    async fn add_item(
        &self,
        user: &User,
        id: i32,
        item: PlaylistItemInput,
    ) -> Result<PlaylistDto, CatalogError>;

    async fn remove_item(&self, user: &User, id: i32, anime_id: i32)
    -> Result<PlaylistDto, CatalogError>;
}
