//! `SeaORM` implementation of the `PlaylistService` trait.

use std::sync::Arc;

use crate::api::types::{AnimeListDto, Page, PlaylistDto};
use crate::db::{Store, User};
use crate::domain::ListQuery;
use crate::entities::playlists;
use crate::models::playlist::{PlaylistInput, PlaylistItemInput};
use crate::services::catalog::{CatalogError, validate_name};
use crate::services::playlist_service::PlaylistService;

const KIND: &str = "Playlist";

pub struct SeaOrmPlaylistService {
    store: Arc<Store>,
}

impl SeaOrmPlaylistService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    async fn require(&self, id: i32) -> Result<playlists::Model, CatalogError> {
        self.store
            .playlist_repo()
            .get(id)
            .await?
            .ok_or(CatalogError::not_found(KIND, id))
    }

    async fn require_owned(&self, user: &User, id: i32) -> Result<playlists::Model, CatalogError> {
        let playlist = self.require(id).await?;
        if playlist.user_id != user.id {
            return Err(CatalogError::Forbidden(
                "Only the owner can change this playlist".to_string(),
            ));
        }
        Ok(playlist)
    }

    async fn with_items(&self, playlist: playlists::Model) -> Result<PlaylistDto, CatalogError> {
        let items = self.store.playlist_repo().items(&playlist).await?;
        let mut dto = PlaylistDto::from(playlist);
        dto.items = Some(items.into_iter().map(AnimeListDto::from).collect());
        Ok(dto)
    }
}

#[async_trait::async_trait]
impl PlaylistService for SeaOrmPlaylistService {
    async fn list(&self, query: ListQuery) -> Result<Page<PlaylistDto>, CatalogError> {
        let (items, count) = self.store.playlist_repo().list(&query).await?;
        Ok(Page::new(items, count, query.page).map(PlaylistDto::from))
    }

    async fn get(&self, id: i32) -> Result<PlaylistDto, CatalogError> {
        let playlist = self.require(id).await?;
        self.with_items(playlist).await
    }

    async fn create(&self, owner: &User, input: PlaylistInput) -> Result<PlaylistDto, CatalogError> {
        let name = validate_name("name", &input.name)?;
        let playlist = self.store.playlist_repo().create(owner.id, &name).await?;

        tracing::info!(playlist_id = playlist.id, user_id = owner.id, "Created playlist");

        self.with_items(playlist).await
    }

    async fn rename(
        &self,
        user: &User,
        id: i32,
        input: PlaylistInput,
    ) -> Result<PlaylistDto, CatalogError> {
        let playlist = self.require_owned(user, id).await?;
        let name = validate_name("name", &input.name)?;

        let playlist = self.store.playlist_repo().rename(playlist, &name).await?;
        self.with_items(playlist).await
    }

    async fn delete(&self, user: &User, id: i32) -> Result<(), CatalogError> {
        let playlist = self
            .store
            .playlist_repo()
            .get_any(id)
            .await?
            .ok_or(CatalogError::not_found(KIND, id))?;

        if playlist.user_id != user.id {
            return Err(CatalogError::Forbidden(
                "Only the owner can delete this playlist".to_string(),
            ));
        }

        self.store.playlist_repo().mark_unavailable(id).await?;
        Ok(())
    }

    async fn restore(&self, id: i32) -> Result<PlaylistDto, CatalogError> {
        if !self.store.playlist_repo().restore(id).await? {
            return Err(CatalogError::not_found(KIND, id));
        }
        self.get(id).await
    }

    async fn add_item(
        &self,
        user: &User,
        id: i32,
        item: PlaylistItemInput,
    ) -> Result<PlaylistDto, CatalogError> {
        let playlist = self.require_owned(user, id).await?;

        if self.store.anime_repo().get(item.anime_id).await?.is_none() {
            return Err(CatalogError::not_found("Anime", item.anime_id));
        }

        self.store
            .playlist_repo()
            .add_item(playlist.id, item.anime_id)
            .await?;

        self.with_items(playlist).await
    }

    async fn remove_item(
        &self,
        user: &User,
        id: i32,
        anime_id: i32,
    ) -> Result<PlaylistDto, CatalogError> {
        let playlist = self.require_owned(user, id).await?;

        if !self
            .store
            .playlist_repo()
            .remove_item(playlist.id, anime_id)
            .await?
        {
            return Err(CatalogError::not_found("Playlist item", anime_id));
        }

        self.with_items(playlist).await
    }
}
