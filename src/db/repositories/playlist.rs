use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use super::catalog;
use crate::domain::ListQuery;
use crate::entities::{animes, playlist_animes, playlists, prelude::*};

pub struct PlaylistRepository {
    conn: DatabaseConnection,
}

impl PlaylistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<(Vec<playlists::Model>, u64)> {
        catalog::list_page::<Playlists, _>(&self.conn, query).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<playlists::Model>> {
        catalog::find_available::<Playlists, _>(&self.conn, id).await
    }

    pub async fn get_any(&self, id: i32) -> Result<Option<playlists::Model>> {
        catalog::find_any::<Playlists, _>(&self.conn, id).await
    }

    pub async fn create(&self, user_id: i32, name: &str) -> Result<playlists::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = playlists::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            available: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model)
    }

    pub async fn rename(&self, playlist: playlists::Model, name: &str) -> Result<playlists::Model> {
        let mut active: playlists::ActiveModel = playlist.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.conn).await?)
    }

    pub async fn mark_unavailable(&self, id: i32) -> Result<bool> {
        catalog::mark_unavailable::<Playlists, _>(&self.conn, id).await
    }

    pub async fn restore(&self, id: i32) -> Result<bool> {
        catalog::restore::<Playlists, _>(&self.conn, id).await
    }

    /// Available anime in the playlist, in the order they were added.
    pub async fn items(&self, playlist: &playlists::Model) -> Result<Vec<animes::Model>> {
        Ok(playlist
            .find_related(Animes)
            .filter(animes::Column::Available.eq(true))
            .order_by_asc(playlist_animes::Column::AddedAt)
            .order_by_asc(animes::Column::Id)
            .all(&self.conn)
            .await?)
    }

    /// Adding an anime twice is a no-op.
    pub async fn add_item(&self, playlist_id: i32, anime_id: i32) -> Result<()> {
        let link = playlist_animes::ActiveModel {
            playlist_id: Set(playlist_id),
            anime_id: Set(anime_id),
            added_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        PlaylistAnimes::insert(link)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    playlist_animes::Column::PlaylistId,
                    playlist_animes::Column::AnimeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    /// Returns `false` when the anime was not in the playlist.
    pub async fn remove_item(&self, playlist_id: i32, anime_id: i32) -> Result<bool> {
        let result = PlaylistAnimes::delete_many()
            .filter(playlist_animes::Column::PlaylistId.eq(playlist_id))
            .filter(playlist_animes::Column::AnimeId.eq(anime_id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
