use anyhow::Result;
use sea_orm::DatabaseConnection;

use super::catalog;
use crate::domain::{CatalogItem, CatalogKind, ReviewTarget};
use crate::entities::prelude::*;

/// Maps a stored (type tag, id) pair back to the catalog row it names.
pub struct TargetRepository {
    conn: DatabaseConnection,
}

impl TargetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Resolution ignores `available`: hidden items still resolve so their
    /// existing reviews keep pointing somewhere.
    pub async fn resolve(&self, target: ReviewTarget) -> Result<Option<CatalogItem>> {
        let item = match target.kind {
            CatalogKind::Anime => catalog::find_any::<Animes, _>(&self.conn, target.id)
                .await?
                .map(CatalogItem::Anime),
            CatalogKind::Manga => catalog::find_any::<Mangas, _>(&self.conn, target.id)
                .await?
                .map(CatalogItem::Manga),
        };

        Ok(item)
    }
}
