use crate::entities::{prelude::*, response_cache};
use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct CacheRepository {
    conn: DatabaseConnection,
}

impl CacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Returns the stored body for `key` if it has not expired.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = chrono::Utc::now().to_rfc3339();

        // Opportunistic cleanup; a failure here must not hide a fresh entry.
        let _ = ResponseCache::delete_many()
            .filter(response_cache::Column::ExpiresAt.lte(&now))
            .exec(&self.conn)
            .await;

        let entry = ResponseCache::find()
            .filter(response_cache::Column::Key.eq(key))
            .filter(response_cache::Column::ExpiresAt.gt(&now))
            .one(&self.conn)
            .await?;

        Ok(entry.map(|e| e.body_json))
    }

    /// Stores `body_json` under `key`, replacing any previous entry.
    /// Fails when `now + ttl` falls outside the representable time range.
    pub async fn put(&self, key: &str, body_json: String, ttl: chrono::Duration) -> Result<()> {
        let now = chrono::Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .context("Cache TTL overflows the timestamp range")?;

        let active_model = response_cache::ActiveModel {
            key: Set(key.to_string()),
            body_json: Set(body_json),
            created_at: Set(now.to_rfc3339()),
            expires_at: Set(expires_at.to_rfc3339()),
            ..Default::default()
        };

        ResponseCache::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(response_cache::Column::Key)
                    .update_columns([
                        response_cache::Column::BodyJson,
                        response_cache::Column::CreatedAt,
                        response_cache::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        ResponseCache::delete_many()
            .filter(response_cache::Column::Key.eq(key))
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    /// Drops every entry whose key starts with `prefix`. Returns the number removed.
    pub async fn invalidate_prefix(&self, prefix: &str) -> Result<u64> {
        let result = ResponseCache::delete_many()
            .filter(response_cache::Column::Key.starts_with(prefix))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn clear(&self) -> Result<u64> {
        let result = ResponseCache::delete_many().exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
