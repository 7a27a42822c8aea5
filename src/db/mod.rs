use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{CatalogItem, ReviewTarget, Role};

pub mod migrator;
pub mod repositories;

pub use repositories::anime::{AnimeDetail, AnimeSummary};
pub use repositories::manga::{MangaDetail, MangaSummary};
pub use repositories::named::{NamedEntity, NamedRow};
pub use repositories::people::VoiceCredit;
pub use repositories::review::ReviewWithAuthor;
pub use repositories::user::{User, generate_api_key};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        // An in-memory database lives and dies with its single connection.
        let max_connections = if in_memory { 1 } else { max_connections };
        let min_connections = min_connections.min(max_connections);

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn manga_repo(&self) -> repositories::manga::MangaRepository {
        repositories::manga::MangaRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn named_repo(&self) -> repositories::named::NamedRepository {
        repositories::named::NamedRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn people_repo(&self) -> repositories::people::PeopleRepository {
        repositories::people::PeopleRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn playlist_repo(&self) -> repositories::playlist::PlaylistRepository {
        repositories::playlist::PlaylistRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn news_repo(&self) -> repositories::news::NewsRepository {
        repositories::news::NewsRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn cache_repo(&self) -> repositories::cache::CacheRepository {
        repositories::cache::CacheRepository::new(self.conn.clone())
    }

    fn target_repo(&self) -> repositories::target::TargetRepository {
        repositories::target::TargetRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn resolve_target(&self, target: ReviewTarget) -> Result<Option<CatalogItem>> {
        self.target_repo().resolve(target).await
    }

    pub async fn create_user(&self, username: &str, role: Role) -> Result<User> {
        self.user_repo().create(username, role).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn set_user_role(&self, username: &str, role: Role) -> Result<User> {
        self.user_repo().set_role(username, role).await
    }

    pub async fn regenerate_api_key(&self, username: &str) -> Result<String> {
        self.user_repo().regenerate_api_key(username).await
    }
}
