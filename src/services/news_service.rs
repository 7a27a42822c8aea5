//! Editorial news items.

use crate::api::types::{NewsDto, Page};
use crate::db::User;
use crate::domain::{ListQuery, NewsTag};
use crate::models::news::{NewsInput, NewsPatch};
use crate::services::catalog::CatalogError;

#[async_trait::async_trait]
pub trait NewsService: Send + Sync {
    /// Available news, optionally limited to one tag.
    async fn list(
        &self,
        query: ListQuery,
        tag: Option<NewsTag>,
    ) -> Result<Page<NewsDto>, CatalogError>;

    async fn get(&self, id: i32) -> Result<NewsDto, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::Validation`] on a blank title, description or content
    async fn create(&self, author: &User, input: NewsInput) -> Result<NewsDto, CatalogError>;

    async fn update(&self, id: i32, patch: NewsPatch) -> Result<NewsDto, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;

    async fn restore(&self, id: i32) -> Result<NewsDto, CatalogError>;
}
