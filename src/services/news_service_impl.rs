//! `SeaORM` implementation of the `NewsService` trait.

use std::sync::Arc;

use crate::api::types::{NewsDto, Page};
use crate::db::{Store, User};
use crate::domain::{ListQuery, NewsTag};
use crate::models::news::{NewsInput, NewsPatch};
use crate::services::catalog::{CatalogError, validate_name};
use crate::services::news_service::NewsService;

const KIND: &str = "News";

pub struct SeaOrmNewsService {
    store: Arc<Store>,
}

impl SeaOrmNewsService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

fn require_text(field: &str, value: &str) -> Result<String, CatalogError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

#[async_trait::async_trait]
impl NewsService for SeaOrmNewsService {
    async fn list(
        &self,
        query: ListQuery,
        tag: Option<NewsTag>,
    ) -> Result<Page<NewsDto>, CatalogError> {
        let (items, count) = self.store.news_repo().list(&query, tag).await?;
        Ok(Page::new(items, count, query.page).map(NewsDto::from))
    }

    async fn get(&self, id: i32) -> Result<NewsDto, CatalogError> {
        self.store
            .news_repo()
            .get(id)
            .await?
            .map(NewsDto::from)
            .ok_or(CatalogError::not_found(KIND, id))
    }

    async fn create(&self, author: &User, mut input: NewsInput) -> Result<NewsDto, CatalogError> {
        input.title = validate_name("title", &input.title)?;
        input.description = validate_name("description", &input.description)?;
        input.content = require_text("content", &input.content)?;

        let item = self.store.news_repo().create(author.id, &input).await?;
        tracing::info!(news_id = item.id, tag = %item.tag, "Published news");

        Ok(item.into())
    }

    async fn update(&self, id: i32, mut patch: NewsPatch) -> Result<NewsDto, CatalogError> {
        let repo = self.store.news_repo();
        let item = repo.get(id).await?.ok_or(CatalogError::not_found(KIND, id))?;

        if let Some(title) = patch.title.as_deref() {
            patch.title = Some(validate_name("title", title)?);
        }
        if let Some(description) = patch.description.as_deref() {
            patch.description = Some(validate_name("description", description)?);
        }
        if let Some(content) = patch.content.as_deref() {
            patch.content = Some(require_text("content", content)?);
        }

        Ok(repo.update(item, &patch).await?.into())
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        if self.store.news_repo().mark_unavailable(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found(KIND, id))
        }
    }

    async fn restore(&self, id: i32) -> Result<NewsDto, CatalogError> {
        if !self.store.news_repo().restore(id).await? {
            return Err(CatalogError::not_found(KIND, id));
        }
        self.get(id).await
    }
}
