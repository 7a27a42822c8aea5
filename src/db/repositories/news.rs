use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, Set};

use super::catalog;
use crate::domain::{ListQuery, NewsTag};
use crate::entities::{news, prelude::*};
use crate::models::news::{NewsInput, NewsPatch};

pub struct NewsRepository {
    conn: DatabaseConnection,
}

impl NewsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(
        &self,
        query: &ListQuery,
        tag: Option<NewsTag>,
    ) -> Result<(Vec<news::Model>, u64)> {
        let mut select = catalog::search_select::<News>(query);

        if let Some(tag) = tag {
            select = select.filter(news::Column::Tag.eq(tag.as_str()));
        }

        catalog::paginate(&self.conn, select, query.page).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<news::Model>> {
        catalog::find_available::<News, _>(&self.conn, id).await
    }

    pub async fn get_any(&self, id: i32) -> Result<Option<news::Model>> {
        catalog::find_any::<News, _>(&self.conn, id).await
    }

    pub async fn create(&self, author_id: i32, input: &NewsInput) -> Result<news::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = news::ActiveModel {
            author_id: Set(author_id),
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            content: Set(input.content.clone()),
            image: Set(input.image.clone()),
            source: Set(input.source.clone()),
            tag: Set(input.tag.as_str().to_string()),
            available: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model)
    }

    pub async fn update(&self, item: news::Model, patch: &NewsPatch) -> Result<news::Model> {
        let mut active: news::ActiveModel = item.into();
        if let Some(title) = &patch.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            active.description = Set(description.clone());
        }
        if let Some(content) = &patch.content {
            active.content = Set(content.clone());
        }
        if let Some(image) = &patch.image {
            active.image = Set(Some(image.clone()));
        }
        if let Some(source) = &patch.source {
            active.source = Set(Some(source.clone()));
        }
        if let Some(tag) = patch.tag {
            active.tag = Set(tag.as_str().to_string());
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.conn).await?)
    }

    pub async fn mark_unavailable(&self, id: i32) -> Result<bool> {
        catalog::mark_unavailable::<News, _>(&self.conn, id).await
    }

    pub async fn restore(&self, id: i32) -> Result<bool> {
        catalog::restore::<News, _>(&self.conn, id).await
    }
}
