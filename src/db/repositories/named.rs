//! Genres, themes, studios and authors share one shape: a unique name plus a slug.

use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, FromQueryResult, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;

use super::catalog::{self, available};
use crate::domain::{ListQuery, Searchable};
use crate::entities::{authors, genres, prelude::*, studios, themes};

#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct NamedRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    #[serde(skip)]
    pub available: bool,
    #[serde(skip)]
    pub created_at: String,
    #[serde(skip)]
    pub updated_at: String,
}

pub trait NamedEntity: Searchable {
    fn slug_column() -> Self::Column;

    fn build(name: String, slug: String, now: String) -> Self::ActiveModel;
}

macro_rules! named_entity {
    ($entity:ty, $module:ident) => {
        impl NamedEntity for $entity {
            fn slug_column() -> $module::Column {
                $module::Column::Slug
            }

            fn build(name: String, slug: String, now: String) -> $module::ActiveModel {
                $module::ActiveModel {
                    name: Set(name),
                    slug: Set(slug),
                    available: Set(true),
                    created_at: Set(now.clone()),
                    updated_at: Set(now),
                    ..Default::default()
                }
            }
        }
    };
}

named_entity!(Genres, genres);
named_entity!(Themes, themes);
named_entity!(Studios, studios);
named_entity!(Authors, authors);

pub struct NamedRepository {
    conn: DatabaseConnection,
}

impl NamedRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list<E: NamedEntity>(&self, query: &ListQuery) -> Result<(Vec<NamedRow>, u64)> {
        let paginator = catalog::search_select::<E>(query)
            .into_model::<NamedRow>()
            .paginate(&self.conn, query.page.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(query.page.index()).await?;

        Ok((rows, total))
    }

    pub async fn get<E: NamedEntity>(&self, id: i32) -> Result<Option<NamedRow>> {
        Ok(available::<E>()
            .filter(E::id_column().eq(id))
            .into_model::<NamedRow>()
            .one(&self.conn)
            .await?)
    }

    pub async fn get_any<E: NamedEntity>(&self, id: i32) -> Result<Option<NamedRow>> {
        Ok(E::find()
            .filter(E::id_column().eq(id))
            .into_model::<NamedRow>()
            .one(&self.conn)
            .await?)
    }

    pub async fn get_by_name<E: NamedEntity>(&self, name: &str) -> Result<Option<NamedRow>> {
        Ok(E::find()
            .filter(E::search_column().eq(name))
            .into_model::<NamedRow>()
            .one(&self.conn)
            .await?)
    }

    /// Inserts a new row. A duplicate name surfaces as a unique-constraint `DbErr`.
    pub async fn create<E: NamedEntity>(&self, name: &str, slug: String) -> Result<NamedRow>
    where
        E::Model: IntoActiveModel<E::ActiveModel>,
    {
        let now = chrono::Utc::now().to_rfc3339();

        E::insert(E::build(name.to_string(), slug, now))
            .exec_without_returning(&self.conn)
            .await?;

        self.get_by_name::<E>(name)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inserted row for {name} could not be read back"))
    }

    /// Renames an available row. Returns `false` when no available row matched.
    pub async fn rename<E: NamedEntity>(&self, id: i32, name: &str, slug: String) -> Result<bool> {
        let result = E::update_many()
            .col_expr(E::search_column(), Expr::value(name))
            .col_expr(E::slug_column(), Expr::value(slug))
            .col_expr(
                E::updated_at_column(),
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(E::id_column().eq(id))
            .filter(E::available_column().eq(true))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_unavailable<E: NamedEntity>(&self, id: i32) -> Result<bool> {
        catalog::mark_unavailable::<E, _>(&self.conn, id).await
    }

    pub async fn restore<E: NamedEntity>(&self, id: i32) -> Result<bool> {
        catalog::restore::<E, _>(&self.conn, id).await
    }

    /// Number of `ids` that name an available row.
    pub async fn count_available<E: NamedEntity>(&self, ids: &[i32]) -> Result<u64>
    where
        E::Model: Send + Sync,
    {
        catalog::count_available_ids::<E, _>(&self.conn, ids).await
    }

    pub async fn list_all<E: NamedEntity>(&self) -> Result<Vec<NamedRow>> {
        Ok(available::<E>()
            .order_by_asc(E::id_column())
            .into_model::<NamedRow>()
            .all(&self.conn)
            .await?)
    }
}
