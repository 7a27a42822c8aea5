//! `SeaORM` implementation of the `TaxonomyService` trait.

use std::sync::Arc;

use crate::api::types::{NamedDto, Page};
use crate::db::Store;
use crate::domain::ListQuery;
use crate::entities::prelude::{Authors, Genres, Studios, Themes};
use crate::models::taxonomy::NamedInput;
use crate::services::catalog::{CatalogError, slugify, validate_name};
use crate::services::taxonomy_service::{TaxonomyKind, TaxonomyService};

/// Expands `$body` once per kind with `$entity` bound to the matching entity type.
macro_rules! for_kind {
    ($kind:expr, $entity:ident => $body:expr) => {
        match $kind {
            TaxonomyKind::Genre => {
                type $entity = Genres;
                $body
            }
            TaxonomyKind::Theme => {
                type $entity = Themes;
                $body
            }
            TaxonomyKind::Studio => {
                type $entity = Studios;
                $body
            }
            TaxonomyKind::Author => {
                type $entity = Authors;
                $body
            }
        }
    };
}

pub struct SeaOrmTaxonomyService {
    store: Arc<Store>,
}

impl SeaOrmTaxonomyService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl TaxonomyService for SeaOrmTaxonomyService {
    async fn list(
        &self,
        kind: TaxonomyKind,
        query: ListQuery,
    ) -> Result<Page<NamedDto>, CatalogError> {
        let repo = self.store.named_repo();
        let (rows, count) = for_kind!(kind, E => repo.list::<E>(&query).await?);
        Ok(Page::new(rows, count, query.page).map(NamedDto::from))
    }

    async fn get(&self, kind: TaxonomyKind, id: i32) -> Result<NamedDto, CatalogError> {
        let repo = self.store.named_repo();
        let row = for_kind!(kind, E => repo.get::<E>(id).await?);
        row.map(NamedDto::from)
            .ok_or(CatalogError::not_found(kind.label(), id))
    }

    async fn create(
        &self,
        kind: TaxonomyKind,
        input: NamedInput,
    ) -> Result<NamedDto, CatalogError> {
        let name = validate_name("name", &input.name)?;
        let slug = slugify(&name);
        let repo = self.store.named_repo();

        let row = for_kind!(kind, E => repo.create::<E>(&name, slug).await?);

        tracing::info!(kind = %kind, id = row.id, name = %row.name, "Created taxonomy entry");

        Ok(row.into())
    }

    async fn rename(
        &self,
        kind: TaxonomyKind,
        id: i32,
        input: NamedInput,
    ) -> Result<NamedDto, CatalogError> {
        let name = validate_name("name", &input.name)?;
        let slug = slugify(&name);
        let repo = self.store.named_repo();

        let renamed = for_kind!(kind, E => repo.rename::<E>(id, &name, slug).await?);
        if !renamed {
            return Err(CatalogError::not_found(kind.label(), id));
        }

        self.get(kind, id).await
    }

    async fn delete(&self, kind: TaxonomyKind, id: i32) -> Result<(), CatalogError> {
        let repo = self.store.named_repo();
        let found = for_kind!(kind, E => repo.mark_unavailable::<E>(id).await?);
        if found {
            tracing::info!(kind = %kind, id, "Marked taxonomy entry unavailable");
            Ok(())
        } else {
            Err(CatalogError::not_found(kind.label(), id))
        }
    }

    async fn restore(&self, kind: TaxonomyKind, id: i32) -> Result<NamedDto, CatalogError> {
        let repo = self.store.named_repo();
        let found = for_kind!(kind, E => repo.restore::<E>(id).await?);
        if !found {
            return Err(CatalogError::not_found(kind.label(), id));
        }
        self.get(kind, id).await
    }
}
