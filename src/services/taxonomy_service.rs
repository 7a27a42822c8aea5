//! Genres, themes, studios and authors: four tables with one shape, served by
//! a single service keyed on [`TaxonomyKind`].

use std::fmt;

use crate::api::types::{NamedDto, Page};
use crate::domain::ListQuery;
use crate::models::taxonomy::NamedInput;
use crate::services::catalog::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyKind {
    Genre,
    Theme,
    Studio,
    Author,
}

impl TaxonomyKind {
    pub const ALL: [Self; 4] = [Self::Genre, Self::Theme, Self::Studio, Self::Author];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Theme => "Theme",
            Self::Studio => "Studio",
            Self::Author => "Author",
        }
    }

    /// Path segment under `/api/v1`.
    #[must_use]
    pub const fn route_segment(&self) -> &'static str {
        match self {
            Self::Genre => "genres",
            Self::Theme => "themes",
            Self::Studio => "studios",
            Self::Author => "authors",
        }
    }
}

impl fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[async_trait::async_trait]
pub trait TaxonomyService: Send + Sync {
    async fn list(&self, kind: TaxonomyKind, query: ListQuery)
    -> Result<Page<NamedDto>, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::NotFound`] if the row is missing or unavailable
    async fn get(&self, kind: TaxonomyKind, id: i32) -> Result<NamedDto, CatalogError>;

    /// # Errors
    ///
    /// - Returns [`CatalogError::Validation`] on a blank or over-long name
    /// - Returns [`CatalogError::Conflict`] if the name is taken, including by
    ///   an unavailable row
    async fn create(&self, kind: TaxonomyKind, input: NamedInput)
    -> Result<NamedDto, CatalogError>;

    async fn rename(
        &self,
        kind: TaxonomyKind,
        id: i32,
        input: NamedInput,
    ) -> Result<NamedDto, CatalogError>;

    async fn delete(&self, kind: TaxonomyKind, id: i32) -> Result<(), CatalogError>;

    async fn restore(&self, kind: TaxonomyKind, id: i32) -> Result<NamedDto, CatalogError>;
}
