//! Domain service for user reviews of catalog items.
//!
//! A review points at its target through a [`ReviewTarget`] (type tag plus id)
//! rather than a foreign key, so the service resolves the target itself before
//! accepting a new review. One user may hold at most one review per target;
//! the storage layer enforces that and the service reports it as a conflict.

use thiserror::Error;

use crate::api::types::ReviewDto;
use crate::db::User;
use crate::domain::{CatalogItem, ReviewTarget};
use crate::models::review::{NewReview, ReviewChanges};
use crate::services::catalog::is_unique_violation;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid review: {0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ReviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        if is_unique_violation(&err) {
            Self::Conflict("You have already reviewed this item".to_string())
        } else {
            Self::Database(err.to_string())
        }
    }
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db_err) => Self::from(db_err),
            Err(err) => Self::Database(err.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait ReviewService: Send + Sync {
    /// Resolves a target regardless of its availability.
    ///
    /// # Errors
    ///
    /// - Returns [`ReviewError::NotFound`] if no row matches the target
    async fn resolve_target(&self, target: ReviewTarget) -> Result<CatalogItem, ReviewError>;

    /// # Errors
    ///
    /// - Returns [`ReviewError::Validation`] if the rating is outside `1..=10`
    ///   or the comment is blank
    /// - Returns [`ReviewError::NotFound`] if the target is missing or unavailable
    /// - Returns [`ReviewError::Conflict`] if `user` already reviewed the target
    async fn create_review(
        &self,
        user: &User,
        target: ReviewTarget,
        input: NewReview,
    ) -> Result<ReviewDto, ReviewError>;

    /// Available reviews of the target, newest first. An existing target with
    /// no reviews yields an empty list.
    ///
    /// # Errors
    ///
    /// - Returns [`ReviewError::NotFound`] if no row matches the target
    async fn list_reviews_for(&self, target: ReviewTarget) -> Result<Vec<ReviewDto>, ReviewError>;

    async fn get_review(&self, id: i32) -> Result<ReviewDto, ReviewError>;

    /// # Errors
    ///
    /// - Returns [`ReviewError::NotFound`] if the review is missing or unavailable
    /// - Returns [`ReviewError::Forbidden`] if `user` is not the author
    /// - Returns [`ReviewError::Validation`] with the same rules as `create_review`
    async fn update_review(
        &self,
        id: i32,
        user: &User,
        changes: ReviewChanges,
    ) -> Result<ReviewDto, ReviewError>;

    /// Soft delete by the author. Returns the reviewed target.
    ///
    /// # Errors
    ///
    /// - Returns [`ReviewError::NotFound`] if no review has this id
    /// - Returns [`ReviewError::Forbidden`] if `user` is not the author
    async fn delete_review(&self, id: i32, user: &User) -> Result<ReviewTarget, ReviewError>;

    async fn mark_helpful(&self, id: i32) -> Result<ReviewDto, ReviewError>;

    async fn report(&self, id: i32) -> Result<ReviewDto, ReviewError>;

    async fn list_reviews_by_user(&self, user_id: i32) -> Result<Vec<ReviewDto>, ReviewError>;
}
