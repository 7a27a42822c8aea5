//! `SeaORM` implementation of the `ReviewService` trait.

use std::sync::Arc;

use crate::api::types::ReviewDto;
use crate::db::{Store, User};
use crate::domain::{CatalogItem, Rating, ReviewTarget};
use crate::models::review::{NewReview, ReviewChanges};
use crate::services::review_service::{ReviewError, ReviewService};

pub struct SeaOrmReviewService {
    store: Arc<Store>,
}

impl SeaOrmReviewService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    async fn load(&self, id: i32) -> Result<ReviewDto, ReviewError> {
        self.store
            .review_repo()
            .get(id)
            .await?
            .map(ReviewDto::from)
            .ok_or_else(|| ReviewError::NotFound(format!("Review {id}")))
    }
}

fn parse_rating(value: i32) -> Result<Rating, ReviewError> {
    Rating::new(value).map_err(|e| ReviewError::Validation(e.to_string()))
}

fn parse_comment(value: &str) -> Result<String, ReviewError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReviewError::Validation("Comment cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

#[async_trait::async_trait]
impl ReviewService for SeaOrmReviewService {
    async fn resolve_target(&self, target: ReviewTarget) -> Result<CatalogItem, ReviewError> {
        self.store
            .resolve_target(target)
            .await?
            .ok_or_else(|| ReviewError::NotFound(format!("{} {}", target.kind, target.id)))
    }

    async fn create_review(
        &self,
        user: &User,
        target: ReviewTarget,
        input: NewReview,
    ) -> Result<ReviewDto, ReviewError> {
        let rating = parse_rating(input.rating)?;
        let comment = parse_comment(&input.comment)?;

        let item = self.resolve_target(target).await?;
        if !item.is_available() {
            return Err(ReviewError::NotFound(format!("{} {}", target.kind, target.id)));
        }

        let repo = self.store.review_repo();

        // The UNIQUE index decides races; this lookup only spares a failed insert
        // and lets a soft-deleted review be written again.
        let review = match repo.find_by_author(target, user.id).await? {
            Some(existing) if existing.available => {
                return Err(ReviewError::Conflict(
                    "You have already reviewed this item".to_string(),
                ));
            }
            Some(hidden) => repo.revive(hidden, rating, &comment, input.is_spoiler).await?,
            None => {
                repo.insert(user.id, target, rating, &comment, input.is_spoiler)
                    .await?
            }
        };

        tracing::info!(
            review_id = review.id,
            user_id = user.id,
            target = %target,
            rating = rating.value(),
            "Review created"
        );

        self.load(review.id).await
    }

    async fn list_reviews_for(&self, target: ReviewTarget) -> Result<Vec<ReviewDto>, ReviewError> {
        self.resolve_target(target).await?;

        let reviews = self.store.review_repo().list_for_target(target).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }

    async fn get_review(&self, id: i32) -> Result<ReviewDto, ReviewError> {
        self.load(id).await
    }

    async fn update_review(
        &self,
        id: i32,
        user: &User,
        changes: ReviewChanges,
    ) -> Result<ReviewDto, ReviewError> {
        let repo = self.store.review_repo();
        let (review, _) = repo
            .get(id)
            .await?
            .ok_or_else(|| ReviewError::NotFound(format!("Review {id}")))?;

        if review.user_id != user.id {
            return Err(ReviewError::Forbidden(
                "Only the author can edit this review".to_string(),
            ));
        }

        if changes.is_empty() {
            return self.load(id).await;
        }

        let rating = changes.rating.map(parse_rating).transpose()?;
        let comment = changes.comment.as_deref().map(parse_comment).transpose()?;

        repo.update(review, rating, comment, changes.is_spoiler).await?;
        self.load(id).await
    }

    async fn delete_review(&self, id: i32, user: &User) -> Result<ReviewTarget, ReviewError> {
        let repo = self.store.review_repo();
        let review = repo
            .get_any(id)
            .await?
            .ok_or_else(|| ReviewError::NotFound(format!("Review {id}")))?;

        if review.user_id != user.id {
            return Err(ReviewError::Forbidden(
                "Only the author can delete this review".to_string(),
            ));
        }

        if review.available {
            repo.mark_unavailable(id).await?;
            tracing::info!(review_id = id, user_id = user.id, "Review deleted");
        }

        ReviewTarget::from_parts(&review.content_type, review.object_id)
            .map_err(|e| ReviewError::Database(e.to_string()))
    }

    async fn mark_helpful(&self, id: i32) -> Result<ReviewDto, ReviewError> {
        if !self.store.review_repo().increment_helpful(id).await? {
            return Err(ReviewError::NotFound(format!("Review {id}")));
        }
        self.load(id).await
    }

    async fn report(&self, id: i32) -> Result<ReviewDto, ReviewError> {
        if !self.store.review_repo().increment_reported(id).await? {
            return Err(ReviewError::NotFound(format!("Review {id}")));
        }
        tracing::warn!(review_id = id, "Review reported");
        self.load(id).await
    }

    async fn list_reviews_by_user(&self, user_id: i32) -> Result<Vec<ReviewDto>, ReviewError> {
        let reviews = self.store.review_repo().list_by_user(user_id).await?;
        Ok(reviews.into_iter().map(ReviewDto::from).collect())
    }
}
