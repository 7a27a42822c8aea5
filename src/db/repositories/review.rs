use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::catalog::{self, available};
use crate::domain::{Rating, ReviewTarget};
use crate::entities::{prelude::*, reviews, users};

/// A review joined with its author.
pub type ReviewWithAuthor = (reviews::Model, Option<users::Model>);

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Plain insert; a second review for the same (target, user) fails on the
    /// UNIQUE constraint and the `DbErr` is kept inside the returned error.
    pub async fn insert(
        &self,
        user_id: i32,
        target: ReviewTarget,
        rating: Rating,
        comment: &str,
        is_spoiler: bool,
    ) -> Result<reviews::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = reviews::ActiveModel {
            user_id: Set(user_id),
            content_type: Set(target.kind.tag().to_string()),
            object_id: Set(target.id),
            rating: Set(rating.value()),
            comment: Set(comment.to_string()),
            is_spoiler: Set(is_spoiler),
            helpful_count: Set(0),
            reported_count: Set(0),
            available: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        Ok(model)
    }

    /// The user's review of `target`, hidden or not.
    pub async fn find_by_author(
        &self,
        target: ReviewTarget,
        user_id: i32,
    ) -> Result<Option<reviews::Model>> {
        Ok(Reviews::find()
            .filter(reviews::Column::ContentType.eq(target.kind.tag()))
            .filter(reviews::Column::ObjectId.eq(target.id))
            .filter(reviews::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await?)
    }

    /// Brings a soft-deleted review back as a fresh one.
    pub async fn revive(
        &self,
        review: reviews::Model,
        rating: Rating,
        comment: &str,
        is_spoiler: bool,
    ) -> Result<reviews::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let mut active: reviews::ActiveModel = review.into();
        active.rating = Set(rating.value());
        active.comment = Set(comment.to_string());
        active.is_spoiler = Set(is_spoiler);
        active.helpful_count = Set(0);
        active.reported_count = Set(0);
        active.available = Set(true);
        active.created_at = Set(now.clone());
        active.updated_at = Set(now);

        Ok(active.update(&self.conn).await?)
    }

    pub async fn get(&self, id: i32) -> Result<Option<ReviewWithAuthor>> {
        Ok(available::<Reviews>()
            .filter(reviews::Column::Id.eq(id))
            .find_also_related(Users)
            .one(&self.conn)
            .await?)
    }

    /// Lookup that ignores `available`; used by the owner-only delete.
    pub async fn get_any(&self, id: i32) -> Result<Option<reviews::Model>> {
        catalog::find_any::<Reviews, _>(&self.conn, id).await
    }

    /// Available reviews of `target`, newest first.
    pub async fn list_for_target(&self, target: ReviewTarget) -> Result<Vec<ReviewWithAuthor>> {
        Ok(available::<Reviews>()
            .filter(reviews::Column::ContentType.eq(target.kind.tag()))
            .filter(reviews::Column::ObjectId.eq(target.id))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .find_also_related(Users)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<ReviewWithAuthor>> {
        Ok(available::<Reviews>()
            .filter(reviews::Column::UserId.eq(user_id))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .find_also_related(Users)
            .all(&self.conn)
            .await?)
    }

    pub async fn update(
        &self,
        review: reviews::Model,
        rating: Option<Rating>,
        comment: Option<String>,
        is_spoiler: Option<bool>,
    ) -> Result<reviews::Model> {
        let mut active: reviews::ActiveModel = review.into();
        if let Some(rating) = rating {
            active.rating = Set(rating.value());
        }
        if let Some(comment) = comment {
            active.comment = Set(comment);
        }
        if let Some(is_spoiler) = is_spoiler {
            active.is_spoiler = Set(is_spoiler);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.conn).await?)
    }

    pub async fn mark_unavailable(&self, id: i32) -> Result<bool> {
        catalog::mark_unavailable::<Reviews, _>(&self.conn, id).await
    }

    /// `helpful_count = helpful_count + 1` on an available review.
    pub async fn increment_helpful(&self, id: i32) -> Result<bool> {
        self.increment(id, reviews::Column::HelpfulCount).await
    }

    pub async fn increment_reported(&self, id: i32) -> Result<bool> {
        self.increment(id, reviews::Column::ReportedCount).await
    }

    async fn increment(&self, id: i32, column: reviews::Column) -> Result<bool> {
        let result = Reviews::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(reviews::Column::Id.eq(id))
            .filter(reviews::Column::Available.eq(true))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
