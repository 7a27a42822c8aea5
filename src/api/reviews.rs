//! Review endpoints.
//!
//! Listing and creation are mounted under each reviewable kind
//! (`/animes/{id}/reviews`, `/mangas/{id}/reviews`) and delegate here; the
//! remaining actions address a review directly by id.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, ReviewDto, route_prefix};
use crate::domain::ReviewTarget;
use crate::models::review::{NewReview, ReviewChanges};
use crate::services::cache_key;

/// Cache prefix for the review listing of `target`.
fn target_prefix(target: ReviewTarget) -> String {
    format!(
        "{}/{}/reviews",
        route_prefix(target.kind.route_segment()),
        target.id
    )
}

pub(super) async fn list_for_target(
    state: &AppState,
    target: ReviewTarget,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    validate_id(target.kind.tag(), target.id)?;

    let key = cache_key(&target_prefix(target), None);
    let data = state
        .cache()
        .fetch(&key, || state.review_service().list_reviews_for(target))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub(super) async fn create_for_target(
    state: &AppState,
    user: &AuthUser,
    target: ReviewTarget,
    input: NewReview,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), ApiError> {
    validate_id(target.kind.tag(), target.id)?;

    let review = state
        .review_service()
        .create_review(&user.0, target, input)
        .await?;

    state.cache().invalidate(&[target_prefix(target)]).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(review))))
}

pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = validate_id("review", id)?;
    let review = state.review_service().get_review(id).await?;
    Ok(Json(ApiResponse::success(review)))
}

pub async fn update_review(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(changes): Json<ReviewChanges>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = validate_id("review", id)?;
    let review = state
        .review_service()
        .update_review(id, &user.0, changes)
        .await?;

    if let Some(target) = review.target {
        state.cache().invalidate(&[target_prefix(target)]).await;
    }

    Ok(Json(ApiResponse::success(review)))
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("review", id)?;
    let target = state.review_service().delete_review(id, &user.0).await?;

    state.cache().invalidate(&[target_prefix(target)]).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_helpful(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = validate_id("review", id)?;
    let review = state.review_service().mark_helpful(id).await?;

    if let Some(target) = review.target {
        state.cache().invalidate(&[target_prefix(target)]).await;
    }

    Ok(Json(ApiResponse::success(review)))
}

pub async fn report_review(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ReviewDto>>, ApiError> {
    let id = validate_id("review", id)?;
    let review = state.review_service().report(id).await?;

    if let Some(target) = review.target {
        state.cache().invalidate(&[target_prefix(target)]).await;
    }

    Ok(Json(ApiResponse::success(review)))
}
