use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{ListParams, validate_id};
use super::{ApiError, ApiResponse, AppState, NewsDto, route_prefix};
use crate::domain::Role;
use crate::models::news::{NewsInput, NewsPatch};
use crate::services::cache_key;

async fn invalidate(state: &AppState) {
    state.cache().invalidate(&[route_prefix("news")]).await;
}

/// `GET /news/?tag=industry`
pub async fn list_news(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = params.to_query(&state.config().pagination)?;
    let tag = params.news_tag()?;
    let key = cache_key(uri.path(), uri.query());

    let data = state
        .cache()
        .fetch(&key, || state.news_service().list(query, tag))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<NewsDto>>, ApiError> {
    let id = validate_id("news", id)?;
    let item = state.news_service().get(id).await?;
    Ok(Json(ApiResponse::success(item)))
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(input): Json<NewsInput>,
) -> Result<(StatusCode, Json<ApiResponse<NewsDto>>), ApiError> {
    let author = user.require(Role::Staff)?;

    let item = state.news_service().create(author, input).await?;
    invalidate(&state).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

pub async fn update_news(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(patch): Json<NewsPatch>,
) -> Result<Json<ApiResponse<NewsDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("news", id)?;

    let item = state.news_service().update(id, patch).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(item)))
}

pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("news", id)?;

    state.news_service().delete(id).await?;
    invalidate(&state).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_news(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<NewsDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("news", id)?;

    let item = state.news_service().restore(id).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(item)))
}
