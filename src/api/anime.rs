use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{ListParams, validate_id};
use super::{
    AnimeDto, AnimeListDto, AnimeSummaryDto, ApiError, ApiResponse, AppState, CharacterDto, Page,
    ReviewDto, reviews, route_prefix,
};
use crate::domain::{CatalogKind, ReviewTarget, Role};
use crate::models::anime::{AnimeInput, AnimePatch};
use crate::models::review::NewReview;
use crate::services::cache_key;

/// Length of the popular and top listings.
pub const RANKING_LIMIT: u64 = 50;

fn prefix() -> String {
    route_prefix(CatalogKind::Anime.route_segment())
}

pub async fn list_anime(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = params.to_query(&state.config().pagination)?;
    let key = cache_key(uri.path(), uri.query());

    let data = state
        .cache()
        .fetch(&key, || state.anime_service().list(query))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AnimeDto>>, ApiError> {
    let id = validate_id("anime", id)?;
    let anime = state.anime_service().get(id).await?;
    Ok(Json(ApiResponse::success(anime)))
}

pub async fn create_anime(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(input): Json<AnimeInput>,
) -> Result<(StatusCode, Json<ApiResponse<AnimeDto>>), ApiError> {
    user.require(Role::Staff)?;

    let anime = state.anime_service().create(input).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(anime))))
}

pub async fn update_anime(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(patch): Json<AnimePatch>,
) -> Result<Json<ApiResponse<AnimeDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("anime", id)?;

    let anime = state.anime_service().update(id, patch).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok(Json(ApiResponse::success(anime)))
}

pub async fn delete_anime(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("anime", id)?;

    state.anime_service().delete(id).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_anime(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AnimeDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("anime", id)?;

    let anime = state.anime_service().restore(id).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok(Json(ApiResponse::success(anime)))
}

/// `GET /animes/popular`: 204 when nothing is available.
pub async fn popular_anime(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, ApiError> {
    let key = cache_key(uri.path(), None);
    let data = state
        .cache()
        .fetch(&key, || state.anime_service().popular(RANKING_LIMIT))
        .await?;

    if data.as_array().is_some_and(Vec::is_empty) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(ApiResponse::success(data)).into_response())
}

pub async fn top_anime(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AnimeListDto>>>, ApiError> {
    let items = state.anime_service().top_scored(RANKING_LIMIT).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn recommended_anime(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let key = cache_key(uri.path(), None);
    let data = state
        .cache()
        .fetch(&key, || state.anime_service().recommended())
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn anime_by_genre(
    State(state): State<Arc<AppState>>,
    Path(genre_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<AnimeSummaryDto>>>, ApiError> {
    let genre_id = validate_id("genre", genre_id)?;
    let items = state.anime_service().by_genre(genre_id).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn similar_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<AnimeListDto>>>, ApiError> {
    let id = validate_id("anime", id)?;
    let items = state.anime_service().similar(id).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn anime_characters(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CharacterDto>>>, ApiError> {
    let id = validate_id("anime", id)?;
    let characters = state.anime_service().characters(id).await?;
    Ok(Json(ApiResponse::success(characters)))
}

pub async fn anime_by_studio(
    State(state): State<Arc<AppState>>,
    Path(studio_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Page<AnimeListDto>>>, ApiError> {
    let studio_id = validate_id("studio", studio_id)?;
    let page = params.page(&state.config().pagination);
    let items = state.anime_service().by_studio(studio_id, page).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn list_anime_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    reviews::list_for_target(&state, ReviewTarget::anime(id)).await
}

pub async fn create_anime_review(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(input): Json<NewReview>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), ApiError> {
    reviews::create_for_target(&state, &user, ReviewTarget::anime(id), input).await
}
