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
    MangaDto, MangaListDto, MangaSummaryDto, ApiError, ApiResponse, AppState, CharacterDto, Page,
    ReviewDto, reviews, route_prefix,
};
use crate::domain::{CatalogKind, ReviewTarget, Role};
use crate::models::manga::{MangaInput, MangaPatch};
use crate::models::review::NewReview;
use crate::services::cache_key;

use super::anime::RANKING_LIMIT;

fn prefix() -> String {
    route_prefix(CatalogKind::Manga.route_segment())
}

pub async fn list_manga(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = params.to_query(&state.config().pagination)?;
    let key = cache_key(uri.path(), uri.query());

    let data = state
        .cache()
        .fetch(&key, || state.manga_service().list(query))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_manga(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MangaDto>>, ApiError> {
    let id = validate_id("manga", id)?;
    let manga = state.manga_service().get(id).await?;
    Ok(Json(ApiResponse::success(manga)))
}

pub async fn create_manga(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(input): Json<MangaInput>,
) -> Result<(StatusCode, Json<ApiResponse<MangaDto>>), ApiError> {
    user.require(Role::Staff)?;

    let manga = state.manga_service().create(input).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(manga))))
}

pub async fn update_manga(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(patch): Json<MangaPatch>,
) -> Result<Json<ApiResponse<MangaDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("manga", id)?;

    let manga = state.manga_service().update(id, patch).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok(Json(ApiResponse::success(manga)))
}

pub async fn delete_manga(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("manga", id)?;

    state.manga_service().delete(id).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_manga(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MangaDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("manga", id)?;

    let manga = state.manga_service().restore(id).await?;
    state.cache().invalidate(&[prefix()]).await;

    Ok(Json(ApiResponse::success(manga)))
}

/// `GET /mangas/popular`: 204 when nothing is available.
pub async fn popular_manga(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, ApiError> {
    let key = cache_key(uri.path(), None);
    let data = state
        .cache()
        .fetch(&key, || state.manga_service().popular(RANKING_LIMIT))
        .await?;

    if data.as_array().is_some_and(Vec::is_empty) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(ApiResponse::success(data)).into_response())
}

pub async fn top_manga(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MangaListDto>>>, ApiError> {
    let items = state.manga_service().top_scored(RANKING_LIMIT).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn recommended_manga(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let key = cache_key(uri.path(), None);
    let data = state
        .cache()
        .fetch(&key, || state.manga_service().recommended())
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn manga_by_genre(
    State(state): State<Arc<AppState>>,
    Path(genre_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<MangaSummaryDto>>>, ApiError> {
    let genre_id = validate_id("genre", genre_id)?;
    let items = state.manga_service().by_genre(genre_id).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn similar_manga(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<MangaListDto>>>, ApiError> {
    let id = validate_id("manga", id)?;
    let items = state.manga_service().similar(id).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn manga_characters(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<CharacterDto>>>, ApiError> {
    let id = validate_id("manga", id)?;
    let characters = state.manga_service().characters(id).await?;
    Ok(Json(ApiResponse::success(characters)))
}

pub async fn manga_by_author(
    State(state): State<Arc<AppState>>,
    Path(author_id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Page<MangaListDto>>>, ApiError> {
    let author_id = validate_id("author", author_id)?;
    let page = params.page(&state.config().pagination);
    let items = state.manga_service().by_author(author_id, page).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn list_manga_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    reviews::list_for_target(&state, ReviewTarget::manga(id)).await
}

pub async fn create_manga_review(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(input): Json<NewReview>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), ApiError> {
    reviews::create_for_target(&state, &user, ReviewTarget::manga(id), input).await
}
