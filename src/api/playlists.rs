use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{ListParams, validate_id};
use super::{ApiError, ApiResponse, AppState, PlaylistDto, route_prefix};
use crate::domain::Role;
use crate::models::playlist::{PlaylistInput, PlaylistItemInput};
use crate::services::cache_key;

async fn invalidate(state: &AppState) {
    state.cache().invalidate(&[route_prefix("playlists")]).await;
}

pub async fn list_playlists(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = params.to_query(&state.config().pagination)?;
    let key = cache_key(uri.path(), uri.query());

    let data = state
        .cache()
        .fetch(&key, || state.playlist_service().list(query))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_playlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PlaylistDto>>, ApiError> {
    let id = validate_id("playlist", id)?;
    let playlist = state.playlist_service().get(id).await?;
    Ok(Json(ApiResponse::success(playlist)))
}

pub async fn create_playlist(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(input): Json<PlaylistInput>,
) -> Result<(StatusCode, Json<ApiResponse<PlaylistDto>>), ApiError> {
    let playlist = state.playlist_service().create(&user.0, input).await?;
    invalidate(&state).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(playlist))))
}

pub async fn rename_playlist(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(input): Json<PlaylistInput>,
) -> Result<Json<ApiResponse<PlaylistDto>>, ApiError> {
    let id = validate_id("playlist", id)?;

    let playlist = state.playlist_service().rename(&user.0, id, input).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(playlist)))
}

pub async fn delete_playlist(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("playlist", id)?;

    state.playlist_service().delete(&user.0, id).await?;
    invalidate(&state).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_playlist(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PlaylistDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("playlist", id)?;

    let playlist = state.playlist_service().restore(id).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(playlist)))
}

pub async fn add_item(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(item): Json<PlaylistItemInput>,
) -> Result<Json<ApiResponse<PlaylistDto>>, ApiError> {
    let id = validate_id("playlist", id)?;
    let playlist = state.playlist_service().add_item(&user.0, id, item).await?;
    Ok(Json(ApiResponse::success(playlist)))
}

pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((id, anime_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<PlaylistDto>>, ApiError> {
    let id = validate_id("playlist", id)?;
    let anime_id = validate_id("anime", anime_id)?;

    let playlist = state
        .playlist_service()
        .remove_item(&user.0, id, anime_id)
        .await?;

    Ok(Json(ApiResponse::success(playlist)))
}
