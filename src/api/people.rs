use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{ListParams, validate_id};
use super::{
    AnimeListDto, ApiError, ApiResponse, AppState, CharacterDto, MangaListDto, PersonDto,
    RoleDto, VoiceDto, route_prefix,
};
use crate::domain::Role;
use crate::models::people::{CharacterInput, CharacterPatch, PersonInput, PersonPatch, VoiceInput};
use crate::services::cache_key;

async fn invalidate(state: &AppState) {
    state
        .cache()
        .invalidate(&[route_prefix("characters"), route_prefix("persons")])
        .await;
}

// ============================================================================
// Characters
// ============================================================================

pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = params.to_query(&state.config().pagination)?;
    let key = cache_key(uri.path(), uri.query());

    let data = state
        .cache()
        .fetch(&key, || state.people_service().list_characters(query))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CharacterDto>>, ApiError> {
    let id = validate_id("character", id)?;
    let character = state.people_service().get_character(id).await?;
    Ok(Json(ApiResponse::success(character)))
}

pub async fn create_character(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(input): Json<CharacterInput>,
) -> Result<(StatusCode, Json<ApiResponse<CharacterDto>>), ApiError> {
    user.require(Role::Contributor)?;

    let character = state.people_service().create_character(input).await?;
    invalidate(&state).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(character))))
}

pub async fn update_character(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(patch): Json<CharacterPatch>,
) -> Result<Json<ApiResponse<CharacterDto>>, ApiError> {
    user.require(Role::Contributor)?;
    let id = validate_id("character", id)?;

    let character = state.people_service().update_character(id, patch).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(character)))
}

pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Role::Contributor)?;
    let id = validate_id("character", id)?;

    state.people_service().delete_character(id).await?;
    invalidate(&state).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_character(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CharacterDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("character", id)?;

    let character = state.people_service().restore_character(id).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(character)))
}

pub async fn character_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<AnimeListDto>>, ApiError> {
    let id = validate_id("character", id)?;
    let anime = state.people_service().character_anime(id).await?;
    Ok(Json(ApiResponse::success(anime)))
}

pub async fn character_manga(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MangaListDto>>, ApiError> {
    let id = validate_id("character", id)?;
    let manga = state.people_service().character_manga(id).await?;
    Ok(Json(ApiResponse::success(manga)))
}

pub async fn character_voices(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<VoiceDto>>>, ApiError> {
    let id = validate_id("character", id)?;
    let voices = state.people_service().character_voices(id).await?;
    Ok(Json(ApiResponse::success(voices)))
}

pub async fn add_voice(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(input): Json<VoiceInput>,
) -> Result<Json<ApiResponse<Vec<VoiceDto>>>, ApiError> {
    user.require(Role::Contributor)?;
    let id = validate_id("character", id)?;

    let voices = state.people_service().add_voice(id, input).await?;
    Ok(Json(ApiResponse::success(voices)))
}

// ============================================================================
// Persons
// ============================================================================

pub async fn list_persons(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = params.to_query(&state.config().pagination)?;
    let key = cache_key(uri.path(), uri.query());

    let data = state
        .cache()
        .fetch(&key, || state.people_service().list_persons(query))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PersonDto>>, ApiError> {
    let id = validate_id("person", id)?;
    let person = state.people_service().get_person(id).await?;
    Ok(Json(ApiResponse::success(person)))
}

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(input): Json<PersonInput>,
) -> Result<(StatusCode, Json<ApiResponse<PersonDto>>), ApiError> {
    user.require(Role::Contributor)?;

    let person = state.people_service().create_person(input).await?;
    invalidate(&state).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(person))))
}

pub async fn update_person(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
    Json(patch): Json<PersonPatch>,
) -> Result<Json<ApiResponse<PersonDto>>, ApiError> {
    user.require(Role::Contributor)?;
    let id = validate_id("person", id)?;

    let person = state.people_service().update_person(id, patch).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(person)))
}

pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    user.require(Role::Contributor)?;
    let id = validate_id("person", id)?;

    state.people_service().delete_person(id).await?;
    invalidate(&state).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn restore_person(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PersonDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id("person", id)?;

    let person = state.people_service().restore_person(id).await?;
    invalidate(&state).await;

    Ok(Json(ApiResponse::success(person)))
}

pub async fn person_voices(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<RoleDto>>>, ApiError> {
    let id = validate_id("person", id)?;
    let roles = state.people_service().person_voices(id).await?;
    Ok(Json(ApiResponse::success(roles)))
}
