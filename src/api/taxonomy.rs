//! Genre, theme, studio and author endpoints.
//!
//! The four kinds share every handler body; `taxonomy_handlers!` stamps out
//! the per-kind entry points the router needs.

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{StatusCode, Uri},
};
use serde_json::Value;
use std::sync::Arc;

use super::auth::AuthUser;
use super::validation::{ListParams, validate_id};
use super::{ApiError, ApiResponse, AppState, NamedDto, route_prefix};
use crate::domain::Role;
use crate::models::taxonomy::NamedInput;
use crate::services::{TaxonomyKind, cache_key};

async fn list(
    state: &AppState,
    kind: TaxonomyKind,
    uri: &Uri,
    params: &ListParams,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = params.to_query(&state.config().pagination)?;
    let key = cache_key(uri.path(), uri.query());

    let data = state
        .cache()
        .fetch(&key, || state.taxonomy_service().list(kind, query))
        .await?;

    Ok(Json(ApiResponse::success(data)))
}

async fn get(
    state: &AppState,
    kind: TaxonomyKind,
    id: i32,
) -> Result<Json<ApiResponse<NamedDto>>, ApiError> {
    let id = validate_id(kind.label(), id)?;
    let row = state.taxonomy_service().get(kind, id).await?;
    Ok(Json(ApiResponse::success(row)))
}

async fn create(
    state: &AppState,
    kind: TaxonomyKind,
    user: &AuthUser,
    input: NamedInput,
) -> Result<(StatusCode, Json<ApiResponse<NamedDto>>), ApiError> {
    user.require(Role::Staff)?;

    let row = state.taxonomy_service().create(kind, input).await?;
    invalidate(state, kind).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(row))))
}

async fn rename(
    state: &AppState,
    kind: TaxonomyKind,
    user: &AuthUser,
    id: i32,
    input: NamedInput,
) -> Result<Json<ApiResponse<NamedDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id(kind.label(), id)?;

    let row = state.taxonomy_service().rename(kind, id, input).await?;
    invalidate(state, kind).await;

    Ok(Json(ApiResponse::success(row)))
}

async fn delete(
    state: &AppState,
    kind: TaxonomyKind,
    user: &AuthUser,
    id: i32,
) -> Result<StatusCode, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id(kind.label(), id)?;

    state.taxonomy_service().delete(kind, id).await?;
    invalidate(state, kind).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn restore(
    state: &AppState,
    kind: TaxonomyKind,
    user: &AuthUser,
    id: i32,
) -> Result<Json<ApiResponse<NamedDto>>, ApiError> {
    user.require(Role::Staff)?;
    let id = validate_id(kind.label(), id)?;

    let row = state.taxonomy_service().restore(kind, id).await?;
    invalidate(state, kind).await;

    Ok(Json(ApiResponse::success(row)))
}

async fn invalidate(state: &AppState, kind: TaxonomyKind) {
    state
        .cache()
        .invalidate(&[route_prefix(kind.route_segment())])
        .await;
}

macro_rules! taxonomy_handlers {
    ($kind:expr, $list:ident, $get:ident, $create:ident, $rename:ident, $delete:ident, $restore:ident) => {
        pub async fn $list(
            State(state): State<Arc<AppState>>,
            OriginalUri(uri): OriginalUri,
            Query(params): Query<ListParams>,
        ) -> Result<Json<ApiResponse<Value>>, ApiError> {
            list(&state, $kind, &uri, &params).await
        }

        pub async fn $get(
            State(state): State<Arc<AppState>>,
            Path(id): Path<i32>,
        ) -> Result<Json<ApiResponse<NamedDto>>, ApiError> {
            get(&state, $kind, id).await
        }

        pub async fn $create(
            State(state): State<Arc<AppState>>,
            user: AuthUser,
            Json(input): Json<NamedInput>,
        ) -> Result<(StatusCode, Json<ApiResponse<NamedDto>>), ApiError> {
            create(&state, $kind, &user, input).await
        }

        pub async fn $rename(
            State(state): State<Arc<AppState>>,
            user: AuthUser,
            Path(id): Path<i32>,
            Json(input): Json<NamedInput>,
        ) -> Result<Json<ApiResponse<NamedDto>>, ApiError> {
            rename(&state, $kind, &user, id, input).await
        }

        pub async fn $delete(
            State(state): State<Arc<AppState>>,
            user: AuthUser,
            Path(id): Path<i32>,
        ) -> Result<StatusCode, ApiError> {
            delete(&state, $kind, &user, id).await
        }

        pub async fn $restore(
            State(state): State<Arc<AppState>>,
            user: AuthUser,
            Path(id): Path<i32>,
        ) -> Result<Json<ApiResponse<NamedDto>>, ApiError> {
            restore(&state, $kind, &user, id).await
        }
    };
}

taxonomy_handlers!(
    TaxonomyKind::Genre,
    list_genres,
    get_genre,
    create_genre,
    rename_genre,
    delete_genre,
    restore_genre
);
taxonomy_handlers!(
    TaxonomyKind::Theme,
    list_themes,
    get_theme,
    create_theme,
    rename_theme,
    delete_theme,
    restore_theme
);
taxonomy_handlers!(
    TaxonomyKind::Studio,
    list_studios,
    get_studio,
    create_studio,
    rename_studio,
    delete_studio,
    restore_studio
);
taxonomy_handlers!(
    TaxonomyKind::Author,
    list_authors,
    get_author,
    create_author,
    rename_author,
    delete_author,
    restore_author
);
