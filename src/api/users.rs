use axum::{Json, extract::State};
use std::sync::Arc;

use super::auth::AuthUser;
use super::{ApiError, ApiResponse, AppState, ReviewDto, UserDto};

/// `GET /users/me`
pub async fn me(user: AuthUser) -> Json<ApiResponse<UserDto>> {
    Json(ApiResponse::success(user.0.into()))
}

/// `GET /users/me/reviews`: the caller's reviews, newest first.
pub async fn my_reviews(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<ApiResponse<Vec<ReviewDto>>>, ApiError> {
    let reviews = state
        .review_service()
        .list_reviews_by_user(user.0.id)
        .await?;

    Ok(Json(ApiResponse::success(reviews)))
}
