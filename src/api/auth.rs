use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::db::User;
use crate::domain::Role;

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the caller from one of:
/// 1. `X-Api-Key` header
/// 2. `Authorization: Bearer <api_key>` header
///
/// Requests without a key continue anonymously; a key that matches no user is
/// rejected with 401. A resolved [`User`] is stored in the request extensions.
pub async fn identify_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(key) = extract_api_key(&headers) else {
        return next.run(request).await;
    };

    match state.store().verify_api_key(&key).await {
        Ok(Some(user)) => {
            tracing::Span::current().record("user_id", user.id);
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => ApiError::Unauthorized("Invalid API key".to_string()).into_response(),
        Err(e) => ApiError::internal(format!("API key lookup failed: {e}")).into_response(),
    }
}

/// Extract API key from headers
fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Extractor
// ============================================================================

/// The authenticated caller. Extraction fails with 401 for anonymous requests.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    /// Fails with 403 unless the caller holds at least `role`.
    pub fn require(&self, role: Role) -> Result<&User, ApiError> {
        if self.0.role.satisfies(role) {
            Ok(&self.0)
        } else {
            Err(ApiError::Forbidden(format!(
                "This action requires the {role} role"
            )))
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn api_key_header_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer second"));
        headers.insert("X-Api-Key", HeaderValue::from_static("first"));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("first"));
    }

    #[test]
    fn bearer_token_is_read() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc123"));
        assert_eq!(extract_api_key(&headers).as_deref(), Some("abc123"));

        headers.insert("Authorization", HeaderValue::from_static("Basic abc123"));
        assert_eq!(extract_api_key(&headers), None);
    }

    #[test]
    fn role_requirement() {
        let user = AuthUser(User {
            id: 1,
            username: "mod".to_string(),
            api_key: "k".to_string(),
            role: Role::Contributor,
            created_at: String::new(),
            updated_at: String::new(),
        });

        assert!(user.require(Role::Member).is_ok());
        assert!(user.require(Role::Contributor).is_ok());
        assert!(user.require(Role::Staff).is_err());
    }
}
