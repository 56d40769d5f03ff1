use auth::RoleRequirement;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::errors::AppError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const LEGACY_TOKEN_HEADER: &str = "x-auth-token";

/// Extension type to store the verified caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub identity_id: String,
    pub role: String,
}

/// Middleware that verifies the bearer token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())
        .ok_or_else(|| AppError::unauthorized("Authentication token is required"))?;

    let identity = state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Token rejected: {}", e.reason());
        AppError::token_invalid()
    })?;

    req.extensions_mut().insert(AuthenticatedIdentity {
        identity_id: identity.subject_id,
        role: identity.role,
    });

    Ok(next.run(req).await)
}

/// Middleware that admits callers whose role meets the route's threshold.
///
/// Must run after [`authenticate`].
pub async fn require_role(
    State(requirement): State<RoleRequirement>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = req
        .extensions()
        .get::<AuthenticatedIdentity>()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    if !requirement.admits(&identity.role) {
        tracing::debug!(
            identity_id = %identity.identity_id,
            role = %identity.role,
            required = %requirement.minimum(),
            "Insufficient role"
        );
        return Err(AppError::forbidden("Insufficient permissions").into());
    }

    Ok(next.run(req).await)
}

/// `Authorization: Bearer <token>` first, then the legacy `x-auth-token` header.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get(LEGACY_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
            .filter(|token| !token.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_extract_token_prefers_authorization() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        headers.insert(LEGACY_TOKEN_HEADER, HeaderValue::from_static("def"));

        assert_eq!(extract_token(&headers), Some("abc"));
    }

    #[test]
    fn test_extract_token_falls_back_to_legacy_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        headers.insert(LEGACY_TOKEN_HEADER, HeaderValue::from_static("def"));

        assert_eq!(extract_token(&headers), Some("def"));
    }

    #[test]
    fn test_legacy_header_drops_a_single_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LEGACY_TOKEN_HEADER,
            HeaderValue::from_static("Bearer Bearer abc"),
        );
        assert_eq!(extract_token(&headers), Some("Bearer abc"));

        headers.insert(LEGACY_TOKEN_HEADER, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token(&headers), Some("abc"));
    }

    #[test]
    fn test_extract_token_missing() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_token(&headers), None);
    }
}
