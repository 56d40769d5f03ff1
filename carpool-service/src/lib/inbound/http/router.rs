use std::sync::Arc;
use std::time::Duration;

use auth::Role;
use auth::RoleRequirement;
use auth::TokenService;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_role::change_role;
use super::handlers::current_identity::current_identity;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate;
use super::middleware::require_role;
use crate::domain::identity::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub tokens: Arc<TokenService>,
}

pub fn create_router(auth_service: Arc<dyn AuthServicePort>, tokens: Arc<TokenService>) -> Router {
    let state = AppState {
        auth_service,
        tokens,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login));

    let user_routes = Router::new()
        .route("/api/v1/auth/me", get(current_identity))
        .route_layer(middleware::from_fn_with_state(
            RoleRequirement::at_least(Role::User),
            require_role,
        ));

    let admin_routes = Router::new()
        .route("/api/v1/users/:id/role", patch(change_role))
        .route_layer(middleware::from_fn_with_state(
            RoleRequirement::at_least(Role::Admin),
            require_role,
        ));

    // Role gates sit inside authentication so they always see a verified caller.
    let protected_routes = Router::new()
        .merge(user_routes)
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenIdentity;
    use auth::TokenLifetime;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::errors::AppError;
    use crate::domain::identity::models::AuthSession;
    use crate::domain::identity::models::LoginCommand;
    use crate::domain::identity::models::ProfileId;
    use crate::domain::identity::models::RegisterCommand;

    const SECRET: &[u8] = b"router_test_secret_at_least_32_bytes";

    /// Use cases are never reached by the requests below.
    struct UnreachableAuthService;

    #[async_trait]
    impl AuthServicePort for UnreachableAuthService {
        async fn register(&self, _: RegisterCommand) -> Result<AuthSession, AppError> {
            Err(AppError::internal("unreachable"))
        }

        async fn login(&self, _: LoginCommand) -> Result<AuthSession, AppError> {
            Err(AppError::internal("unreachable"))
        }

        async fn change_role(&self, _: &ProfileId, _: Role) -> Result<(), AppError> {
            Err(AppError::internal("unreachable"))
        }
    }

    fn router() -> Router {
        create_router(
            Arc::new(UnreachableAuthService),
            Arc::new(TokenService::new(SECRET, TokenLifetime::default())),
        )
    }

    fn token(role: Role) -> String {
        TokenService::new(SECRET, TokenLifetime::default())
            .sign(&TokenIdentity::new("u1", role.as_str()))
            .unwrap()
    }

    async fn error_code(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"]["code"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_role_gate_runs_before_handler() {
        let request = Request::patch(format!("/api/v1/users/{}/role", ProfileId::new()))
            .header("authorization", format!("Bearer {}", token(Role::Driver)))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"role":"ADMIN"}"#))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(response).await, "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_rejected() {
        let foreign = TokenService::new(b"another_secret_at_least_32_bytes!!", TokenLifetime::default())
            .sign(&TokenIdentity::new("u1", "ADMIN"))
            .unwrap();

        let request = Request::get("/api/v1/auth/me")
            .header("authorization", format!("Bearer {}", foreign))
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "TOKEN_INVALID");
    }
}
