//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`   - Health check (database)
//! - `/api/users*`   - User management REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (optional, proxy-aware)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::RateLimitConfig;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limits for `/api`; `None` disables limiting
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(
    state: AppState,
    rate_limit: Option<&RateLimitConfig>,
) -> Result<NormalizePath<Router>> {
    let mut api_router = api::routes::user_routes().with_state(state.clone());
    if let Some(settings) = rate_limit {
        api_router = rate_limit::apply(api_router, settings)?;
    }

    let router = Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
        .nest("/api", api_router)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn limited_app() -> NormalizePath<Router> {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_list().returning(|_| Ok(vec![]));
        mock_repo.expect_count().returning(|_| Ok(0));
        mock_repo.expect_ping().returning(|| Ok(()));

        let settings = RateLimitConfig {
            replenish_ms: 60_000,
            burst: 2,
            behind_proxy: false,
        };

        app_router(AppState::new(Arc::new(mock_repo)), Some(&settings)).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        request
    }

    async fn status_of(app: &NormalizePath<Router>, uri: &str) -> StatusCode {
        app.clone().oneshot(get(uri)).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_trailing_slash_is_trimmed() {
        let app = limited_app();

        assert_eq!(status_of(&app, "/api/users/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_is_rate_limited_after_burst() {
        let app = limited_app();

        assert_eq!(status_of(&app, "/api/users/").await, StatusCode::OK);
        assert_eq!(status_of(&app, "/api/users").await, StatusCode::OK);
        assert_eq!(
            status_of(&app, "/api/users").await,
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn test_health_is_not_rate_limited() {
        let app = limited_app();

        for _ in 0..3 {
            status_of(&app, "/api/users").await;
        }

        for _ in 0..3 {
            assert_eq!(status_of(&app, "/health").await, StatusCode::OK);
        }
    }

    #[test]
    fn test_invalid_rate_limit_is_rejected() {
        let settings = RateLimitConfig {
            replenish_ms: 0,
            burst: 2,
            behind_proxy: false,
        };

        let result = app_router(
            AppState::new(Arc::new(MockUserRepository::new())),
            Some(&settings),
        );

        assert!(result.is_err());
    }
}
