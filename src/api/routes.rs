//! API Routes
//!
//! Configures the Axum router with all dashboard endpoints.

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, health_handler, listings_handler, property_handler,
    review_stats_handler, reviews_handler, update_review_status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/listings", get(listings_handler))
        .route("/api/reviews", get(reviews_handler))
        .route("/api/reviews/stats", get(review_stats_handler))
        .route("/api/reviews/:id/status", patch(update_review_status_handler))
        .route("/api/properties/:id", get(property_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheRegistry;
    use crate::data::ReviewStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let caches =
            CacheRegistry::new(Duration::from_secs(3600), Duration::from_secs(300)).unwrap();
        create_router(AppState::new(ReviewStore::sample(), caches))
    }

    async fn status_of(app: Router, method: &str, uri: &str) -> StatusCode {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"status":"approved"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn test_read_endpoints_are_routed() {
        for uri in [
            "/health",
            "/api/listings",
            "/api/reviews",
            "/api/reviews/stats",
            "/api/properties/1",
            "/api/cache/stats",
        ] {
            assert_eq!(status_of(create_test_app(), "GET", uri).await, StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_patch_status_is_routed() {
        let status = status_of(create_test_app(), "PATCH", "/api/reviews/1/status").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let status = status_of(create_test_app(), "GET", "/get/anything").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method() {
        let status = status_of(create_test_app(), "DELETE", "/api/reviews").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
