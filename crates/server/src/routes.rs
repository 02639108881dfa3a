//! Route configuration.

use crate::auth::require_secret;
use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, put};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();
    let server = &config.server;

    // Only publish is gated; the layer runs before the body is extracted.
    let publish = put(handlers::publish_version).route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_secret,
    ));

    let registry_routes = Router::new()
        .route(
            "/v1/{namespace}/{name}/versions",
            get(handlers::list_versions).merge(publish),
        )
        .route(
            "/v1/{namespace}/{name}/{version}/download/{os}/{arch}",
            get(handlers::download),
        );

    let ops_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/version", get(handlers::build_version))
        .route(
            "/.well-known/terraform.json",
            get(handlers::service_discovery),
        );

    #[allow(deprecated)]
    let write_timeout = TimeoutLayer::new(server.write_timeout());

    Router::new()
        .merge(registry_routes)
        .merge(ops_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(RequestBodyTimeoutLayer::new(server.read_timeout()))
        .layer(write_timeout)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound("no such route".to_string())
}
