//! HTTP router construction.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::error::handle_panic;
use crate::api::handlers::{self, AppState};
use crate::types::ServiceConfig;

/// Build the service router with its middleware stack.
///
/// Routes:
/// - `GET /health`
/// - `GET /bfhl` returns the fixed operation code
/// - `POST /bfhl` classifies tokens and inspects the optional file
pub fn create_router(config: ServiceConfig) -> Router {
    let body_limit = config.max_body_bytes;
    let state = Arc::new(AppState::new(config));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Endpoint
        .route(
            "/bfhl",
            get(handlers::get_operation_code).post(handlers::process_bfhl),
        )
        // State
        .with_state(state)
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
