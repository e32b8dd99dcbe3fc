// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Structure:
// - mod.rs: Main router assembly and middleware
// - health.rs: Health check and metrics endpoints
// - messages.rs: Message sending endpoint
// - extractors.rs: Request metadata extractor
// - middleware.rs: Request logging
//
// ============================================================================

mod extractors;
mod health;
mod messages;
mod middleware;

pub use extractors::metadata_from_headers;
pub use messages::SendMessageRequest;

use anyway_config::MAX_REQUEST_BODY_SIZE;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::AppContext;

/// Create the main application router with all routes
pub fn create_router(app_context: Arc<AppContext>) -> Router {
    let api = Router::new().route("/send", post(messages::send_message));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        // Apply middleware (order matters - first listed runs first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE))
                .into_inner(),
        )
        .with_state(app_context)
}
