//! Axum router configuration with middleware.
//!
//! All resource routes are under `/api/`.
//! Middleware: CORS (any origin), request tracing.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_body_limit = state
        .upload_limits
        .max_files
        .saturating_mul(state.upload_limits.max_file_bytes)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        // Sessions
        .route(
            "/sessions",
            get(handlers::session::list_sessions).post(handlers::session::create_session),
        )
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session)
                .patch(handlers::session::update_session)
                .delete(handlers::session::delete_session),
        )
        // Messages
        .route(
            "/sessions/{session_id}/messages",
            get(handlers::message::get_messages).post(handlers::message::send_message),
        )
        .route("/messages/{id}", delete(handlers::message::delete_message))
        // Uploads
        .route(
            "/upload",
            post(handlers::upload::upload_files).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        // Model catalog
        .route("/models", get(handlers::model::list_models));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
