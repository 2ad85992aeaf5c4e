//! Router construction.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::auth::require_api_key;
use crate::handlers;
use crate::state::AppState;

/// Largest accepted request body, matching the 6 MB Lambda payload cap.
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

/// Build the full application router.
///
/// `/health` is public; everything under `/api/v1` goes through the API key
/// check. Unmatched paths and methods get a 404 error body.
pub fn create_router(state: AppState) -> Router {
    let api = api_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_api_key,
    ));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/chat/{*rest}", post(handlers::chat))
        .route("/embeddings", post(handlers::embeddings))
        .route("/embeddings/{*rest}", post(handlers::embeddings))
        .route("/models", get(handlers::models))
        .route("/models/{*rest}", get(handlers::models))
        .method_not_allowed_fallback(handlers::not_found)
}
