//! Route handlers.
//!
//! Handlers only move bytes between axum and [`bbridge_core::GatewayService`];
//! all translation happens in the core.

use std::convert::Infallible;

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bbridge_core::{ChatReply, EmbeddingsResponse, ModelList};
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tracing::debug;

use crate::error::HttpError;
use crate::state::AppState;

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

/// `POST /api/v1/chat[/*]`
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HttpError> {
    let body = body?;
    debug!(bytes = body.len(), "POST chat");

    match state.gateway.chat(&body).await? {
        ChatReply::Complete(response) => Ok(Json(response).into_response()),
        ChatReply::Stream(frames) => Ok(event_stream(frames)),
    }
}

/// `POST /api/v1/embeddings[/*]`
pub async fn embeddings(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<EmbeddingsResponse>, HttpError> {
    let body = body?;
    debug!(bytes = body.len(), "POST embeddings");
    Ok(Json(state.gateway.embeddings(&body).await?))
}

/// `GET /api/v1/models[/*]`
pub async fn models(State(state): State<AppState>) -> Result<Json<ModelList>, HttpError> {
    debug!("GET models");
    Ok(Json(state.gateway.list_models().await?))
}

/// Any unmatched route or method.
pub async fn not_found() -> HttpError {
    HttpError::not_found()
}

/// Wrap SSE frames in a streaming response. Frames are written as they
/// are produced; dropping the body drops the upstream stream.
fn event_stream(frames: BoxStream<'static, Bytes>) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header("x-accel-buffering", "no")
        .body(Body::from_stream(frames.map(Ok::<_, Infallible>)))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
