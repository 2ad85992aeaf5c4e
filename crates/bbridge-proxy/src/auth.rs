//! Bearer API key middleware for `/api/v1`.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::HttpError;
use crate::state::AppState;

/// Reject requests whose `Authorization: Bearer <key>` does not match.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if let Err(e) = state.verifier.verify(authorization.as_deref()).await {
        warn!(path = %req.uri().path(), "Unauthorized API request");
        return Err(e.into());
    }

    Ok(next.run(req).await)
}
