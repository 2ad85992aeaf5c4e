//! HTTP mapping of gateway errors.
//!
//! Every error leaves the server as `{"error": {"message", "status"}}` with
//! the matching HTTP status.

use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bbridge_core::GatewayError;
use tracing::{error, warn};

/// Axum-facing wrapper around [`GatewayError`].
#[derive(Debug)]
pub struct HttpError(pub GatewayError);

impl HttpError {
    pub fn not_found() -> Self {
        Self(GatewayError::NotFound("Not Found".to_string()))
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<GatewayError> for HttpError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

/// Body extraction failures keep the JSON error shape.
impl From<BytesRejection> for HttpError {
    fn from(rejection: BytesRejection) -> Self {
        let message = rejection.body_text();
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self(GatewayError::PayloadTooLarge(message))
        } else {
            Self(GatewayError::validation(message))
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            warn!(status = status.as_u16(), error = %self.0, "request rejected");
        } else {
            error!(status = status.as_u16(), error = %self.0, "request failed");
        }

        (status, Json(self.0.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_is_bad_request() {
        let response = HttpError(GatewayError::validation("Invalid message role")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": {"message": "Invalid message role", "status": 400}})
        );
    }

    #[tokio::test]
    async fn upstream_keeps_backend_status() {
        let response = HttpError(GatewayError::Upstream {
            status: 429,
            message: "ThrottlingException".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn nonsense_status_falls_back_to_500() {
        let err = HttpError(GatewayError::Upstream {
            status: 42,
            message: "odd".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
