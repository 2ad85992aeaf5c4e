//! Gateway error taxonomy.
//!
//! `GatewayError` is the canonical error type of the core. Adapters map it
//! to their own representation (HTTP status plus [`ErrorBody`] in the proxy,
//! a trailing SSE error frame once a stream has started).

use serde::Serialize;
use thiserror::Error;

use crate::ports::{CatalogError, InvokeError, SecretError};

/// Errors surfaced by the translation core.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed or missing client input.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid credential.
    #[error("{0}")]
    Auth(String),

    /// The backend call failed or returned an unusable payload.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Unrecognized route.
    #[error("{0}")]
    NotFound(String),

    /// Request body over the accepted size.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The gateway itself is misconfigured.
    #[error("{0}")]
    Configuration(String),

    /// Unexpected condition.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Upstream failure without a backend-supplied status.
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: 500,
            message: message.into(),
        }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Auth(_) => 401,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge(_) => 413,
            Self::Upstream { status, .. } => *status,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns true for failures caused by the client rather than the gateway.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        let status = self.status_code();
        status >= 400 && status < 500
    }

    /// JSON body sent to the client for this error.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody::new(self.to_string(), self.status_code())
    }
}

impl From<InvokeError> for GatewayError {
    fn from(err: InvokeError) -> Self {
        Self::Upstream {
            status: err.status().unwrap_or(500),
            message: err.to_string(),
        }
    }
}

impl From<CatalogError> for GatewayError {
    fn from(err: CatalogError) -> Self {
        Self::upstream(err.to_string())
    }
}

impl From<SecretError> for GatewayError {
    fn from(err: SecretError) -> Self {
        match err {
            SecretError::NotConfigured(msg) => Self::Configuration(msg),
            SecretError::Fetch(_) | SecretError::Empty(_) => {
                Self::Internal("Error validating API key".to_string())
            }
        }
    }
}

/// Error response body: `{"error": {"message": ..., "status": ...}}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail within an [`ErrorBody`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorDetail {
    pub message: String,
    pub status: u16,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                status,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(GatewayError::validation("bad").status_code(), 400);
        assert_eq!(GatewayError::Auth("no".into()).status_code(), 401);
        assert_eq!(GatewayError::NotFound("Not Found".into()).status_code(), 404);
        assert_eq!(GatewayError::PayloadTooLarge("big".into()).status_code(), 413);
        assert_eq!(GatewayError::upstream("boom").status_code(), 500);
        assert_eq!(
            GatewayError::Upstream {
                status: 429,
                message: "slow down".into()
            }
            .status_code(),
            429
        );
    }

    #[test]
    fn client_errors_are_4xx() {
        assert!(GatewayError::validation("bad").is_client_error());
        assert!(GatewayError::PayloadTooLarge("big".into()).is_client_error());
        assert!(!GatewayError::upstream("boom").is_client_error());
        assert!(!GatewayError::Internal("oops".into()).is_client_error());
    }

    #[test]
    fn invoke_error_keeps_backend_status() {
        let err: GatewayError = InvokeError::Backend {
            status: Some(403),
            message: "access denied".into(),
        }
        .into();
        assert_eq!(err.status_code(), 403);

        let err: GatewayError = InvokeError::Stream("truncated".into()).into();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn error_body_shape() {
        let body = GatewayError::validation("Invalid message role").to_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": {"message": "Invalid message role", "status": 400}})
        );
    }

    #[test]
    fn secret_errors_hide_details() {
        let err: GatewayError = SecretError::Fetch("AccessDenied for arn:...".into()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Error validating API key");
    }
}
