//! SDK error mapping.
//!
//! SDK errors never cross the crate boundary; they are flattened into the
//! core port errors here, keeping the HTTP status when the service sent one.

use std::error::Error as StdError;

use aws_sdk_bedrockruntime::config::http::HttpResponse;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use bbridge_core::ports::{CatalogError, InvokeError, SecretError};

/// HTTP status of the service response, when one was received.
pub(crate) fn sdk_status<E>(err: &SdkError<E, HttpResponse>) -> Option<u16> {
    err.raw_response().map(|response| response.status().as_u16())
}

/// Human-readable message: the modelled service error if there is one,
/// otherwise the full error chain.
pub(crate) fn sdk_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: StdError + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::ServiceError(service) => service.err().to_string(),
        other => DisplayErrorContext(other).to_string(),
    }
}

pub(crate) fn invoke_error<E>(err: &SdkError<E, HttpResponse>) -> InvokeError
where
    E: StdError + 'static,
{
    InvokeError::Backend {
        status: sdk_status(err),
        message: sdk_message(err),
    }
}

pub(crate) fn catalog_error<E>(err: &SdkError<E, HttpResponse>) -> CatalogError
where
    E: StdError + 'static,
{
    CatalogError::QueryFailed(sdk_message(err))
}

pub(crate) fn secret_error<E>(err: &SdkError<E, HttpResponse>) -> SecretError
where
    E: StdError + 'static,
{
    SecretError::Fetch(sdk_message(err))
}
