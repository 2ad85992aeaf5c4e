//! OpenAI-compatible HTTP gateway in front of Amazon Bedrock.
//!
//! Routes:
//!
//! - `GET  /health`
//! - `POST /api/v1/chat[/*]` (JSON or `text/event-stream`)
//! - `POST /api/v1/embeddings[/*]`
//! - `GET  /api/v1/models[/*]`
//!
//! Everything under `/api/v1` requires `Authorization: Bearer <key>` unless
//! authentication is disabled.

#![deny(unused_crate_dependencies)]

pub mod auth;
pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use bootstrap::{bootstrap, load_dotenv};
pub use error::HttpError;
pub use routes::create_router;
pub use server::{run, serve};
pub use state::AppState;
pub use telemetry::init_tracing;

// Silence unused dev-dependency warnings
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use tower as _;
