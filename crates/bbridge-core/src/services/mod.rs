//! Translation services.
//!
//! Pure request/response translation lives in `chat_translator`,
//! `response_translator`, `stream_reframer` and `embeddings`; `gateway`
//! composes them with the ports.

pub mod auth;
pub mod chat_translator;
pub mod embeddings;
pub mod gateway;
pub mod model_resolver;
pub mod response_translator;
pub mod stream_reframer;

pub use auth::ApiKeyVerifier;
pub use embeddings::{EmbeddingFamily, EmbeddingsAdapter};
pub use gateway::{ChatReply, GatewayService};
pub use model_resolver::{ModelResolver, region_prefix};
pub use stream_reframer::{DONE_FRAME, StreamReframer, error_frame};
