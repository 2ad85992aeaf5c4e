//! AWS adapters for bbridge.
//!
//! Implements the `bbridge-core` ports with the AWS SDK:
//!
//! - [`BedrockInvoker`]: `ModelInvokerPort` over the Bedrock runtime
//! - [`BedrockCatalog`]: `ModelCatalogPort` over the Bedrock control plane
//! - [`SecretsManagerStore`]: `SecretStorePort` over Secrets Manager

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod catalog;
mod config;
mod error;
mod runtime;
mod secrets;

pub use catalog::BedrockCatalog;
pub use config::{AwsAdapters, AwsClientConfig, resolved_region};
pub use runtime::BedrockInvoker;
pub use secrets::SecretsManagerStore;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
