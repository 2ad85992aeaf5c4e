//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No AWS SDK types in any signature
//! - Payloads cross the boundary as raw JSON bytes; the core owns the schema
//! - No retry policy: a failed call is reported once

pub mod model_catalog;
pub mod model_invoker;
pub mod secret_store;

pub use model_catalog::{CatalogError, ModelCatalogPort};
pub use model_invoker::{EventStream, InvokeError, ModelInvokerPort};
pub use secret_store::{SecretError, SecretStorePort};

#[cfg(test)]
pub use model_catalog::MockModelCatalogPort;
#[cfg(test)]
pub use secret_store::MockSecretStorePort;
