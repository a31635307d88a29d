//! Infrastructure layer - configuration and collaborator implementations
//!
//! HTTP transport for the per-family services, configuration loading, and
//! in-memory catalog, wallet store and event sink implementations.

pub mod config;
pub mod events;
pub mod http;
pub mod memory;

// Re-export infrastructure components
pub use config::{ApiKey, CoreConfig, Endpoint};
pub use events::LogEventSink;
pub use http::HttpTransport;
pub use memory::{InMemoryTokenCatalog, InMemoryWalletStore};
