//! Domain repositories
//!
//! Repository traits for the external collaborators of token resolution.

pub mod token_catalog;
pub mod wallet_store;
pub mod event_sink;
pub mod json_transport;

// Re-export repositories
pub use token_catalog::*;
pub use wallet_store::*;
pub use event_sink::*;
pub use json_transport::*;
