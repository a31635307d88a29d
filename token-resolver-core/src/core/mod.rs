//! Core token resolution functionality
//!
//! Per-family blockchain services, the catalog lookup, the resolution
//! orchestrator and the wallet commit step.

pub mod blockchain;
pub mod catalog;
pub mod commit;
pub mod resolver;

pub use blockchain::{BlockchainServiceRegistry, TokenBlockchainService};
pub use catalog::CatalogLookup;
pub use commit::{CommitOutcome, WalletCommitter};
pub use resolver::TokenResolver;
