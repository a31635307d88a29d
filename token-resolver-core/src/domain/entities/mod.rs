//! Domain entities and value objects
//!
//! This module contains the core domain entities and value objects
//! that represent the business concepts of token resolution.

pub mod blockchain;
pub mod token;
pub mod wallet;

// Re-export entities
pub use blockchain::*;
pub use token::*;
pub use wallet::*;
