//! Canonical token catalog access
//!
//! The catalog is an externally maintained set of known tokens. It may be
//! network backed and may cache; this core only reads from it.

use async_trait::async_trait;

use crate::domain::entities::{Token, TokenQuery};
use crate::shared::error::TokenError;

/// Token catalog client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenCatalog: Send + Sync {
    /// Look up a token by typed identity
    async fn token(&self, query: &TokenQuery) -> Result<Option<Token>, TokenError>;
}
