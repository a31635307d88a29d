//! Wallet store seam
//!
//! Persistence, deduplication and serialization of concurrent writes for the
//! same account all belong to the store implementation.

use async_trait::async_trait;

use crate::domain::entities::WalletEntry;
use crate::shared::error::TokenError;

/// Wallet store trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Persist new wallet entries
    async fn save(&self, wallets: Vec<WalletEntry>) -> Result<(), TokenError>;
}
