//! In-memory catalog and wallet store
//!
//! Used by `init_token_core` and by tests. Hosts with a real catalog
//! service or wallet database plug their own implementations in instead.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{CatalogEntry, Token, TokenQuery, WalletEntry};
use crate::domain::repositories::{TokenCatalog, WalletStore};
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;

/// Catalog seeded once from canonical entries
#[derive(Debug, Default)]
pub struct InMemoryTokenCatalog {
    tokens: HashMap<TokenQuery, Token>,
}

impl InMemoryTokenCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> TokenResult<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry.into_token()?);
        }
        log::debug!("Seeded in-memory catalog with {} tokens", catalog.len());
        Ok(catalog)
    }

    /// Seed from a JSON array of catalog entries
    pub fn from_json_str(json: &str) -> TokenResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn insert(&mut self, token: Token) {
        self.tokens.insert(token.query(), token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenCatalog for InMemoryTokenCatalog {
    async fn token(&self, query: &TokenQuery) -> Result<Option<Token>, TokenError> {
        Ok(self.tokens.get(query).cloned())
    }
}

/// Wallet store keeping entries in insertion order
#[derive(Debug, Default)]
pub struct InMemoryWalletStore {
    wallets: RwLock<Vec<WalletEntry>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries belonging to `account_id`
    pub async fn wallets(&self, account_id: &str) -> Vec<WalletEntry> {
        self.wallets
            .read()
            .await
            .iter()
            .filter(|w| w.account_id == account_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.wallets.read().await.len()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn save(&self, wallets: Vec<WalletEntry>) -> Result<(), TokenError> {
        let mut stored = self.wallets.write().await;
        stored.extend(wallets);
        Ok(())
    }
}
