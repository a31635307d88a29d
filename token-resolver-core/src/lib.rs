//! Token Resolver Core
//!
//! Resolves a user supplied token reference (contract address, SPL mint or
//! jetton master) on a chosen blockchain into a token record, and adds
//! resolved tokens to the active account's wallet set.
//!
//! ## Architecture
//!
//! - **Core**: per-family blockchain services, catalog lookup, resolution
//!   orchestrator, wallet commit step
//! - **Domain**: entities and the traits for external collaborators
//! - **Infrastructure**: configuration, HTTP transport, in-memory collaborators
//! - **Shared**: errors, common types, constants and utilities
//!
//! ## Usage
//!
//! ```no_run
//! use token_resolver_core::{init_token_core, Account, Blockchain, BlockchainType, Resolution};
//!
//! # async fn run() -> Result<(), token_resolver_core::TokenError> {
//! let core = init_token_core().await?;
//! let ethereum = Blockchain::new(BlockchainType::Ethereum);
//!
//! match core.resolve(&ethereum, "0xdAC17F958D2ee523a2206206994597C13D831ec7").await {
//!     Resolution::Resolved(token) => {
//!         let account = Account::new("main", "Main");
//!         core.commit(&token, Some(&account)).await?;
//!     }
//!     Resolution::Failed(error) => println!("{}", error),
//!     Resolution::NotEntered => {}
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main components
pub use crate::core::blockchain::{
    BlockchainServiceRegistry, EvmTokenService, SolanaTokenService, TokenBlockchainService,
    TonAddress, TonTokenService, TronTokenService,
};
pub use crate::core::{CatalogLookup, CommitOutcome, TokenResolver, WalletCommitter};

// Re-export domain entities and collaborator traits
pub use crate::domain::entities::{
    Account, Blockchain, BlockchainFamily, BlockchainType, CatalogEntry, Coin, Resolution,
    ResolvedToken, Token, TokenEvent, TokenMetadata, TokenQuery, TokenType, WalletEntry,
};
pub use crate::domain::repositories::{JsonTransport, TokenCatalog, TokenEventSink, WalletStore};

pub use crate::infrastructure::{
    CoreConfig, HttpTransport, InMemoryTokenCatalog, InMemoryWalletStore, LogEventSink,
};
pub use crate::shared::error::{ResolveError, TokenError};

// Version information
pub use crate::shared::constants::{NAME, VERSION};

/// Install `env_logger`; `RUST_LOG` wins over `default_level`
pub fn init(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Entry points consumed by a presentation layer
#[derive(Clone)]
pub struct TokenCore {
    resolver: TokenResolver,
    committer: WalletCommitter,
}

impl TokenCore {
    pub fn new(
        registry: BlockchainServiceRegistry,
        catalog: Arc<dyn TokenCatalog>,
        store: Arc<dyn WalletStore>,
        events: Arc<dyn TokenEventSink>,
    ) -> Self {
        Self {
            resolver: TokenResolver::new(registry, CatalogLookup::new(catalog)),
            committer: WalletCommitter::new(store, events),
        }
    }

    /// Chains a custom token can be added on, in display order
    pub fn blockchains(&self) -> Vec<Blockchain> {
        self.resolver.registry().blockchains()
    }

    pub async fn resolve(&self, blockchain: &Blockchain, reference: &str) -> Resolution {
        self.resolver.resolve(blockchain, reference).await
    }

    pub async fn commit(
        &self,
        resolved: &ResolvedToken,
        account: Option<&Account>,
    ) -> Result<CommitOutcome, TokenError> {
        self.committer.commit(resolved, account).await
    }
}

/// Initialize the token core from `.env`, the config file and the environment
pub async fn init_token_core() -> Result<TokenCore, TokenError> {
    let config = CoreConfig::load()?;
    init(&config.log_level);
    log::info!("Initializing {} v{}", NAME, VERSION);

    let registry = BlockchainServiceRegistry::from_config(&config)?;

    Ok(TokenCore::new(
        registry,
        Arc::new(InMemoryTokenCatalog::new()),
        Arc::new(InMemoryWalletStore::new()),
        Arc::new(LogEventSink::new()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockJsonTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_token_core_initialization() {
        let core = init_token_core().await.expect("Failed to initialize token core");

        let blockchains = core.blockchains();
        assert_eq!(blockchains.len(), BlockchainType::ALL.len());
        assert_eq!(blockchains[0].blockchain_type, BlockchainType::Ethereum);

        for blockchain in &blockchains {
            assert!(core.resolve(blockchain, "").await.is_not_entered());
        }
    }

    #[tokio::test]
    async fn test_resolve_then_commit() {
        let mut rpc = MockJsonTransport::new();
        rpc.expect_post_json().returning(|_, body| {
            let result = match body["method"].as_str() {
                Some("getAccountInfo") => json!({
                    "value": { "data": { "parsed": { "type": "mint", "info": { "decimals": 9 } } } }
                }),
                _ => json!({ "content": { "metadata": { "name": "Bonk", "symbol": "BONK" } } }),
            };
            Ok(json!({ "jsonrpc": "2.0", "id": 1, "result": result }))
        });

        let registry = BlockchainServiceRegistry::new()
            .with_service(Arc::new(SolanaTokenService::new(Arc::new(rpc))));
        let store = Arc::new(InMemoryWalletStore::new());
        let core = TokenCore::new(
            registry,
            Arc::new(InMemoryTokenCatalog::new()),
            store.clone(),
            Arc::new(LogEventSink::new()),
        );

        let solana = Blockchain::new(BlockchainType::Solana);
        let resolution = core
            .resolve(&solana, "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263")
            .await;
        let resolved = resolution.resolved().expect("resolved");
        assert_eq!(resolved.token().coin.code, "BONK");

        let account = Account::new("main", "Main");
        let outcome = core.commit(resolved, Some(&account)).await.expect("commit");
        assert!(matches!(outcome, CommitOutcome::Saved(_)));
        assert_eq!(store.wallets("main").await.len(), 1);

        let skipped = core.commit(resolved, None).await.expect("no-op");
        assert_eq!(skipped, CommitOutcome::NoActiveAccount);
        assert_eq!(store.len().await, 1);
    }
}
