//! Per-family token services
//!
//! Every blockchain family implements `TokenBlockchainService`: a pure
//! syntactic check of the reference, a deterministic mapping to the catalog
//! identity, and a metadata fetch for references the catalog does not know.
//! The registry binds each supported `BlockchainType` to one service instance
//! at startup; all EVM chains share `EvmTokenService`, parameterized by chain id.

pub mod evm;
pub mod rpc;
pub mod solana;
pub mod ton;
pub mod tron;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Blockchain, BlockchainFamily, BlockchainType, Token, TokenQuery};
use crate::domain::repositories::JsonTransport;
use crate::infrastructure::config::CoreConfig;
use crate::infrastructure::http::HttpTransport;
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;

pub use evm::EvmTokenService;
pub use solana::SolanaTokenService;
pub use ton::{TonAddress, TonTokenService};
pub use tron::TronTokenService;

/// Capability set of one blockchain family
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenBlockchainService: Send + Sync {
    fn blockchain_type(&self) -> BlockchainType;

    /// Syntactic and checksum validation, no I/O
    fn is_valid(&self, reference: &str) -> bool;

    /// Catalog identity of a reference that passed `is_valid`
    fn token_query(&self, reference: &str) -> TokenQuery;

    /// Fetch metadata and build a custom token
    async fn token(&self, reference: &str) -> Result<Token, TokenError>;
}

/// Closed mapping from blockchain type to its service instance
#[derive(Clone, Default)]
pub struct BlockchainServiceRegistry {
    services: HashMap<BlockchainType, Arc<dyn TokenBlockchainService>>,
}

impl BlockchainServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under the blockchain type it reports
    pub fn register(&mut self, service: Arc<dyn TokenBlockchainService>) {
        let blockchain_type = service.blockchain_type();
        if self.services.insert(blockchain_type, service).is_some() {
            log::warn!("Replacing token service for {}", blockchain_type);
        }
    }

    pub fn with_service(mut self, service: Arc<dyn TokenBlockchainService>) -> Self {
        self.register(service);
        self
    }

    /// Bind the service for `blockchain_type` to `transport`
    pub fn bind(
        &mut self,
        blockchain_type: BlockchainType,
        transport: Arc<dyn JsonTransport>,
    ) -> TokenResult<()> {
        let service: Arc<dyn TokenBlockchainService> = match blockchain_type.family() {
            BlockchainFamily::Evm => Arc::new(EvmTokenService::new(blockchain_type, transport)?),
            BlockchainFamily::Tron => Arc::new(TronTokenService::new(transport)),
            BlockchainFamily::Ton => Arc::new(TonTokenService::new(transport)),
            BlockchainFamily::Solana => Arc::new(SolanaTokenService::new(transport)),
        };
        self.register(service);
        Ok(())
    }

    /// Build one HTTP-backed service per supported chain
    pub fn from_config(config: &CoreConfig) -> TokenResult<Self> {
        let mut registry = Self::new();

        for blockchain_type in BlockchainType::ALL {
            let endpoint = config.endpoint_for(blockchain_type)?;
            let transport = HttpTransport::new(
                endpoint.url,
                endpoint.api_key,
                config.request_timeout(),
            )?;
            registry.bind(blockchain_type, Arc::new(transport))?;
        }

        log::info!("Registered token services for {} blockchains", registry.len());
        Ok(registry)
    }

    pub fn service_for(&self, blockchain_type: BlockchainType) -> Option<Arc<dyn TokenBlockchainService>> {
        self.services.get(&blockchain_type).cloned()
    }

    /// Registered chains in display order
    pub fn blockchains(&self) -> Vec<Blockchain> {
        let mut blockchains: Vec<Blockchain> = self
            .services
            .keys()
            .copied()
            .map(Blockchain::new)
            .collect();
        blockchains.sort_by_key(|b| b.blockchain_type.order());
        blockchains
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockJsonTransport;

    fn transport() -> Arc<dyn JsonTransport> {
        Arc::new(MockJsonTransport::new())
    }

    #[test]
    fn test_bind_selects_service_by_family() {
        let mut registry = BlockchainServiceRegistry::new();
        for blockchain_type in BlockchainType::ALL {
            registry.bind(blockchain_type, transport()).expect("bind succeeds");
        }

        assert_eq!(registry.len(), BlockchainType::ALL.len());
        for blockchain_type in BlockchainType::ALL {
            let service = registry.service_for(blockchain_type).expect("service registered");
            assert_eq!(service.blockchain_type(), blockchain_type);
        }
    }

    #[test]
    fn test_evm_chains_share_grammar() {
        let mut registry = BlockchainServiceRegistry::new();
        registry.bind(BlockchainType::Ethereum, transport()).expect("bind succeeds");
        registry.bind(BlockchainType::BinanceSmartChain, transport()).expect("bind succeeds");

        let address = "0xdac17f958d2ee523a2206206994597c13d831ec7";
        for blockchain_type in [BlockchainType::Ethereum, BlockchainType::BinanceSmartChain] {
            let service = registry.service_for(blockchain_type).expect("service registered");
            assert!(service.is_valid(address));
            assert_eq!(service.token_query(address).blockchain_type, blockchain_type);
        }
    }

    #[test]
    fn test_unregistered_blockchain() {
        let registry = BlockchainServiceRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.service_for(BlockchainType::Solana).is_none());
    }

    #[test]
    fn test_blockchains_in_display_order() {
        let registry = BlockchainServiceRegistry::new()
            .with_service(Arc::new(SolanaTokenService::new(transport())))
            .with_service(Arc::new(TronTokenService::new(transport())))
            .with_service(Arc::new(
                EvmTokenService::new(BlockchainType::Ethereum, transport()).expect("evm chain"),
            ));

        let order: Vec<BlockchainType> = registry
            .blockchains()
            .into_iter()
            .map(|b| b.blockchain_type)
            .collect();
        assert_eq!(
            order,
            vec![BlockchainType::Ethereum, BlockchainType::Tron, BlockchainType::Solana]
        );
    }

    #[test]
    fn test_from_config_registers_every_chain() {
        let registry = BlockchainServiceRegistry::from_config(&CoreConfig::default())
            .expect("default config is complete");
        assert_eq!(registry.len(), BlockchainType::ALL.len());

        let blockchains = registry.blockchains();
        assert_eq!(blockchains[0].blockchain_type, BlockchainType::Ethereum);
        assert_eq!(blockchains[2].blockchain_type, BlockchainType::Tron);
        assert_eq!(blockchains[13].blockchain_type, BlockchainType::Solana);
        assert!(blockchains
            .windows(2)
            .all(|w| w[0].blockchain_type.order() < w[1].blockchain_type.order()));
    }
}
