//! Resolution orchestrator
//!
//! Turns a (blockchain, reference) pair into a `Resolution`:
//! empty input is `NotEntered`, a reference the chain's grammar rejects is
//! `InvalidReference`, a supported catalog hit is returned as is, and anything
//! else is fetched from the chain. Every fetch failure becomes `NotFound`.

use crate::core::blockchain::BlockchainServiceRegistry;
use crate::core::catalog::CatalogLookup;
use crate::domain::entities::{Blockchain, Resolution, ResolvedToken};
use crate::shared::error::ResolveError;
use crate::shared::utils::short_reference;

#[derive(Clone)]
pub struct TokenResolver {
    registry: BlockchainServiceRegistry,
    catalog: CatalogLookup,
}

impl TokenResolver {
    pub fn new(registry: BlockchainServiceRegistry, catalog: CatalogLookup) -> Self {
        Self { registry, catalog }
    }

    pub fn registry(&self) -> &BlockchainServiceRegistry {
        &self.registry
    }

    pub async fn resolve(&self, blockchain: &Blockchain, reference: &str) -> Resolution {
        if reference.is_empty() {
            return Resolution::NotEntered;
        }

        let service = match self.registry.service_for(blockchain.blockchain_type) {
            Some(service) => service,
            None => {
                log::warn!("No token service registered for {}", blockchain.uid());
                return Resolution::Failed(ResolveError::invalid_reference(reference));
            }
        };

        if !service.is_valid(reference) {
            log::debug!(
                "Rejected {} reference {}",
                blockchain.uid(),
                short_reference(reference)
            );
            return Resolution::Failed(ResolveError::invalid_reference(reference));
        }

        let query = service.token_query(reference);
        if let Some(hit) = self.catalog.lookup(&query).await {
            return Resolution::Resolved(hit);
        }

        match service.token(reference).await {
            Ok(token) => {
                log::debug!("Resolved custom token {} ({})", token.coin.code, query.id());
                Resolution::Resolved(ResolvedToken::custom(token))
            }
            Err(e) => {
                log::debug!("Metadata fetch for {} failed: {}", query.id(), e);
                Resolution::Failed(ResolveError::not_found(reference))
            }
        }
    }
}
