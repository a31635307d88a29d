//! Canonical catalog lookup
//!
//! Thin read-only layer over a `TokenCatalog` client. Both an unknown
//! identity and the unsupported placeholder come back as absent, and a
//! failing client is treated the same way so resolution can still fall
//! through to a metadata fetch.

use std::sync::Arc;

use crate::domain::entities::{ResolvedToken, TokenQuery};
use crate::domain::repositories::TokenCatalog;

#[derive(Clone)]
pub struct CatalogLookup {
    catalog: Arc<dyn TokenCatalog>,
}

impl CatalogLookup {
    pub fn new(catalog: Arc<dyn TokenCatalog>) -> Self {
        Self { catalog }
    }

    /// Catalog hit for `query`, if one exists with a supported token type
    pub async fn lookup(&self, query: &TokenQuery) -> Option<ResolvedToken> {
        let token = match self.catalog.token(query).await {
            Ok(Some(token)) => token,
            Ok(None) => {
                log::debug!("Catalog miss for {}", query.id());
                return None;
            }
            Err(e) => {
                log::warn!("Catalog lookup for {} failed: {}", query.id(), e);
                return None;
            }
        };

        let resolved = ResolvedToken::from_catalog(token);
        match &resolved {
            Some(hit) => log::debug!("Catalog hit for {}: {}", query.id(), hit.token().coin.uid),
            None => log::debug!("Catalog holds an unsupported placeholder for {}", query.id()),
        }
        resolved
    }
}
