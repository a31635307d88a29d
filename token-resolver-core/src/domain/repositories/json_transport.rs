//! JSON transport used by the metadata fetchers
//!
//! One transport is bound to one base URL (an RPC node or an indexer API).
//! Paths are appended to that base; an empty path targets the base itself.

use async_trait::async_trait;

use crate::shared::error::TokenError;
use crate::shared::types::JsonPayload;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JsonTransport: Send + Sync {
    /// GET a JSON document
    async fn get_json(&self, path: &str) -> Result<JsonPayload, TokenError>;

    /// POST a JSON body and read a JSON document back
    async fn post_json(&self, path: &str, body: JsonPayload) -> Result<JsonPayload, TokenError>;
}
