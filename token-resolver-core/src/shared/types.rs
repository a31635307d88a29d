use serde_json::Value;

// Basic types for token resolution
pub type Address = String;
pub type CoinUid = String;
pub type AccountId = String;
pub type Decimals = u8;

/// Raw JSON payload returned by an RPC or REST endpoint
pub type JsonPayload = Value;

// Result type for collaborator operations
pub type TokenResult<T> = Result<T, crate::shared::error::TokenError>;
