//! Token entity and resolution value objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entities::blockchain::{Blockchain, BlockchainFamily, BlockchainType};
use crate::shared::error::{ResolveError, TokenError};
use crate::shared::types::{Address, CoinUid, Decimals, TokenResult};

/// Chain specific token subtype
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenType {
    Native,
    Eip20 { address: Address },
    Spl { address: Address },
    Jetton { address: Address },
    /// Catalog placeholder for a token kind this core cannot use directly
    Unsupported { kind: String, reference: String },
}

impl TokenType {
    pub fn id(&self) -> String {
        match self {
            TokenType::Native => "native".to_string(),
            TokenType::Eip20 { address } => format!("eip20:{}", address),
            TokenType::Spl { address } => format!("spl:{}", address),
            TokenType::Jetton { address } => format!("jetton:{}", address),
            TokenType::Unsupported { kind, reference } => {
                format!("unsupported:{}:{}", kind, reference)
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, TokenType::Unsupported { .. })
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Typed identity used to look a token up in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TokenQuery {
    pub blockchain_type: BlockchainType,
    pub token_type: TokenType,
}

impl TokenQuery {
    pub fn new(blockchain_type: BlockchainType, token_type: TokenType) -> Self {
        Self {
            blockchain_type,
            token_type,
        }
    }

    pub fn id(&self) -> String {
        format!("{}|{}", self.blockchain_type.uid(), self.token_type.id())
    }

    /// Coin uid given to tokens built from fetched metadata
    pub fn custom_coin_uid(&self) -> CoinUid {
        format!("custom-{}-{}", self.blockchain_type.uid(), self.token_type.id())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Coin {
    pub uid: CoinUid,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Token {
    pub coin: Coin,
    pub blockchain: Blockchain,
    pub token_type: TokenType,
    pub decimals: Decimals,
}

impl Token {
    /// Build a custom token from metadata fetched for `query`
    pub fn custom(query: &TokenQuery, metadata: TokenMetadata) -> Self {
        Self {
            coin: Coin {
                uid: query.custom_coin_uid(),
                name: metadata.name,
                code: metadata.symbol,
            },
            blockchain: Blockchain::new(query.blockchain_type),
            token_type: query.token_type.clone(),
            decimals: metadata.decimals,
        }
    }

    pub fn query(&self) -> TokenQuery {
        TokenQuery::new(self.blockchain.blockchain_type, self.token_type.clone())
    }
}

/// Display metadata read from chain or an indexer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: Decimals,
}

/// Immutable result of resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    token: Token,
    in_catalog: bool,
}

impl ResolvedToken {
    /// Wrap a catalog hit; `None` for the unsupported placeholder
    pub(crate) fn from_catalog(token: Token) -> Option<Self> {
        if !token.token_type.is_supported() {
            return None;
        }
        Some(Self {
            token,
            in_catalog: true,
        })
    }

    pub(crate) fn custom(token: Token) -> Self {
        Self {
            token,
            in_catalog: false,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn in_catalog(&self) -> bool {
        self.in_catalog
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}

/// Outcome of a single resolution request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing was entered yet
    NotEntered,
    Resolved(ResolvedToken),
    Failed(ResolveError),
}

impl Resolution {
    pub fn is_not_entered(&self) -> bool {
        matches!(self, Resolution::NotEntered)
    }

    pub fn resolved(&self) -> Option<&ResolvedToken> {
        match self {
            Resolution::Resolved(resolved) => Some(resolved),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ResolveError> {
        match self {
            Resolution::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<Option<ResolvedToken>, ResolveError> {
        match self {
            Resolution::NotEntered => Ok(None),
            Resolution::Resolved(resolved) => Ok(Some(resolved)),
            Resolution::Failed(error) => Err(error),
        }
    }
}

/// Seed row of the canonical catalog
///
/// References are stored in canonical form: lowercase hex for EVM tokens,
/// base58 for Tron and Solana, bounceable URL-safe form for Ton jettons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub blockchain: String,
    pub token_type: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub coin_uid: CoinUid,
    pub name: String,
    pub code: String,
    pub decimals: Decimals,
}

impl CatalogEntry {
    pub fn into_token(self) -> TokenResult<Token> {
        let blockchain_type = BlockchainType::from_uid(&self.blockchain).ok_or_else(|| {
            TokenError::validation(format!("Unknown blockchain uid: {}", self.blockchain))
        })?;

        let reference = || {
            self.reference.clone().filter(|r| !r.is_empty()).ok_or_else(|| {
                TokenError::validation(format!(
                    "Catalog entry {} requires a reference",
                    self.coin_uid
                ))
            })
        };

        let token_type = match self.token_type.as_str() {
            "native" => TokenType::Native,
            "eip20" => {
                let address = reference()?;
                let address = match blockchain_type.family() {
                    BlockchainFamily::Evm => address.to_lowercase(),
                    _ => address,
                };
                TokenType::Eip20 { address }
            }
            "spl" => TokenType::Spl { address: reference()? },
            "jetton" => TokenType::Jetton { address: reference()? },
            other => TokenType::Unsupported {
                kind: other.to_string(),
                reference: self.reference.clone().unwrap_or_default(),
            },
        };

        Ok(Token {
            coin: Coin {
                uid: self.coin_uid,
                name: self.name,
                code: self.code,
            },
            blockchain: Blockchain::new(blockchain_type),
            token_type,
            decimals: self.decimals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usdc_query() -> TokenQuery {
        TokenQuery::new(
            BlockchainType::Ethereum,
            TokenType::Eip20 {
                address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            },
        )
    }

    #[test]
    fn test_token_query_ids() {
        let query = usdc_query();
        assert_eq!(query.id(), "ethereum|eip20:0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");
        assert_eq!(
            query.custom_coin_uid(),
            "custom-ethereum-eip20:0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        );
    }

    #[test]
    fn test_custom_token_from_metadata() {
        let token = Token::custom(
            &usdc_query(),
            TokenMetadata {
                name: "USD Coin".to_string(),
                symbol: "USDC".to_string(),
                decimals: 6,
            },
        );

        assert_eq!(token.coin.code, "USDC");
        assert_eq!(token.decimals, 6);
        assert_eq!(token.blockchain.blockchain_type, BlockchainType::Ethereum);
        assert_eq!(token.query(), usdc_query());
    }

    #[test]
    fn test_resolved_token_rejects_placeholder_from_catalog() {
        let placeholder = Token {
            coin: Coin {
                uid: "weird".to_string(),
                name: "Weird".to_string(),
                code: "WRD".to_string(),
            },
            blockchain: Blockchain::new(BlockchainType::Ethereum),
            token_type: TokenType::Unsupported {
                kind: "eip1155".to_string(),
                reference: "0x01".to_string(),
            },
            decimals: 0,
        };

        assert!(ResolvedToken::from_catalog(placeholder.clone()).is_none());
        assert!(!ResolvedToken::custom(placeholder).in_catalog());
    }

    #[test]
    fn test_resolution_into_result() {
        assert_eq!(Resolution::NotEntered.into_result(), Ok(None));
        let failed = Resolution::Failed(ResolveError::not_found("x"));
        assert_eq!(failed.error(), Some(&ResolveError::not_found("x")));
        assert_eq!(failed.into_result(), Err(ResolveError::not_found("x")));
    }

    #[test]
    fn test_catalog_entry_into_token() {
        let entry: CatalogEntry = serde_json::from_value(serde_json::json!({
            "blockchain": "ethereum",
            "token_type": "eip20",
            "reference": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
            "coin_uid": "usd-coin",
            "name": "USD Coin",
            "code": "USDC",
            "decimals": 6
        }))
        .expect("valid catalog row");

        let token = entry.into_token().expect("converts");
        assert_eq!(token.query(), usdc_query());
        assert_eq!(token.coin.uid, "usd-coin");
    }

    #[test]
    fn test_catalog_entry_unknown_kind_is_placeholder() {
        let entry = CatalogEntry {
            blockchain: "solana".to_string(),
            token_type: "nft".to_string(),
            reference: Some("So11111111111111111111111111111111111111112".to_string()),
            coin_uid: "mystery".to_string(),
            name: "Mystery".to_string(),
            code: "MYS".to_string(),
            decimals: 0,
        };

        let token = entry.into_token().expect("converts");
        assert!(!token.token_type.is_supported());
    }

    #[test]
    fn test_catalog_entry_errors() {
        let unknown_chain = CatalogEntry {
            blockchain: "bitcoin".to_string(),
            token_type: "native".to_string(),
            reference: None,
            coin_uid: "bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            code: "BTC".to_string(),
            decimals: 8,
        };
        assert!(matches!(unknown_chain.into_token(), Err(TokenError::Validation(_))));

        let missing_reference = CatalogEntry {
            blockchain: "solana".to_string(),
            token_type: "spl".to_string(),
            reference: None,
            coin_uid: "x".to_string(),
            name: "X".to_string(),
            code: "X".to_string(),
            decimals: 6,
        };
        assert!(missing_reference.into_token().is_err());
    }
}
