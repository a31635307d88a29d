//! Ton token service (jetton masters)
//!
//! Addresses come in two spellings: raw `<workchain>:<hex hash>` and the
//! 48 character user-friendly base64 form carrying a tag and a CRC16. Both
//! normalize to the bounceable URL-safe friendly form for catalog lookups.

use async_trait::async_trait;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::TokenBlockchainService;
use crate::domain::entities::{BlockchainType, Token, TokenMetadata, TokenQuery, TokenType};
use crate::domain::repositories::JsonTransport;
use crate::shared::constants::{
    TON_DECODED_LENGTH, TON_DEFAULT_JETTON_DECIMALS, TON_FRIENDLY_ADDRESS_LENGTH, TON_HASH_LENGTH,
    TON_TAG_BOUNCEABLE, TON_TAG_NON_BOUNCEABLE, TON_TAG_TEST_ONLY,
};
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;
use crate::shared::utils::{crc16_xmodem, first_non_empty_string};

/// Parsed Ton account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TonAddress {
    pub workchain: i8,
    pub hash: [u8; TON_HASH_LENGTH],
}

impl TonAddress {
    pub fn new(workchain: i8, hash: [u8; TON_HASH_LENGTH]) -> Self {
        Self { workchain, hash }
    }

    /// Parse either the raw or the user-friendly spelling
    pub fn parse(value: &str) -> Option<Self> {
        if value.contains(':') {
            Self::parse_raw(value)
        } else {
            Self::parse_friendly(value)
        }
    }

    fn parse_raw(value: &str) -> Option<Self> {
        let (workchain_text, hash_hex) = value.split_once(':')?;
        let workchain: i8 = workchain_text.parse().ok()?;
        // Canonical decimal only: no sign on zero, no leading zeros
        if workchain.to_string() != workchain_text {
            return None;
        }
        if hash_hex.len() != TON_HASH_LENGTH * 2 {
            return None;
        }

        let bytes = hex::decode(hash_hex).ok()?;
        let hash: [u8; TON_HASH_LENGTH] = bytes.try_into().ok()?;
        Some(Self { workchain, hash })
    }

    fn parse_friendly(value: &str) -> Option<Self> {
        if value.len() != TON_FRIENDLY_ADDRESS_LENGTH {
            return None;
        }

        let url_safe = value.contains('-') || value.contains('_');
        let bytes = if url_safe {
            URL_SAFE.decode(value).ok()?
        } else {
            STANDARD.decode(value).ok()?
        };
        if bytes.len() != TON_DECODED_LENGTH {
            return None;
        }

        let tag = bytes[0] & !TON_TAG_TEST_ONLY;
        if tag != TON_TAG_BOUNCEABLE && tag != TON_TAG_NON_BOUNCEABLE {
            return None;
        }

        let crc = crc16_xmodem(&bytes[..34]);
        if crc.to_be_bytes() != [bytes[34], bytes[35]] {
            return None;
        }

        let hash: [u8; TON_HASH_LENGTH] = bytes[2..34].try_into().ok()?;
        Some(Self {
            workchain: bytes[1] as i8,
            hash,
        })
    }

    /// User-friendly URL-safe spelling (mainnet)
    pub fn to_friendly(&self, bounceable: bool) -> String {
        let mut bytes = Vec::with_capacity(TON_DECODED_LENGTH);
        bytes.push(if bounceable {
            TON_TAG_BOUNCEABLE
        } else {
            TON_TAG_NON_BOUNCEABLE
        });
        bytes.push(self.workchain as u8);
        bytes.extend_from_slice(&self.hash);
        let crc = crc16_xmodem(&bytes);
        bytes.extend_from_slice(&crc.to_be_bytes());
        URL_SAFE.encode(bytes)
    }

    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }
}

impl fmt::Display for TonAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_friendly(true))
    }
}

pub struct TonTokenService {
    api: Arc<dyn JsonTransport>,
}

impl TonTokenService {
    pub fn new(api: Arc<dyn JsonTransport>) -> Self {
        Self { api }
    }

    fn normalize(reference: &str) -> String {
        TonAddress::parse(reference)
            .map(|address| address.to_friendly(true))
            .unwrap_or_else(|| reference.to_string())
    }

    fn decimals(value: Option<&Value>) -> TokenResult<u8> {
        match value {
            None | Some(Value::Null) => Ok(TON_DEFAULT_JETTON_DECIMALS),
            Some(Value::Number(number)) => number
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| TokenError::decode(format!("Invalid jetton decimals: {}", number))),
            Some(Value::String(text)) if text.trim().is_empty() => Ok(TON_DEFAULT_JETTON_DECIMALS),
            Some(Value::String(text)) => text
                .trim()
                .parse::<u8>()
                .map_err(|_| TokenError::decode(format!("Invalid jetton decimals: {}", text))),
            Some(other) => Err(TokenError::decode(format!("Invalid jetton decimals: {}", other))),
        }
    }

    /// Read name, symbol and decimals from a toncenter v3 `jetton/masters` response
    fn parse_metadata(response: &Value, address: &TonAddress) -> TokenResult<TokenMetadata> {
        let master = response
            .get("jetton_masters")
            .and_then(Value::as_array)
            .and_then(|masters| masters.first())
            .ok_or_else(|| TokenError::decode("No jetton master at this address"))?;

        let content = master.get("jetton_content");

        let master_raw = master
            .get("address")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| address.to_raw());
        let token_info = response
            .get("metadata")
            .and_then(Value::as_object)
            .and_then(|metadata| {
                metadata
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(&master_raw))
                    .map(|(_, entry)| entry)
            })
            .and_then(|entry| entry.pointer("/token_info/0"));

        let field = |key: &str| {
            first_non_empty_string([
                content.and_then(|c| c.get(key)),
                token_info.and_then(|t| t.get(key)),
            ])
        };

        let symbol = field("symbol").ok_or_else(|| TokenError::decode("Jetton has no symbol"))?;
        let name = field("name").unwrap_or_else(|| symbol.clone());

        let decimals = content
            .and_then(|c| c.get("decimals"))
            .filter(|v| !v.is_null())
            .or_else(|| token_info.and_then(|t| t.pointer("/extra/decimals")));

        Ok(TokenMetadata {
            name,
            symbol,
            decimals: Self::decimals(decimals)?,
        })
    }
}

#[async_trait]
impl TokenBlockchainService for TonTokenService {
    fn blockchain_type(&self) -> BlockchainType {
        BlockchainType::Ton
    }

    fn is_valid(&self, reference: &str) -> bool {
        TonAddress::parse(reference).is_some()
    }

    fn token_query(&self, reference: &str) -> TokenQuery {
        TokenQuery::new(
            BlockchainType::Ton,
            TokenType::Jetton {
                address: Self::normalize(reference),
            },
        )
    }

    async fn token(&self, reference: &str) -> Result<Token, TokenError> {
        let address = TonAddress::parse(reference)
            .ok_or_else(|| TokenError::validation(format!("Invalid Ton address: {}", reference)))?;
        let friendly = address.to_friendly(true);
        log::debug!("Fetching jetton metadata for {}", friendly);

        let response = self
            .api
            .get_json(&format!("/jetton/masters?address={}&limit=1", friendly))
            .await?;
        let metadata = Self::parse_metadata(&response, &address)?;

        Ok(Token::custom(&self.token_query(reference), metadata))
    }
}
