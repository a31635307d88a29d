//! Tron token service (TRC-20 contracts)
//!
//! Metadata is read with `triggerconstantcontract` on a TronGrid compatible
//! API. Calls are made from the zero address since they never touch state.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::TokenBlockchainService;
use crate::domain::entities::{BlockchainType, Token, TokenMetadata, TokenQuery, TokenType};
use crate::domain::repositories::JsonTransport;
use crate::shared::constants::{
    TRC20_DECIMALS_SIGNATURE, TRC20_NAME_SIGNATURE, TRC20_SYMBOL_SIGNATURE, TRON_ADDRESS_LENGTH,
    TRON_ADDRESS_PREFIX, TRON_CHECKSUM_LENGTH, TRON_DECODED_LENGTH, TRON_ZERO_ADDRESS,
};
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;
use crate::shared::utils::{base58check_decode, decode_abi_string, decode_abi_u8, decode_hex_data};

const TRIGGER_CONSTANT_CONTRACT_PATH: &str = "wallet/triggerconstantcontract";

pub struct TronTokenService {
    api: Arc<dyn JsonTransport>,
}

impl TronTokenService {
    pub fn new(api: Arc<dyn JsonTransport>) -> Self {
        Self { api }
    }

    /// Base58check, 34 characters, `0x41` version byte
    pub fn is_valid_address(reference: &str) -> bool {
        if reference.len() != TRON_ADDRESS_LENGTH || !reference.starts_with('T') {
            return false;
        }

        match base58check_decode(reference) {
            Some(payload) => {
                payload.len() == TRON_DECODED_LENGTH - TRON_CHECKSUM_LENGTH
                    && payload[0] == TRON_ADDRESS_PREFIX
            }
            None => false,
        }
    }

    async fn constant_call(&self, contract: &str, signature: &str) -> TokenResult<Vec<u8>> {
        let body = json!({
            "owner_address": TRON_ZERO_ADDRESS,
            "contract_address": contract,
            "function_selector": signature,
            "visible": true,
        });
        let response = self.api.post_json(TRIGGER_CONSTANT_CONTRACT_PATH, body).await?;

        if let Some(message) = response
            .pointer("/result/message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            // TronGrid hex-encodes the failure message
            let message = decode_hex_data(message)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .unwrap_or_else(|| message.to_string());
            return Err(TokenError::network(format!(
                "{} on {} failed: {}",
                signature, contract, message
            )));
        }

        let data = response
            .pointer("/constant_result/0")
            .and_then(Value::as_str)
            .ok_or_else(|| TokenError::decode(format!("{} returned no constant_result", signature)))?;
        let bytes = decode_hex_data(data)?;
        if bytes.is_empty() {
            return Err(TokenError::decode(format!(
                "Contract {} returned no data for {}",
                contract, signature
            )));
        }
        Ok(bytes)
    }
}

#[async_trait]
impl TokenBlockchainService for TronTokenService {
    fn blockchain_type(&self) -> BlockchainType {
        BlockchainType::Tron
    }

    fn is_valid(&self, reference: &str) -> bool {
        Self::is_valid_address(reference)
    }

    fn token_query(&self, reference: &str) -> TokenQuery {
        TokenQuery::new(
            BlockchainType::Tron,
            TokenType::Eip20 {
                address: reference.to_string(),
            },
        )
    }

    async fn token(&self, reference: &str) -> Result<Token, TokenError> {
        log::debug!("Fetching TRC-20 metadata for {}", reference);

        let (name, symbol, decimals) = futures::try_join!(
            self.constant_call(reference, TRC20_NAME_SIGNATURE),
            self.constant_call(reference, TRC20_SYMBOL_SIGNATURE),
            self.constant_call(reference, TRC20_DECIMALS_SIGNATURE),
        )?;

        let symbol = decode_abi_string(&symbol)?;
        if symbol.is_empty() {
            return Err(TokenError::decode("Token symbol is empty"));
        }
        let name = decode_abi_string(&name)?;

        let metadata = TokenMetadata {
            name: if name.is_empty() { symbol.clone() } else { name },
            symbol,
            decimals: decode_abi_u8(&decimals)?,
        };
        Ok(Token::custom(&self.token_query(reference), metadata))
    }
}
