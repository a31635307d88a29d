//! EVM token service (ERC-20 contracts on any EVM chain)

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use super::rpc::json_rpc_call;
use super::TokenBlockchainService;
use crate::domain::entities::{BlockchainType, Token, TokenMetadata, TokenQuery, TokenType};
use crate::domain::repositories::JsonTransport;
use crate::shared::constants::{
    ERC20_DECIMALS_SELECTOR, ERC20_NAME_SELECTOR, ERC20_SYMBOL_SELECTOR, EVM_ADDRESS_HEX_LENGTH,
};
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;
use crate::shared::utils::{decode_abi_string, decode_abi_u8, decode_hex_data, is_eip55_checksum_valid};

pub struct EvmTokenService {
    blockchain_type: BlockchainType,
    chain_id: u64,
    rpc: Arc<dyn JsonTransport>,
}

impl EvmTokenService {
    pub fn new(blockchain_type: BlockchainType, rpc: Arc<dyn JsonTransport>) -> TokenResult<Self> {
        let chain_id = blockchain_type.evm_chain_id().ok_or_else(|| {
            TokenError::config(format!("{} is not an EVM chain", blockchain_type))
        })?;

        Ok(Self {
            blockchain_type,
            chain_id,
            rpc,
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `0x` + 40 hex digits; mixed case must carry a valid EIP-55 checksum
    pub fn is_valid_address(reference: &str) -> bool {
        let hex_part = match reference.strip_prefix("0x") {
            Some(hex_part) => hex_part,
            None => return false,
        };

        if hex_part.len() != EVM_ADDRESS_HEX_LENGTH
            || !hex_part.chars().all(|c| c.is_ascii_hexdigit())
        {
            return false;
        }

        let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return is_eip55_checksum_valid(reference);
        }
        true
    }

    async fn call(&self, contract: &str, selector: &str) -> TokenResult<Vec<u8>> {
        let result = json_rpc_call(
            self.rpc.as_ref(),
            "eth_call",
            json!([{ "to": contract, "data": selector }, "latest"]),
        )
        .await?;

        let data = result
            .as_str()
            .ok_or_else(|| TokenError::decode("eth_call result is not a string"))?;
        let bytes = decode_hex_data(data)?;
        if bytes.is_empty() {
            return Err(TokenError::decode(format!(
                "Contract {} returned no data for {}",
                contract, selector
            )));
        }
        Ok(bytes)
    }

    async fn metadata(&self, contract: &str) -> TokenResult<TokenMetadata> {
        let (name, symbol, decimals) = futures::try_join!(
            self.call(contract, ERC20_NAME_SELECTOR),
            self.call(contract, ERC20_SYMBOL_SELECTOR),
            self.call(contract, ERC20_DECIMALS_SELECTOR),
        )?;

        let symbol = decode_abi_string(&symbol)?;
        if symbol.is_empty() {
            return Err(TokenError::decode("Token symbol is empty"));
        }
        let name = decode_abi_string(&name)?;
        let decimals = decode_abi_u8(&decimals)?;

        Ok(TokenMetadata {
            name: if name.is_empty() { symbol.clone() } else { name },
            symbol,
            decimals,
        })
    }
}

#[async_trait]
impl TokenBlockchainService for EvmTokenService {
    fn blockchain_type(&self) -> BlockchainType {
        self.blockchain_type
    }

    fn is_valid(&self, reference: &str) -> bool {
        Self::is_valid_address(reference)
    }

    fn token_query(&self, reference: &str) -> TokenQuery {
        TokenQuery::new(
            self.blockchain_type,
            TokenType::Eip20 {
                address: reference.to_lowercase(),
            },
        )
    }

    async fn token(&self, reference: &str) -> Result<Token, TokenError> {
        let query = self.token_query(reference);
        let contract = reference.to_lowercase();
        log::debug!(
            "Fetching ERC-20 metadata for {} on chain {}",
            contract,
            self.chain_id
        );

        let metadata = self.metadata(&contract).await?;
        Ok(Token::custom(&query, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockJsonTransport;
    use serde_json::Value;

    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    fn abi_word(value: usize) -> String {
        format!("{:064x}", value)
    }

    fn abi_string(text: &str) -> String {
        let mut body = hex::encode(text.as_bytes());
        let padded = ((body.len() + 63) / 64).max(1) * 64;
        body.push_str(&"0".repeat(padded - body.len()));
        format!("0x{}{}{}", abi_word(32), abi_word(text.len()), body)
    }

    fn erc20_node(name: &'static str, symbol: &'static str, decimals: usize) -> MockJsonTransport {
        let mut rpc = MockJsonTransport::new();
        rpc.expect_post_json().times(3).returning(move |_, body: Value| {
            let data = body["params"][0]["data"].as_str().unwrap_or_default().to_string();
            let result = match data.as_str() {
                ERC20_NAME_SELECTOR => abi_string(name),
                ERC20_SYMBOL_SELECTOR => abi_string(symbol),
                ERC20_DECIMALS_SELECTOR => format!("0x{}", abi_word(decimals)),
                _ => "0x".to_string(),
            };
            Ok(json!({ "jsonrpc": "2.0", "id": 1, "result": result }))
        });
        rpc
    }

    #[test]
    fn test_address_validation() {
        // All lowercase and all uppercase skip the checksum
        assert!(EvmTokenService::is_valid_address("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"));
        assert!(EvmTokenService::is_valid_address("0xA0B86991C6218B36C1D19D4A2E9EB0CE3606EB48"));
        assert!(EvmTokenService::is_valid_address(USDC));

        assert!(!EvmTokenService::is_valid_address("not-an-address"));
        assert!(!EvmTokenService::is_valid_address("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"));
        assert!(!EvmTokenService::is_valid_address("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb4"));
        assert!(!EvmTokenService::is_valid_address("0xg0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"));
        assert!(!EvmTokenService::is_valid_address(" 0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"));
        // Bad checksum
        assert!(!EvmTokenService::is_valid_address("0xa0B86991c6218b36c1d19D4a2e9Eb0cE3606eB48"));
    }

    #[test]
    fn test_token_query_is_lowercase() {
        let service = EvmTokenService::new(BlockchainType::Polygon, Arc::new(MockJsonTransport::new()))
            .expect("polygon is EVM");
        let query = service.token_query(USDC);

        assert_eq!(query.blockchain_type, BlockchainType::Polygon);
        assert_eq!(
            query.token_type,
            TokenType::Eip20 {
                address: USDC.to_lowercase()
            }
        );
        assert_eq!(service.chain_id(), 137);
    }

    #[test]
    fn test_rejects_non_evm_chain() {
        let result = EvmTokenService::new(BlockchainType::Tron, Arc::new(MockJsonTransport::new()));
        assert!(matches!(result, Err(TokenError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetches_erc20_metadata() {
        let rpc = erc20_node("USD Coin", "USDC", 6);
        let service = EvmTokenService::new(BlockchainType::Ethereum, Arc::new(rpc)).expect("evm chain");

        let token = service.token(USDC).await.expect("metadata fetched");
        assert_eq!(token.coin.name, "USD Coin");
        assert_eq!(token.coin.code, "USDC");
        assert_eq!(token.decimals, 6);
        assert_eq!(
            token.coin.uid,
            "custom-ethereum-eip20:0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
        );
    }

    #[tokio::test]
    async fn test_contract_without_token_interface_fails() {
        let mut rpc = MockJsonTransport::new();
        rpc.expect_post_json()
            .returning(|_, _| Ok(json!({ "jsonrpc": "2.0", "id": 1, "result": "0x" })));
        let service = EvmTokenService::new(BlockchainType::Base, Arc::new(rpc)).expect("evm chain");

        let error = service
            .token("0x0000000000000000000000000000000000000001")
            .await
            .expect_err("no token interface");
        assert!(matches!(error, TokenError::Decode(_)));
    }

    #[tokio::test]
    async fn test_decimals_out_of_range_fails() {
        let rpc = erc20_node("Broken", "BRK", 300);
        let service = EvmTokenService::new(BlockchainType::Ethereum, Arc::new(rpc)).expect("evm chain");

        assert!(service.token(USDC).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_name_falls_back_to_symbol() {
        let rpc = erc20_node("", "ABC", 18);
        let service = EvmTokenService::new(BlockchainType::Gnosis, Arc::new(rpc)).expect("evm chain");

        let token = service.token(USDC).await.expect("metadata fetched");
        assert_eq!(token.coin.name, "ABC");
    }

    #[tokio::test]
    async fn test_non_utf8_symbol_fails() {
        let mut rpc = MockJsonTransport::new();
        rpc.expect_post_json().returning(|_, body: Value| {
            let data = body["params"][0]["data"].as_str().unwrap_or_default().to_string();
            let result = match data.as_str() {
                ERC20_DECIMALS_SELECTOR => format!("0x{}", abi_word(18)),
                ERC20_SYMBOL_SELECTOR => {
                    format!("0x{}{}fffe{}", abi_word(32), abi_word(2), "0".repeat(60))
                }
                _ => abi_string("Junk"),
            };
            Ok(json!({ "jsonrpc": "2.0", "id": 1, "result": result }))
        });
        let service = EvmTokenService::new(BlockchainType::Ethereum, Arc::new(rpc)).expect("evm chain");

        let error = service.token(USDC).await.expect_err("symbol is not utf8");
        assert!(matches!(error, TokenError::Decode(_)));
    }
}
