//! Solana token service (SPL mints)

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::rpc::json_rpc_call;
use super::TokenBlockchainService;
use crate::domain::entities::{BlockchainType, Token, TokenMetadata, TokenQuery, TokenType};
use crate::domain::repositories::JsonTransport;
use crate::shared::constants::{
    METAPLEX_BUMP_CANDIDATES, METAPLEX_METADATA_PROGRAM_ID, METAPLEX_METADATA_SEED,
    METAPLEX_METADATA_V1_KEY, PDA_MARKER, SOLANA_MAX_ADDRESS_LENGTH, SOLANA_MIN_ADDRESS_LENGTH,
    SOLANA_PUBKEY_LENGTH,
};
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;
use crate::shared::utils::first_non_empty_string;

pub struct SolanaTokenService {
    rpc: Arc<dyn JsonTransport>,
}

impl SolanaTokenService {
    pub fn new(rpc: Arc<dyn JsonTransport>) -> Self {
        Self { rpc }
    }

    /// Base58 public key, 32 bytes once decoded
    pub fn is_valid_address(reference: &str) -> bool {
        if reference.len() < SOLANA_MIN_ADDRESS_LENGTH || reference.len() > SOLANA_MAX_ADDRESS_LENGTH {
            return false;
        }

        matches!(
            bs58::decode(reference).into_vec(),
            Ok(bytes) if bytes.len() == SOLANA_PUBKEY_LENGTH
        )
    }

    /// Decimals and, for Token-2022 mints, the embedded metadata extension
    async fn mint_info(&self, mint: &str) -> TokenResult<(u8, Option<(String, String)>)> {
        let result = json_rpc_call(
            self.rpc.as_ref(),
            "getAccountInfo",
            json!([mint, { "encoding": "jsonParsed" }]),
        )
        .await?;

        let value = result
            .get("value")
            .filter(|v| !v.is_null())
            .ok_or_else(|| TokenError::decode(format!("Account {} does not exist", mint)))?;

        let parsed = value
            .pointer("/data/parsed")
            .ok_or_else(|| TokenError::decode(format!("Account {} is not a parsed token account", mint)))?;
        let account_type = parsed.get("type").and_then(Value::as_str).unwrap_or_default();
        if account_type != "mint" {
            return Err(TokenError::decode(format!(
                "Account {} is not a mint ({})",
                mint, account_type
            )));
        }

        let info = parsed
            .get("info")
            .ok_or_else(|| TokenError::decode("Mint account has no info"))?;
        let decimals = info
            .get("decimals")
            .and_then(Value::as_u64)
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(|| TokenError::decode("Mint account has no valid decimals"))?;

        let extension = info
            .get("extensions")
            .and_then(Value::as_array)
            .and_then(|extensions| {
                extensions
                    .iter()
                    .find(|e| e.get("extension").and_then(Value::as_str) == Some("tokenMetadata"))
            })
            .and_then(|e| e.get("state"))
            .and_then(|state| {
                let symbol = first_non_empty_string([state.get("symbol")])?;
                let name = first_non_empty_string([state.get("name")]).unwrap_or_else(|| symbol.clone());
                Some((name, symbol))
            });

        Ok((decimals, extension))
    }

    /// Name and symbol from a DAS `getAsset` call
    async fn asset_metadata(&self, mint: &str) -> TokenResult<(String, String)> {
        let result = json_rpc_call(self.rpc.as_ref(), "getAsset", json!({ "id": mint })).await?;
        let metadata = result.pointer("/content/metadata");

        let symbol = first_non_empty_string([metadata.and_then(|m| m.get("symbol"))])
            .ok_or_else(|| TokenError::decode(format!("No token metadata for {}", mint)))?;
        let name = first_non_empty_string([metadata.and_then(|m| m.get("name"))])
            .unwrap_or_else(|| symbol.clone());
        Ok((name, symbol))
    }

    /// Name and symbol from the mint's Metaplex metadata account, readable
    /// through any plain RPC node
    async fn metaplex_metadata(&self, mint: &str) -> TokenResult<(String, String)> {
        let mint_bytes = bs58::decode(mint)
            .into_vec()
            .map_err(|e| TokenError::validation(format!("Mint is not base58: {}", e)))?;
        let candidates = metadata_account_candidates(&mint_bytes)?;

        let result = json_rpc_call(
            self.rpc.as_ref(),
            "getMultipleAccounts",
            json!([candidates, { "encoding": "base64" }]),
        )
        .await?;
        let accounts = result
            .get("value")
            .and_then(Value::as_array)
            .ok_or_else(|| TokenError::decode("getMultipleAccounts returned no value"))?;

        for account in accounts.iter().filter(|a| !a.is_null()) {
            if account.get("owner").and_then(Value::as_str) != Some(METAPLEX_METADATA_PROGRAM_ID) {
                continue;
            }
            let Some(encoded) = account.pointer("/data/0").and_then(Value::as_str) else {
                continue;
            };
            let data = STANDARD
                .decode(encoded)
                .map_err(|e| TokenError::decode(format!("Metadata account is not base64: {}", e)))?;
            if let Some(names) = parse_metaplex_metadata(&data, &mint_bytes) {
                return Ok(names);
            }
        }

        Err(TokenError::decode(format!("No Metaplex metadata for {}", mint)))
    }
}

/// Program derived addresses for `["metadata", program, mint]`, highest bump
/// first. The first one that exists and is owned by the program is canonical.
fn metadata_account_candidates(mint: &[u8]) -> TokenResult<Vec<String>> {
    let program = bs58::decode(METAPLEX_METADATA_PROGRAM_ID)
        .into_vec()
        .map_err(|e| TokenError::config(format!("Bad metadata program id: {}", e)))?;

    let candidates = (0..METAPLEX_BUMP_CANDIDATES)
        .map(|offset| {
            let bump = u8::MAX - offset;
            let mut hasher = Sha256::new();
            hasher.update(METAPLEX_METADATA_SEED);
            hasher.update(&program);
            hasher.update(mint);
            hasher.update([bump]);
            hasher.update(&program);
            hasher.update(PDA_MARKER);
            bs58::encode(hasher.finalize()).into_string()
        })
        .collect();
    Ok(candidates)
}

/// `MetadataV1` layout: key, update authority, mint, then borsh `name` and `symbol`
fn parse_metaplex_metadata(data: &[u8], mint: &[u8]) -> Option<(String, String)> {
    if data.first() != Some(&METAPLEX_METADATA_V1_KEY) {
        return None;
    }
    let mint_start = 1 + SOLANA_PUBKEY_LENGTH;
    if data.get(mint_start..mint_start + SOLANA_PUBKEY_LENGTH)? != mint {
        return None;
    }

    let mut offset = mint_start + SOLANA_PUBKEY_LENGTH;
    let name = borsh_string(data, &mut offset)?;
    let symbol = borsh_string(data, &mut offset)?;
    if symbol.is_empty() {
        return None;
    }
    let name = if name.is_empty() { symbol.clone() } else { name };
    Some((name, symbol))
}

/// Metaplex pads fixed-size strings with NULs
fn borsh_string(data: &[u8], offset: &mut usize) -> Option<String> {
    let len_bytes: [u8; 4] = data.get(*offset..*offset + 4)?.try_into().ok()?;
    let start = *offset + 4;
    let end = start.checked_add(u32::from_le_bytes(len_bytes) as usize)?;
    let text = std::str::from_utf8(data.get(start..end)?).ok()?;
    *offset = end;
    Some(text.trim_matches('\0').trim().to_string())
}

#[async_trait]
impl TokenBlockchainService for SolanaTokenService {
    fn blockchain_type(&self) -> BlockchainType {
        BlockchainType::Solana
    }

    fn is_valid(&self, reference: &str) -> bool {
        Self::is_valid_address(reference)
    }

    fn token_query(&self, reference: &str) -> TokenQuery {
        TokenQuery::new(
            BlockchainType::Solana,
            TokenType::Spl {
                address: reference.to_string(),
            },
        )
    }

    async fn token(&self, reference: &str) -> Result<Token, TokenError> {
        log::debug!("Fetching SPL mint metadata for {}", reference);

        let (decimals, extension) = self.mint_info(reference).await?;
        let (name, symbol) = match extension {
            Some(names) => names,
            None => match self.asset_metadata(reference).await {
                Ok(names) => names,
                Err(e) => {
                    log::debug!("getAsset failed for {}: {}; reading Metaplex metadata", reference, e);
                    self.metaplex_metadata(reference).await?
                }
            },
        };

        Ok(Token::custom(
            &self.token_query(reference),
            TokenMetadata {
                name,
                symbol,
                decimals,
            },
        ))
    }
}
