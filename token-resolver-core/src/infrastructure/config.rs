//! Configuration for the token resolver core
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! TOML file, then `TOKEN_CORE_*` environment variables. Nested keys use a
//! double underscore, e.g. `TOKEN_CORE_EVM_RPC__BINANCE_SMART_CHAIN`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::domain::entities::{BlockchainFamily, BlockchainType};
use crate::shared::constants::*;
use crate::shared::error::TokenError;
use crate::shared::types::TokenResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoreConfig {
    /// EVM JSON-RPC endpoint per chain, keyed by uid with `-` written as `_`
    pub evm_rpc: BTreeMap<String, String>,
    pub tron_api_url: String,
    pub tron_api_key: Option<String>,
    pub ton_api_url: String,
    pub ton_api_key: Option<String>,
    /// Any Solana RPC node works; a DAS-capable one also resolves assets
    /// without a Metaplex metadata account
    pub solana_rpc_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

/// Header carrying an indexer API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub header: &'static str,
    pub value: String,
}

/// Where one blockchain's service sends its requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub api_key: Option<ApiKey>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let evm_rpc = [
            (BlockchainType::Ethereum, DEFAULT_ETHEREUM_RPC),
            (BlockchainType::BinanceSmartChain, DEFAULT_BSC_RPC),
            (BlockchainType::Polygon, DEFAULT_POLYGON_RPC),
            (BlockchainType::Avalanche, DEFAULT_AVALANCHE_RPC),
            (BlockchainType::Gnosis, DEFAULT_GNOSIS_RPC),
            (BlockchainType::Fantom, DEFAULT_FANTOM_RPC),
            (BlockchainType::Davinci, DEFAULT_DAVINCI_RPC),
            (BlockchainType::ArbitrumOne, DEFAULT_ARBITRUM_ONE_RPC),
            (BlockchainType::Optimism, DEFAULT_OPTIMISM_RPC),
            (BlockchainType::Base, DEFAULT_BASE_RPC),
            (BlockchainType::ZkSync, DEFAULT_ZKSYNC_RPC),
        ]
        .into_iter()
        .map(|(blockchain_type, url)| (Self::evm_key(blockchain_type), url.to_string()))
        .collect();

        Self {
            evm_rpc,
            tron_api_url: DEFAULT_TRON_API.to_string(),
            tron_api_key: None,
            ton_api_url: DEFAULT_TON_API.to_string(),
            ton_api_key: None,
            solana_rpc_url: DEFAULT_SOLANA_RPC.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl CoreConfig {
    /// Load `.env`, then the config file named by `TOKEN_CORE_CONFIG`
    /// (default `token-core.toml`), then the environment
    pub fn load() -> TokenResult<Self> {
        dotenv::dotenv().ok();
        let path = env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(path)
    }

    /// Load with an explicit config file path; a missing file is skipped
    pub fn load_from(path: impl AsRef<Path>) -> TokenResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());

        let settings = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?)
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn evm_key(blockchain_type: BlockchainType) -> String {
        blockchain_type.uid().replace('-', "_")
    }

    pub fn validate(&self) -> TokenResult<()> {
        for blockchain_type in BlockchainType::ALL {
            if blockchain_type.family() == BlockchainFamily::Evm {
                let url = self.evm_url(blockchain_type).ok_or_else(|| {
                    TokenError::config(format!("No RPC endpoint for {}", blockchain_type.uid()))
                })?;
                Self::check_url(blockchain_type.uid(), url)?;
            }
        }

        Self::check_url("tron_api_url", &self.tron_api_url)?;
        Self::check_url("ton_api_url", &self.ton_api_url)?;
        Self::check_url("solana_rpc_url", &self.solana_rpc_url)?;

        if self.request_timeout_secs == 0 {
            return Err(TokenError::config("request_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    fn check_url(name: &str, url: &str) -> TokenResult<()> {
        if url.trim().is_empty() {
            return Err(TokenError::config(format!("{} is empty", name)));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(TokenError::config(format!("{} is not an http(s) URL: {}", name, url)));
        }
        Ok(())
    }

    fn evm_url(&self, blockchain_type: BlockchainType) -> Option<&str> {
        self.evm_rpc
            .get(&Self::evm_key(blockchain_type))
            .or_else(|| self.evm_rpc.get(blockchain_type.uid()))
            .map(String::as_str)
    }

    fn api_key(header: &'static str, value: &Option<String>) -> Option<ApiKey> {
        value
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .map(|v| ApiKey {
                header,
                value: v.clone(),
            })
    }

    pub fn endpoint_for(&self, blockchain_type: BlockchainType) -> TokenResult<Endpoint> {
        let endpoint = match blockchain_type.family() {
            BlockchainFamily::Evm => Endpoint {
                url: self
                    .evm_url(blockchain_type)
                    .ok_or_else(|| {
                        TokenError::config(format!("No RPC endpoint for {}", blockchain_type.uid()))
                    })?
                    .to_string(),
                api_key: None,
            },
            BlockchainFamily::Tron => Endpoint {
                url: self.tron_api_url.clone(),
                api_key: Self::api_key(TRON_API_KEY_HEADER, &self.tron_api_key),
            },
            BlockchainFamily::Ton => Endpoint {
                url: self.ton_api_url.clone(),
                api_key: Self::api_key(TON_API_KEY_HEADER, &self.ton_api_key),
            },
            BlockchainFamily::Solana => Endpoint {
                url: self.solana_rpc_url.clone(),
                api_key: None,
            },
        };
        Ok(endpoint)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Effective configuration with API keys masked
    pub fn summary(&self) -> serde_json::Value {
        let mask = |key: &Option<String>| key.as_ref().map(|_| "********");
        serde_json::json!({
            "evm_rpc": self.evm_rpc,
            "tron_api_url": self.tron_api_url,
            "tron_api_key": mask(&self.tron_api_key),
            "ton_api_url": self.ton_api_url,
            "ton_api_key": mask(&self.ton_api_key),
            "solana_rpc_url": self.solana_rpc_url,
            "request_timeout_secs": self.request_timeout_secs,
            "log_level": self.log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
        assert_eq!(config.evm_rpc.len(), 11);
        assert_eq!(config.evm_rpc["davinci"], DEFAULT_DAVINCI_RPC);
    }

    #[test]
    fn test_endpoint_for_each_family() {
        let mut config = CoreConfig::default();
        config.tron_api_key = Some("tron-key".to_string());
        config.ton_api_key = Some("  ".to_string());

        let bsc = config.endpoint_for(BlockchainType::BinanceSmartChain).expect("bsc endpoint");
        assert_eq!(bsc.url, DEFAULT_BSC_RPC);
        assert!(bsc.api_key.is_none());

        let tron = config.endpoint_for(BlockchainType::Tron).expect("tron endpoint");
        assert_eq!(
            tron.api_key,
            Some(ApiKey {
                header: TRON_API_KEY_HEADER,
                value: "tron-key".to_string()
            })
        );

        // Blank keys are ignored
        let ton = config.endpoint_for(BlockchainType::Ton).expect("ton endpoint");
        assert!(ton.api_key.is_none());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = CoreConfig::default();
        config.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(TokenError::Config(_))));

        let mut config = CoreConfig::default();
        config.solana_rpc_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());

        let mut config = CoreConfig::default();
        config.evm_rpc.remove("polygon_pos");
        assert!(config.validate().is_err());
        assert!(config.endpoint_for(BlockchainType::Polygon).is_err());
    }

    #[test]
    fn test_dashed_uid_keys_are_accepted() {
        let mut config = CoreConfig::default();
        config.evm_rpc.remove("arbitrum_one");
        config
            .evm_rpc
            .insert("arbitrum-one".to_string(), "https://arbitrum.example.org".to_string());

        let endpoint = config.endpoint_for(BlockchainType::ArbitrumOne).expect("endpoint");
        assert_eq!(endpoint.url, "https://arbitrum.example.org");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("token-core.toml");
        fs::write(
            &path,
            r#"
tron_api_url = "https://tron.example.org"
request_timeout_secs = 5

[evm_rpc]
ethereum = "https://eth.example.org"
"#,
        )
        .expect("write config");

        let config = CoreConfig::load_from(&path).expect("config loads");
        assert_eq!(config.tron_api_url, "https://tron.example.org");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.evm_rpc["ethereum"], "https://eth.example.org");
        // Untouched chains keep their defaults
        assert_eq!(config.evm_rpc["base"], DEFAULT_BASE_RPC);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = CoreConfig::load_from(dir.path().join("absent.toml")).expect("config loads");
        assert_eq!(config.solana_rpc_url, DEFAULT_SOLANA_RPC);
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("token-core.toml");
        fs::write(&path, "ton_api_url = \"toncenter.com\"\n").expect("write config");

        assert!(matches!(CoreConfig::load_from(&path), Err(TokenError::Config(_))));
    }

    #[test]
    fn test_summary_masks_keys() {
        let mut config = CoreConfig::default();
        config.ton_api_key = Some("secret".to_string());

        let summary = config.summary();
        assert_eq!(summary["ton_api_key"], "********");
        assert!(summary["tron_api_key"].is_null());
        assert!(!summary.to_string().contains("secret"));
    }
}
