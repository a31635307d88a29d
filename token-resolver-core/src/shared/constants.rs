//! Constants for the token resolver core
//!
//! Selectors, address grammar sizes, and the public endpoints used when no
//! configuration overrides them.

// ERC-20 / TRC-20 function selectors
pub const ERC20_NAME_SELECTOR: &str = "0x06fdde03";
pub const ERC20_SYMBOL_SELECTOR: &str = "0x95d89b41";
pub const ERC20_DECIMALS_SELECTOR: &str = "0x313ce567";

pub const TRC20_NAME_SIGNATURE: &str = "name()";
pub const TRC20_SYMBOL_SIGNATURE: &str = "symbol()";
pub const TRC20_DECIMALS_SIGNATURE: &str = "decimals()";

// EVM address grammar
pub const EVM_ADDRESS_HEX_LENGTH: usize = 40;

// Tron address grammar
pub const TRON_ADDRESS_LENGTH: usize = 34;
pub const TRON_DECODED_LENGTH: usize = 25;
pub const TRON_ADDRESS_PREFIX: u8 = 0x41;
pub const TRON_CHECKSUM_LENGTH: usize = 4;
/// Base58check form of 0x41 followed by twenty zero bytes
pub const TRON_ZERO_ADDRESS: &str = "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb";

// Ton address grammar
pub const TON_FRIENDLY_ADDRESS_LENGTH: usize = 48;
pub const TON_DECODED_LENGTH: usize = 36;
pub const TON_HASH_LENGTH: usize = 32;
pub const TON_TAG_BOUNCEABLE: u8 = 0x11;
pub const TON_TAG_NON_BOUNCEABLE: u8 = 0x51;
pub const TON_TAG_TEST_ONLY: u8 = 0x80;
pub const TON_DEFAULT_JETTON_DECIMALS: u8 = 9;

// Solana address grammar
pub const SOLANA_MIN_ADDRESS_LENGTH: usize = 32;
pub const SOLANA_MAX_ADDRESS_LENGTH: usize = 44;
pub const SOLANA_PUBKEY_LENGTH: usize = 32;

// Metaplex token metadata accounts
pub const METAPLEX_METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";
pub const METAPLEX_METADATA_SEED: &[u8] = b"metadata";
pub const METAPLEX_METADATA_V1_KEY: u8 = 4;
/// Bumps tried when deriving the metadata account, counting down from 255
pub const METAPLEX_BUMP_CANDIDATES: u8 = 8;
pub const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

// Default public endpoints
pub const DEFAULT_ETHEREUM_RPC: &str = "https://ethereum-rpc.publicnode.com";
pub const DEFAULT_BSC_RPC: &str = "https://bsc-dataseed.binance.org";
pub const DEFAULT_POLYGON_RPC: &str = "https://polygon-rpc.com";
pub const DEFAULT_AVALANCHE_RPC: &str = "https://api.avax.network/ext/bc/C/rpc";
pub const DEFAULT_GNOSIS_RPC: &str = "https://rpc.gnosischain.com";
pub const DEFAULT_FANTOM_RPC: &str = "https://rpcapi.fantom.network";
pub const DEFAULT_DAVINCI_RPC: &str = "https://rpc.davinci.bz";
pub const DEFAULT_ARBITRUM_ONE_RPC: &str = "https://arb1.arbitrum.io/rpc";
pub const DEFAULT_OPTIMISM_RPC: &str = "https://mainnet.optimism.io";
pub const DEFAULT_BASE_RPC: &str = "https://mainnet.base.org";
pub const DEFAULT_ZKSYNC_RPC: &str = "https://mainnet.era.zksync.io";
pub const DEFAULT_TRON_API: &str = "https://api.trongrid.io";
pub const DEFAULT_TON_API: &str = "https://toncenter.com/api/v3";
pub const DEFAULT_SOLANA_RPC: &str = "https://api.mainnet-beta.solana.com";

// Transport
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const TRON_API_KEY_HEADER: &str = "TRON-PRO-API-KEY";
pub const TON_API_KEY_HEADER: &str = "X-API-Key";
pub const MAX_ERROR_BODY_SNIPPET: usize = 240;

// Configuration
pub const CONFIG_ENV_PREFIX: &str = "TOKEN_CORE";
pub const CONFIG_FILE_ENV: &str = "TOKEN_CORE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "token-core.toml";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Metrics
pub const TOKENS_ADDED_COUNTER: &str = "token_core_tokens_added_total";

// Build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_are_four_bytes() {
        for selector in [ERC20_NAME_SELECTOR, ERC20_SYMBOL_SELECTOR, ERC20_DECIMALS_SELECTOR] {
            assert_eq!(selector.len(), 10);
            assert!(selector.starts_with("0x"));
        }
    }

    #[test]
    fn test_tron_zero_address_shape() {
        assert_eq!(TRON_ZERO_ADDRESS.len(), TRON_ADDRESS_LENGTH);
        assert!(TRON_ZERO_ADDRESS.starts_with('T'));
    }
}
