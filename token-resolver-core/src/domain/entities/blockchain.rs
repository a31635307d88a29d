//! Blockchain entity for the token resolver core

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address grammar and metadata protocol shared by a class of chains
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlockchainFamily {
    Evm,
    Tron,
    Ton,
    Solana,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlockchainType {
    #[serde(rename = "ethereum")]
    Ethereum,
    #[serde(rename = "binance-smart-chain")]
    BinanceSmartChain,
    #[serde(rename = "polygon-pos")]
    Polygon,
    #[serde(rename = "avalanche")]
    Avalanche,
    #[serde(rename = "gnosis")]
    Gnosis,
    #[serde(rename = "fantom")]
    Fantom,
    #[serde(rename = "davinci")]
    Davinci,
    #[serde(rename = "arbitrum-one")]
    ArbitrumOne,
    #[serde(rename = "optimistic-ethereum")]
    Optimism,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "zksync")]
    ZkSync,
    #[serde(rename = "tron")]
    Tron,
    #[serde(rename = "the-open-network")]
    Ton,
    #[serde(rename = "solana")]
    Solana,
}

impl BlockchainType {
    /// Every chain a custom token can be added on
    pub const ALL: [BlockchainType; 14] = [
        BlockchainType::Ethereum,
        BlockchainType::BinanceSmartChain,
        BlockchainType::Tron,
        BlockchainType::Ton,
        BlockchainType::Polygon,
        BlockchainType::Avalanche,
        BlockchainType::Gnosis,
        BlockchainType::Fantom,
        BlockchainType::Davinci,
        BlockchainType::ArbitrumOne,
        BlockchainType::Optimism,
        BlockchainType::Base,
        BlockchainType::ZkSync,
        BlockchainType::Solana,
    ];

    pub fn uid(&self) -> &'static str {
        match self {
            BlockchainType::Ethereum => "ethereum",
            BlockchainType::BinanceSmartChain => "binance-smart-chain",
            BlockchainType::Polygon => "polygon-pos",
            BlockchainType::Avalanche => "avalanche",
            BlockchainType::Gnosis => "gnosis",
            BlockchainType::Fantom => "fantom",
            BlockchainType::Davinci => "davinci",
            BlockchainType::ArbitrumOne => "arbitrum-one",
            BlockchainType::Optimism => "optimistic-ethereum",
            BlockchainType::Base => "base",
            BlockchainType::ZkSync => "zksync",
            BlockchainType::Tron => "tron",
            BlockchainType::Ton => "the-open-network",
            BlockchainType::Solana => "solana",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BlockchainType::Ethereum => "Ethereum",
            BlockchainType::BinanceSmartChain => "BNB Smart Chain",
            BlockchainType::Polygon => "Polygon",
            BlockchainType::Avalanche => "Avalanche",
            BlockchainType::Gnosis => "Gnosis",
            BlockchainType::Fantom => "Fantom",
            BlockchainType::Davinci => "Davinci",
            BlockchainType::ArbitrumOne => "Arbitrum One",
            BlockchainType::Optimism => "Optimism",
            BlockchainType::Base => "Base",
            BlockchainType::ZkSync => "ZKsync",
            BlockchainType::Tron => "Tron",
            BlockchainType::Ton => "TON",
            BlockchainType::Solana => "Solana",
        }
    }

    /// Display ordering key; has no meaning for resolution
    pub fn order(&self) -> u32 {
        match self {
            BlockchainType::Ethereum => 1,
            BlockchainType::BinanceSmartChain => 2,
            BlockchainType::Tron => 3,
            BlockchainType::Ton => 4,
            BlockchainType::Polygon => 5,
            BlockchainType::Avalanche => 6,
            BlockchainType::ZkSync => 7,
            BlockchainType::Base => 8,
            BlockchainType::ArbitrumOne => 9,
            BlockchainType::Optimism => 10,
            BlockchainType::Gnosis => 11,
            BlockchainType::Fantom => 12,
            BlockchainType::Davinci => 13,
            BlockchainType::Solana => 14,
        }
    }

    pub fn family(&self) -> BlockchainFamily {
        match self {
            BlockchainType::Tron => BlockchainFamily::Tron,
            BlockchainType::Ton => BlockchainFamily::Ton,
            BlockchainType::Solana => BlockchainFamily::Solana,
            _ => BlockchainFamily::Evm,
        }
    }

    /// EIP-155 chain id, for EVM chains only
    pub fn evm_chain_id(&self) -> Option<u64> {
        match self {
            BlockchainType::Ethereum => Some(1),
            BlockchainType::BinanceSmartChain => Some(56),
            BlockchainType::Polygon => Some(137),
            BlockchainType::Avalanche => Some(43114),
            BlockchainType::Gnosis => Some(100),
            BlockchainType::Fantom => Some(250),
            BlockchainType::Davinci => Some(293),
            BlockchainType::ArbitrumOne => Some(42161),
            BlockchainType::Optimism => Some(10),
            BlockchainType::Base => Some(8453),
            BlockchainType::ZkSync => Some(324),
            BlockchainType::Tron | BlockchainType::Ton | BlockchainType::Solana => None,
        }
    }

    pub fn from_uid(uid: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.uid() == uid)
    }
}

impl fmt::Display for BlockchainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uid())
    }
}

/// Descriptor of a chain the user can pick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Blockchain {
    pub blockchain_type: BlockchainType,
    pub name: String,
}

impl Blockchain {
    pub fn new(blockchain_type: BlockchainType) -> Self {
        Self {
            blockchain_type,
            name: blockchain_type.name().to_string(),
        }
    }

    pub fn uid(&self) -> &'static str {
        self.blockchain_type.uid()
    }
}
