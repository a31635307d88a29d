//! Account and wallet entry entities
//!
//! An account is whatever the host application considers the active user
//! profile. A wallet entry pairs one token with one account and is owned by
//! the wallet store once handed over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::token::{Token, TokenQuery};
use crate::shared::types::AccountId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletEntry {
    pub id: String,
    pub token: Token,
    pub account_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl WalletEntry {
    pub fn new(token: Token, account: &Account) -> Self {
        Self {
            id: format!("wallet_{}", uuid::Uuid::new_v4()),
            token,
            account_id: account.id.clone(),
            created_at: Utc::now(),
        }
    }

    pub fn query(&self) -> TokenQuery {
        self.token.query()
    }
}

/// Observability events emitted by the core
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenEvent {
    TokenAdded {
        query_id: String,
        coin_uid: String,
        account_id: AccountId,
    },
}

impl TokenEvent {
    pub fn token_added(entry: &WalletEntry) -> Self {
        TokenEvent::TokenAdded {
            query_id: entry.query().id(),
            coin_uid: entry.token.coin.uid.clone(),
            account_id: entry.account_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::blockchain::{Blockchain, BlockchainType};
    use crate::domain::entities::token::{Coin, TokenType};

    fn test_token() -> Token {
        Token {
            coin: Coin {
                uid: "tether".to_string(),
                name: "Tether".to_string(),
                code: "USDT".to_string(),
            },
            blockchain: Blockchain::new(BlockchainType::Tron),
            token_type: TokenType::Eip20 {
                address: "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".to_string(),
            },
            decimals: 6,
        }
    }

    #[test]
    fn test_wallet_entry_creation() {
        let account = Account::new("account_1", "Main");
        let entry = WalletEntry::new(test_token(), &account);

        assert!(entry.id.starts_with("wallet_"));
        assert_eq!(entry.account_id, "account_1");
        assert_eq!(entry.query().id(), "tron|eip20:TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t");
    }

    #[test]
    fn test_wallet_entry_ids_are_unique() {
        let account = Account::new("account_1", "Main");
        let first = WalletEntry::new(test_token(), &account);
        let second = WalletEntry::new(test_token(), &account);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_token_added_event() {
        let account = Account::new("account_1", "Main");
        let entry = WalletEntry::new(test_token(), &account);

        assert_eq!(
            TokenEvent::token_added(&entry),
            TokenEvent::TokenAdded {
                query_id: "tron|eip20:TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t".to_string(),
                coin_uid: "tether".to_string(),
                account_id: "account_1".to_string(),
            }
        );
    }
}
