//! Wallet commit step
//!
//! Adds a resolved token to the active account's wallet set. The active
//! account is passed in by the caller; duplicate detection and write
//! serialization are left to the wallet store.

use std::sync::Arc;

use crate::domain::entities::{Account, ResolvedToken, TokenEvent, WalletEntry};
use crate::domain::repositories::{TokenEventSink, WalletStore};
use crate::shared::error::TokenError;

/// What a commit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Saved(WalletEntry),
    /// No account was active; nothing was written
    NoActiveAccount,
}

impl CommitOutcome {
    pub fn entry(&self) -> Option<&WalletEntry> {
        match self {
            CommitOutcome::Saved(entry) => Some(entry),
            CommitOutcome::NoActiveAccount => None,
        }
    }
}

#[derive(Clone)]
pub struct WalletCommitter {
    store: Arc<dyn WalletStore>,
    events: Arc<dyn TokenEventSink>,
}

impl WalletCommitter {
    pub fn new(store: Arc<dyn WalletStore>, events: Arc<dyn TokenEventSink>) -> Self {
        Self { store, events }
    }

    /// Append one wallet entry for `account`
    pub async fn commit(
        &self,
        resolved: &ResolvedToken,
        account: Option<&Account>,
    ) -> Result<CommitOutcome, TokenError> {
        let account = match account {
            Some(account) => account,
            None => {
                log::warn!(
                    "No active account, {} was not added",
                    resolved.token().query().id()
                );
                return Ok(CommitOutcome::NoActiveAccount);
            }
        };

        let entry = WalletEntry::new(resolved.token().clone(), account);
        self.store.save(vec![entry.clone()]).await?;

        log::info!(
            "Added {} ({}) to account {}",
            entry.token.coin.code,
            entry.query().id(),
            account.id
        );
        self.events.record(&TokenEvent::token_added(&entry));

        Ok(CommitOutcome::Saved(entry))
    }
}
