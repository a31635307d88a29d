//! Log and metrics backed event sink

use crate::domain::entities::TokenEvent;
use crate::domain::repositories::TokenEventSink;
use crate::shared::constants::TOKENS_ADDED_COUNTER;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl TokenEventSink for LogEventSink {
    fn record(&self, event: &TokenEvent) {
        match event {
            TokenEvent::TokenAdded {
                query_id,
                coin_uid,
                account_id,
            } => {
                log::info!(
                    "event=token_added query={} coin={} account={}",
                    query_id,
                    coin_uid,
                    account_id
                );
                metrics::counter!(TOKENS_ADDED_COUNTER).increment(1);
            }
        }
    }
}
