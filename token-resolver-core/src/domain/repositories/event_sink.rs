//! Observability event sink

use crate::domain::entities::TokenEvent;

#[cfg_attr(test, mockall::automock)]
pub trait TokenEventSink: Send + Sync {
    fn record(&self, event: &TokenEvent);
}
