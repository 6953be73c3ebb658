use crate::domain::services::commission::CommissionEngine;
use crate::domain::services::feed::MessageFeedService;
use crate::domain::services::ledger::CommissionLedger;

/// Shared state handed to every HTTP handler. Built once in the composition
/// root; holds the domain services rather than any global singleton so tests
/// can stand up isolated instances.
pub struct AppState {
    pub feed: MessageFeedService,
    pub engine: CommissionEngine,
    pub ledger: CommissionLedger,
}

impl AppState {
    pub fn new(feed: MessageFeedService, engine: CommissionEngine, ledger: CommissionLedger) -> Self {
        AppState {
            feed,
            engine,
            ledger,
        }
    }
}
