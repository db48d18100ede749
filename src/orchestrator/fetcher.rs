use std::{sync::Arc, time::Duration};

use tokio::time::timeout;

use crate::{
    ledger::{FetchError, LedgerClient},
    state::game::GameSnapshot,
};

/// Reads the authoritative game state, bounding each call by a timeout.
pub struct SnapshotFetcher {
    ledger: Arc<dyn LedgerClient>,
    call_timeout: Duration,
}

impl SnapshotFetcher {
    /// Bound every read by `call_timeout`.
    pub fn new(ledger: Arc<dyn LedgerClient>, call_timeout: Duration) -> Self {
        Self {
            ledger,
            call_timeout,
        }
    }

    /// Fetch a fresh snapshot. Has no side effect on the ledger.
    pub async fn fetch(&self) -> Result<GameSnapshot, FetchError> {
        match timeout(self.call_timeout, self.ledger.fetch_snapshot()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.call_timeout)),
        }
    }
}
