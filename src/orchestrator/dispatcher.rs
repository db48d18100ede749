use std::{sync::Arc, time::Duration};

use tokio::{sync::Mutex, time::timeout};
use tracing::{error, info, warn};

use crate::{
    ledger::{LedgerClient, RoundTransitionCommand, SubmissionError},
    state::stats::LoopStats,
};

/// What became of a submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// The transaction reached the ledger.
    Submitted {
        /// Transaction hash.
        hash: String,
        /// Whether it executed successfully.
        success: bool,
        /// VM status when execution failed.
        message: Option<String>,
    },
    /// The transaction never made it to the ledger, or its fate is unknown.
    NotSubmitted {
        /// Human readable failure description.
        message: String,
    },
}

impl TransactionOutcome {
    /// Whether the command took effect on the ledger.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted { success: true, .. })
    }
}

/// Sole component allowed to submit [`RoundTransitionCommand`]s to the ledger.
///
/// Commands are submitted one at a time; errors never escape and are reported through the
/// returned [`TransactionOutcome`], the logs and the loop statistics.
pub struct CommandDispatcher {
    ledger: Arc<dyn LedgerClient>,
    call_timeout: Duration,
    gate: Mutex<()>,
    stats: Arc<LoopStats>,
}

impl CommandDispatcher {
    /// Bound every submission by `call_timeout` and report failures into `stats`.
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        call_timeout: Duration,
        stats: Arc<LoopStats>,
    ) -> Self {
        Self {
            ledger,
            call_timeout,
            gate: Mutex::new(()),
            stats,
        }
    }

    /// Submit `command` and wait for its confirmation.
    pub async fn submit(&self, command: RoundTransitionCommand) -> TransactionOutcome {
        let _gate = self.gate.lock().await;
        let description = command.to_string();

        let result = match timeout(self.call_timeout, self.ledger.submit(command)).await {
            Ok(result) => result,
            Err(_) => Err(SubmissionError::Timeout(self.call_timeout)),
        };

        let outcome = match result {
            Ok(receipt) if receipt.success => {
                info!(command = %description, hash = %receipt.hash, "transaction committed");
                TransactionOutcome::Submitted {
                    hash: receipt.hash,
                    success: true,
                    message: None,
                }
            }
            Ok(receipt) => {
                warn!(
                    command = %description,
                    hash = %receipt.hash,
                    vm_status = receipt.vm_status.as_deref().unwrap_or("unknown"),
                    "transaction submitted but did not succeed"
                );
                TransactionOutcome::Submitted {
                    hash: receipt.hash,
                    success: false,
                    message: receipt.vm_status,
                }
            }
            Err(err) => {
                error!(command = %description, error = %err, "transaction submission failed");
                TransactionOutcome::NotSubmitted {
                    message: err.to_string(),
                }
            }
        };

        if !outcome.is_success() {
            self.stats.record_submission_failure();
        }
        outcome
    }
}
