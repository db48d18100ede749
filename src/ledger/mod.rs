pub mod aptos;
pub mod command;
pub mod error;

use futures::future::BoxFuture;

use crate::state::game::GameSnapshot;

pub use self::command::RoundTransitionCommand;
pub use self::error::{FetchError, LedgerConfigError, SubmissionError};

/// Result of a transaction that reached the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// Transaction hash assigned at submission.
    pub hash: String,
    /// Whether the transaction executed successfully once committed.
    pub success: bool,
    /// VM status reported by the node.
    pub vm_status: Option<String>,
}

/// Abstraction over the ledger: reading game state and submitting admin transactions.
///
/// Signing, encoding and waiting for confirmation are the implementation's concern.
pub trait LedgerClient: Send + Sync {
    /// Read the current game resource.
    fn fetch_snapshot(&self) -> BoxFuture<'static, Result<GameSnapshot, FetchError>>;
    /// Sign and submit `command`, resolving once the ledger has committed it.
    fn submit(
        &self,
        command: RoundTransitionCommand,
    ) -> BoxFuture<'static, Result<TransactionReceipt, SubmissionError>>;
}
