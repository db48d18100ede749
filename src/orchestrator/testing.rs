//! In-memory ledger used by the loop and service tests.

use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use futures::future::{self, BoxFuture};
use reqwest::StatusCode;

use crate::{
    ledger::{
        FetchError, LedgerClient, RoundTransitionCommand, SubmissionError, TransactionReceipt,
    },
    state::game::GameSnapshot,
};

#[derive(Debug, Default)]
pub struct FakeLedger {
    snapshot: Mutex<Option<GameSnapshot>>,
    fetches: AtomicUsize,
    submitted: Mutex<Vec<RoundTransitionCommand>>,
    reject_submissions: AtomicBool,
    hang_submissions: AtomicBool,
    submission_delay: Mutex<Option<Duration>>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `snapshot` on subsequent fetches.
    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    /// Make subsequent fetches fail.
    pub fn fail_fetches(&self) {
        *self.snapshot.lock().unwrap() = None;
    }

    pub fn reject_submissions(&self, reject: bool) {
        self.reject_submissions.store(reject, Ordering::SeqCst);
    }

    pub fn hang_submissions(&self, hang: bool) {
        self.hang_submissions.store(hang, Ordering::SeqCst);
    }

    /// Keep each submission open for `delay` before it succeeds or fails.
    pub fn delay_submissions(&self, delay: Duration) {
        *self.submission_delay.lock().unwrap() = Some(delay);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<RoundTransitionCommand> {
        self.submitted.lock().unwrap().clone()
    }
}

impl LedgerClient for FakeLedger {
    fn fetch_snapshot(&self) -> BoxFuture<'static, Result<GameSnapshot, FetchError>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let result = self
            .snapshot
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| FetchError::EmptyResponse {
                function: "view_game_states".into(),
            });
        Box::pin(future::ready(result))
    }

    fn submit(
        &self,
        command: RoundTransitionCommand,
    ) -> BoxFuture<'static, Result<TransactionReceipt, SubmissionError>> {
        let function = command.entry_function().to_string();
        let index = {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(command);
            submitted.len()
        };

        if self.hang_submissions.load(Ordering::SeqCst) {
            return Box::pin(future::pending());
        }

        let result = if self.reject_submissions.load(Ordering::SeqCst) {
            Err(SubmissionError::RelayRejected {
                function,
                status: StatusCode::BAD_GATEWAY,
                message: "relay unavailable".into(),
            })
        } else {
            Ok(TransactionReceipt {
                hash: format!("0x{index:064x}"),
                success: true,
                vm_status: Some("Executed successfully".into()),
            })
        };
        match *self.submission_delay.lock().unwrap() {
            Some(delay) => Box::pin(async move {
                tokio::time::sleep(delay).await;
                result
            }),
            None => Box::pin(future::ready(result)),
        }
    }
}
