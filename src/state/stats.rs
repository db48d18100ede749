use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing how the round loop has been doing since startup.
#[derive(Debug, Default)]
pub struct LoopStats {
    fetch_failures: AtomicU64,
    submission_failures: AtomicU64,
    rounds_advanced: AtomicU64,
    games_ended: AtomicU64,
}

/// Point-in-time copy of [`LoopStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStatsSnapshot {
    /// Ledger reads that failed or timed out.
    pub fetch_failures: u64,
    /// Dispatched commands that were not confirmed as successful.
    pub submission_failures: u64,
    /// Confirmed `AdvanceRound` transactions.
    pub rounds_advanced: u64,
    /// Confirmed `EndGame` transactions.
    pub games_ended: u64,
}

impl LoopStats {
    /// Count a failed or timed-out ledger read.
    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a command whose outcome was not a confirmed success.
    pub fn record_submission_failure(&self) {
        self.submission_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a confirmed round advance.
    pub fn record_round_advanced(&self) {
        self.rounds_advanced.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a confirmed game end.
    pub fn record_game_ended(&self) {
        self.games_ended.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters at once.
    pub fn snapshot(&self) -> LoopStatsSnapshot {
        LoopStatsSnapshot {
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            submission_failures: self.submission_failures.load(Ordering::Relaxed),
            rounds_advanced: self.rounds_advanced.load(Ordering::Relaxed),
            games_ended: self.games_ended.load(Ordering::Relaxed),
        }
    }
}
