pub mod cache;
pub mod game;
pub mod scores;
pub mod stats;

use std::{sync::Arc, time::Instant};

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    ledger::LedgerClient,
    orchestrator::{clock::Clock, dispatcher::CommandDispatcher, fetcher::SnapshotFetcher},
};

use self::{cache::SnapshotCache, scores::ScoreLedger, stats::LoopStats};

pub type SharedState = Arc<AppState>;

/// Central application state shared by the round loop and the HTTP handlers.
pub struct AppState {
    config: AppConfig,
    clock: Arc<dyn Clock>,
    cache: SnapshotCache,
    scores: Mutex<ScoreLedger>,
    round_started_at: Mutex<Instant>,
    fetcher: SnapshotFetcher,
    dispatcher: CommandDispatcher,
    stats: Arc<LoopStats>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The round timer starts at construction time.
    pub fn new(
        config: AppConfig,
        ledger: Arc<dyn LedgerClient>,
        clock: Arc<dyn Clock>,
    ) -> SharedState {
        let stats = Arc::new(LoopStats::default());
        let started = clock.now();
        Arc::new(Self {
            fetcher: SnapshotFetcher::new(ledger.clone(), config.ledger_timeout),
            dispatcher: CommandDispatcher::new(ledger, config.ledger_timeout, stats.clone()),
            config,
            clock,
            cache: SnapshotCache::new(),
            scores: Mutex::new(ScoreLedger::new()),
            round_started_at: Mutex::new(started),
            stats,
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Time source shared by the loop and the handlers.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Most recently fetched game state.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Scores reported for the current round.
    pub fn scores(&self) -> &Mutex<ScoreLedger> {
        &self.scores
    }

    /// Reader for the authoritative game state.
    pub fn fetcher(&self) -> &SnapshotFetcher {
        &self.fetcher
    }

    /// Only path through which commands reach the ledger.
    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Loop counters exposed through the health endpoint.
    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    /// Instant at which the current round started.
    pub async fn round_started_at(&self) -> Instant {
        *self.round_started_at.lock().await
    }

    /// Restart the round timer at `at`.
    pub async fn reset_round_timer(&self, at: Instant) {
        *self.round_started_at.lock().await = at;
    }
}
