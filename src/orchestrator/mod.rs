//! Round orchestrator: keeps the cached game state fresh and advances rounds on the ledger.

pub mod clock;
pub mod dispatcher;
pub mod fetcher;
pub mod policy;
#[cfg(test)]
pub(crate) mod testing;

use std::{
    mem,
    time::{Duration, Instant},
};

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::{
    ledger::RoundTransitionCommand,
    state::{SharedState, game::RoundPhase, scores::ScoreLedger},
};

use self::{
    dispatcher::TransactionOutcome,
    policy::{Decision, Elimination},
};

/// Why a due transition was postponed to the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferral {
    /// No score has been reported this round.
    InsufficientData,
    /// No alive player qualified as a winner.
    NoWinners,
}

/// What a single scheduler iteration did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No snapshot has been fetched successfully yet.
    NoSnapshot,
    /// Joining is open or no game is playable.
    Idle,
    /// A round is running and its timer has not elapsed.
    Waiting,
    /// The round is due but no command was issued.
    Deferred(Deferral),
    /// A command was handed to the dispatcher.
    Dispatched {
        /// Command that was submitted.
        command: RoundTransitionCommand,
        /// What the ledger made of it.
        outcome: TransactionOutcome,
    },
}

/// Control loop driving the game from the cached ledger state and the round timer.
pub struct Orchestrator {
    state: SharedState,
    last_fetch: Option<Instant>,
    /// The due round was deferred and is being retried.
    retrying: bool,
}

impl Orchestrator {
    /// Create a loop driving `state`.
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            last_fetch: None,
            retrying: false,
        }
    }

    /// Run the loop forever, one iteration per tick interval.
    ///
    /// Iterations never overlap; a slow ledger call delays the next tick.
    pub async fn run(mut self) {
        let config = self.state.config();
        info!(
            poll_interval_ms = config.poll_interval.as_millis() as u64,
            tick_interval_ms = config.tick_interval.as_millis() as u64,
            "round orchestrator started"
        );

        let mut ticker = interval(config.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let outcome = self.tick().await;
            if let TickOutcome::Dispatched { command, outcome } = &outcome {
                debug!(command = %command, ?outcome, "round transition dispatched");
            }
        }
    }

    /// Perform one iteration: at most one state fetch and at most one transition decision.
    pub async fn tick(&mut self) -> TickOutcome {
        let now = self.state.clock().now();

        if let Some(cached) = self.state.cache().current().await {
            let snapshot = &cached.snapshot;
            if snapshot.phase() == RoundPhase::ActiveRound
                && self.round_due(now, snapshot.seconds_between_rounds).await
            {
                return self.transition().await;
            }
        }

        if self.poll_due(now) {
            self.refresh().await;
        }

        match self.state.cache().current().await {
            None => TickOutcome::NoSnapshot,
            Some(cached) => match cached.snapshot.phase() {
                RoundPhase::Idle => TickOutcome::Idle,
                RoundPhase::ActiveRound => TickOutcome::Waiting,
            },
        }
    }

    fn poll_due(&self, now: Instant) -> bool {
        let poll_interval = self.state.config().poll_interval;
        self.last_fetch
            .is_none_or(|last| now.saturating_duration_since(last) >= poll_interval)
    }

    async fn round_due(&self, now: Instant, seconds_between_rounds: u64) -> bool {
        let started = self.state.round_started_at().await;
        now.saturating_duration_since(started) >= Duration::from_secs(seconds_between_rounds)
    }

    /// Fetch the game state and replace the cached snapshot. Failures keep the last good one.
    async fn refresh(&mut self) {
        let clock = self.state.clock();
        self.last_fetch = Some(clock.now());

        match self.state.fetcher().fetch().await {
            Ok(snapshot) => {
                if let Some(previous) = self.state.cache().current().await {
                    if previous.snapshot.round != snapshot.round {
                        info!(
                            from = previous.snapshot.round,
                            to = snapshot.round,
                            alive = snapshot.alive_count(),
                            "ledger round changed"
                        );
                    }
                }
                self.state
                    .cache()
                    .store(snapshot, clock.now(), clock.wall_now())
                    .await;
            }
            Err(err) => {
                self.state.stats().record_fetch_failure();
                warn!(error = %err, "failed to refresh game state; keeping last snapshot");
            }
        }
    }

    async fn transition(&mut self) -> TickOutcome {
        // A deferred round is retried every tick; only re-fetch at the polling cadence.
        if !self.retrying || self.poll_due(self.state.clock().now()) {
            self.refresh().await;
        }

        let Some(cached) = self.state.cache().current().await else {
            return TickOutcome::NoSnapshot;
        };
        let snapshot = &cached.snapshot;
        if snapshot.phase() != RoundPhase::ActiveRound {
            info!(
                round = snapshot.round,
                "game left the active phase before the round was due"
            );
            self.retrying = false;
            return TickOutcome::Idle;
        }

        // Scores are consumed under the same guard as the decision, so reports arriving
        // during the dispatch count toward the next round.
        let (decision, consumed) = {
            let mut scores = self.state.scores().lock().await;
            let decision = policy::decide(snapshot, &scores);
            let consumed = match decision {
                Decision::GameOver { .. } | Decision::Advance(_) => mem::take(&mut *scores),
                Decision::InsufficientData | Decision::NoWinners { .. } => ScoreLedger::new(),
            };
            (decision, consumed)
        };

        let command = match decision {
            Decision::GameOver { alive } => {
                info!(
                    round = snapshot.round,
                    alive,
                    num_max_winners = snapshot.num_max_winners,
                    "winner threshold reached; ending game"
                );
                RoundTransitionCommand::EndGame
            }
            Decision::InsufficientData => {
                debug!(round = snapshot.round, "no scores reported yet; round deferred");
                self.retrying = true;
                return TickOutcome::Deferred(Deferral::InsufficientData);
            }
            Decision::NoWinners { average } => {
                debug!(
                    round = snapshot.round,
                    average, "no alive player at or below the average; round deferred"
                );
                self.retrying = true;
                return TickOutcome::Deferred(Deferral::NoWinners);
            }
            Decision::Advance(Elimination {
                winners,
                losers,
                skipped,
                average,
            }) => {
                info!(
                    round = snapshot.round,
                    average,
                    winners = winners.len(),
                    losers = losers.len(),
                    skipped = skipped.len(),
                    "advancing round"
                );
                RoundTransitionCommand::AdvanceRound { losers, winners }
            }
        };

        self.retrying = false;
        let outcome = self.state.dispatcher().submit(command.clone()).await;
        self.state.reset_round_timer(self.state.clock().now()).await;

        if outcome.is_success() {
            match command {
                RoundTransitionCommand::EndGame => self.state.stats().record_game_ended(),
                _ => self.state.stats().record_round_advanced(),
            }
        } else {
            self.state.scores().lock().await.reinstate(consumed);
        }

        TickOutcome::Dispatched { command, outcome }
    }
}
