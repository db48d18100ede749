use serde::Serialize;
use utoipa::ToSchema;

use crate::state::stats::LoopStatsSnapshot;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Milliseconds since the cached game state was fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fetch_age_ms: Option<u64>,
    /// Ledger round of the cached game state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u64>,
    pub fetch_failures: u64,
    pub submission_failures: u64,
    pub rounds_advanced: u64,
    pub games_ended: u64,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(stats: LoopStatsSnapshot) -> Self {
        Self::with_status("ok", stats)
    }

    /// Create a health response indicating the ledger state is missing or stale.
    pub fn degraded(stats: LoopStatsSnapshot) -> Self {
        Self::with_status("degraded", stats)
    }

    /// Attach details about the cached snapshot.
    pub fn with_snapshot(mut self, age_ms: u64, round: u64) -> Self {
        self.last_fetch_age_ms = Some(age_ms);
        self.round = Some(round);
        self
    }

    fn with_status(status: &str, stats: LoopStatsSnapshot) -> Self {
        Self {
            status: status.to_string(),
            last_fetch_age_ms: None,
            round: None,
            fetch_failures: stats.fetch_failures,
            submission_failures: stats.submission_failures,
            rounds_advanced: stats.rounds_advanced,
            games_ended: stats.games_ended,
        }
    }
}
