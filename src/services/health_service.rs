use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Number of missed polls after which the cached state counts as stale.
const STALE_AFTER_POLLS: u32 = 10;

/// Report whether the loop keeps the cached game state fresh, with the loop counters.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let stats = state.stats().snapshot();
    let Some(cached) = state.cache().current().await else {
        warn!("no game state fetched yet (degraded mode)");
        return HealthResponse::degraded(stats);
    };

    let age = cached.age(state.clock().now());
    let stale_after = state.config().poll_interval * STALE_AFTER_POLLS;
    let age_ms = u64::try_from(age.as_millis()).unwrap_or(u64::MAX);

    let response = if age > stale_after {
        warn!(age_ms, "cached game state is stale");
        HealthResponse::degraded(stats)
    } else {
        HealthResponse::ok(stats)
    };
    response.with_snapshot(age_ms, cached.snapshot.round)
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        config::AppConfig,
        orchestrator::{
            clock::{Clock, manual::ManualClock},
            testing::FakeLedger,
        },
        state::{AppState, game::fixtures::active_snapshot},
    };

    #[tokio::test]
    async fn degraded_until_first_fetch() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(FakeLedger::new()),
            Arc::new(ManualClock::new()),
        );

        let health = health_status(&state).await;

        assert_eq!(health.status, "degraded");
        assert!(health.round.is_none());
    }

    #[tokio::test]
    async fn ok_while_fresh_then_degraded_when_stale() {
        let clock = Arc::new(ManualClock::new());
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(FakeLedger::new()),
            clock.clone(),
        );
        state
            .cache()
            .store(active_snapshot(&[("0xa", true)], 1), clock.now(), clock.wall_now())
            .await;
        state.stats().record_round_advanced();

        let fresh = health_status(&state).await;
        assert_eq!(fresh.status, "ok");
        assert_eq!(fresh.round, Some(3));
        assert_eq!(fresh.rounds_advanced, 1);

        clock.advance(state.config().poll_interval * STALE_AFTER_POLLS + Duration::from_millis(1));
        let stale = health_status(&state).await;
        assert_eq!(stale.status, "degraded");
    }
}
