//! Read-only projection of the cached game state.

use crate::{dto::state::GameStateResponse, error::ServiceError, state::SharedState};

/// Return the last game state fetched from the ledger.
pub async fn view_state(state: &SharedState) -> Result<GameStateResponse, ServiceError> {
    let cached = state.cache().current().await.ok_or(ServiceError::NotReady)?;
    Ok(GameStateResponse::from(cached.as_ref()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dto::state::VisibleRoundPhase,
        orchestrator::{
            clock::{Clock, manual::ManualClock},
            testing::FakeLedger,
        },
        state::{AppState, game::fixtures::active_snapshot},
    };

    #[tokio::test]
    async fn not_ready_before_first_fetch() {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(FakeLedger::new()),
            Arc::new(ManualClock::new()),
        );

        let err = view_state(&state).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotReady));
    }

    #[tokio::test]
    async fn projects_cached_snapshot_in_ledger_order() {
        let clock = Arc::new(ManualClock::new());
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(FakeLedger::new()),
            clock.clone(),
        );
        let snapshot = active_snapshot(&[("0xc", true), ("0xa", false), ("0xb", true)], 1);
        state
            .cache()
            .store(snapshot, clock.now(), clock.wall_now())
            .await;

        let response = view_state(&state).await.unwrap();

        assert_eq!(response.round, 3);
        assert_eq!(response.phase, VisibleRoundPhase::ActiveRound);
        let addresses: Vec<_> = response
            .players
            .iter()
            .map(|player| player.address.as_str())
            .collect();
        assert_eq!(addresses, ["0xc", "0xa", "0xb"]);
        assert!(!response.players[1].is_alive);
    }
}
