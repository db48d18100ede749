//! Score reports for the running round.

use tracing::{debug, info};

use crate::{
    dto::score::{SubmitScoreRequest, SubmitScoreResponse},
    error::ServiceError,
    state::{SharedState, game::PlayerId, scores::ScoreRecord},
};

/// Record a player's score for the current round; the first report per player wins.
pub async fn submit_score(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<SubmitScoreResponse, ServiceError> {
    let player = PlayerId::parse(&request.address)
        .map_err(|err| ServiceError::InvalidInput(format!("address: {err}")))?;

    let record = {
        let mut scores = state.scores().lock().await;
        scores.record(player.clone(), request.score)
    };

    match record {
        ScoreRecord::Recorded => {
            info!(player = %player, score = request.score, "score recorded");
            Ok(SubmitScoreResponse {
                message: format!("score {} recorded for {player}", request.score),
                accepted: true,
            })
        }
        ScoreRecord::AlreadySubmitted { kept } => {
            debug!(
                player = %player,
                ignored = request.score,
                kept,
                "duplicate score report ignored"
            );
            Ok(SubmitScoreResponse {
                message: format!("a score was already submitted for {player} this round"),
                accepted: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        orchestrator::{clock::manual::ManualClock, testing::FakeLedger},
        state::AppState,
    };

    fn state() -> SharedState {
        AppState::new(
            AppConfig::default(),
            Arc::new(FakeLedger::new()),
            Arc::new(ManualClock::new()),
        )
    }

    fn report(address: &str, score: f64) -> SubmitScoreRequest {
        SubmitScoreRequest {
            address: address.into(),
            score,
        }
    }

    #[tokio::test]
    async fn first_report_wins() {
        let state = state();

        let first = submit_score(&state, report("0xA", 10.0)).await.unwrap();
        assert!(first.accepted);
        let second = submit_score(&state, report("0xa", 99.0)).await.unwrap();
        assert!(!second.accepted);

        let scores = state.scores().lock().await;
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get(&PlayerId::parse("0xa").unwrap()), Some(10.0));
    }

    #[tokio::test]
    async fn short_and_padded_addresses_are_the_same_player() {
        let state = state();

        submit_score(&state, report("0x1", 5.0)).await.unwrap();
        let padded = format!("0x{}1", "0".repeat(63));
        let response = submit_score(&state, report(&padded, 7.0)).await.unwrap();

        assert!(!response.accepted);
    }

    #[tokio::test]
    async fn malformed_address_is_rejected() {
        let state = state();

        let err = submit_score(&state, report("alice", 1.0)).await.unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(state.scores().lock().await.is_empty());
    }
}
