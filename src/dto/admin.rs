//! DTO definitions used by the admin REST API and documentation layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{orchestrator::dispatcher::TransactionOutcome, state::game::GameConfig};

/// Optional overrides for the configured game defaults.
///
/// Send `{}` to initialise a game with the defaults.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct InitGameRequest {
    #[validate(range(min = 1))]
    pub seconds_between_rounds: Option<u64>,
    pub buy_amount: Option<u64>,
    #[validate(range(min = 2))]
    pub max_players: Option<u64>,
    #[validate(range(min = 1))]
    pub num_max_winners: Option<u64>,
}

impl InitGameRequest {
    /// Fill unspecified parameters from `defaults`.
    pub fn resolve(&self, defaults: GameConfig) -> GameConfig {
        GameConfig {
            seconds_between_rounds: self
                .seconds_between_rounds
                .unwrap_or(defaults.seconds_between_rounds),
            buy_amount: self.buy_amount.unwrap_or(defaults.buy_amount),
            max_players: self.max_players.unwrap_or(defaults.max_players),
            num_max_winners: self.num_max_winners.unwrap_or(defaults.num_max_winners),
        }
    }
}

/// Result of a single ledger transaction.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionOutcomeResponse {
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<TransactionOutcome> for TransactionOutcomeResponse {
    fn from(value: TransactionOutcome) -> Self {
        match value {
            TransactionOutcome::Submitted {
                hash,
                success,
                message,
            } => Self {
                submitted: true,
                hash: Some(hash),
                success,
                message,
            },
            TransactionOutcome::NotSubmitted { message } => Self {
                submitted: false,
                hash: None,
                success: false,
                message: Some(message),
            },
        }
    }
}

/// Outcome of the two transactions issued when initialising a game.
#[derive(Debug, Serialize, ToSchema)]
pub struct InitGameResponse {
    pub clear_pool: TransactionOutcomeResponse,
    /// Absent when the pool could not be cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_game: Option<TransactionOutcomeResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: GameConfig = GameConfig {
        seconds_between_rounds: 30,
        buy_amount: 100,
        max_players: 10,
        num_max_winners: 1,
    };

    #[test]
    fn empty_request_uses_defaults() {
        assert_eq!(InitGameRequest::default().resolve(DEFAULTS), DEFAULTS);
    }

    #[test]
    fn overrides_are_applied() {
        let request = InitGameRequest {
            seconds_between_rounds: Some(5),
            num_max_winners: Some(3),
            ..Default::default()
        };
        let config = request.resolve(DEFAULTS);
        assert_eq!(config.seconds_between_rounds, 5);
        assert_eq!(config.num_max_winners, 3);
        assert_eq!(config.max_players, 10);
    }

    #[test]
    fn zero_round_length_is_rejected() {
        let request = InitGameRequest {
            seconds_between_rounds: Some(0),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn outcome_conversion() {
        let response: TransactionOutcomeResponse = TransactionOutcome::NotSubmitted {
            message: "relay down".into(),
        }
        .into();
        assert!(!response.submitted);
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("relay down"));
    }
}
