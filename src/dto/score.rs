use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::dto::validation::{validate_address, validate_score};

/// Score self-reported by a player for the current round.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitScoreRequest {
    /// Ledger account address of the player.
    pub address: String,
    /// Score obtained this round; lower is better.
    pub score: f64,
}

impl Validate for SubmitScoreRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_address(&self.address) {
            errors.add("address", e);
        }
        if let Err(e) = validate_score(self.score) {
            errors.add("score", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Acknowledgement of a score report.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    /// Human-readable result of the report.
    pub message: String,
    /// False when a score was already on record for this player this round.
    pub accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_address_and_score_together() {
        let request = SubmitScoreRequest {
            address: "player-one".into(),
            score: f64::NAN,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("address"));
        assert!(fields.contains_key("score"));
    }

    #[test]
    fn accepts_well_formed_report() {
        let request: SubmitScoreRequest =
            serde_json::from_str(r#"{"address":"0xA1","score":12}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.score, 12.0);
    }
}
