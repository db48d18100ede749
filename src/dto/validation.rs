//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::game::PlayerId;

/// Validates that an address is a well-formed ledger account address.
///
/// # Examples
///
/// ```ignore
/// validate_address("0x1f")    // Ok
/// validate_address("1F")      // Ok - prefix and case are normalised
/// validate_address("0xnope")  // Err - not hexadecimal
/// ```
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    PlayerId::parse(address).map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new("address_format");
        error.message = Some(err.to_string().into());
        error
    })
}

/// Validates that a reported score is a finite number.
pub fn validate_score(score: f64) -> Result<(), ValidationError> {
    if score.is_finite() {
        return Ok(());
    }
    let mut err = ValidationError::new("score_not_finite");
    err.message = Some("Score must be a finite number".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address_valid() {
        assert!(validate_address("0x1").is_ok());
        assert!(validate_address("0xDEADbeef").is_ok());
        assert!(validate_address("deadbeef").is_ok());
        assert!(validate_address(&format!("0x{}", "f".repeat(64))).is_ok());
    }

    #[test]
    fn test_validate_address_invalid() {
        assert!(validate_address("").is_err()); // empty
        assert!(validate_address("0x").is_err()); // prefix only
        assert!(validate_address("0xg1").is_err()); // invalid hex
        assert!(validate_address(&format!("0x{}", "f".repeat(65))).is_err()); // too long
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(-12.5).is_ok());
        assert!(validate_score(f64::NAN).is_err());
        assert!(validate_score(f64::INFINITY).is_err());
    }
}
