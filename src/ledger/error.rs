//! Error types raised while talking to the ledger node and the signer relay.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::state::game::InvalidPlayerId;

/// Failures reading the authoritative game state.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The view request could not be sent.
    #[error("failed to send view request for `{function}`")]
    RequestSend {
        function: String,
        #[source]
        source: reqwest::Error,
    },
    /// The node answered with a non-success status.
    #[error("unexpected view response status {status} for `{function}`")]
    RequestStatus { function: String, status: StatusCode },
    /// The response body was not valid JSON.
    #[error("failed to decode view response for `{function}`")]
    DecodeResponse {
        function: String,
        #[source]
        source: reqwest::Error,
    },
    /// The JSON did not have the expected game state shape.
    #[error("failed to deserialize game state for `{function}`")]
    DeserializeValue {
        function: String,
        #[source]
        source: serde_json::Error,
    },
    /// The view function returned no values.
    #[error("view function `{function}` returned no game state")]
    EmptyResponse { function: String },
    /// A player key was not a valid account address.
    #[error("invalid player address `{address}` in game state")]
    InvalidPlayer {
        address: String,
        #[source]
        source: InvalidPlayerId,
    },
    /// The call did not complete in time.
    #[error("ledger state fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Failures submitting a transaction or waiting for its confirmation.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The signer relay could not be reached.
    #[error("failed to send `{function}` to the signer relay")]
    RelaySend {
        function: String,
        #[source]
        source: reqwest::Error,
    },
    /// The signer relay refused the transaction.
    #[error("signer relay rejected `{function}` with status {status}: {message}")]
    RelayRejected {
        function: String,
        status: StatusCode,
        message: String,
    },
    /// The relay response could not be decoded.
    #[error("failed to decode signer relay response for `{function}`")]
    DecodeRelay {
        function: String,
        #[source]
        source: reqwest::Error,
    },
    /// Waiting for the transaction to be committed failed.
    #[error("failed to confirm transaction `{hash}`")]
    Confirmation {
        hash: String,
        #[source]
        source: reqwest::Error,
    },
    /// The node answered the wait request with a non-success status.
    #[error("unexpected confirmation status {status} for transaction `{hash}`")]
    ConfirmationStatus { hash: String, status: StatusCode },
    /// The call did not complete in time.
    #[error("transaction submission timed out after {0:?}")]
    Timeout(Duration),
}

/// Failures building the ledger client from configuration.
#[derive(Debug, Error)]
pub enum LedgerConfigError {
    /// Required environment variable is missing.
    #[error("missing ledger environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Building the HTTP client failed.
    #[error("failed to build ledger HTTP client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
}
