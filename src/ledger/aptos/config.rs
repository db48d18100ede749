use tracing::warn;

use crate::ledger::error::LedgerConfigError;

/// Module that exposes the game entry and view functions.
pub const GAME_MODULE: &str = "game_manager";
/// Bearer token presented to the signer relay.
const SIGNER_TOKEN_ENV: &str = "SIGNER_API_TOKEN";
/// Signing key; it belongs to the relay and must never be sent over the wire.
const PRIVATE_KEY_ENV: &str = "ADMIN_PRIVATE_KEY";

/// Runtime configuration describing how to reach the ledger node and the signer relay.
#[derive(Debug, Clone)]
pub struct AptosConfig {
    /// Node REST API base, including the version segment (e.g. `https://fullnode.testnet.aptoslabs.com/v1`).
    pub node_url: String,
    /// Account address the game contract is published under.
    pub contract_address: String,
    /// Base URL of the relay that signs and submits admin transactions.
    pub signer_url: String,
    /// Credential presented to the signer relay.
    pub signer_credential: Option<String>,
}

impl AptosConfig {
    /// Construct a configuration from explicit endpoints and contract address.
    pub fn new(
        node_url: impl Into<String>,
        contract_address: impl Into<String>,
        signer_url: impl Into<String>,
    ) -> Self {
        Self {
            node_url: node_url.into(),
            contract_address: contract_address.into(),
            signer_url: signer_url.into(),
            signer_credential: None,
        }
    }

    /// Attach the API token presented to the signer relay.
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.signer_credential = Some(credential.into());
        self
    }

    /// Build a configuration by reading the expected environment variables.
    pub fn from_env() -> Result<Self, LedgerConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build a configuration from `lookup`.
    ///
    /// The relay is authenticated with `SIGNER_API_TOKEN`. The admin private key stays with
    /// the relay and is never read here.
    pub fn from_source<F>(lookup: F) -> Result<Self, LedgerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|value| !value.is_empty())
                .ok_or(LedgerConfigError::MissingEnvVar { var })
        };
        let mut config = Self::new(
            required("NETWORK")?,
            required("CONTRACT_ADDRESS")?,
            required("SIGNER_URL")?,
        );

        if let Some(token) = lookup(SIGNER_TOKEN_ENV).filter(|value| !value.is_empty()) {
            config = config.with_credential(token);
        }
        if lookup(PRIVATE_KEY_ENV).is_some() {
            warn!(
                var = PRIVATE_KEY_ENV,
                "admin private key is ignored; configure it on the signer relay instead"
            );
        }

        Ok(config)
    }

    /// Fully qualified identifier of a `game_manager` function.
    pub fn function_id(&self, function: &str) -> String {
        format!("{}::{}::{}", self.contract_address, GAME_MODULE, function)
    }
}
