use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::{
    ledger::{
        LedgerClient, TransactionReceipt,
        command::RoundTransitionCommand,
        error::{FetchError, LedgerConfigError, SubmissionError},
    },
    state::game::GameSnapshot,
};

use super::{
    config::AptosConfig,
    models::{
        CommittedTransaction, EntryFunctionPayload, SubmittedTransaction, VIEW_GAME_STATES,
        ViewRequest, decode_game_state,
    },
};

const SIGN_AND_SUBMIT: &str = "sign_and_submit";

/// Ledger client reading state from an Aptos node and submitting through a signer relay.
#[derive(Clone)]
pub struct AptosLedgerClient {
    client: Client,
    node_url: Arc<str>,
    signer_url: Arc<str>,
    credential: Option<Arc<str>>,
    config: Arc<AptosConfig>,
}

impl AptosLedgerClient {
    /// Build the HTTP client from the given configuration.
    pub fn new(config: AptosConfig) -> Result<Self, LedgerConfigError> {
        let client = Client::builder()
            .build()
            .map_err(|source| LedgerConfigError::ClientBuilder { source })?;

        Ok(Self {
            client,
            node_url: Arc::from(config.node_url.trim_end_matches('/')),
            signer_url: Arc::from(config.signer_url.trim_end_matches('/')),
            credential: config.signer_credential.as_deref().map(Arc::from),
            config: Arc::new(config),
        })
    }

    fn signer_request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.signer_url, path);
        let builder = self.client.post(url);
        if let Some(ref credential) = self.credential {
            builder.bearer_auth(credential.as_ref())
        } else {
            builder
        }
    }

    async fn view_game_state(&self) -> Result<GameSnapshot, FetchError> {
        let function = self.config.function_id(VIEW_GAME_STATES);
        let url = format!("{}/view", self.node_url);

        let response = self
            .client
            .post(url)
            .json(&ViewRequest::new(function.clone()))
            .send()
            .await
            .map_err(|source| FetchError::RequestSend {
                function: function.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::RequestStatus {
                function,
                status: response.status(),
            });
        }

        let values = response
            .json::<Vec<Value>>()
            .await
            .map_err(|source| FetchError::DecodeResponse {
                function: function.clone(),
                source,
            })?;

        decode_game_state(&function, values)
    }

    async fn sign_and_submit(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<String, SubmissionError> {
        let function = payload.function.clone();
        let response = self
            .signer_request(SIGN_AND_SUBMIT)
            .json(payload)
            .send()
            .await
            .map_err(|source| SubmissionError::RelaySend {
                function: function.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SubmissionError::RelayRejected {
                function,
                status,
                message,
            });
        }

        let submitted = response
            .json::<SubmittedTransaction>()
            .await
            .map_err(|source| SubmissionError::DecodeRelay { function, source })?;
        Ok(submitted.hash)
    }

    async fn wait_for_transaction(
        &self,
        hash: String,
    ) -> Result<TransactionReceipt, SubmissionError> {
        let url = format!("{}/transactions/wait_by_hash/{}", self.node_url, hash);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SubmissionError::Confirmation {
                hash: hash.clone(),
                source,
            })?;

        match response.status() {
            status if status.is_success() => {
                let committed = response
                    .json::<CommittedTransaction>()
                    .await
                    .map_err(|source| SubmissionError::Confirmation {
                        hash: hash.clone(),
                        source,
                    })?;
                debug!(%hash, kind = %committed.kind, "transaction wait returned");
                Ok(TransactionReceipt {
                    hash,
                    success: committed.success,
                    vm_status: committed.vm_status,
                })
            }
            other => Err(SubmissionError::ConfirmationStatus {
                hash,
                status: other,
            }),
        }
    }
}

impl LedgerClient for AptosLedgerClient {
    fn fetch_snapshot(&self) -> BoxFuture<'static, Result<GameSnapshot, FetchError>> {
        let client = self.clone();
        Box::pin(async move { client.view_game_state().await })
    }

    fn submit(
        &self,
        command: RoundTransitionCommand,
    ) -> BoxFuture<'static, Result<TransactionReceipt, SubmissionError>> {
        let client = self.clone();
        Box::pin(async move {
            let function = client.config.function_id(command.entry_function());
            let payload = EntryFunctionPayload::for_command(function, &command);
            let hash = client.sign_and_submit(&payload).await?;
            debug!(%hash, command = %command, "transaction submitted; waiting for commit");
            client.wait_for_transaction(hash).await
        })
    }
}
