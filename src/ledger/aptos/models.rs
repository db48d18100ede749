use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{
    ledger::{command::RoundTransitionCommand, error::FetchError},
    state::game::{GameSnapshot, PlayerId, PlayerView},
};

pub const VIEW_GAME_STATES: &str = "view_game_states";
const ENTRY_FUNCTION_PAYLOAD: &str = "entry_function_payload";

/// Body of a `POST /view` request.
#[derive(Debug, Serialize)]
pub struct ViewRequest {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl ViewRequest {
    pub fn new(function: String) -> Self {
        Self {
            function,
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }
}

/// Game state resource as returned by `view_game_states`.
///
/// The node encodes `u64` values as JSON strings; plain numbers are accepted too.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RawGameState {
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub pool: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default)]
    pub buy_in: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub max_players: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub num_max_winners: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub secs_between_rounds: u64,
    pub joinable: bool,
    pub playable: bool,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub round: u64,
    pub latest_player_states: RawSimpleMap,
}

/// Move `SimpleMap` serialised as a list of key/value pairs.
#[derive(Debug, Deserialize)]
pub struct RawSimpleMap {
    #[serde(default)]
    pub data: Vec<RawPlayerEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RawPlayerEntry {
    pub key: String,
    pub value: RawPlayerState,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RawPlayerState {
    pub is_alive: bool,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub wins: u64,
    #[serde(default)]
    pub nft_uri: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    pub potential_winning: u64,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default)]
    pub token_index: u64,
}

impl TryFrom<RawGameState> for GameSnapshot {
    type Error = FetchError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let players = raw
            .latest_player_states
            .data
            .into_iter()
            .map(|entry| {
                let id = PlayerId::parse(&entry.key).map_err(|source| {
                    FetchError::InvalidPlayer {
                        address: entry.key.clone(),
                        source,
                    }
                })?;
                Ok((id, PlayerView::from(entry.value)))
            })
            .collect::<Result<_, FetchError>>()?;

        Ok(Self {
            pool: raw.pool,
            buy_in: raw.buy_in,
            max_players: raw.max_players,
            num_max_winners: raw.num_max_winners,
            seconds_between_rounds: raw.secs_between_rounds,
            joinable: raw.joinable,
            playable: raw.playable,
            round: raw.round,
            players,
        })
    }
}

impl From<RawPlayerState> for PlayerView {
    fn from(value: RawPlayerState) -> Self {
        Self {
            is_alive: value.is_alive,
            wins: value.wins,
            potential_winning: value.potential_winning,
            nft_uri: value.nft_uri,
            token_index: value.token_index,
        }
    }
}

/// Decode the first value of a `view_game_states` response into a snapshot.
pub fn decode_game_state(function: &str, values: Vec<Value>) -> Result<GameSnapshot, FetchError> {
    let first = values
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::EmptyResponse {
            function: function.to_string(),
        })?;
    let raw: RawGameState =
        serde_json::from_value(first).map_err(|source| FetchError::DeserializeValue {
            function: function.to_string(),
            source,
        })?;
    raw.try_into()
}

/// Entry-function payload handed to the signer relay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    /// Build the payload for `command`, `function` being its fully qualified identifier.
    pub fn for_command(function: String, command: &RoundTransitionCommand) -> Self {
        let arguments = match command {
            RoundTransitionCommand::StartGame(config) => vec![
                json!(config.seconds_between_rounds.to_string()),
                json!(config.buy_amount.to_string()),
                json!(config.max_players.to_string()),
                json!(config.num_max_winners.to_string()),
            ],
            RoundTransitionCommand::AdvanceRound { losers, winners } => {
                vec![address_vector(losers), address_vector(winners)]
            }
            RoundTransitionCommand::ForceClearPool
            | RoundTransitionCommand::CloseJoining
            | RoundTransitionCommand::EndGame => Vec::new(),
        };

        Self {
            kind: ENTRY_FUNCTION_PAYLOAD,
            function,
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

fn address_vector(players: &[PlayerId]) -> Value {
    Value::Array(
        players
            .iter()
            .map(|player| Value::String(player.to_string()))
            .collect(),
    )
}

/// Relay answer once a transaction has been signed and submitted.
#[derive(Debug, Deserialize)]
pub struct SubmittedTransaction {
    pub hash: String,
}

/// Node answer to `GET /transactions/wait_by_hash/{hash}`.
///
/// A transaction still pending when the node gives up waiting carries no `success` field.
#[derive(Debug, Deserialize)]
pub struct CommittedTransaction {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub vm_status: Option<String>,
}
