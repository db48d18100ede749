use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::format_system_time,
    state::{
        cache::CachedSnapshot,
        game::{PlayerId, PlayerView, RoundPhase},
    },
};

/// Scheduling phase as exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibleRoundPhase {
    /// Joining is open or no game is playable.
    Idle,
    /// Rounds are being played.
    ActiveRound,
}

impl From<RoundPhase> for VisibleRoundPhase {
    fn from(value: RoundPhase) -> Self {
        match value {
            RoundPhase::Idle => Self::Idle,
            RoundPhase::ActiveRound => Self::ActiveRound,
        }
    }
}

/// Last game state fetched from the ledger.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameStateResponse {
    pub pool: u64,
    pub buy_in: u64,
    pub max_players: u64,
    pub num_max_winners: u64,
    pub seconds_between_rounds: u64,
    pub joinable: bool,
    pub playable: bool,
    pub round: u64,
    pub phase: VisibleRoundPhase,
    /// Players in ledger order.
    pub players: Vec<PlayerStateResponse>,
    /// RFC 3339 time at which the state was fetched.
    pub fetched_at: String,
}

/// Public projection of a player.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerStateResponse {
    pub address: String,
    pub is_alive: bool,
    pub wins: u64,
    pub potential_winning: u64,
    pub nft_uri: String,
    pub token_index: u64,
}

impl From<(&PlayerId, &PlayerView)> for PlayerStateResponse {
    fn from((id, view): (&PlayerId, &PlayerView)) -> Self {
        Self {
            address: id.to_string(),
            is_alive: view.is_alive,
            wins: view.wins,
            potential_winning: view.potential_winning,
            nft_uri: view.nft_uri.clone(),
            token_index: view.token_index,
        }
    }
}

impl From<&CachedSnapshot> for GameStateResponse {
    fn from(cached: &CachedSnapshot) -> Self {
        let snapshot = &cached.snapshot;
        Self {
            pool: snapshot.pool,
            buy_in: snapshot.buy_in,
            max_players: snapshot.max_players,
            num_max_winners: snapshot.num_max_winners,
            seconds_between_rounds: snapshot.seconds_between_rounds,
            joinable: snapshot.joinable,
            playable: snapshot.playable,
            round: snapshot.round,
            phase: snapshot.phase().into(),
            players: snapshot.players.iter().map(Into::into).collect(),
            fetched_at: format_system_time(cached.fetched_at_wall),
        }
    }
}
