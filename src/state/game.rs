use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use thiserror::Error;

/// Maximum number of hexadecimal digits in a ledger account address.
const ADDRESS_HEX_LEN: usize = 64;

/// Ledger account address identifying a player.
///
/// Addresses are kept in a canonical form (lowercase, `0x` prefix, no leading zeros) so the
/// short and long spellings of the same account compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

/// Error returned when a string cannot be interpreted as a ledger account address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPlayerId {
    /// No hexadecimal digits were supplied.
    #[error("address must not be empty")]
    Empty,
    /// Too many hexadecimal digits for an account address.
    #[error("address has {0} hex digits, at most 64 are allowed")]
    TooLong(usize),
    /// A character outside `[0-9a-fA-F]` was found.
    #[error("address contains non-hexadecimal character `{0}`")]
    NotHex(char),
}

impl PlayerId {
    /// Parse and canonicalise an account address.
    pub fn parse(raw: &str) -> Result<Self, InvalidPlayerId> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(InvalidPlayerId::Empty);
        }
        if digits.len() > ADDRESS_HEX_LEN {
            return Err(InvalidPlayerId::TooLong(digits.len()));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(InvalidPlayerId::NotHex(bad));
        }

        let significant = digits.trim_start_matches('0');
        let significant = if significant.is_empty() {
            "0"
        } else {
            significant
        };

        Ok(Self(format!("0x{}", significant.to_ascii_lowercase())))
    }

    /// Canonical textual form (`0x` followed by lowercase hex).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PlayerId {
    type Err = InvalidPlayerId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-player projection of the on-chain game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    /// Whether the player is still in the game.
    pub is_alive: bool,
    /// Number of rounds the player has won so far.
    pub wins: u64,
    /// Share of the pool the player would receive if the game ended now.
    pub potential_winning: u64,
    /// Reference to the player's ticket NFT (display only).
    pub nft_uri: String,
    /// Index of the player's ticket token (display only).
    pub token_index: u64,
}

/// Point-in-time copy of the authoritative game state held by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Accumulated stake.
    pub pool: u64,
    /// Amount each player paid to join.
    pub buy_in: u64,
    /// Maximum number of players admitted to the game.
    pub max_players: u64,
    /// Alive-player threshold at or below which the game ends.
    pub num_max_winners: u64,
    /// Minimum wall time between two round transitions.
    pub seconds_between_rounds: u64,
    /// Players may still join.
    pub joinable: bool,
    /// A game has been initialised and can be played.
    pub playable: bool,
    /// Current round number.
    pub round: u64,
    /// Players in ledger order.
    pub players: IndexMap<PlayerId, PlayerView>,
}

/// Scheduling phase derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Joining is open or no game is playable; only polling runs.
    Idle,
    /// Joining is closed and the game is playable; the round timer is live.
    ActiveRound,
}

impl GameSnapshot {
    /// Phase the scheduler should operate in for this snapshot.
    pub fn phase(&self) -> RoundPhase {
        if self.joinable || !self.playable {
            RoundPhase::Idle
        } else {
            RoundPhase::ActiveRound
        }
    }

    /// Iterate over the players still alive, in ledger order.
    pub fn alive_players(&self) -> impl Iterator<Item = &PlayerId> {
        self.players
            .iter()
            .filter(|(_, view)| view.is_alive)
            .map(|(id, _)| id)
    }

    /// Number of players still alive.
    pub fn alive_count(&self) -> usize {
        self.alive_players().count()
    }
}

/// Parameters used to initialise a new game on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Minimum seconds between two rounds.
    pub seconds_between_rounds: u64,
    /// Stake each player pays to join.
    pub buy_amount: u64,
    /// Maximum number of players.
    pub max_players: u64,
    /// Alive-player threshold that ends the game.
    pub num_max_winners: u64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a snapshot in the active-round phase with the given alive flags.
    pub fn active_snapshot(players: &[(&str, bool)], num_max_winners: u64) -> GameSnapshot {
        let players = players
            .iter()
            .map(|(addr, alive)| {
                (
                    PlayerId::parse(addr).unwrap(),
                    PlayerView {
                        is_alive: *alive,
                        wins: 0,
                        potential_winning: 0,
                        nft_uri: String::new(),
                        token_index: 0,
                    },
                )
            })
            .collect();

        GameSnapshot {
            pool: 300,
            buy_in: 100,
            max_players: 10,
            num_max_winners,
            seconds_between_rounds: 30,
            joinable: false,
            playable: true,
            round: 3,
            players,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::active_snapshot, *};

    #[test]
    fn short_and_long_addresses_are_equal() {
        let short = PlayerId::parse("0xA").unwrap();
        let long = PlayerId::parse(
            "0x000000000000000000000000000000000000000000000000000000000000000a",
        )
        .unwrap();
        assert_eq!(short, long);
        assert_eq!(short.as_str(), "0xa");
    }

    #[test]
    fn prefix_is_optional() {
        assert_eq!(PlayerId::parse("beef").unwrap().as_str(), "0xbeef");
        assert_eq!(PlayerId::parse("0x0").unwrap().as_str(), "0x0");
    }

    #[test]
    fn invalid_addresses_are_rejected() {
        assert_eq!(PlayerId::parse("0x"), Err(InvalidPlayerId::Empty));
        assert_eq!(PlayerId::parse("0xzz"), Err(InvalidPlayerId::NotHex('z')));
        let too_long = format!("0x{}", "1".repeat(65));
        assert_eq!(PlayerId::parse(&too_long), Err(InvalidPlayerId::TooLong(65)));
    }

    #[test]
    fn phase_follows_joinable_and_playable() {
        let mut snapshot = active_snapshot(&[("0x1", true)], 1);
        assert_eq!(snapshot.phase(), RoundPhase::ActiveRound);

        snapshot.joinable = true;
        assert_eq!(snapshot.phase(), RoundPhase::Idle);

        snapshot.joinable = false;
        snapshot.playable = false;
        assert_eq!(snapshot.phase(), RoundPhase::Idle);
    }

    #[test]
    fn alive_count_ignores_eliminated_players() {
        let snapshot = active_snapshot(&[("0x1", true), ("0x2", false), ("0x3", true)], 1);
        assert_eq!(snapshot.alive_count(), 2);
    }
}
