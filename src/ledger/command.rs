use std::fmt;

use crate::state::game::{GameConfig, PlayerId};

/// State-transition command submitted to the ledger's `game_manager` module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundTransitionCommand {
    /// Initialise a new game with the given parameters.
    StartGame(GameConfig),
    /// Drain any stake left in the pool by a previous game.
    ForceClearPool,
    /// Stop accepting new players.
    CloseJoining,
    /// Eliminate `losers`, credit `winners` and move to the next round.
    AdvanceRound {
        /// Players eliminated this round.
        losers: Vec<PlayerId>,
        /// Players surviving this round.
        winners: Vec<PlayerId>,
    },
    /// Finish the game and pay out the remaining players.
    EndGame,
}

impl RoundTransitionCommand {
    /// Name of the `game_manager` entry function implementing the command.
    pub fn entry_function(&self) -> &'static str {
        match self {
            Self::StartGame(_) => "init_game",
            Self::ForceClearPool => "force_clear_pool",
            Self::CloseJoining => "close_joining",
            Self::AdvanceRound { .. } => "advance_game",
            Self::EndGame => "end_game",
        }
    }
}

impl fmt::Display for RoundTransitionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdvanceRound { losers, winners } => write!(
                f,
                "{} (losers: {}, winners: {})",
                self.entry_function(),
                losers.len(),
                winners.len()
            ),
            other => f.write_str(other.entry_function()),
        }
    }
}
