//! Elimination policy deciding who survives a round.

use crate::state::{
    game::{GameSnapshot, PlayerId},
    scores::ScoreLedger,
};

/// Split of the alive players for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Elimination {
    /// Players whose score is at or below the average.
    pub winners: Vec<PlayerId>,
    /// Players whose score is above the average.
    pub losers: Vec<PlayerId>,
    /// Alive players that reported no score this round.
    pub skipped: Vec<PlayerId>,
    /// Mean of every score on record.
    pub average: f64,
}

/// Outcome of running the policy on a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Few enough players remain that the game must end.
    GameOver {
        /// Number of players still alive.
        alive: usize,
    },
    /// No score has been reported, so no average exists.
    InsufficientData,
    /// Scores exist but no alive player qualifies as a winner.
    NoWinners {
        /// Average the alive players were compared against.
        average: f64,
    },
    /// Regular round: eliminate the losers, credit the winners.
    Advance(Elimination),
}

/// Decide the fate of the current round.
///
/// A score equal to the average counts as a win. Alive players without a score are left out
/// of both sets.
pub fn decide(snapshot: &GameSnapshot, scores: &ScoreLedger) -> Decision {
    let alive = snapshot.alive_count();
    if alive as u64 <= snapshot.num_max_winners {
        return Decision::GameOver { alive };
    }

    let Some(average) = scores.average() else {
        return Decision::InsufficientData;
    };

    let mut winners = Vec::new();
    let mut losers = Vec::new();
    let mut skipped = Vec::new();

    for player in snapshot.alive_players() {
        match scores.get(player) {
            Some(score) if score <= average => winners.push(player.clone()),
            Some(_) => losers.push(player.clone()),
            None => skipped.push(player.clone()),
        }
    }

    if winners.is_empty() {
        return Decision::NoWinners { average };
    }

    Decision::Advance(Elimination {
        winners,
        losers,
        skipped,
        average,
    })
}
