use indexmap::IndexMap;

use crate::state::game::PlayerId;

/// Result of recording a score in the [`ScoreLedger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreRecord {
    /// First score reported by this player for the round; it was stored.
    Recorded,
    /// The player already reported a score this round; the stored value is kept.
    AlreadySubmitted {
        /// Score that remains on record.
        kept: f64,
    },
}

/// Scores self-reported by players for the current round.
///
/// Only the first report per player is kept until the ledger is cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLedger {
    scores: IndexMap<PlayerId, f64>,
}

impl ScoreLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `score` for `player` unless a score is already on record.
    pub fn record(&mut self, player: PlayerId, score: f64) -> ScoreRecord {
        if let Some(kept) = self.scores.get(&player) {
            return ScoreRecord::AlreadySubmitted { kept: *kept };
        }
        self.scores.insert(player, score);
        ScoreRecord::Recorded
    }

    /// Score reported by `player`, if any.
    pub fn get(&self, player: &PlayerId) -> Option<f64> {
        self.scores.get(player).copied()
    }

    /// Mean of every recorded score, or `None` when nothing was reported.
    ///
    /// Finite scores always yield a finite mean, even when their sum would overflow.
    pub fn average(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let count = self.scores.len() as f64;
        let total: f64 = self.scores.values().sum();
        if total.is_finite() {
            return Some(total / count);
        }
        Some(self.scores.values().map(|score| score / count).sum())
    }

    /// Number of players who reported a score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no score has been reported yet.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Drop every recorded score, starting a fresh round.
    pub fn clear(&mut self) {
        self.scores.clear();
    }

    /// Put back scores taken out of the ledger earlier.
    ///
    /// Entries from `earlier` take precedence over reports recorded since, so first-write-wins
    /// still holds across the round.
    pub fn reinstate(&mut self, earlier: ScoreLedger) {
        let newer = std::mem::replace(self, earlier);
        for (player, score) in newer.scores {
            self.record(player, score);
        }
    }
}
