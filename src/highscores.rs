//! Session leaderboard
//!
//! Keeps the best runs of the session in memory, best first. A run is
//! recorded by the director when the game ends.

use serde::{Deserialize, Serialize};

/// Maximum number of runs kept
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level the run ended on
    pub level: u32,
}

/// Top runs, sorted by descending score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 1-indexed rank `score` would take, None if it would not make the
    /// board. Ties rank below the runs already recorded.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_HIGH_SCORES).then_some(slot + 1)
    }

    /// Record a finished run, returning its rank if it made the board
    pub fn add_score(&mut self, score: u64, level: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, HighScoreEntry { score, level });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
