//! High score hand-off for the external leaderboard collaborator.
//!
//! The engine produces a `SessionOutcome` when a session ends; ranking
//! logic lives here so every frontend agrees on what qualifies. Storage
//! and network submission happen outside the crate - these types only
//! serialize to JSON for that hand-off.

use serde::{Deserialize, Serialize};

/// Maximum number of entries the table keeps
pub const MAX_HIGH_SCORES: usize = 10;

/// Final result of one session, handed outward when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub score: u64,
    pub won: bool,
    pub shots: u32,
}

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub won: bool,
    pub shots: u32,
}

/// High score table, sorted descending by score.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a score would make the table.
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert an outcome if it qualifies; returns the 1-indexed rank.
    pub fn add(&mut self, outcome: SessionOutcome) -> Option<usize> {
        if !self.qualifies(outcome.score) {
            return None;
        }

        let entry = HighScoreEntry {
            score: outcome.score,
            won: outcome.won,
            shots: outcome.shots,
        };

        let pos = self.entries.iter().position(|e| outcome.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
