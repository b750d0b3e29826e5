//! High score leaderboard system
//!
//! Persisted through [`Storage`](crate::persistence::Storage), tracks the top
//! 10 runs. The best score is the top entry.

use serde::{Deserialize, Serialize};

use crate::persistence::SharedStorage;
use crate::tuning::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Obstacles cleared
    pub score: u32,
    /// Difficulty the run was played on
    pub difficulty: Difficulty,
    /// Unix timestamp (ms) when achieved
    pub timestamp_ms: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    const STORAGE_KEY: &'static str = "blinky_beak_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, difficulty: Difficulty, timestamp_ms: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            difficulty,
            timestamp_ms,
        };

        // Find insertion point (sorted descending by score, ties keep the older run first)
        let pos = self.entries.iter().position(|e| score > e.score);
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

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score ever recorded, zero when empty
    pub fn best(&self) -> u32 {
        self.top_score().unwrap_or(0)
    }

    /// Load high scores from storage
    pub fn load(storage: &SharedStorage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<HighScores>(&json) {
                Ok(mut scores) => {
                    // Don't trust the file's ordering
                    scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                    scores.entries.truncate(MAX_HIGH_SCORES);
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
                Err(e) => log::warn!("Stored high scores are unreadable: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read high scores: {}", e),
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to storage
    pub fn save(&self, storage: &SharedStorage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
                Err(e) => log::warn!("Could not save high scores: {}", e),
            },
            Err(e) => log::warn!("Could not encode high scores: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::persistence::{MemoryStorage, Storage};

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_sorted_insert_and_truncate() {
        let mut scores = HighScores::new();
        for s in 1..=12 {
            scores.add_score(s, Difficulty::Easy, s as f64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(12));
        assert_eq!(scores.entries.last().map(|e| e.score), Some(3));

        assert!(!scores.qualifies(3));
        assert_eq!(scores.potential_rank(5), Some(9));
        assert_eq!(scores.add_score(20, Difficulty::Hard, 0.0), Some(1));
        assert_eq!(scores.best(), 20);
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let mut scores = HighScores::new();
        scores.add_score(4, Difficulty::Medium, 1.0);
        scores.add_score(9, Difficulty::Hard, 2.0);
        scores.save(&storage);

        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.entries, scores.entries);
        assert_eq!(loaded.best(), 9);
    }

    #[test]
    fn test_persisted_timestamp_is_in_millis() {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        let mut scores = HighScores::new();
        scores.add_score(3, Difficulty::Easy, 1_700_000_000_000.0);
        scores.save(&storage);

        let raw = storage
            .get_item("blinky_beak_highscores")
            .unwrap()
            .unwrap();
        assert!(raw.contains(r#""timestamp_ms":1700000000000"#));
    }

    #[test]
    fn test_unsorted_file_is_repaired() {
        let memory = MemoryStorage::new();
        memory
            .set_item(
                "blinky_beak_highscores",
                r#"{"entries":[{"score":1,"difficulty":"Easy","timestamp_ms":0.0},{"score":5,"difficulty":"Easy","timestamp_ms":0.0}]}"#,
            )
            .unwrap();
        let storage: SharedStorage = Arc::new(memory);
        assert_eq!(HighScores::load(&storage).best(), 5);
    }
}
