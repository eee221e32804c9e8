//! Per-level best scores
//!
//! Each level keeps its three best scores in the level file itself. A score is
//! the number of particles the player had to add, so lower is better.

use serde::{Deserialize, Serialize};

/// Number of scores kept per level
pub const MAX_HIGH_SCORES: usize = 3;

/// Best scores for one level, ascending; `None` is an unset slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelScores(pub [Option<u32>; MAX_HIGH_SCORES]);

impl LevelScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the rank a score would achieve (0-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        self.0.iter().position(|slot| match slot {
            None => true,
            Some(best) => score < *best,
        })
    }

    /// Insert a score, pushing worse ones down.
    /// Returns the rank achieved (0 is the record) or None if it didn't qualify.
    pub fn record(&mut self, score: u32) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        for i in (rank + 1..MAX_HIGH_SCORES).rev() {
            self.0[i] = self.0[i - 1];
        }
        self.0[rank] = Some(score);
        Some(rank)
    }

    /// The record, if any
    pub fn best(&self) -> Option<u32> {
        self.0[0]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn reset(&mut self) {
        self.0 = [None; MAX_HIGH_SCORES];
    }

    /// Scores as stored in a level file, `-1` for unset
    pub fn to_file_values(&self) -> [i32; MAX_HIGH_SCORES] {
        self.0.map(|slot| slot.map_or(-1, |s| s as i32))
    }

    /// Negative values read back as unset
    pub fn from_file_values(values: [i32; MAX_HIGH_SCORES]) -> Self {
        Self(values.map(|v| u32::try_from(v).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_slot_accepts_any_score() {
        let mut scores = LevelScores::new();
        assert!(scores.is_empty());
        assert_eq!(scores.record(7), Some(0));
        assert_eq!(scores.record(9), Some(1));
        assert_eq!(scores.record(12), Some(2));
        assert_eq!(scores.0, [Some(7), Some(9), Some(12)]);
    }

    #[test]
    fn test_lower_is_better() {
        let mut scores = LevelScores([Some(3), Some(5), Some(8)]);
        assert_eq!(scores.record(4), Some(1));
        assert_eq!(scores.0, [Some(3), Some(4), Some(5)]);
        assert_eq!(scores.record(0), Some(0));
        assert_eq!(scores.best(), Some(0));
        assert_eq!(scores.0, [Some(0), Some(3), Some(4)]);
    }

    #[test]
    fn test_ties_and_worse_scores_rejected() {
        let mut scores = LevelScores([Some(3), Some(5), Some(8)]);
        assert_eq!(scores.record(8), None);
        assert_eq!(scores.record(20), None);
        // A tie lands after the existing entry
        assert_eq!(scores.record(3), Some(1));
        assert_eq!(scores.0, [Some(3), Some(3), Some(5)]);
    }

    #[test]
    fn test_file_values() {
        let scores = LevelScores::from_file_values([2, -1, -1]);
        assert_eq!(scores.0, [Some(2), None, None]);
        assert_eq!(scores.to_file_values(), [2, -1, -1]);

        let mut scores = scores;
        scores.reset();
        assert_eq!(scores.to_file_values(), [-1, -1, -1]);
    }
}
