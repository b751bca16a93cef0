//! Leaderboard ranking
//!
//! Top 10 players by best score, sorted descending. One entry per player:
//! submitting a score keeps only that player's best. Storage is handled by
//! the `persistence` module.

use serde::{Deserialize, Serialize};

/// Maximum number of leaderboard entries to keep
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player's display name
    pub name: String,
    /// Player's best score
    pub score: u32,
}

/// Score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        // Must beat the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it misses the board).
    /// Ties rank below the existing holder.
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a player's score, keeping only their best. Returns the rank
    /// achieved (1-indexed) or None if the score misses the board.
    pub fn submit(&mut self, name: &str, score: u32) -> Option<usize> {
        if let Some(existing) = self.entries.iter().position(|e| e.name == name) {
            if self.entries[existing].score >= score {
                return Some(existing + 1);
            }
            self.entries.remove(existing);
        }
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            name: name.to_string(),
            score,
        };
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);

        Some(rank)
    }

    /// Top `n` entries, best first
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(n)]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score on the board, if any
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(scores: &[(&str, u32)]) -> Leaderboard {
        let mut board = Leaderboard::new();
        for &(name, score) in scores {
            board.submit(name, score);
        }
        board
    }

    #[test]
    fn zero_never_qualifies() {
        let board = Leaderboard::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
    }

    #[test]
    fn submit_keeps_descending_order() {
        let board = board(&[("ana", 5), ("bo", 12), ("cy", 8)]);
        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![12, 8, 5]);
    }

    #[test]
    fn submit_returns_rank() {
        let mut board = board(&[("ana", 10), ("bo", 20)]);
        assert_eq!(board.submit("cy", 15), Some(2));
        assert_eq!(board.submit("dee", 1), Some(4));
        assert_eq!(board.submit("eve", 0), None);
    }

    #[test]
    fn one_entry_per_player_keeps_the_best() {
        let mut board = board(&[("ana", 10), ("bo", 20)]);
        assert_eq!(board.submit("ana", 25), Some(1));
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.top_score(), Some(25));

        // A worse run does not demote the stored best
        assert_eq!(board.submit("ana", 3), Some(1));
        assert_eq!(board.top_score(), Some(25));
    }

    #[test]
    fn board_is_capped() {
        let mut board = Leaderboard::new();
        for i in 0..15u32 {
            board.submit(&format!("p{i}"), i + 1);
        }
        assert_eq!(board.entries.len(), MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.top_score(), Some(15));
        // Lowest kept entry is 6: scores 1..=5 fell off
        assert_eq!(board.entries.last().map(|e| e.score), Some(6));
    }

    #[test]
    fn full_board_rejects_scores_below_the_floor() {
        let mut board = Leaderboard::new();
        for i in 0..10u32 {
            board.submit(&format!("p{i}"), (i + 1) * 10);
        }
        assert!(!board.qualifies(5));
        assert_eq!(board.potential_rank(5), None);
        assert_eq!(board.submit("late", 5), None);
        // Ties with the floor do not qualify either
        assert!(!board.qualifies(10));
    }

    #[test]
    fn potential_rank_matches_submit() {
        let board = board(&[("ana", 30), ("bo", 20), ("cy", 10)]);
        assert_eq!(board.potential_rank(25), Some(2));
        assert_eq!(board.potential_rank(40), Some(1));
        assert_eq!(board.potential_rank(5), Some(4));
        // Tie ranks below the holder
        assert_eq!(board.potential_rank(20), Some(3));
    }

    #[test]
    fn top_clamps_to_available_entries() {
        let board = board(&[("ana", 5), ("bo", 12)]);
        assert_eq!(board.top(10).len(), 2);
        assert_eq!(board.top(1)[0].name, "bo");
        assert!(Leaderboard::new().is_empty());
    }
}
