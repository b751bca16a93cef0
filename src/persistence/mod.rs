//! Score storage
//!
//! The session never touches storage itself: the controller holds a
//! `ScoreStore` and calls it around the session. Loads are tolerant
//! (anything missing or unreadable reads as zero) and saves are
//! fire-and-forget from the game's point of view.

pub mod file;

pub use file::JsonFileStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highscores::{Leaderboard, LeaderboardEntry};

/// Which best score a session plays against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreScope {
    /// This device only
    Local,
    /// The signed-in player's profile
    Account,
}

/// Storage failures. Surfaced to the caller and logged; gameplay never
/// aborts on one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score io: {0}")]
    Io(#[from] std::io::Error),
    #[error("score format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Highscore and leaderboard storage. Callers decide when a score is worth
/// saving; the store writes what it is given.
pub trait ScoreStore {
    /// Best known score for the scope; missing or unreadable data is zero
    fn load_highscore(&self, scope: ScoreScope) -> u32;

    /// Persist a new best for the scope. Account saves also feed the
    /// leaderboard.
    fn save_highscore(&mut self, scope: ScoreScope, value: u32) -> Result<(), StoreError>;

    /// Top `n` leaderboard entries, best first
    fn top_scores(&self, n: usize) -> Vec<LeaderboardEntry>;
}

/// Volatile store for demos and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    player: String,
    local: u32,
    account: u32,
    board: Leaderboard,
}

impl MemoryStore {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            ..Self::default()
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_highscore(&self, scope: ScoreScope) -> u32 {
        match scope {
            ScoreScope::Local => self.local,
            ScoreScope::Account => self.account,
        }
    }

    fn save_highscore(&mut self, scope: ScoreScope, value: u32) -> Result<(), StoreError> {
        match scope {
            ScoreScope::Local => self.local = value,
            ScoreScope::Account => {
                self.account = value;
                self.board.submit(&self.player, value);
            }
        }
        Ok(())
    }

    fn top_scores(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.board.top(n).to_vec()
    }
}
