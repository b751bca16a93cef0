//! JSON-file score store
//!
//! One small JSON document holds both scope values and the leaderboard.
//! The file is read once on open and rewritten on every save.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScoreScope, ScoreStore, StoreError};
use crate::highscores::{Leaderboard, LeaderboardEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoreData {
    local: u32,
    account: u32,
    board: Leaderboard,
}

/// File-backed score store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    player: String,
    data: StoreData,
}

impl JsonFileStore {
    /// Open the store at `path`, reading whatever is already there. A
    /// missing or unreadable file starts fresh.
    pub fn open(path: impl Into<PathBuf>, player: impl Into<String>) -> Self {
        let path = path.into();
        let data = Self::read(&path);
        Self {
            path,
            player: player.into(),
            data,
        }
    }

    fn read(path: &Path) -> StoreData {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    log::info!("loaded scores from {}", path.display());
                    data
                }
                Err(err) => {
                    log::warn!("unreadable score data in {}: {err}", path.display());
                    StoreData::default()
                }
            },
            Err(_) => {
                log::info!("no score data at {}, starting fresh", path.display());
                StoreData::default()
            }
        }
    }

    fn write(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        log::debug!("scores saved to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load_highscore(&self, scope: ScoreScope) -> u32 {
        match scope {
            ScoreScope::Local => self.data.local,
            ScoreScope::Account => self.data.account,
        }
    }

    fn save_highscore(&mut self, scope: ScoreScope, value: u32) -> Result<(), StoreError> {
        match scope {
            ScoreScope::Local => self.data.local = value,
            ScoreScope::Account => {
                self.data.account = value;
                self.data.board.submit(&self.player, value);
            }
        }
        self.write()
    }

    fn top_scores(&self, n: usize) -> Vec<LeaderboardEntry> {
        self.data.board.top(n).to_vec()
    }
}
