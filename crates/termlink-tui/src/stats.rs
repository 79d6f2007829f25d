use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

/// Result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Unlocked,
    Locked,
    Abandoned,
}

impl GameResult {
    /// `outcome` as reported by the session: `None` means the player quit.
    pub fn from_outcome(outcome: Option<bool>) -> Self {
        match outcome {
            Some(true) => GameResult::Unlocked,
            Some(false) => GameResult::Locked,
            None => GameResult::Abandoned,
        }
    }
}

/// Record of a single session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub result: GameResult,
    pub word_len: usize,
    pub guesses: usize,
    /// Unix timestamp when the session ended
    pub timestamp: u64,
}

/// Win/loss tallies persisted between runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_games: usize,
    pub unlocked: usize,
    pub locked: usize,
    pub abandoned: usize,
    pub current_streak: i32, // Positive = win streak, negative = loss streak
    pub best_streak: i32,
    /// Fewest incorrect guesses before an unlock
    pub best_guesses: Option<usize>,
    /// Most recent sessions first, capped at `HISTORY_LIMIT`
    pub history: Vec<GameRecord>,
}

/// Number of records kept in the history
pub const HISTORY_LIMIT: usize = 50;

impl Stats {
    /// Get the default stats file path
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termlink")
            .join("stats.json")
    }

    /// Load stats, starting fresh if the file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring corrupt stats file");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Record a finished session
    pub fn record(&mut self, result: GameResult, word_len: usize, guesses: usize) {
        self.total_games += 1;
        match result {
            GameResult::Unlocked => {
                self.unlocked += 1;
                self.current_streak = self.current_streak.max(0) + 1;
                self.best_streak = self.best_streak.max(self.current_streak);
                self.best_guesses = Some(self.best_guesses.map_or(guesses, |best| best.min(guesses)));
            }
            GameResult::Locked => {
                self.locked += 1;
                self.current_streak = self.current_streak.min(0) - 1;
            }
            GameResult::Abandoned => {
                self.abandoned += 1;
                self.current_streak = 0;
            }
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.history.insert(
            0,
            GameRecord {
                result,
                word_len,
                guesses,
                timestamp,
            },
        );
        self.history.truncate(HISTORY_LIMIT);
    }

    pub fn unlock_rate(&self) -> f32 {
        if self.total_games > 0 {
            self.unlocked as f32 / self.total_games as f32 * 100.0
        } else {
            0.0
        }
    }
}
