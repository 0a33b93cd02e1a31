//! High score table
//!
//! Best score per difficulty, persisted as JSON next to the settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::Result;
use crate::persistence;

/// Best score for each difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    #[serde(default)]
    pub easy: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub hard: u64,
}

impl HighScores {
    const FILE_NAME: &'static str = "maze_chase_highscores.json";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn best_mut(&mut self, difficulty: Difficulty) -> &mut u64 {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Record a finished game. Returns true if it set a new best.
    pub fn record(&mut self, difficulty: Difficulty, score: u64) -> bool {
        let best = self.best_mut(difficulty);
        if score > *best {
            *best = score;
            log::info!("New {} high score: {}", difficulty.as_str(), score);
            true
        } else {
            false
        }
    }

    /// Check if any difficulty has a score yet
    pub fn is_empty(&self) -> bool {
        Difficulty::ALL.iter().all(|&d| self.best(d) == 0)
    }

    /// Load from `dir`, falling back to an empty table
    pub fn load(dir: &Path) -> Self {
        persistence::load_or_default(dir, Self::FILE_NAME)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        persistence::save_json(dir, Self::FILE_NAME, self)?;
        log::info!("High scores saved");
        Ok(())
    }
}
