//! Maze Chase - A grid maze-chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, movement, adversaries, timers)
//! - `session`: Controller that owns one game session and drives its timers
//! - `difficulty`: Difficulty presets and their tuning profiles
//! - `render`: Text drawing of the simulated state
//! - `highscores` / `settings`: Persisted collaborators around the core
//! - `autopilot`: Demo-mode intent source

pub mod autopilot;
pub mod difficulty;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use error::{MazeChaseError, Result};
pub use highscores::HighScores;
pub use session::{GameSession, SessionEvent};
pub use settings::{Language, PlayerColor, Settings};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Reference maze dimensions (columns x rows)
    pub const GRID_WIDTH: i32 = 28;
    pub const GRID_HEIGHT: i32 = 31;

    /// Points per ordinary item
    pub const ITEM_REWARD: u64 = 10;
    /// Points per power item
    pub const POWER_ITEM_REWARD: u64 = 50;
    /// Points for eating a vulnerable adversary
    pub const ADVERSARY_REWARD: u64 = 200;

    /// Power mode lasts this long after the most recent power item
    pub const POWER_DURATION_MS: u64 = 8_000;
    /// Elapsed-time counter period
    pub const CLOCK_PERIOD_MS: u64 = 1_000;

    /// Adversary policy probabilities
    pub const PURSUIT_PROBABILITY: f64 = 0.7;
    pub const WANDER_PROBABILITY: f64 = 0.3;

    /// Number of adversaries per session
    pub const ADVERSARY_COUNT: usize = 4;
}

/// Grid position as (column, row)
pub type Position = IVec2;

/// Manhattan distance between two grid positions
#[inline]
pub fn manhattan(a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}
