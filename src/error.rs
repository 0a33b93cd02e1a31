//! Error types for the fallible edges around the simulation.
//!
//! Gameplay itself never fails: illegal moves are rejected silently and the
//! terminal states are ordinary outcomes.

use thiserror::Error;

/// Result type alias using [`MazeChaseError`].
pub type Result<T> = std::result::Result<T, MazeChaseError>;

#[derive(Debug, Error)]
pub enum MazeChaseError {
    /// Maze text contained no rows.
    #[error("maze layout is empty")]
    EmptyMaze,

    /// A maze row had a different width than the first row.
    #[error("maze row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A maze cell code outside 0..=3.
    #[error("unknown cell code '{code}' at column {col}, row {row}")]
    UnknownCell { code: char, col: usize, row: usize },

    /// Unrecognised difficulty name.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// Filesystem failure while loading or saving.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("failed to (de)serialize: {0}")]
    Serde(#[from] serde_json::Error),
}
