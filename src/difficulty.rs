//! Difficulty presets
//!
//! Each preset maps to an immutable [`DifficultyProfile`]. Selecting a new
//! preset always starts a fresh session.

use serde::{Deserialize, Serialize};

use crate::error::{MazeChaseError, Result};

/// Difficulty levels offered by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "med" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            _ => Err(MazeChaseError::UnknownDifficulty(s.to_string())),
        }
    }

    /// Tuning profile for this difficulty
    pub fn profile(&self) -> DifficultyProfile {
        DifficultyProfile::for_difficulty(*self)
    }
}

/// Immutable tuning parameters for one session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Simulation step period in milliseconds
    pub tick_period_ms: u64,
    /// Chance an adversary moves on a given tick, in (0, 2]; values >= 1 never skip
    pub adversary_speed: f64,
    /// Maximum number of power items kept from the layout
    pub power_item_budget: usize,
    /// Adversaries bias toward the player when not vulnerable
    pub chase_mode: bool,
    /// Drawing scale (presentation only)
    pub grid_scale: f32,
}

impl DifficultyProfile {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                tick_period_ms: 180,
                adversary_speed: 0.7,
                power_item_budget: 6,
                chase_mode: false,
                grid_scale: 0.8,
            },
            Difficulty::Medium => Self {
                tick_period_ms: 150,
                adversary_speed: 0.9,
                power_item_budget: 4,
                chase_mode: true,
                grid_scale: 1.0,
            },
            Difficulty::Hard => Self {
                tick_period_ms: 120,
                adversary_speed: 1.2,
                power_item_budget: 2,
                chase_mode: true,
                grid_scale: 1.2,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Difficulty::parse("Easy").unwrap(), Difficulty::Easy);
        assert_eq!(Difficulty::parse("med").unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::parse(" h ").unwrap(), Difficulty::Hard);
        assert!(Difficulty::parse("nightmare").is_err());
    }

    #[test]
    fn test_profiles_are_within_bounds() {
        for d in Difficulty::ALL {
            let p = d.profile();
            assert!(p.adversary_speed > 0.0 && p.adversary_speed <= 2.0);
            assert!(p.tick_period_ms > 0);
        }
        assert!(!Difficulty::Easy.profile().chase_mode);
        assert!(Difficulty::Hard.profile().chase_mode);
        assert_eq!(Difficulty::Medium.profile().power_item_budget, 4);
    }
}
