//! Game settings and preferences
//!
//! Persisted separately from high scores.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::Result;
use crate::persistence;

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
}

/// Localized HUD strings
#[derive(Debug, Clone, Copy)]
pub struct Strings {
    pub game_over: &'static str,
    pub you_win: &'static str,
    pub press_r: &'static str,
    pub score: &'static str,
    pub time: &'static str,
    pub high_score: &'static str,
    pub no_scores: &'static str,
}

const EN: Strings = Strings {
    game_over: "Game Over",
    you_win: "You Win!",
    press_r: "Press R to play again",
    score: "Score",
    time: "Time",
    high_score: "High Score",
    no_scores: "No scores yet",
};

const TR: Strings = Strings {
    game_over: "Oyun Bitti",
    you_win: "Kazandın!",
    press_r: "Tekrar oynamak için R'ye bas",
    score: "Skor",
    time: "Süre",
    high_score: "En Yüksek Skor",
    no_scores: "Henüz skor yok",
};

impl Language {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "tr" | "turkish" | "türkçe" => Some(Language::Tr),
            _ => None,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Tr => &TR,
        }
    }

    /// Name of a difficulty in this language
    pub fn difficulty_name(&self, difficulty: Difficulty) -> &'static str {
        match (self, difficulty) {
            (Language::En, Difficulty::Easy) => "Easy",
            (Language::En, Difficulty::Medium) => "Medium",
            (Language::En, Difficulty::Hard) => "Hard",
            (Language::Tr, Difficulty::Easy) => "Kolay",
            (Language::Tr, Difficulty::Medium) => "Orta",
            (Language::Tr, Difficulty::Hard) => "Zor",
        }
    }
}

/// Player tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    #[default]
    Yellow,
    Red,
    Green,
    Blue,
    Pink,
}

impl PlayerColor {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "yellow" => Some(PlayerColor::Yellow),
            "red" => Some(PlayerColor::Red),
            "green" => Some(PlayerColor::Green),
            "blue" => Some(PlayerColor::Blue),
            "pink" => Some(PlayerColor::Pink),
            _ => None,
        }
    }

    /// ANSI foreground escape for terminal drawing
    pub fn ansi(&self) -> &'static str {
        match self {
            PlayerColor::Yellow => "\x1b[93m",
            PlayerColor::Red => "\x1b[91m",
            PlayerColor::Green => "\x1b[92m",
            PlayerColor::Blue => "\x1b[94m",
            PlayerColor::Pink => "\x1b[95m",
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub player_color: PlayerColor,
    /// Fixed RNG seed; a time-based seed is used when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Colored terminal output
    #[serde(default = "default_true")]
    pub color_output: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            language: Language::En,
            player_color: PlayerColor::Yellow,
            seed: None,
            color_output: true,
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "maze_chase_settings.json";

    pub fn load(dir: &Path) -> Self {
        persistence::load_or_default(dir, Self::FILE_NAME)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        persistence::save_json(dir, Self::FILE_NAME, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.difficulty, Difficulty::Easy);
        assert_eq!(s.language, Language::En);
        assert_eq!(s.player_color, PlayerColor::Yellow);
    }

    #[test]
    fn test_language_strings() {
        assert_eq!(Language::Tr.strings().score, "Skor");
        assert_eq!(Language::En.strings().game_over, "Game Over");
        assert_eq!(Language::Tr.difficulty_name(Difficulty::Hard), "Zor");
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(Language::parse("TR"), Some(Language::Tr));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(PlayerColor::parse("Pink"), Some(PlayerColor::Pink));
        assert_eq!(PlayerColor::parse(" blue "), Some(PlayerColor::Blue));
        assert_eq!(PlayerColor::parse("purple"), None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let s: Settings = serde_json::from_str(r#"{"difficulty": "hard"}"#).unwrap();
        assert_eq!(s.difficulty, Difficulty::Hard);
        assert!(s.color_output);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let s = Settings {
            difficulty: Difficulty::Medium,
            language: Language::Tr,
            player_color: PlayerColor::Green,
            seed: Some(42),
            color_output: false,
        };
        s.save(dir.path()).unwrap();
        assert_eq!(Settings::load(dir.path()), s);
    }
}
