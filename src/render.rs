//! Text renderer
//!
//! Draws a read-only view of the session into a character frame. The
//! simulation never depends on this module.

use std::fmt::Write;

use crate::Position;
use crate::difficulty::Difficulty;
use crate::highscores::HighScores;
use crate::settings::{Language, PlayerColor};
use crate::sim::{Adversary, AdversaryColor, Cell, Direction, GamePhase, GameState, Maze};

const RESET: &str = "\x1b[0m";
const WALL_ANSI: &str = "\x1b[34m";
const VULNERABLE_ANSI: &str = "\x1b[96m";

/// Glyphs used for each thing on the board
pub mod glyph {
    pub const WALL: char = '#';
    pub const EMPTY: char = ' ';
    pub const ITEM: char = '.';
    pub const POWER_ITEM: char = 'o';
    pub const PLAYER_CLOSED: char = 'O';
    pub const ADVERSARY: char = 'M';
    pub const VULNERABLE: char = 'w';
    pub const EATEN: char = '"';
}

/// Format seconds as MM:SS
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Drawing options
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    pub language: Language,
    /// `None` draws plain text without escapes
    pub player_color: Option<PlayerColor>,
    /// Show the "press R" line under the terminal banner; only hosts that
    /// can restart a session should set this
    pub restart_hint: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            language: Language::En,
            player_color: None,
            restart_hint: false,
        }
    }
}

fn player_glyph(direction: Direction, mouth_open: bool) -> char {
    if !mouth_open {
        return glyph::PLAYER_CLOSED;
    }
    match direction {
        Direction::Right => '<',
        Direction::Left => '>',
        Direction::Up => 'v',
        Direction::Down => '^',
        Direction::None => 'C',
    }
}

fn adversary_glyph(adversary: &Adversary) -> char {
    if adversary.eaten {
        glyph::EATEN
    } else if adversary.vulnerable {
        glyph::VULNERABLE
    } else {
        glyph::ADVERSARY
    }
}

fn adversary_ansi(adversary: &Adversary) -> &'static str {
    if adversary.vulnerable && !adversary.eaten {
        return VULNERABLE_ANSI;
    }
    match adversary.color {
        AdversaryColor::Red => "\x1b[31m",
        AdversaryColor::Pink => "\x1b[35m",
        AdversaryColor::Cyan => "\x1b[36m",
        AdversaryColor::Orange => "\x1b[33m",
    }
}

/// Character grid without HUD or colors
pub fn board(state: &GameState, maze: &Maze) -> Vec<Vec<char>> {
    let mut rows = vec![vec![glyph::EMPTY; maze.width() as usize]; maze.height() as usize];
    for (pos, cell) in maze.iter() {
        if cell == Cell::Wall {
            rows[pos.y as usize][pos.x as usize] = glyph::WALL;
        }
    }
    let mut put = |pos: Position, c: char| {
        if maze.in_bounds(pos) {
            rows[pos.y as usize][pos.x as usize] = c;
        }
    };
    state.items.iter().for_each(|&p| put(p, glyph::ITEM));
    state.power_items.iter().for_each(|&p| put(p, glyph::POWER_ITEM));
    put(
        state.player.position,
        player_glyph(state.player.direction, state.player.mouth_open),
    );
    // adversaries drawn last so they show on top of the player
    for adversary in &state.adversaries {
        put(adversary.position, adversary_glyph(adversary));
    }
    rows
}

/// Full frame: HUD line, board, and a banner once the game is over
pub fn draw(state: &GameState, maze: &Maze, style: &RenderStyle) -> String {
    let strings = style.language.strings();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {:<8} {}: {}",
        strings.score,
        state.score,
        strings.time,
        format_time(state.elapsed_secs)
    );

    let rows = board(state, maze);
    for (y, row) in rows.iter().enumerate() {
        for (x, &c) in row.iter().enumerate() {
            match style.player_color {
                None => out.push(c),
                Some(color) => {
                    let pos = Position::new(x as i32, y as i32);
                    let ansi = if c == glyph::WALL {
                        Some(WALL_ANSI)
                    } else if let Some(a) = state.adversaries.iter().find(|a| a.position == pos) {
                        Some(adversary_ansi(a))
                    } else if pos == state.player.position {
                        Some(color.ansi())
                    } else {
                        None
                    };
                    match ansi {
                        Some(code) => {
                            out.push_str(code);
                            out.push(c);
                            out.push_str(RESET);
                        }
                        None => out.push(c),
                    }
                }
            }
        }
        out.push('\n');
    }

    let banner = match state.phase() {
        GamePhase::Active => None,
        GamePhase::Won => Some(strings.you_win),
        GamePhase::Lost => Some(strings.game_over),
    };
    if let Some(title) = banner {
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{}: {}", strings.score, state.score);
        let _ = writeln!(out, "{}: {}", strings.time, format_time(state.elapsed_secs));
        if style.restart_hint {
            let _ = writeln!(out, "{}", strings.press_r);
        }
    }
    out
}

/// High score table for every difficulty, or a placeholder line when no
/// game has scored yet
pub fn score_board(scores: &HighScores, language: Language) -> String {
    let strings = language.strings();
    if scores.is_empty() {
        return format!("{}\n", strings.no_scores);
    }
    let mut out = format!("{}\n", strings.high_score);
    for difficulty in Difficulty::ALL {
        let _ = writeln!(
            out,
            "  {:<8} {}",
            language.difficulty_name(difficulty),
            scores.best(difficulty)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;

    fn reference_state() -> (GameState, Maze) {
        let maze = Maze::reference();
        let state = GameState::new(&maze, &Difficulty::Medium.profile());
        (state, maze)
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(3_600), "60:00");
    }

    #[test]
    fn test_board_shape_and_contents() {
        let (state, maze) = reference_state();
        let rows = board(&state, &maze);
        assert_eq!(rows.len(), 31);
        assert!(rows.iter().all(|r| r.len() == 28));
        assert_eq!(rows[0][0], glyph::WALL);
        assert_eq!(rows[3][1], glyph::POWER_ITEM);
        assert_eq!(rows[23][14], 'C');
        assert_eq!(rows[11][14], glyph::ADVERSARY);
        let items = rows.iter().flatten().filter(|&&c| c == glyph::ITEM).count();
        // the player covers one item cell at spawn
        assert_eq!(items, state.items.len() - 1);
    }

    #[test]
    fn test_adversary_glyphs_follow_state() {
        let (mut state, maze) = reference_state();
        state.adversaries[0].vulnerable = true;
        state.adversaries[1].eaten = true;
        let rows = board(&state, &maze);
        assert_eq!(rows[11][14], glyph::VULNERABLE);
        assert_eq!(rows[14][12], glyph::EATEN);
    }

    #[test]
    fn test_plain_draw_has_hud_and_no_escapes() {
        let (state, maze) = reference_state();
        let frame = draw(&state, &maze, &RenderStyle::default());
        assert!(frame.starts_with("Score: 0"));
        assert!(frame.contains("Time: 00:00"));
        assert!(!frame.contains('\x1b'));
        assert!(!frame.contains("Game Over"));
    }

    #[test]
    fn test_terminal_banner_is_localized() {
        let (mut state, maze) = reference_state();
        state.game_over = true;
        let style = RenderStyle {
            language: Language::Tr,
            player_color: None,
            restart_hint: true,
        };
        let frame = draw(&state, &maze, &style);
        assert!(frame.contains("Oyun Bitti"));
        assert!(frame.contains("Tekrar oynamak için R'ye bas"));
    }

    #[test]
    fn test_restart_hint_only_when_requested() {
        let (mut state, maze) = reference_state();
        state.game_won = true;
        let frame = draw(&state, &maze, &RenderStyle::default());
        assert!(frame.contains("You Win!"));
        assert!(!frame.contains("Press R"));
    }

    #[test]
    fn test_score_board_lists_every_difficulty() {
        let mut scores = HighScores::new();
        scores.record(Difficulty::Medium, 340);
        let board = score_board(&scores, Language::En);
        assert!(board.starts_with("High Score\n"));
        assert!(board.contains("Easy     0"));
        assert!(board.contains("Medium   340"));
        assert!(board.contains("Hard     0"));
        assert!(!board.contains("No scores yet"));
    }

    #[test]
    fn test_score_board_empty_table() {
        let board = score_board(&HighScores::new(), Language::Tr);
        assert_eq!(board, "Henüz skor yok\n");
    }

    #[test]
    fn test_colored_draw_uses_player_color() {
        let (state, maze) = reference_state();
        let style = RenderStyle {
            player_color: Some(PlayerColor::Pink),
            ..RenderStyle::default()
        };
        let frame = draw(&state, &maze, &style);
        assert!(frame.contains("\x1b[95mC"));
    }
}
