//! Game state and core simulation types
//!
//! One [`GameState`] is one session: it is built from scratch whenever a
//! difficulty is chosen or a restart is requested, and mutated in place by
//! the tick.

use serde::{Deserialize, Serialize};

use super::maze::Maze;
use super::movement::Direction;
use crate::Position;
use crate::consts::ADVERSARY_COUNT;
use crate::difficulty::DifficultyProfile;

/// Player spawn in the reference maze
pub const PLAYER_SPAWN: Position = Position::new(14, 23);

/// Derived terminal view of the two session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Active,
    Won,
    Lost,
}

/// The player-controlled agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub direction: Direction,
    /// Buffered intent, applied whenever it leads to a legal cell
    pub desired_direction: Direction,
    pub powered: bool,
    /// Animation phase only
    pub mouth_open: bool,
}

impl Player {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            direction: Direction::None,
            desired_direction: Direction::None,
            powered: false,
            mouth_open: true,
        }
    }
}

/// Fixed identity of each adversary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdversaryColor {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl AdversaryColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdversaryColor::Red => "red",
            AdversaryColor::Pink => "pink",
            AdversaryColor::Cyan => "cyan",
            AdversaryColor::Orange => "orange",
        }
    }
}

/// An autonomous pursuer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub position: Position,
    pub direction: Direction,
    pub color: AdversaryColor,
    pub vulnerable: bool,
    /// Captured and heading back to `home`
    pub eaten: bool,
    /// Spawn point and return target after capture
    pub home: Position,
}

impl Adversary {
    pub fn new(color: AdversaryColor, home: Position, direction: Direction) -> Self {
        Self {
            position: home,
            direction,
            color,
            vulnerable: false,
            eaten: false,
            home,
        }
    }

    /// Harmful to the player on contact
    #[inline]
    pub fn is_lethal(&self) -> bool {
        !self.vulnerable && !self.eaten
    }

    /// Can be captured on contact
    #[inline]
    pub fn is_capturable(&self) -> bool {
        self.vulnerable && !self.eaten
    }
}

/// Adversary spawns of the reference maze: color, home and initial heading
pub const ADVERSARY_SPAWNS: [(AdversaryColor, Position, Direction); ADVERSARY_COUNT] = [
    (AdversaryColor::Red, Position::new(14, 11), Direction::Up),
    (AdversaryColor::Pink, Position::new(12, 14), Direction::Left),
    (AdversaryColor::Cyan, Position::new(16, 14), Direction::Right),
    (AdversaryColor::Orange, Position::new(14, 14), Direction::Down),
];

/// The adversaries of the reference maze, in iteration order
pub fn reference_adversaries() -> Vec<Adversary> {
    ADVERSARY_SPAWNS
        .iter()
        .map(|&(color, home, direction)| Adversary::new(color, home, direction))
        .collect()
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Fixed, stable order
    pub adversaries: Vec<Adversary>,
    /// Remaining ordinary items
    pub items: Vec<Position>,
    /// Remaining power items
    pub power_items: Vec<Position>,
    pub score: u64,
    pub game_over: bool,
    pub game_won: bool,
    /// Whole seconds of active play
    pub elapsed_secs: u64,
    /// Simulation steps taken
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh session on the reference spawn points
    pub fn new(maze: &Maze, profile: &DifficultyProfile) -> Self {
        Self::with_entities(maze, profile, Player::new(PLAYER_SPAWN), reference_adversaries())
    }

    /// Fresh session with custom entity placement
    pub fn with_entities(
        maze: &Maze,
        profile: &DifficultyProfile,
        player: Player,
        adversaries: Vec<Adversary>,
    ) -> Self {
        let placement = maze.place_items(profile.power_item_budget);
        Self {
            player,
            adversaries,
            items: placement.items,
            power_items: placement.power_items,
            score: 0,
            game_over: false,
            game_won: false,
            elapsed_secs: 0,
            time_ticks: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::Lost
        } else if self.game_won {
            GamePhase::Won
        } else {
            GamePhase::Active
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_won
    }

    /// Remove an item at `pos`; true if one was there
    pub fn take_item(&mut self, pos: Position) -> bool {
        take_at(&mut self.items, pos)
    }

    /// Remove a power item at `pos`; true if one was there
    pub fn take_power_item(&mut self, pos: Position) -> bool {
        take_at(&mut self.power_items, pos)
    }

    /// Drop power mode and every adversary's vulnerability
    pub fn end_power_mode(&mut self) {
        self.player.powered = false;
        for adversary in &mut self.adversaries {
            adversary.vulnerable = false;
        }
    }
}

fn take_at(set: &mut Vec<Position>, pos: Position) -> bool {
    match set.iter().position(|&p| p == pos) {
        Some(i) => {
            set.remove(i);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::sim::movement::is_legal;

    #[test]
    fn test_new_session_defaults() {
        let maze = Maze::reference();
        let state = GameState::new(&maze, &Difficulty::Medium.profile());
        assert_eq!(state.adversaries.len(), 4);
        assert_eq!(state.power_items.len(), 4);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase(), GamePhase::Active);
        assert!(!state.player.powered);
        assert_eq!(state.player.direction, Direction::None);
    }

    #[test]
    fn test_spawns_are_legal_and_distinct() {
        let maze = Maze::reference();
        let state = GameState::new(&maze, &Difficulty::Hard.profile());
        assert_eq!(state.adversaries.len(), ADVERSARY_COUNT);
        assert!(is_legal(&maze, state.player.position));
        for (i, a) in state.adversaries.iter().enumerate() {
            assert!(is_legal(&maze, a.home));
            for b in &state.adversaries[i + 1..] {
                assert_ne!(a.home, b.home);
            }
        }
    }

    #[test]
    fn test_take_item_removes_once() {
        let maze = Maze::reference();
        let mut state = GameState::new(&maze, &Difficulty::Easy.profile());
        let pos = state.items[0];
        let before = state.items.len();
        assert!(state.take_item(pos));
        assert!(!state.take_item(pos));
        assert_eq!(state.items.len(), before - 1);
    }

    #[test]
    fn test_end_power_mode_clears_vulnerability() {
        let maze = Maze::reference();
        let mut state = GameState::new(&maze, &Difficulty::Easy.profile());
        state.player.powered = true;
        state.adversaries.iter_mut().for_each(|a| a.vulnerable = true);
        state.end_power_mode();
        assert!(!state.player.powered);
        assert!(state.adversaries.iter().all(|a| !a.vulnerable));
    }

    #[test]
    fn test_phase_reflects_flags() {
        let maze = Maze::reference();
        let mut state = GameState::new(&maze, &Difficulty::Easy.profile());
        state.game_won = true;
        assert_eq!(state.phase(), GamePhase::Won);
        assert!(state.is_terminal());
    }
}
