//! Demo-mode player
//!
//! Picks a movement intent by breadth-first search over open cells toward
//! the nearest remaining item, power item or capturable adversary. Cells
//! holding a lethal adversary are treated as walls. Purely a consumer of
//! game state: the result is fed back through [`GameSession::set_intent`].
//!
//! [`GameSession::set_intent`]: crate::session::GameSession::set_intent

use std::collections::VecDeque;

use crate::Position;
use crate::sim::{Direction, GameState, Maze, is_legal, next_position};

/// Direction of the first step on a shortest path to the nearest target,
/// or [`Direction::None`] when nothing is reachable.
pub fn choose_intent(state: &GameState, maze: &Maze) -> Direction {
    let start = state.player.position;
    if !maze.in_bounds(start) {
        return Direction::None;
    }

    let width = maze.width() as usize;
    let index = |p: Position| p.y as usize * width + p.x as usize;
    let is_target = |p: Position| {
        state.items.contains(&p)
            || state.power_items.contains(&p)
            || state
                .adversaries
                .iter()
                .any(|a| a.position == p && a.is_capturable())
    };
    let is_danger = |p: Position| {
        state
            .adversaries
            .iter()
            .any(|a| a.position == p && a.is_lethal())
    };

    // first step taken from the start to reach each visited cell
    let mut first_step = vec![None; width * maze.height() as usize];
    first_step[index(start)] = Some(Direction::None);
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let via = first_step[index(current)].unwrap_or(Direction::None);
        for dir in Direction::CARDINALS {
            let next = next_position(current, dir);
            if !is_legal(maze, next) || first_step[index(next)].is_some() || is_danger(next) {
                continue;
            }
            let step = if current == start { dir } else { via };
            if is_target(next) {
                return step;
            }
            first_step[index(next)] = Some(step);
            queue.push_back(next);
        }
    }

    Direction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::sim::{Adversary, AdversaryColor, Player};

    fn room() -> Maze {
        Maze::parse(
            "1111111\n\
             1000001\n\
             1010101\n\
             1000001\n\
             1111111",
        )
        .unwrap()
    }

    fn state_with(
        maze: &Maze,
        player: Position,
        adversaries: Vec<Adversary>,
        items: Vec<Position>,
    ) -> GameState {
        let mut state = GameState::with_entities(
            maze,
            &Difficulty::Medium.profile(),
            Player::new(player),
            adversaries,
        );
        state.items = items;
        state.power_items.clear();
        state
    }

    #[test]
    fn test_heads_for_nearest_item() {
        let maze = room();
        let state = state_with(
            &maze,
            Position::new(1, 1),
            vec![],
            vec![Position::new(5, 3), Position::new(3, 1)],
        );
        assert_eq!(choose_intent(&state, &maze), Direction::Right);
    }

    #[test]
    fn test_routes_around_walls() {
        let maze = room();
        let state = state_with(&maze, Position::new(1, 1), vec![], vec![Position::new(1, 3)]);
        assert_eq!(choose_intent(&state, &maze), Direction::Down);
    }

    #[test]
    fn test_avoids_lethal_adversary() {
        let maze = room();
        let guard = Adversary::new(AdversaryColor::Red, Position::new(2, 1), Direction::Left);
        let state = state_with(
            &maze,
            Position::new(1, 1),
            vec![guard],
            vec![Position::new(3, 1)],
        );
        // the short way is blocked, so go around through the bottom row
        assert_eq!(choose_intent(&state, &maze), Direction::Down);
    }

    #[test]
    fn test_chases_capturable_adversary() {
        let maze = room();
        let mut prey = Adversary::new(AdversaryColor::Pink, Position::new(1, 2), Direction::Up);
        prey.vulnerable = true;
        let mut state = state_with(&maze, Position::new(1, 1), vec![prey], vec![Position::new(5, 1)]);
        state.player.powered = true;
        assert_eq!(choose_intent(&state, &maze), Direction::Down);
    }

    #[test]
    fn test_nothing_reachable() {
        let maze = room();
        let state = state_with(&maze, Position::new(1, 1), vec![], vec![]);
        assert_eq!(choose_intent(&state, &maze), Direction::None);
    }

    #[test]
    fn test_reference_maze_has_a_move() {
        let maze = Maze::reference();
        let state = GameState::new(&maze, &Difficulty::Easy.profile());
        assert_ne!(choose_intent(&state, &maze), Direction::None);
    }
}
