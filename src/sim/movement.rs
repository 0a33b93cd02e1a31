//! Movement resolution on the grid
//!
//! Pure functions: no wraparound, walls and out-of-bounds cells reject moves.

use serde::{Deserialize, Serialize};

use super::maze::Maze;
use crate::Position;

/// Movement direction. `None` means no movement is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// The four cardinal directions, in the order random picks index them
    pub const CARDINALS: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step in grid coordinates (rows grow downward)
    pub fn delta(&self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
            Direction::None => Position::ZERO,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    /// Direction along the axis of larger displacement, ties going vertical
    pub fn toward(delta: Position) -> Direction {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0 { Direction::Right } else { Direction::Left }
        } else if delta.y > 0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Neighbor of `pos` one step in `dir`
#[inline]
pub fn next_position(pos: Position, dir: Direction) -> Position {
    pos + dir.delta()
}

/// True for in-bounds, non-wall cells
#[inline]
pub fn is_legal(maze: &Maze, pos: Position) -> bool {
    maze.in_bounds(pos) && !maze.is_wall(pos)
}

/// Cardinal directions leading to a legal cell from `pos`
pub fn legal_directions(maze: &Maze, pos: Position) -> Vec<Direction> {
    Direction::CARDINALS
        .into_iter()
        .filter(|&d| is_legal(maze, next_position(pos, d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::None),
        ]
    }

    proptest! {
        #[test]
        fn prop_next_position_is_unit_step(
            x in -50i32..50,
            y in -50i32..50,
            dir in any_direction(),
        ) {
            let p = Position::new(x, y);
            let n = next_position(p, dir);
            let d = (n - p).abs();
            if dir == Direction::None {
                prop_assert_eq!(n, p);
            } else {
                prop_assert_eq!(d.x + d.y, 1);
                prop_assert!(d.x == 0 || d.y == 0);
            }
        }
    }

    #[test]
    fn test_toward_tie_breaks_vertical() {
        assert_eq!(Direction::toward(Position::new(3, 3)), Direction::Down);
        assert_eq!(Direction::toward(Position::new(-2, -2)), Direction::Up);
        assert_eq!(Direction::toward(Position::new(4, -1)), Direction::Right);
        assert_eq!(Direction::toward(Position::new(-4, 1)), Direction::Left);
        assert_eq!(Direction::toward(Position::ZERO), Direction::Up);
    }

    #[test]
    fn test_is_legal_rejects_walls_and_bounds() {
        let maze = Maze::reference();
        assert!(!is_legal(&maze, Position::new(0, 0)));
        assert!(!is_legal(&maze, Position::new(-1, 14)));
        assert!(!is_legal(&maze, Position::new(28, 14)));
        assert!(!is_legal(&maze, Position::new(5, 31)));
        assert!(is_legal(&maze, Position::new(1, 1)));
        // empty tunnel row cell
        assert!(is_legal(&maze, Position::new(0, 14)));
    }

    #[test]
    fn test_no_wraparound_at_tunnel_edge() {
        let maze = Maze::reference();
        let edge = Position::new(0, 14);
        let next = next_position(edge, Direction::Left);
        assert_eq!(next, Position::new(-1, 14));
        assert!(!is_legal(&maze, next));
    }

    #[test]
    fn test_legal_directions_in_corridor() {
        let maze = Maze::reference();
        let dirs = legal_directions(&maze, Position::new(1, 1));
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
    }
}
