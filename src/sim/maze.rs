//! Static maze topology
//!
//! The grid is read-only once a session starts. Items and power items are
//! extracted into the session state at creation time and tracked there.

use serde::{Deserialize, Serialize};

use crate::Position;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::error::{MazeChaseError, Result};

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Item,
    PowerItem,
}

impl Cell {
    /// Decode a layout digit (0 = empty, 1 = wall, 2 = item, 3 = power item)
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::Wall),
            '2' => Some(Cell::Item),
            '3' => Some(Cell::PowerItem),
            _ => None,
        }
    }
}

/// Reference 28x31 layout
pub const REFERENCE_LAYOUT: [&str; 31] = [
    "1111111111111111111111111111",
    "1222222222222112222222222221",
    "1211112111112112111112111121",
    "1311112111112112111112111131",
    "1211112111112112111112111121",
    "1222222222222222222222222221",
    "1211112112111111112112111121",
    "1211112112111111112112111121",
    "1222222112222112222112222221",
    "1111112111110110111112111111",
    "0000012111110110111112100000",
    "0000012110000000000112100000",
    "0000012110111001110112100000",
    "1111112110100000010112111111",
    "0000002000100000010002000000",
    "1111112110100000010112111111",
    "0000012110111111110112100000",
    "0000012110000000000112100000",
    "0000012110111111110112100000",
    "1111112110111111110112111111",
    "1222222222222112222222222221",
    "1211112111112112111112111121",
    "1211112111112112111112111121",
    "1322112222222222222222112231",
    "1112112112111111112112112111",
    "1112112112111111112112112111",
    "1222222112222112222112222221",
    "1211111111112112111111111121",
    "1211111111112112111111111121",
    "1222222222222222222222222221",
    "1111111111111111111111111111",
];

/// Rectangular grid of cells, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

/// Item positions pulled out of a layout for a new session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPlacement {
    pub items: Vec<Position>,
    pub power_items: Vec<Position>,
}

impl Maze {
    /// The built-in 28x31 maze
    pub fn reference() -> Self {
        let cells = REFERENCE_LAYOUT
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| Cell::from_code(c).unwrap_or(Cell::Wall))
            .collect::<Vec<_>>();
        debug_assert_eq!(cells.len(), (GRID_WIDTH * GRID_HEIGHT) as usize);
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            cells,
        }
    }

    /// Parse a layout from digit rows. Whitespace inside a row is ignored.
    pub fn parse_rows<'a>(rows: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0usize;

        for (row, line) in rows.into_iter().enumerate() {
            let mut row_width = 0usize;
            for code in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = Cell::from_code(code).ok_or(MazeChaseError::UnknownCell {
                    code,
                    col: row_width,
                    row,
                })?;
                cells.push(cell);
                row_width += 1;
            }
            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(MazeChaseError::RaggedRow {
                        row,
                        expected,
                        found: row_width,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        match width {
            Some(w) if w > 0 => Ok(Self {
                width: w as i32,
                height: height as i32,
                cells,
            }),
            _ => Err(MazeChaseError::EmptyMaze),
        }
    }

    /// Parse a newline-separated layout, skipping blank lines
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_rows(text.lines().filter(|l| !l.trim().is_empty()))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Cell at `pos`, or `None` outside the grid
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get((pos.y * self.width + pos.x) as usize).copied()
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        matches!(self.cell(pos), Some(Cell::Wall))
    }

    /// Row-major iterator over every cell with its position
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &cell)| {
            let i = i as i32;
            (Position::new(i % self.width, i / self.width), cell)
        })
    }

    /// Collect item and power-item positions in row-major order.
    ///
    /// Only the first `power_budget` power cells stay power items; the rest
    /// become ordinary items.
    pub fn place_items(&self, power_budget: usize) -> ItemPlacement {
        let mut placement = ItemPlacement::default();
        for (pos, cell) in self.iter() {
            match cell {
                Cell::Item => placement.items.push(pos),
                Cell::PowerItem if placement.power_items.len() < power_budget => {
                    placement.power_items.push(pos)
                }
                Cell::PowerItem => placement.items.push(pos),
                Cell::Empty | Cell::Wall => {}
            }
        }
        placement
    }
}
