//! Grid coordinates, orthogonal directions, and position classes.

use serde::{Deserialize, Serialize};

/// A cell coordinate. Bounds are only meaningful relative to a board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Row-major index into a board of side `size`.
    #[inline]
    pub const fn index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of `index`.
    #[inline]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Position {
            row: index / size,
            col: index % size,
        }
    }

    /// Returns the neighbor in `dir`, or None if it falls off a board of side `size`.
    #[inline]
    pub fn step(self, dir: Direction, size: usize) -> Option<Position> {
        match dir {
            Direction::Up if self.row > 0 => Some(Position::new(self.row - 1, self.col)),
            Direction::Down if self.row + 1 < size => Some(Position::new(self.row + 1, self.col)),
            Direction::Left if self.col > 0 => Some(Position::new(self.row, self.col - 1)),
            Direction::Right if self.col + 1 < size => Some(Position::new(self.row, self.col + 1)),
            _ => None,
        }
    }

    /// Classifies the position by how many in-bounds neighbors it has.
    pub fn class(self, size: usize) -> PositionClass {
        let row_edge = self.row == 0 || self.row + 1 == size;
        let col_edge = self.col == 0 || self.col + 1 == size;
        match (row_edge, col_edge) {
            (true, true) => PositionClass::Corner,
            (true, false) | (false, true) => PositionClass::Edge,
            (false, false) => PositionClass::Center,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal direction of an explosion edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Directions in neighbor enumeration order.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Corner (2 neighbors), edge (3 neighbors), or center (4 neighbors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionClass {
    Corner,
    Edge,
    Center,
}

impl PositionClass {
    pub const fn neighbor_count(self) -> usize {
        match self {
            PositionClass::Corner => 2,
            PositionClass::Edge => 3,
            PositionClass::Center => 4,
        }
    }
}
