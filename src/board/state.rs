//! Board state.
//!
//! A square grid of cells stored row-major in a flat vector. Callers treat a
//! board as a value: every transition produces a new board, while the chain
//! resolver mutates its own private copy.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Color};
use super::position::{Direction, Position, PositionClass, ALL_DIRECTIONS};
use crate::config::GameConfig;

/// Per-color cell ownership counts. Always sums to the number of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tally {
    pub blue: usize,
    pub red: usize,
    pub neutral: usize,
}

impl Tally {
    /// Returns the count for one color.
    pub const fn of(&self, color: Color) -> usize {
        match color {
            Color::Blue => self.blue,
            Color::Red => self.red,
            Color::Neutral => self.neutral,
        }
    }

    pub const fn total(&self) -> usize {
        self.blue + self.red + self.neutral
    }
}

/// Complete grid contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

/// Deserialized board fields before the shape check.
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Cell>,
}

/// A stored board whose cell count does not match its side length.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("board of size {size} needs {} cells, found {found}", .size * .size)]
pub struct BoardShapeError {
    pub size: usize,
    pub found: usize,
}

impl TryFrom<RawBoard> for Board {
    type Error = BoardShapeError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        if raw.size == 0 || raw.cells.len() != raw.size * raw.size {
            return Err(BoardShapeError {
                size: raw.size,
                found: raw.cells.len(),
            });
        }
        Ok(Board {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl Board {
    /// Creates an all-neutral board of side `size`.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::EMPTY; size * size],
        }
    }

    /// Builds a board from rows of cells. Returns None unless the rows form a
    /// non-empty square.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Board {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the signed coordinate lies on the board.
    #[inline]
    pub fn in_bounds(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    /// Converts a signed coordinate to a position, if in bounds.
    pub fn position(&self, row: i64, col: i64) -> Option<Position> {
        if self.in_bounds(row, col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }

    #[inline]
    fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Bounds-checked cell lookup.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[pos.index(self.size)])
        } else {
            None
        }
    }

    /// Cell lookup for positions already known to be in bounds.
    ///
    /// Panics if `pos` is off the board.
    #[inline]
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.index(self.size)]
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let idx = pos.index(self.size);
        &mut self.cells[idx]
    }

    /// Overwrites a cell. Returns false if `pos` is off the board.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if !self.contains(pos) {
            return false;
        }
        *self.cell_mut(pos) = cell;
        true
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size * size).map(move |i| Position::from_index(i, size))
    }

    /// Iterates rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// In-bounds orthogonal neighbors in up, down, left, right order.
    #[inline]
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> {
        let size = self.size;
        ALL_DIRECTIONS.into_iter().filter_map(move |d| pos.step(d, size))
    }

    /// Directions from `pos` that lead to an in-bounds neighbor.
    pub fn directions(&self, pos: Position) -> Vec<Direction> {
        ALL_DIRECTIONS
            .into_iter()
            .filter(|&d| pos.step(d, self.size).is_some())
            .collect()
    }

    /// Mass at which the cell at `pos` detonates.
    #[inline]
    pub fn critical_mass(&self, pos: Position, config: &GameConfig) -> u32 {
        match pos.class(self.size) {
            PositionClass::Corner => config.critical_mass.corner,
            PositionClass::Edge => config.critical_mass.edge,
            PositionClass::Center => config.critical_mass.center,
        }
    }

    /// Counts cells by owner with a full scan.
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for cell in &self.cells {
            match cell.owner {
                Color::Blue => tally.blue += 1,
                Color::Red => tally.red += 1,
                Color::Neutral => tally.neutral += 1,
            }
        }
        tally
    }

    /// Returns true if the board is a well-formed settled position: neutral
    /// cells hold no mass, and no cell is at or above its critical mass.
    pub fn validate(&self, config: &GameConfig) -> bool {
        if self.size == 0 || self.cells.len() != self.size * self.size {
            return false;
        }
        self.positions().all(|pos| {
            let cell = self.cell(pos);
            let max_mass = self.critical_mass(pos, config).saturating_sub(1);
            let owner_ok = match cell.owner {
                Color::Neutral => cell.mass == 0,
                Color::Blue | Color::Red => true,
            };
            owner_ok && cell.mass <= max_mass
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CriticalMass;

    #[test]
    fn deserialize_checks_cell_count() {
        let mut board = Board::new(3);
        board.set(Position::new(2, 1), Cell::new(2, Color::Red));
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        let short = json.replacen("\"size\":3", "\"size\":4", 1);
        let err = serde_json::from_str::<Board>(&short).unwrap_err();
        assert!(err.to_string().contains("board of size 4 needs 16 cells, found 9"), "{}", err);

        assert!(serde_json::from_str::<Board>(r#"{"size":0,"cells":[]}"#).is_err());
    }

    #[test]
    fn new_board_is_neutral() {
        let board = Board::new(6);
        assert_eq!(board.size(), 6);
        assert!(board.cells().iter().all(|c| *c == Cell::EMPTY));
        assert_eq!(
            board.tally(),
            Tally {
                blue: 0,
                red: 0,
                neutral: 36
            }
        );
    }

    #[test]
    fn clone_is_independent() {
        let board = Board::new(4);
        let mut copy = board.clone();
        copy.set(Position::new(1, 1), Cell::new(2, Color::Blue));
        assert_eq!(board.cell(Position::new(1, 1)), Cell::EMPTY);
        assert_eq!(copy.cell(Position::new(1, 1)), Cell::new(2, Color::Blue));
    }

    #[test]
    fn bounds() {
        let board = Board::new(4);
        assert!(board.in_bounds(0, 0));
        assert!(board.in_bounds(3, 3));
        assert!(!board.in_bounds(-1, 0));
        assert!(!board.in_bounds(0, 4));
        assert_eq!(board.get(Position::new(4, 0)), None);
        assert!(!board.clone().set(Position::new(0, 9), Cell::EMPTY));
    }

    #[test]
    fn neighbor_counts() {
        let board = Board::new(4);
        assert_eq!(board.neighbors(Position::new(0, 0)).count(), 2);
        assert_eq!(board.neighbors(Position::new(0, 2)).count(), 3);
        assert_eq!(board.neighbors(Position::new(1, 1)).count(), 4);

        let n: Vec<Position> = board.neighbors(Position::new(1, 1)).collect();
        assert_eq!(
            n,
            vec![
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2)
            ]
        );
    }

    #[test]
    fn directions_match_neighbors() {
        let board = Board::new(3);
        assert_eq!(
            board.directions(Position::new(0, 0)),
            vec![Direction::Down, Direction::Right]
        );
        assert_eq!(board.directions(Position::new(1, 1)).len(), 4);
    }

    #[test]
    fn critical_mass_per_class() {
        let board = Board::new(6);
        let config = GameConfig::default().with_critical_mass(CriticalMass::by_neighbors());
        assert_eq!(board.critical_mass(Position::new(0, 0), &config), 2);
        assert_eq!(board.critical_mass(Position::new(0, 3), &config), 3);
        assert_eq!(board.critical_mass(Position::new(3, 3), &config), 4);
    }

    #[test]
    fn tally_counts_owners() {
        let mut board = Board::new(3);
        board.set(Position::new(0, 0), Cell::new(1, Color::Blue));
        board.set(Position::new(1, 1), Cell::new(2, Color::Blue));
        board.set(Position::new(2, 2), Cell::new(1, Color::Red));
        let tally = board.tally();
        assert_eq!(tally.of(Color::Blue), 2);
        assert_eq!(tally.of(Color::Red), 1);
        assert_eq!(tally.of(Color::Neutral), 6);
        assert_eq!(tally.total(), 9);
    }

    #[test]
    fn validate_rejects_malformed_cells() {
        let config = GameConfig::heavy();
        let mut board = Board::new(4);
        assert!(board.validate(&config));

        board.set(Position::new(1, 1), Cell::new(3, Color::Red));
        assert!(board.validate(&config));

        board.set(Position::new(2, 2), Cell::new(1, Color::Neutral));
        assert!(!board.validate(&config));

        board.set(Position::new(2, 2), Cell::new(4, Color::Blue));
        assert!(!board.validate(&config));
    }

    #[test]
    fn from_rows_requires_square() {
        assert!(Board::from_rows(vec![]).is_none());
        assert!(Board::from_rows(vec![vec![Cell::EMPTY; 2], vec![Cell::EMPTY; 3]]).is_none());
        let board = Board::from_rows(vec![vec![Cell::EMPTY; 2]; 2]).unwrap();
        assert_eq!(board.size(), 2);
    }
}
