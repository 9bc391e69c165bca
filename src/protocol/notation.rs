//! Compact board notation.
//!
//! A board is written row by row, top to bottom, rows separated by `/` and
//! cells by `,`. A neutral cell is `.`; an owned cell is its color letter
//! (`b` or `r`) followed by its decimal mass.
//!
//! Example 3x3 board: `.,b1,./.,r2,./.,.,.`

use crate::board::{Board, Cell, Color};

/// Errors that can occur while parsing board notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("board notation is empty")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid color character: '{0}'")]
    InvalidColor(char),

    #[error("invalid mass in cell '{0}'")]
    InvalidMass(String),

    #[error("owned cell '{0}' must have positive mass")]
    ZeroMass(String),

    #[error("empty cell entry in row {0}")]
    EmptyCell(usize),
}

/// Encodes a board in notation form.
pub fn encode_board(board: &Board) -> String {
    let rows: Vec<String> = board
        .rows()
        .map(|row| {
            row.iter()
                .map(|&cell| encode_cell(cell))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    rows.join("/")
}

fn encode_cell(cell: Cell) -> String {
    match cell.owner {
        Color::Neutral => ".".to_string(),
        owner => format!("{}{}", owner.notation_char(), cell.mass),
    }
}

/// Parses a board from notation form. The row count sets the board size.
pub fn parse_board(s: &str) -> Result<Board, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::Empty);
    }

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (r, row_str) in s.split('/').enumerate() {
        let row = row_str
            .split(',')
            .map(|entry| parse_cell(entry.trim(), r))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    let expected = rows.len();
    if let Some((row, cells)) = rows.iter().enumerate().find(|(_, c)| c.len() != expected) {
        return Err(NotationError::RaggedRow {
            row,
            expected,
            got: cells.len(),
        });
    }

    Board::from_rows(rows).ok_or(NotationError::Empty)
}

fn parse_cell(entry: &str, row: usize) -> Result<Cell, NotationError> {
    let mut chars = entry.chars();
    let color_char = chars.next().ok_or(NotationError::EmptyCell(row))?;
    let color = Color::from_notation_char(color_char).ok_or(NotationError::InvalidColor(color_char))?;
    let mass_str = chars.as_str();

    if color == Color::Neutral {
        if mass_str.is_empty() || mass_str == "0" {
            return Ok(Cell::EMPTY);
        }
        return Err(NotationError::InvalidMass(entry.to_string()));
    }

    let mass: u32 = mass_str
        .parse()
        .map_err(|_| NotationError::InvalidMass(entry.to_string()))?;
    if mass == 0 {
        return Err(NotationError::ZeroMass(entry.to_string()));
    }
    Ok(Cell::new(mass, color))
}
