//! Move validation and win detection.

use serde::{Deserialize, Serialize};

use crate::board::{Color, Tally};
use crate::movegen::is_opening;
use crate::session::{GameSession, Status};

/// A placement request. Coordinates are signed so that off-board input can be
/// rejected as `OutOfBounds` rather than failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: i64,
    pub col: i64,
    pub player: Color,
}

impl Move {
    pub const fn new(row: i64, col: i64, player: Color) -> Self {
        Move { row, col, player }
    }
}

/// Reasons a move is rejected. None of these are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum MoveError {
    #[error("cell position is outside the grid")]
    OutOfBounds,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("cell cannot be selected in the current phase")]
    InvalidCell,

    #[error("game is not in playing state")]
    GameNotActive,

    #[error("no legal moves available")]
    NoLegalMoves,
}

/// Checks a move against the session, in order: status, turn, bounds, cell.
pub fn validate_move(session: &GameSession, mv: &Move) -> Result<(), MoveError> {
    if session.status != Status::Playing {
        return Err(MoveError::GameNotActive);
    }
    if mv.player != session.current_player {
        return Err(MoveError::NotYourTurn);
    }
    let pos = session
        .board
        .position(mv.row, mv.col)
        .ok_or(MoveError::OutOfBounds)?;
    let owner = session.board.cell(pos).owner;

    let allowed = if is_opening(session.turn) {
        owner == Color::Neutral
    } else {
        owner == mv.player
    };
    if allowed {
        Ok(())
    } else {
        Err(MoveError::InvalidCell)
    }
}

/// Returns the winner, if any. A player wins once the opponent owns no
/// cells; no one can win before both opening placements are made.
pub fn winner(turn: u32, tally: &Tally) -> Option<Color> {
    if is_opening(turn) {
        return None;
    }
    match (tally.blue, tally.red) {
        (b, 0) if b > 0 => Some(Color::Blue),
        (0, r) if r > 0 => Some(Color::Red),
        _ => None,
    }
}

/// Two-color alternation. Neutral maps to itself.
pub const fn next_player(current: Color) -> Color {
    current.opponent()
}
