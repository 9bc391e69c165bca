//! Legal move generation.
//!
//! During the opening phase (the first two turns) a player may claim any
//! neutral cell. Afterwards a player may only add mass to cells they own.

use rand::Rng;

use crate::board::{Board, Color, Position};

/// Number of turns that make up the opening phase, one per player.
pub const OPENING_TURNS: u32 = 2;

/// Returns true while players are still making their opening placements.
#[inline]
pub const fn is_opening(turn: u32) -> bool {
    turn < OPENING_TURNS
}

/// Returns true if `player` may place on `cell` at the given turn.
#[inline]
fn selectable(owner: Color, player: Color, turn: u32) -> bool {
    if is_opening(turn) {
        owner == Color::Neutral
    } else {
        owner == player
    }
}

/// Enumerates every legal placement for `player`, in row-major order.
pub fn legal_moves(board: &Board, player: Color, turn: u32) -> Vec<Position> {
    board
        .positions()
        .filter(|&pos| selectable(board.cell(pos).owner, player, turn))
        .collect()
}

/// Short-circuiting form of `!legal_moves(..).is_empty()`.
pub fn has_legal_moves(board: &Board, player: Color, turn: u32) -> bool {
    board
        .cells()
        .iter()
        .any(|cell| selectable(cell.owner, player, turn))
}

/// Picks one legal placement uniformly at random.
pub fn random_move(board: &Board, player: Color, turn: u32, rng: &mut impl Rng) -> Option<Position> {
    let moves = legal_moves(board, player, turn);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.gen_range(0..moves.len())])
}
