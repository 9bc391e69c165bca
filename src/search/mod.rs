//! Adversarial move search.
//!
//! Chooses moves for the automated opponent: a placement heuristic for the
//! opening, then minimax with alpha-beta pruning over simulated futures.

pub mod minimax;
pub mod opening;

use serde::{Deserialize, Serialize};

use crate::board::Position;

pub use minimax::{choose_move, choose_move_for, Searcher};
pub use opening::opening_move;

/// A chosen placement and its search score.
///
/// Scores are in `[-100, 100]` for heuristic values, or infinite when a
/// forced win or loss was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchMove {
    pub position: Position,
    pub score: f64,
}

impl SearchMove {
    /// Returned when the searching player has no legal move.
    pub const NONE: SearchMove = SearchMove {
        position: Position::new(0, 0),
        score: f64::NEG_INFINITY,
    };

    /// Returns true for the no-move sentinel. A real move whose every line
    /// loses also scores negative infinity; use `SearchResult::candidates`
    /// to tell the two apart when that matters.
    pub fn is_sentinel(&self) -> bool {
        *self == SearchMove::NONE
    }
}

/// Result of a search: the chosen move plus diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best: SearchMove,
    /// Interior and leaf nodes visited below the root.
    pub nodes: u64,
    /// Number of legal root moves considered.
    pub candidates: usize,
    /// True if the stop flag cut the root loop short.
    pub cancelled: bool,
}

impl SearchResult {
    /// Returns false when the searching player had no legal move.
    pub fn has_move(&self) -> bool {
        self.candidates > 0
    }
}
