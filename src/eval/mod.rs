//! Position evaluation.
//!
//! Scores a position from one player's perspective using the share of
//! owned cells.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, MAX_SCORE};
