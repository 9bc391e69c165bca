//! Board representation.
//!
//! Contains the cell, position, and grid types along with the per-color
//! tally that drives win detection and evaluation.

pub mod cell;
pub mod position;
pub mod state;

pub use cell::{Cell, Color};
pub use position::{Direction, Position, PositionClass, ALL_DIRECTIONS};
pub use state::{Board, BoardShapeError, Tally};
