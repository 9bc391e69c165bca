//! Resolution outputs: explosion events and simulation results.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Direction, Position, Tally};

/// One cell's detonation, recorded for animation pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionEvent {
    pub position: Position,
    /// Outward edges that lead to an in-bounds neighbor.
    pub directions: Vec<Direction>,
    /// Owner of the cell just before it detonated.
    pub color: Color,
    /// Zero-based wavefront the detonation belongs to.
    pub step: u32,
}

/// Step accounting for one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Batches processed that contained at least one detonation.
    pub steps_used: u32,
    /// False when the step budget ran out with cells still at critical mass.
    pub settled: bool,
}

/// Full result of a placement, including explosion events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub board: Board,
    pub events: Vec<ExplosionEvent>,
    pub tally: Tally,
    pub steps_used: u32,
    pub settled: bool,
}

/// Result of the event-free placement used by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastSimulation {
    pub board: Board,
    pub tally: Tally,
}
