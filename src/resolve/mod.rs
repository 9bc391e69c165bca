//! Chain-reaction resolution.
//!
//! Applies a single placement and resolves the resulting explosions
//! breadth-first, one wavefront per step, until the board settles or the
//! configured step budget runs out.

pub mod chain;
pub mod event;

pub use chain::{apply_placement, apply_placement_fast, Discard, ExplosionSink, Resolver};
pub use event::{ExplosionEvent, FastSimulation, Resolution, SimulationResult};
