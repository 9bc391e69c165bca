//! Wavefront chain resolver.
//!
//! One resolution loop, generic over an `ExplosionSink`, serves both the
//! recording and the event-free variants. A `Resolver` owns its queue buffers
//! and membership bitmap and can be reused across calls.

use std::mem;

use crate::board::{Board, Cell, Color, Position, ALL_DIRECTIONS};
use crate::config::GameConfig;

use super::event::{ExplosionEvent, FastSimulation, Resolution, SimulationResult};

/// Receives detonations as they happen.
pub trait ExplosionSink {
    /// Called with the board as it was just before `pos` detonated.
    fn record(&mut self, board: &Board, pos: Position, color: Color, step: u32);
}

impl ExplosionSink for Vec<ExplosionEvent> {
    fn record(&mut self, board: &Board, pos: Position, color: Color, step: u32) {
        self.push(ExplosionEvent {
            position: pos,
            directions: board.directions(pos),
            color,
            step,
        });
    }
}

/// Sink that ignores every detonation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl ExplosionSink for Discard {
    #[inline(always)]
    fn record(&mut self, _board: &Board, _pos: Position, _color: Color, _step: u32) {}
}

/// Reusable chain-reaction resolver.
#[derive(Debug, Default)]
pub struct Resolver {
    batch: Vec<Position>,
    next: Vec<Position>,
    /// Membership of `next`, indexed by `Position::index`.
    queued: Vec<bool>,
}

impl Resolver {
    /// Creates a resolver with buffers sized for a board of side `size`.
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        Resolver {
            batch: Vec::with_capacity(cells),
            next: Vec::with_capacity(cells),
            queued: vec![false; cells],
        }
    }

    /// Places a unit on `board` in place and resolves every resulting
    /// explosion, reporting detonations to `sink`.
    ///
    /// `pos` must be on the board and `player` must not be Neutral; legality
    /// of the placement is the caller's concern.
    pub fn resolve<S: ExplosionSink>(
        &mut self,
        board: &mut Board,
        pos: Position,
        player: Color,
        opening: bool,
        config: &GameConfig,
        sink: &mut S,
    ) -> Resolution {
        debug_assert!(player.is_player(), "placement by neutral color");
        let size = board.size();
        self.reset(size * size);

        let cell = board.cell_mut(pos);
        if opening {
            *cell = Cell::new(config.opening_mass, player);
        } else {
            cell.mass += 1;
            cell.owner = player;
        }
        if board.cell(pos).mass >= board.critical_mass(pos, config) {
            self.next.push(pos);
        }

        let mut steps_used = 0u32;
        while !self.next.is_empty() && steps_used < config.max_chain_steps {
            mem::swap(&mut self.batch, &mut self.next);
            for p in &self.batch {
                self.queued[p.index(size)] = false;
            }

            let mut detonated = false;
            for i in 0..self.batch.len() {
                let p = self.batch[i];
                let cell = board.cell(p);
                if cell.mass < board.critical_mass(p, config) {
                    continue;
                }
                detonated = true;
                let color = cell.owner;
                sink.record(board, p, color, steps_used);
                *board.cell_mut(p) = Cell::EMPTY;

                for n in ALL_DIRECTIONS.iter().filter_map(|&d| p.step(d, size)) {
                    let target = board.cell_mut(n);
                    target.mass += 1;
                    target.owner = color;
                    let mass = target.mass;
                    let idx = n.index(size);
                    if mass >= board.critical_mass(n, config) && !self.queued[idx] {
                        self.queued[idx] = true;
                        self.next.push(n);
                    }
                }
            }
            self.batch.clear();

            if detonated {
                steps_used += 1;
            }
        }

        let settled = !self
            .next
            .iter()
            .any(|&p| board.cell(p).mass >= board.critical_mass(p, config));

        Resolution {
            steps_used,
            settled,
        }
    }

    /// Full placement on a copy of `board`, recording explosion events.
    pub fn simulate(
        &mut self,
        board: &Board,
        pos: Position,
        player: Color,
        opening: bool,
        config: &GameConfig,
    ) -> SimulationResult {
        let mut work = board.clone();
        let mut events = Vec::new();
        let resolution = self.resolve(&mut work, pos, player, opening, config, &mut events);
        let tally = work.tally();
        SimulationResult {
            board: work,
            events,
            tally,
            steps_used: resolution.steps_used,
            settled: resolution.settled,
        }
    }

    /// Event-free placement on a copy of `board`.
    pub fn simulate_fast(
        &mut self,
        board: &Board,
        pos: Position,
        player: Color,
        opening: bool,
        config: &GameConfig,
    ) -> FastSimulation {
        let mut work = board.clone();
        self.resolve(&mut work, pos, player, opening, config, &mut Discard);
        let tally = work.tally();
        FastSimulation { board: work, tally }
    }

    fn reset(&mut self, cells: usize) {
        self.batch.clear();
        self.next.clear();
        self.queued.clear();
        self.queued.resize(cells, false);
    }
}

/// Applies a placement and resolves its chain reaction, recording events.
/// Does not modify `board`.
pub fn apply_placement(
    board: &Board,
    pos: Position,
    player: Color,
    opening: bool,
    config: &GameConfig,
) -> SimulationResult {
    Resolver::new(board.size()).simulate(board, pos, player, opening, config)
}

/// Same state transition as `apply_placement` without event bookkeeping.
pub fn apply_placement_fast(
    board: &Board,
    pos: Position,
    player: Color,
    opening: bool,
    config: &GameConfig,
) -> FastSimulation {
    Resolver::new(board.size()).simulate_fast(board, pos, player, opening, config)
}
