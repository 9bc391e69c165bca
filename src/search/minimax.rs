//! Minimax search with alpha-beta pruning.
//!
//! The search drives the event-free resolver as its transition function and
//! scores leaves with the static evaluation. Forced wins and losses are
//! detected at any depth and score as positive or negative infinity.
//! Root candidates tied at the best score are broken uniformly at random.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::Rng;
use tracing::debug;

use crate::board::{Board, Color, Position, Tally};
use crate::config::GameConfig;
use crate::eval::evaluate;
use crate::movegen::{is_opening, legal_moves};
use crate::resolve::Resolver;
use crate::rules::winner;
use crate::session::GameSession;

use super::opening::opening_move;
use super::{SearchMove, SearchResult};

/// Reusable search state: configuration, a resolver whose buffers are shared
/// by every node, and a node counter.
pub struct Searcher<'a> {
    config: &'a GameConfig,
    resolver: Resolver,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Searcher {
            config,
            resolver: Resolver::new(config.grid_size),
            nodes: 0,
        }
    }

    /// Searches for `player`'s move. `stop` is checked before each root
    /// candidate; an in-flight subtree is never interrupted.
    ///
    /// A depth of zero is treated as one.
    #[allow(clippy::too_many_arguments)]
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        turn: u32,
        tally: &Tally,
        player: Color,
        rng: &mut impl Rng,
        stop: &AtomicBool,
    ) -> SearchResult {
        let start = Instant::now();
        let start_nodes = self.nodes;

        if is_opening(turn) {
            return SearchResult {
                best: opening_move(board, player, rng),
                nodes: 0,
                candidates: 1,
                cancelled: false,
            };
        }

        let moves = legal_moves(board, player, turn);
        if moves.is_empty() {
            return SearchResult {
                best: SearchMove::NONE,
                nodes: 0,
                candidates: 0,
                cancelled: false,
            };
        }

        let depth = depth.max(1);
        let mut best_score = f64::NEG_INFINITY;
        let mut best_moves: Vec<Position> = Vec::new();
        let mut cancelled = false;

        for &pos in &moves {
            if stop.load(Ordering::Relaxed) {
                cancelled = true;
                break;
            }
            let sim = self
                .resolver
                .simulate_fast(board, pos, player, false, self.config);
            let score = self.minimax(
                &sim.board,
                depth - 1,
                false,
                f64::NEG_INFINITY,
                f64::INFINITY,
                turn + 1,
                &sim.tally,
                player,
            );

            if score > best_score || best_moves.is_empty() {
                best_score = score;
                best_moves.clear();
                best_moves.push(pos);
            } else if score == best_score {
                best_moves.push(pos);
            }
        }

        let best = if best_moves.is_empty() {
            // Stopped before any candidate was scored.
            SearchMove {
                position: moves[0],
                score: evaluate(tally, player),
            }
        } else {
            SearchMove {
                position: best_moves[rng.gen_range(0..best_moves.len())],
                score: best_score,
            }
        };

        let nodes = self.nodes - start_nodes;
        debug!(
            player = player.name(),
            depth,
            nodes,
            candidates = moves.len(),
            ties = best_moves.len(),
            score = best.score,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );

        SearchResult {
            best,
            nodes,
            candidates: moves.len(),
            cancelled,
        }
    }

    /// Scores a position for `player` by alpha-beta minimax.
    ///
    /// `maximizing` selects whose turn it is: `player` when true, the
    /// opponent otherwise. Alpha and beta are threaded through siblings.
    #[allow(clippy::too_many_arguments)]
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
        turn: u32,
        tally: &Tally,
        player: Color,
    ) -> f64 {
        self.nodes += 1;

        match winner(turn, tally) {
            Some(w) if w == player => return f64::INFINITY,
            Some(_) => return f64::NEG_INFINITY,
            None => {}
        }
        if depth == 0 {
            return evaluate(tally, player);
        }

        let mover = if maximizing { player } else { player.opponent() };
        let moves = legal_moves(board, mover, turn);
        if moves.is_empty() {
            return evaluate(tally, player);
        }
        let opening = is_opening(turn);

        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for pos in moves {
                let sim = self
                    .resolver
                    .simulate_fast(board, pos, mover, opening, self.config);
                let score =
                    self.minimax(&sim.board, depth - 1, false, alpha, beta, turn + 1, &sim.tally, player);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for pos in moves {
                let sim = self
                    .resolver
                    .simulate_fast(board, pos, mover, opening, self.config);
                let score =
                    self.minimax(&sim.board, depth - 1, true, alpha, beta, turn + 1, &sim.tally, player);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

/// Chooses a move for `player`. Opening turns use the placement heuristic;
/// later turns run a full-width alpha-beta search to `depth` plies.
pub fn choose_move(
    board: &Board,
    depth: u32,
    turn: u32,
    tally: &Tally,
    player: Color,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> SearchMove {
    let stop = AtomicBool::new(false);
    Searcher::new(config)
        .search(board, depth, turn, tally, player, rng, &stop)
        .best
}

/// Chooses a move for the session's current player.
pub fn choose_move_for(
    session: &GameSession,
    depth: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> SearchMove {
    choose_move(
        &session.board,
        depth,
        session.turn,
        &session.tally,
        session.current_player,
        config,
        rng,
    )
}
