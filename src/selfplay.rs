//! Self-play match generation.
//!
//! Plays engine-vs-engine matches, each side searching at its own depth, and
//! records every move with its search score and chain-reaction statistics.
//! Records are written as JSON lines for offline analysis.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{Color, Position, Tally};
use crate::config::GameConfig;
use crate::movegen::random_move;
use crate::protocol::encode_board;
use crate::rules::Move;
use crate::search::Searcher;
use crate::session::{GameSession, Status};

/// Configuration for self-play match generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_games: usize,
    /// Search depth for Blue.
    pub blue_depth: u32,
    /// Search depth for Red.
    pub red_depth: u32,
    /// Turn limit after which a match is recorded as unfinished.
    pub max_turns: u32,
    /// Probability of replacing a searched move with a random legal one.
    /// Opening placements are never replaced.
    pub exploration: f64,
    /// Number of parallel threads for concurrent matches.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-match progress logging.
    pub quiet: bool,
    /// Rules every match is played under.
    pub game: GameConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            blue_depth: 2,
            red_depth: 2,
            max_turns: 200,
            exploration: 0.0,
            threads: 4,
            seed: 0,
            quiet: false,
            game: GameConfig::default(),
        }
    }
}

/// One recorded move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn number before the move was applied.
    pub turn: u32,
    pub player: Color,
    pub position: Position,
    /// True if the move was drawn at random instead of searched.
    pub explored: bool,
    /// Search score, or `None` for an exploration move. Forced wins and
    /// losses are infinite and serialize as JSON `null`, so a record read
    /// back from JSON tells them apart from exploration by `explored`.
    pub score: Option<f64>,
    pub explosions: usize,
    pub steps: u32,
    pub settled: bool,
    /// Cell counts after the move.
    pub tally: Tally,
}

/// A complete self-play match record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub moves: Vec<MoveRecord>,
    /// The winner, or `None` if the turn limit was reached first.
    pub winner: Option<Color>,
    pub turns: u32,
    pub final_tally: Tally,
    /// Final board in protocol notation.
    pub final_board: String,
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays a single match and returns its record.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let rules = &config.game;
    let mut session = GameSession::new(rules);
    let mut searcher = Searcher::new(rules);
    let stop = AtomicBool::new(false);
    let mut moves: Vec<MoveRecord> = Vec::new();

    while session.status == Status::Playing && session.turn < config.max_turns {
        let player = session.current_player;
        let depth = match player {
            Color::Red => config.red_depth,
            _ => config.blue_depth,
        };

        let explore = config.exploration > 0.0
            && !session.is_opening()
            && rng.gen::<f64>() < config.exploration;
        let choice = if explore {
            random_move(&session.board, player, session.turn, rng).map(|p| (p, true, None))
        } else {
            let result = searcher.search(
                &session.board,
                depth,
                session.turn,
                &session.tally,
                player,
                rng,
                &stop,
            );
            result
                .has_move()
                .then_some((result.best.position, false, Some(result.best.score)))
        };

        let (position, explored, score) = match choice {
            Some(c) => c,
            None => {
                warn!(game_id, turn = session.turn, player = player.name(), "no legal move");
                break;
            }
        };

        let mv = Move::new(position.row as i64, position.col as i64, player);
        let outcome = match session.apply_move(mv, rules) {
            Ok(o) => o,
            Err(e) => {
                warn!(game_id, turn = session.turn, error = %e, "move rejected");
                break;
            }
        };

        moves.push(MoveRecord {
            turn: session.turn,
            player,
            position,
            explored,
            score,
            explosions: outcome.result.events.len(),
            steps: outcome.result.steps_used,
            settled: outcome.result.settled,
            tally: outcome.result.tally,
        });
        session = outcome.session;
    }

    GameRecord {
        game_id,
        moves,
        winner: session.winner,
        turns: session.turn,
        final_tally: session.tally,
        final_board: encode_board(&session.board),
    }
}

/// Runs self-play generation, producing `num_games` records ordered by id.
///
/// When `config.threads > 1`, matches are played concurrently using rayon.
/// Each match draws from its own seeded generator, so a fixed seed yields
/// the same records regardless of thread count.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs self-play generation, calling `on_game` with each completed record
/// in completion order.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, start: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w.name()),
        None => "unfinished".to_string(),
    };
    info!(
        "game {}/{}: {} after {} turns ({:.2}s)",
        n,
        config.num_games,
        outcome,
        game.turns,
        start.elapsed().as_secs_f64()
    );
}

fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let start = Instant::now();
        let mut rng = game_rng(config, i);
        let game = play_game(config, i, &mut rng);
        log_game(config, i + 1, &game, start);
        on_game(game);
    }
}

/// Plays matches on a rayon pool and delivers them to `on_game` on the
/// calling thread through a channel.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "failed to build thread pool, playing sequentially");
            return run_self_play_sequential(config, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|s| {
        s.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let start = Instant::now();
                        let mut rng = game_rng(config, i);
                        let game = play_game(config, i, &mut rng);
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(config, n, &game, start);
                        let _ = tx.send(game);
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// Writes records as JSONL (one JSON object per match, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results over a set of matches.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub games: usize,
    pub blue_wins: usize,
    pub red_wins: usize,
    pub unfinished: usize,
    pub avg_turns: f64,
    /// Moves whose chain reaction hit the step budget.
    pub truncated_chains: usize,
}

/// Tallies wins and averages over a set of records.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut total_turns = 0u64;

    for game in games {
        total_turns += u64::from(game.turns);
        match game.winner {
            Some(Color::Blue) => summary.blue_wins += 1,
            Some(Color::Red) => summary.red_wins += 1,
            _ => summary.unfinished += 1,
        }
        summary.truncated_chains += game.moves.iter().filter(|m| !m.settled).count();
    }

    summary.avg_turns = total_turns as f64 / games.len().max(1) as f64;
    summary
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: usize| 100.0 * n as f64 / self.games.max(1) as f64;
        writeln!(f, "=== Self-Play Summary ===")?;
        writeln!(f, "Games: {}", self.games)?;
        writeln!(f, "Avg turns/game: {:.1}", self.avg_turns)?;
        writeln!(f, "Blue wins: {} ({:.1}%)", self.blue_wins, pct(self.blue_wins))?;
        writeln!(f, "Red wins: {} ({:.1}%)", self.red_wins, pct(self.red_wins))?;
        writeln!(f, "Unfinished: {}", self.unfinished)?;
        write!(f, "Truncated chains: {}", self.truncated_chains)
    }
}
