//! Engine state management.
//!
//! Holds the current session, game options, and search defaults, and
//! answers protocol commands by writing response lines to the given writer.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::board::Color;
use crate::config::{ConfigError, CriticalMass, Difficulty, GameConfig};
use crate::protocol::{encode_board, parse_board, GoParams, NotationError};
use crate::rules::{winner, Move, MoveError};
use crate::search::Searcher;
use crate::session::{GameSession, Status};

/// Search depth used by `go` when neither depth nor difficulty is given.
pub const DEFAULT_DEPTH: u32 = Difficulty::Medium.depth();

/// Errors reported back to the controller as `error <message>` lines.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("option {name} needs a non-negative integer value, got '{value}'")]
    InvalidValue { name: String, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid board: {0}")]
    Notation(#[from] NotationError),

    #[error("board does not fit the configured critical masses")]
    UnsettledBoard,

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub session: GameSession,
    pub config: GameConfig,
    pub depth: u32,
    rng: SmallRng,
    stop: Arc<AtomicBool>,
}

impl Engine {
    /// Creates an engine with the default rules and a fresh session.
    pub fn new() -> Self {
        Engine::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Engine {
            session: GameSession::new(&config),
            config,
            depth: DEFAULT_DEPTH,
            rng: SmallRng::from_entropy(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts a new match with the current options.
    pub fn new_game(&mut self) {
        self.session = GameSession::reset(&self.config);
    }

    /// Sets an engine option. Rule options are validated as a whole and
    /// start a new match; `Seed` and `Depth` leave the match alone.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), EngineError> {
        let key = name.to_ascii_lowercase();
        let raw = value.unwrap_or("");

        if key == "seed" {
            let seed = raw.parse::<u64>().map_err(|_| invalid_value(name, raw))?;
            self.rng = SmallRng::seed_from_u64(seed);
            debug!(seed, "rng reseeded");
            return Ok(());
        }

        let v = raw.parse::<u32>().map_err(|_| invalid_value(name, raw))?;
        if key == "depth" {
            self.depth = v.max(1);
            return Ok(());
        }

        let mut config = self.config;
        match key.as_str() {
            "gridsize" => config.grid_size = v as usize,
            "criticalmass" => config.critical_mass = CriticalMass::uniform(v),
            "cornermass" => config.critical_mass.corner = v,
            "edgemass" => config.critical_mass.edge = v,
            "centermass" => config.critical_mass.center = v,
            "openingmass" => config.opening_mass = v,
            "maxchainsteps" => config.max_chain_steps = v,
            _ => return Err(EngineError::UnknownOption(name.to_string())),
        }
        config.validate()?;

        debug!(option = name, value = v, "option set");
        self.config = config;
        self.new_game();
        Ok(())
    }

    /// Loads a position. The board's size replaces the configured grid size;
    /// every cell must hold less than its critical mass.
    pub fn set_position(&mut self, turn: u32, player: Color, notation: &str) -> Result<(), EngineError> {
        let board = parse_board(notation)?;
        let config = self.config.with_grid_size(board.size());
        config.validate()?;
        if !board.validate(&config) {
            return Err(EngineError::UnsettledBoard);
        }

        let tally = board.tally();
        let winner = winner(turn, &tally);
        self.config = config;
        self.session = GameSession {
            grid_size: board.size(),
            board,
            turn,
            current_player: player,
            status: if winner.is_some() {
                Status::Over
            } else {
                Status::Playing
            },
            tally,
            winner,
        };
        info!(turn, player = player.name(), "position loaded");
        Ok(())
    }

    /// Requests that an in-progress search stop before its next root move.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Discards a stop request that no search consumed.
    pub fn clear_stop(&self) {
        self.stop.store(false, Ordering::Relaxed);
    }

    /// Shared handle to the stop flag, for setting it from another thread
    /// while `handle_go` runs.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Handles the handshake: writes id, options, and `cciok`.
    pub fn handle_cci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let d = GameConfig::default();
        writeln!(out, "id name chroma-clash")?;
        writeln!(out, "id author chroma-clash developers")?;
        writeln!(
            out,
            "option name GridSize type spin default {} min 2 max 32",
            d.grid_size
        )?;
        writeln!(
            out,
            "option name CriticalMass type spin default {} min 1 max 64",
            d.critical_mass.center
        )?;
        for class in ["CornerMass", "EdgeMass", "CenterMass"] {
            writeln!(out, "option name {} type spin min 1 max 64", class)?;
        }
        writeln!(
            out,
            "option name OpeningMass type spin default {} min 1 max 64",
            d.opening_mass
        )?;
        writeln!(
            out,
            "option name MaxChainSteps type spin default {} min 1 max 100000",
            d.max_chain_steps
        )?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max 12",
            DEFAULT_DEPTH
        )?;
        writeln!(out, "option name Seed type string")?;
        writeln!(out, "cciok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Plays a move for the side to move and reports the outcome.
    pub fn handle_move<W: Write>(&mut self, row: i64, col: i64, out: &mut W) -> io::Result<()> {
        let mv = Move::new(row, col, self.session.current_player);
        match self.session.apply_move(mv, &self.config) {
            Ok(outcome) => {
                let result = &outcome.result;
                writeln!(
                    out,
                    "info move {} {} explosions {} steps {} settled {}",
                    row,
                    col,
                    result.events.len(),
                    result.steps_used,
                    result.settled
                )?;
                self.session = outcome.session;
                if let Some(w) = self.session.winner {
                    writeln!(out, "gameover winner {}", w.name())?;
                }
            }
            Err(e) => writeln!(out, "error {}", EngineError::from(e))?,
        }
        out.flush()
    }

    /// Searches for the side to move and writes `bestmove <row> <col> score <s>`.
    ///
    /// A pending stop request cancels the search at its next root candidate
    /// and is consumed when the search returns.
    pub fn handle_go<W: Write>(&mut self, params: GoParams, out: &mut W) -> io::Result<()> {
        if self.session.status != Status::Playing {
            writeln!(out, "error {}", MoveError::GameNotActive)?;
            return out.flush();
        }

        let depth = params.depth_or(self.depth);
        let session = &self.session;
        let mut searcher = Searcher::new(&self.config);
        let result = searcher.search(
            &session.board,
            depth,
            session.turn,
            &session.tally,
            session.current_player,
            &mut self.rng,
            &self.stop,
        );
        self.stop.store(false, Ordering::Relaxed);

        write!(
            out,
            "info depth {} nodes {} candidates {}",
            depth, result.nodes, result.candidates
        )?;
        if result.cancelled {
            write!(out, " cancelled")?;
        }
        writeln!(out)?;

        if result.has_move() {
            let best = result.best;
            writeln!(
                out,
                "bestmove {} {} score {}",
                best.position.row, best.position.col, best.score
            )?;
        } else {
            writeln!(out, "error {}", MoveError::NoLegalMoves)?;
        }
        out.flush()
    }

    pub fn handle_pause<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.session = self.session.pause();
        self.write_status(out)?;
        out.flush()
    }

    pub fn handle_resume<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.session = self.session.resume();
        self.write_status(out)?;
        out.flush()
    }

    /// Writes `board <notation>` followed by the status line.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "board {}", encode_board(&self.session.board))?;
        self.write_status(out)?;
        out.flush()
    }

    fn write_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let s = &self.session;
        let status = match s.status {
            Status::Playing => "playing",
            Status::Paused => "paused",
            Status::Over => "over",
        };
        write!(
            out,
            "status {} turn {} player {} blue {} red {} neutral {}",
            status,
            s.turn,
            s.current_player.name(),
            s.tally.blue,
            s.tally.red,
            s.tally.neutral
        )?;
        if let Some(w) = s.winner {
            write!(out, " winner {}", w.name())?;
        }
        writeln!(out)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

fn invalid_value(name: &str, value: &str) -> EngineError {
    EngineError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}
