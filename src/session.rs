//! Game session: turn sequencing over immutable state values.
//!
//! Every accepted move, pause, or resume yields a new `GameSession`; the
//! input value is never modified, so older values stay valid for readers.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Color, Tally};
use crate::config::GameConfig;
use crate::movegen::is_opening;
use crate::resolve::{apply_placement, SimulationResult};
use crate::rules::{next_player, validate_move, winner, Move, MoveError};

/// The color that makes the first opening placement.
pub const FIRST_PLAYER: Color = Color::Blue;

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Paused,
    Over,
}

/// Complete state of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub board: Board,
    /// Number of moves accepted so far.
    pub turn: u32,
    pub current_player: Color,
    pub status: Status,
    pub tally: Tally,
    pub winner: Option<Color>,
    pub grid_size: usize,
}

/// An accepted move: the successor session and the placement's resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub session: GameSession,
    pub result: SimulationResult,
}

impl GameSession {
    /// Creates a fresh session on an empty board.
    pub fn new(config: &GameConfig) -> Self {
        let board = Board::new(config.grid_size);
        let tally = board.tally();
        GameSession {
            board,
            turn: 0,
            current_player: FIRST_PLAYER,
            status: Status::Playing,
            tally,
            winner: None,
            grid_size: config.grid_size,
        }
    }

    /// Discards any match in progress. Equivalent to `new`.
    pub fn reset(config: &GameConfig) -> Self {
        info!(grid_size = config.grid_size, "session reset");
        GameSession::new(config)
    }

    /// Returns true while the opening placements are being made.
    pub fn is_opening(&self) -> bool {
        is_opening(self.turn)
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Over
    }

    /// Validates and applies a move, returning the successor session.
    pub fn apply_move(&self, mv: Move, config: &GameConfig) -> Result<MoveOutcome, MoveError> {
        validate_move(self, &mv)?;
        let pos = self
            .board
            .position(mv.row, mv.col)
            .ok_or(MoveError::OutOfBounds)?;

        let result = apply_placement(&self.board, pos, mv.player, self.is_opening(), config);
        if !result.settled {
            warn!(
                turn = self.turn,
                steps = result.steps_used,
                "chain reaction truncated at step budget"
            );
        }

        let turn = self.turn + 1;
        let winner = winner(turn, &result.tally);
        let (status, current_player) = match winner {
            Some(w) => {
                info!(winner = w.name(), turn, "game over");
                (Status::Over, self.current_player)
            }
            None => (Status::Playing, next_player(self.current_player)),
        };
        debug!(
            player = mv.player.name(),
            row = pos.row,
            col = pos.col,
            explosions = result.events.len(),
            steps = result.steps_used,
            "move applied"
        );

        let session = GameSession {
            board: result.board.clone(),
            turn,
            current_player,
            status,
            tally: result.tally,
            winner,
            grid_size: self.grid_size,
        };
        Ok(MoveOutcome { session, result })
    }

    /// Pauses a playing session. Any other status is returned unchanged.
    pub fn pause(&self) -> GameSession {
        let mut next = self.clone();
        if next.status == Status::Playing {
            next.status = Status::Paused;
        }
        next
    }

    /// Resumes a paused session. Any other status is returned unchanged.
    pub fn resume(&self) -> GameSession {
        let mut next = self.clone();
        if next.status == Status::Paused {
            next.status = Status::Playing;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Position};

    fn play(session: &GameSession, row: i64, col: i64, config: &GameConfig) -> GameSession {
        let mv = Move::new(row, col, session.current_player);
        session.apply_move(mv, config).unwrap().session
    }

    #[test]
    fn new_session_defaults() {
        let config = GameConfig::default();
        let session = GameSession::new(&config);
        assert_eq!(session.turn, 0);
        assert_eq!(session.current_player, Color::Blue);
        assert_eq!(session.status, Status::Playing);
        assert_eq!(session.winner, None);
        assert_eq!(session.tally.neutral, 36);
        assert_eq!(session.grid_size, 6);
    }

    #[test]
    fn opening_moves_alternate_players() {
        let config = GameConfig::default();
        let s0 = GameSession::new(&config);
        let s1 = play(&s0, 1, 1, &config);
        assert_eq!(s1.turn, 1);
        assert_eq!(s1.current_player, Color::Red);
        assert_eq!(s1.board.cell(Position::new(1, 1)), Cell::new(1, Color::Blue));

        let s2 = play(&s1, 4, 4, &config);
        assert_eq!(s2.turn, 2);
        assert_eq!(s2.current_player, Color::Blue);
        assert_eq!(s2.status, Status::Playing);
        assert_eq!(s2.tally.blue, 1);
        assert_eq!(s2.tally.red, 1);

        // Input sessions are untouched.
        assert_eq!(s0.turn, 0);
        assert_eq!(s1.board.cell(Position::new(4, 4)), Cell::EMPTY);
    }

    #[test]
    fn rejected_move_returns_error() {
        let config = GameConfig::default();
        let s0 = GameSession::new(&config);
        assert_eq!(
            s0.apply_move(Move::new(0, 0, Color::Red), &config),
            Err(MoveError::NotYourTurn)
        );
        assert_eq!(
            s0.apply_move(Move::new(9, 0, Color::Blue), &config),
            Err(MoveError::OutOfBounds)
        );
    }

    #[test]
    fn capture_of_last_cell_ends_game() {
        let config = GameConfig::heavy().with_grid_size(4);
        let mut session = GameSession::new(&config);
        session.turn = 2;
        session.board.set(Position::new(1, 1), Cell::new(3, Color::Blue));
        session.board.set(Position::new(1, 2), Cell::new(1, Color::Red));
        session.tally = session.board.tally();

        let outcome = session
            .apply_move(Move::new(1, 1, Color::Blue), &config)
            .unwrap();
        let next = outcome.session;
        assert_eq!(next.winner, Some(Color::Blue));
        assert_eq!(next.status, Status::Over);
        assert_eq!(next.current_player, Color::Blue);
        assert_eq!(next.turn, 3);
        assert_eq!(outcome.result.events.len(), 1);

        assert_eq!(
            next.apply_move(Move::new(0, 1, Color::Blue), &config),
            Err(MoveError::GameNotActive)
        );
    }

    #[test]
    fn pause_and_resume() {
        let config = GameConfig::default();
        let session = GameSession::new(&config);
        let paused = session.pause();
        assert_eq!(paused.status, Status::Paused);
        assert_eq!(paused.pause(), paused);
        let resumed = paused.resume();
        assert_eq!(resumed.status, Status::Playing);
        assert_eq!(resumed.resume(), resumed);
        assert_eq!(session.status, Status::Playing);
    }

    #[test]
    fn pause_and_resume_ignore_finished_game() {
        let config = GameConfig::default();
        let mut session = GameSession::new(&config);
        session.status = Status::Over;
        assert_eq!(session.pause(), session);
        assert_eq!(session.resume(), session);
    }

    #[test]
    fn reset_matches_new() {
        let config = GameConfig::heavy().with_grid_size(5);
        let played = play(&GameSession::new(&config), 2, 2, &config);
        let reset = GameSession::reset(&config);
        assert_ne!(played, reset);
        assert_eq!(reset, GameSession::new(&config));
    }

    #[test]
    fn session_serializes() {
        let config = GameConfig::default().with_grid_size(3);
        let session = play(&GameSession::new(&config), 1, 1, &config);
        let json = serde_json::to_string(&session).unwrap();
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
