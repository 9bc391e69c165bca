//! Engine command parser.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.

use tracing::warn;

use crate::board::Color;
use crate::config::Difficulty;

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub difficulty: Option<Difficulty>,
}

impl GoParams {
    /// Resolves the requested search depth. An explicit depth wins over a
    /// difficulty tier; with neither, `default` is used.
    pub fn depth_or(&self, default: u32) -> u32 {
        self.depth
            .or(self.difficulty.map(Difficulty::depth))
            .unwrap_or(default)
    }
}

/// A parsed controller-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Cci,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new match with the current options.
    NewGame,

    /// Load a position: `position <turn> <player> <board>`.
    Position {
        turn: u32,
        player: Color,
        board: String,
    },

    /// Play a move for the side to move: `move <row> <col>`.
    Move { row: i64, col: i64 },

    /// Search for a move for the side to move.
    Go(GoParams),

    /// Pause the current match.
    Pause,

    /// Resume a paused match.
    Resume,

    /// Print the current board and status.
    Show,

    /// Interrupt the current search.
    Stop,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "cci" => Some(Command::Cci),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "pause" => Some(Command::Pause),
        "resume" => Some(Command::Resume),
        "show" => Some(Command::Show),
        "stop" => Some(Command::Stop),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "move" => parse_move(&tokens),
        "go" => parse_go(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");
    let (name_parts, value_parts) = match value_idx {
        Some(vi) => (&tokens[2..vi], &tokens[vi + 1..]),
        None => (&tokens[2..], &tokens[tokens.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `position <turn> <player> <board>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        warn!("malformed position: expected 'position <turn> <player> <board>'");
        return None;
    }
    let turn = match tokens[1].parse::<u32>() {
        Ok(t) => t,
        Err(_) => {
            warn!("invalid turn value: '{}'", tokens[1]);
            return None;
        }
    };
    let player = match Color::parse_player(tokens[2]) {
        Some(p) => p,
        None => {
            warn!("unknown player: '{}'", tokens[2]);
            return None;
        }
    };
    Some(Command::Position {
        turn,
        player,
        board: tokens[3].to_string(),
    })
}

/// Parses `move <row> <col>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        warn!("malformed move: expected 'move <row> <col>'");
        return None;
    }
    match (tokens[1].parse::<i64>(), tokens[2].parse::<i64>()) {
        (Ok(row), Ok(col)) => Some(Command::Move { row, col }),
        _ => {
            warn!("invalid move coordinates: '{} {}'", tokens[1], tokens[2]);
            None
        }
    }
}

/// Parses `go [depth <n>] [difficulty <easy|medium|hard>]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                if let Some(tok) = tokens.get(i) {
                    match tok.parse::<u32>() {
                        Ok(v) => params.depth = Some(v),
                        Err(_) => warn!("invalid depth value: '{}'", tok),
                    }
                }
            }
            "difficulty" => {
                i += 1;
                if let Some(tok) = tokens.get(i) {
                    match Difficulty::from_name(tok) {
                        Some(d) => params.difficulty = Some(d),
                        None => warn!("unknown difficulty: '{}'", tok),
                    }
                }
            }
            other => {
                warn!("unknown go parameter: '{}'", other);
            }
        }
        i += 1;
    }

    Some(Command::Go(params))
}
