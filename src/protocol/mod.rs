//! Engine protocol handling.
//!
//! Implements parsing for the line-based engine protocol and the compact
//! board notation used by the `position` and `show` commands.

pub mod notation;
pub mod parser;

pub use notation::{encode_board, parse_board, NotationError};
pub use parser::{parse_command, Command, GoParams};
