//! Cell contents and ownership colors.

use serde::{Deserialize, Serialize};

/// Owner of a cell. `Blue` always opens the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Neutral,
    Blue,
    Red,
}

impl Color {
    /// Returns the opposing player. Neutral has no opponent.
    pub const fn opponent(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
            Color::Neutral => Color::Neutral,
        }
    }

    pub const fn is_player(self) -> bool {
        !matches!(self, Color::Neutral)
    }

    /// Returns the single-character notation abbreviation.
    pub const fn notation_char(self) -> char {
        match self {
            Color::Neutral => '.',
            Color::Blue => 'b',
            Color::Red => 'r',
        }
    }

    /// Parses a color from its notation abbreviation (case-insensitive).
    pub fn from_notation_char(c: char) -> Option<Color> {
        match c.to_ascii_lowercase() {
            '.' | 'n' => Some(Color::Neutral),
            'b' => Some(Color::Blue),
            'r' => Some(Color::Red),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Neutral => "neutral",
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }

    /// Parses a player by name or abbreviation. Neutral is not a player.
    pub fn parse_player(s: &str) -> Option<Color> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "blue" => Some(Color::Blue),
            "r" | "red" => Some(Color::Red),
            _ => None,
        }
    }
}

/// A single grid cell. A neutral cell always holds zero mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub mass: u32,
    pub owner: Color,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        mass: 0,
        owner: Color::Neutral,
    };

    pub const fn new(mass: u32, owner: Color) -> Self {
        Cell { mass, owner }
    }

    pub const fn is_neutral(self) -> bool {
        matches!(self.owner, Color::Neutral)
    }
}
