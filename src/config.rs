//! Game configuration.
//!
//! Grid size, per-position-class critical mass thresholds, opening mass, and
//! the chain-reaction step budget. Two tunings ship as presets: the default
//! (uniform threshold 3, opening mass 1) and `heavy` (uniform threshold 4,
//! opening mass 3). Neither is baked into the engine.

use serde::{Deserialize, Serialize};

/// Smallest supported grid side length.
pub const MIN_GRID_SIZE: usize = 2;

/// Largest supported grid side length.
pub const MAX_GRID_SIZE: usize = 32;

/// Errors produced when building or loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be between 2 and 32, got {0}")]
    InvalidGridSize(usize),

    #[error("critical mass for {class} cells must be at least 1, got {value}")]
    InvalidThreshold { class: &'static str, value: u32 },

    #[error("opening mass must be at least 1, got {0}")]
    InvalidOpeningMass(u32),

    #[error("max chain steps must be at least 1, got {0}")]
    InvalidChainSteps(u32),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Critical mass thresholds by position class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriticalMass {
    pub corner: u32,
    pub edge: u32,
    pub center: u32,
}

impl CriticalMass {
    /// Uses the same threshold for every position class.
    pub const fn uniform(threshold: u32) -> Self {
        CriticalMass {
            corner: threshold,
            edge: threshold,
            center: threshold,
        }
    }

    /// Thresholds equal to each class's neighbor count (2/3/4).
    pub const fn by_neighbors() -> Self {
        CriticalMass {
            corner: 2,
            edge: 3,
            center: 4,
        }
    }
}

impl Default for CriticalMass {
    fn default() -> Self {
        CriticalMass::uniform(3)
    }
}

/// Full configuration for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid.
    pub grid_size: usize,
    pub critical_mass: CriticalMass,
    /// Mass given to the cell chosen during a player's opening placement.
    pub opening_mass: u32,
    /// Upper bound on processed explosion batches per placement.
    pub max_chain_steps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: 6,
            critical_mass: CriticalMass::uniform(3),
            opening_mass: 1,
            max_chain_steps: 1000,
        }
    }
}

impl GameConfig {
    /// The heavier tuning: uniform threshold 4 with a 3-mass opening.
    pub fn heavy() -> Self {
        GameConfig {
            critical_mass: CriticalMass::uniform(4),
            opening_mass: 3,
            ..GameConfig::default()
        }
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_critical_mass(mut self, critical_mass: CriticalMass) -> Self {
        self.critical_mass = critical_mass;
        self
    }

    pub fn with_opening_mass(mut self, opening_mass: u32) -> Self {
        self.opening_mass = opening_mass;
        self
    }

    pub fn with_max_chain_steps(mut self, max_chain_steps: u32) -> Self {
        self.max_chain_steps = max_chain_steps;
        self
    }

    /// Checks that every field is within its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::InvalidGridSize(self.grid_size));
        }
        for (class, value) in [
            ("corner", self.critical_mass.corner),
            ("edge", self.critical_mass.edge),
            ("center", self.critical_mass.center),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidThreshold { class, value });
            }
        }
        if self.opening_mass == 0 {
            return Err(ConfigError::InvalidOpeningMass(self.opening_mass));
        }
        if self.max_chain_steps == 0 {
            return Err(ConfigError::InvalidChainSteps(self.max_chain_steps));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // A struct of plain integers always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Opponent strength tiers, each mapped to a minimax depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Search depth in plies.
    pub const fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn from_name(s: &str) -> Option<Difficulty> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_uniform_three() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.critical_mass, CriticalMass::uniform(3));
        assert_eq!(config.opening_mass, 1);
        assert_eq!(config.max_chain_steps, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn heavy_preset() {
        let config = GameConfig::heavy();
        assert_eq!(config.critical_mass, CriticalMass::uniform(4));
        assert_eq!(config.opening_mass, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_fields() {
        assert!(matches!(
            GameConfig::default().with_grid_size(1).validate(),
            Err(ConfigError::InvalidGridSize(1))
        ));
        assert!(matches!(
            GameConfig::default()
                .with_critical_mass(CriticalMass { corner: 2, edge: 0, center: 4 })
                .validate(),
            Err(ConfigError::InvalidThreshold { class: "edge", value: 0 })
        ));
        assert!(matches!(
            GameConfig::default().with_opening_mass(0).validate(),
            Err(ConfigError::InvalidOpeningMass(0))
        ));
        assert!(matches!(
            GameConfig::default().with_max_chain_steps(0).validate(),
            Err(ConfigError::InvalidChainSteps(0))
        ));
    }

    #[test]
    fn json_partial_fields_fall_back_to_defaults() {
        let config = GameConfig::from_json(r#"{"grid_size": 4, "opening_mass": 3}"#).unwrap();
        assert_eq!(config.grid_size, 4);
        assert_eq!(config.opening_mass, 3);
        assert_eq!(config.critical_mass, CriticalMass::uniform(3));
        assert_eq!(config.max_chain_steps, 1000);
    }

    #[test]
    fn json_roundtrip() {
        let config = GameConfig::heavy().with_grid_size(8);
        let parsed = GameConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn json_rejects_invalid_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{"grid_size": 100}"#),
            Err(ConfigError::InvalidGridSize(100))
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 2);
        assert_eq!(Difficulty::Medium.depth(), 4);
        assert_eq!(Difficulty::Hard.depth(), 6);
        assert_eq!(Difficulty::from_name("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_name("insane"), None);
    }
}
