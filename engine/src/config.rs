// ═══════════════════════════════════════════════════════════════════════
// Configuration — map, difficulty, and round settings (TOML)
// ═══════════════════════════════════════════════════════════════════════

use crate::error::ConfigError;
use crate::types::{TickResolution, Viewport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Opponent strength. Harder presets run the planner more often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Milliseconds between planner runs.
    pub fn ai_tick_ms(self) -> u32 {
        match self {
            Difficulty::Easy => 2500,
            Difficulty::Normal => 1500,
            Difficulty::Hard => 1000,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::Invalid(format!("unknown difficulty '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub region_count: usize,
    pub viewport: Viewport,
    pub resolution: TickResolution,
    /// Mirror one-way adjacency edges after sampling.
    pub symmetric_adjacency: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            region_count: 10,
            viewport: Viewport::default(),
            resolution: TickResolution::Snapshot,
            symmetric_adjacency: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub round_length_ms: u32,
    /// Time after the round ends during which clicks are not accepted.
    pub end_lockout_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            round_length_ms: 10_000,
            end_lockout_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map: MapConfig,
    pub difficulty: Difficulty,
    pub session: SessionConfig,
}

impl GameConfig {
    /// Load from a TOML file; missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.region_count < 2 {
            return Err(ConfigError::Invalid(format!(
                "region_count must be at least 2, got {}",
                self.map.region_count
            )));
        }
        if self.session.round_length_ms == 0 {
            return Err(ConfigError::Invalid("round_length_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn ai_tick_ms(&self) -> u32 {
        self.difficulty.ai_tick_ms()
    }
}
