//! Simulation configuration (TOML-backed)
//!
//! ```toml
//! floor_y = 300
//! source_x = 200
//! source_y = 10
//! spawn_rate = 1.0
//! width = 400
//! seed = 42
//! ```

use grain_core::{Cell, GrainError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration. Every field is optional in TOML and falls back to
/// the default sandbox layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lowest reachable row; grains on it settle immediately
    pub floor_y: i32,
    pub source_x: i32,
    pub source_y: i32,
    /// Probability in [0, 1] that a spawn is attempted each tick
    pub spawn_rate: f64,
    /// Playable columns are `0..width`
    pub width: i32,
    /// Fixed RNG seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            floor_y: 300,
            source_x: 200,
            source_y: 10,
            spawn_rate: 1.0,
            width: 400,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn source(&self) -> Cell {
        Cell::new(self.source_x, self.source_y)
    }

    pub fn with_floor(mut self, floor_y: i32) -> Self {
        self.floor_y = floor_y;
        self
    }

    pub fn with_source(mut self, source: Cell) -> Self {
        self.source_x = source.x;
        self.source_y = source.y;
        self
    }

    pub fn with_spawn_rate(mut self, spawn_rate: f64) -> Self {
        self.spawn_rate = spawn_rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject settings that would otherwise surface as per-tick misbehavior
    pub fn validate(&self) -> Result<()> {
        if !self.spawn_rate.is_finite() || !(0.0..=1.0).contains(&self.spawn_rate) {
            return Err(GrainError::ValueOutOfRange {
                field: "spawn_rate".into(),
                min: 0.0,
                max: 1.0,
                value: self.spawn_rate,
            });
        }
        if self.width <= 0 {
            return Err(GrainError::InvalidConfig(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if self.floor_y < 0 {
            return Err(GrainError::InvalidConfig(format!(
                "floor_y must not be negative, got {}",
                self.floor_y
            )));
        }
        if !(0..self.width).contains(&self.source_x) {
            return Err(GrainError::ValueOutOfRange {
                field: "source_x".into(),
                min: 0.0,
                max: (self.width - 1) as f64,
                value: self.source_x as f64,
            });
        }
        if !(0..=self.floor_y).contains(&self.source_y) {
            return Err(GrainError::ValueOutOfRange {
                field: "source_y".into(),
                min: 0.0,
                max: self.floor_y as f64,
                value: self.source_y as f64,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            GrainError::TomlParseError(msg) => {
                GrainError::TomlParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
