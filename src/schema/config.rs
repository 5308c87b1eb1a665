//! Configuration types for rendering, playback and solving.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Scene scaling handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Distance between adjacent cell centers in scene units.
    pub cell_size: f32,
    /// Edge length of a drawn cube; smaller than `cell_size` so neighbours stay distinct.
    pub shrink_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 32.0,
            shrink_size: 28.0,
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize);
        }
        if !(self.shrink_size > 0.0) || self.shrink_size > self.cell_size {
            return Err(ConfigError::InvalidShrinkSize);
        }
        Ok(())
    }
}

/// Timing parameters for driving a replay from a frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Seconds spent animating a single move at 1x speed.
    pub step_duration: f32,
    /// Playback rate multiplier. Negative values play in reverse (assembly).
    pub speed: f32,
    /// Wrap around at either end instead of stopping.
    #[serde(default)]
    pub looping: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step_duration: 1.0,
            speed: 1.0,
            looping: false,
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_duration > 0.0) || !self.step_duration.is_finite() {
            return Err(ConfigError::InvalidStepDuration);
        }
        if !self.speed.is_finite() {
            return Err(ConfigError::InvalidSpeed);
        }
        Ok(())
    }
}

/// Limits for the disassembly search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// How far, in cells, a piece may slide from its solved position while
    /// still inside the puzzle.
    pub margin: i32,
    /// Give up after this many distinct arrangements.
    pub max_states: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            margin: 4,
            max_states: 1_000_000,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.margin < 0 {
            return Err(ConfigError::InvalidMargin);
        }
        if self.max_states == 0 {
            return Err(ConfigError::InvalidMaxStates);
        }
        Ok(())
    }
}

/// Everything the command line reads from a config file.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub render: RenderOptions,
    pub playback: PlaybackConfig,
    pub solver: SolverConfig,
}

impl ReplayConfig {
    /// Read and validate a JSON config file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("loading config from {}", path.display());
        let json = fs::read_to_string(path)?;
        let config: ReplayConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render.validate()?;
        self.playback.validate()?;
        self.solver.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Cell size must be positive")]
    InvalidCellSize,
    #[error("Shrink size must be positive and no larger than the cell size")]
    InvalidShrinkSize,
    #[error("Step duration must be a positive, finite number of seconds")]
    InvalidStepDuration,
    #[error("Playback speed must be finite")]
    InvalidSpeed,
    #[error("Solver margin must not be negative")]
    InvalidMargin,
    #[error("Solver state limit must be at least 1")]
    InvalidMaxStates,
}
