use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::speed::SpeedRamp;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Tick interval at the start of every game, stored as milliseconds
    #[serde(rename = "initial_tick_ms", with = "millis")]
    pub initial_tick: Duration,
    /// How the tick interval shrinks as the score grows
    pub speed_ramp: SpeedRamp,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_tick: Duration::from_millis(180),
            speed_ramp: SpeedRamp::None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30, 20)
    }

    pub fn with_speed_ramp(mut self, speed_ramp: SpeedRamp) -> Self {
        self.speed_ramp = speed_ramp;
        self
    }

    pub fn with_initial_tick(mut self, initial_tick: Duration) -> Self {
        self.initial_tick = initial_tick;
        self
    }

    /// Check the preconditions the kernel relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.grid_width, self.grid_height);
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(ConfigError::GridTooLarge { width, height });
        }
        // The snake starts with one segment, so food needs a second cell.
        if width.saturating_mul(height) < 2 {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        if self.initial_tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        self.speed_ramp.validate()
    }

    /// Load a configuration from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize game config")?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize game config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Durations as (possibly fractional) milliseconds.
///
/// Whole milliseconds are written as integers so hand-written files stay tidy.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use std::time::Duration;

    const NANOS_PER_MILLI: f64 = 1_000_000.0;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_nanos() % 1_000_000 == 0 {
            serializer.serialize_u64(duration.as_millis() as u64)
        } else {
            serializer.serialize_f64(duration.as_nanos() as f64 / NANOS_PER_MILLI)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        if !millis.is_finite() || millis < 0.0 {
            return Err(D::Error::custom(format!(
                "tick must be a non-negative number of milliseconds, got {millis}"
            )));
        }
        Ok(Duration::from_nanos((millis * NANOS_PER_MILLI).round() as u64))
    }
}
