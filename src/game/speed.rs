use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// How the tick interval reacts to the snake eating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedRamp {
    /// Keep the initial tick interval for the whole game
    #[default]
    None,
    /// Shave `step_ms` off the interval per point, stopping at `floor_ms`
    Linear { step_ms: u64, floor_ms: u64 },
}

impl SpeedRamp {
    /// 6ms faster per food, never quicker than 50ms a tick
    pub fn classic() -> Self {
        SpeedRamp::Linear {
            step_ms: 6,
            floor_ms: 50,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            SpeedRamp::Linear { floor_ms: 0, .. } => Err(ConfigError::ZeroRampFloor),
            _ => Ok(()),
        }
    }

    /// Next tick interval after scoring `score_delta` points.
    ///
    /// Never increases the interval, even when `current` is already below
    /// the floor.
    pub fn apply(&self, current: Duration, score_delta: u32) -> Duration {
        match *self {
            SpeedRamp::None => current,
            SpeedRamp::Linear { step_ms, floor_ms } => {
                let floor = Duration::from_millis(floor_ms);
                if current <= floor {
                    return current;
                }
                let decrement = Duration::from_millis(step_ms.saturating_mul(score_delta as u64));
                current.saturating_sub(decrement).max(floor)
            }
        }
    }
}
