//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers own a [`GameEngine`], feed it directions and step it; renderers only
//! read the [`GameState`] snapshot.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod food;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::ConfigError;
pub use food::{CellPicker, RandomCells, ScriptedCells};
pub use speed::SpeedRamp;
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
