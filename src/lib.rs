//! Term Snake - classic Snake in the terminal
//!
//! This library provides:
//! - The simulation kernel (game module), free of I/O and rendering
//! - Keyboard mapping (input module)
//! - TUI rendering and snapshot-diff cues (render module)
//! - Session metrics (metrics module)
//! - The interactive driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
