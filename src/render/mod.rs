pub mod cues;
pub mod renderer;

pub use cues::{Cue, CuePlayer, TickEvents};
pub use renderer::{DriverPhase, Hud, Renderer};
