//! Sound-like feedback derived from consecutive snapshots.
//!
//! The kernel never emits events. The driver keeps the snapshot from before a
//! step and diffs it against the one after.

use std::io::{self, Write};

use crate::game::GameState;

/// Transitions observed across one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    pub ate_food: bool,
    pub game_over: bool,
}

impl TickEvents {
    pub fn between(prev: &GameState, next: &GameState) -> Self {
        Self {
            ate_food: next.score > prev.score,
            game_over: prev.is_running() && next.is_game_over(),
        }
    }

    /// The cue worth playing, if any. Game over drowns out eating.
    pub fn cue(&self) -> Option<Cue> {
        if self.game_over {
            Some(Cue::GameOver)
        } else if self.ate_food {
            Some(Cue::Eat)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Eat,
    GameOver,
}

/// Rings the terminal bell for cues: once for eating, twice for game over.
pub struct CuePlayer<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> CuePlayer<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn play(&mut self, events: TickEvents) -> io::Result<()> {
        let Some(cue) = events.cue() else {
            return Ok(());
        };
        if !self.enabled {
            return Ok(());
        }

        let bells: &[u8] = match cue {
            Cue::Eat => b"\x07",
            Cue::GameOver => b"\x07\x07",
        };
        self.out.write_all(bells)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
