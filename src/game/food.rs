//! Sources of candidate food cells.
//!
//! The engine asks a [`CellPicker`] for cells until one is free, so a picker
//! only has to produce positions inside the grid. Gameplay uses
//! [`RandomCells`]; tests swap in [`ScriptedCells`] to know where food lands.

use rand::Rng;
use rand::rngs::ThreadRng;
use std::collections::VecDeque;

use super::state::Position;

/// Produces candidate cells inside a `width` x `height` grid
pub trait CellPicker {
    fn pick(&mut self, width: usize, height: usize) -> Position;
}

/// Uniformly random cells drawn from any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomCells<R = ThreadRng> {
    rng: R,
}

impl<R: Rng> RandomCells<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomCells<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> CellPicker for RandomCells<R> {
    fn pick(&mut self, width: usize, height: usize) -> Position {
        let x = self.rng.gen_range(0..width) as i32;
        let y = self.rng.gen_range(0..height) as i32;
        Position::new(x, y)
    }
}

/// Replays a fixed list of cells, then sweeps the grid row by row.
///
/// The sweep guarantees that rejection sampling finds any free cell, so a
/// short script can never stall the engine.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCells {
    script: VecDeque<Position>,
    sweep: usize,
}

impl ScriptedCells {
    pub fn new(cells: impl IntoIterator<Item = Position>) -> Self {
        Self {
            script: cells.into_iter().collect(),
            sweep: 0,
        }
    }

    /// Number of scripted cells not yet handed out
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl CellPicker for ScriptedCells {
    fn pick(&mut self, width: usize, height: usize) -> Position {
        if let Some(cell) = self.script.pop_front() {
            return cell;
        }

        let index = self.sweep % (width * height);
        self.sweep += 1;
        Position::new((index % width) as i32, (index / width) as i32)
    }
}
