//! JavaScript bindings.

use wasm_bindgen::prelude::*;

use crate::cell::Species;
use crate::config::SimConfig;
use crate::Simulation;

/// A seeded simulation driven from JS.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Sandbox {
    sim: Simulation,
}

#[wasm_bindgen]
impl Sandbox {
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, seed: u32) -> Result<Sandbox, JsError> {
        let config = SimConfig::new(width, height).with_seed(u64::from(seed));
        Ok(Self {
            sim: Simulation::with_config(config)?,
        })
    }

    pub fn step(&mut self) {
        self.sim.step();
    }

    /// Paint material `id`. Off-grid positions and unknown ids are ignored.
    pub fn draw_cell(&mut self, row: usize, col: usize, id: u8) -> bool {
        if row >= self.sim.height() || col >= self.sim.width() {
            return false;
        }
        match Species::try_from(id) {
            Ok(species) => self.sim.draw_cell(row, col, species),
            Err(err) => {
                log::warn!("draw_cell({row}, {col}): {err}");
                false
            }
        }
    }

    /// Material id at `(row, col)`, or `None` off the grid.
    #[must_use]
    pub fn cell_type(&self, row: usize, col: usize) -> Option<u8> {
        self.in_grid(row, col)
            .then(|| self.sim.material(row, col).id())
    }

    #[must_use]
    pub fn chunk_was_updated(&self, row: usize, col: usize) -> bool {
        self.in_grid(row, col) && self.sim.chunk_was_updated(row, col)
    }

    /// Cells with material `id`; `0` counts everything but empty and wall.
    #[must_use]
    pub fn debug_count(&self, id: u8) -> u32 {
        Species::try_from(id).map_or(0, |species| self.sim.debug_count(species) as u32)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.sim.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.sim.height()
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.sim.chunk_size()
    }
}

impl Sandbox {
    fn in_grid(&self, row: usize, col: usize) -> bool {
        row < self.sim.height() && col < self.sim.width()
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}
