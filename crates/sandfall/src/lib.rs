//! Falling sand simulation engine.
//!
//! [`Simulation`] owns the grid, the chunk tracker and the random stream.
//! Hosts call [`Simulation::step`] once per frame, paint with
//! [`Simulation::draw_cell`], and between frames read cells and
//! [`Simulation::chunk_was_updated`] to decide what to redraw.

pub mod api;
pub mod cell;
pub mod chunks;
pub mod config;
pub mod elements;
pub mod error;
pub mod grid;
pub mod movement;
pub mod schedule;
pub mod swap;
pub mod wasm;

#[cfg(test)]
pub(crate) mod fixture;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cell::{Cell, Species};
use chunks::ChunkTracker;
use config::SimConfig;
use elements::{ElementTable, Rgb};
use error::ConfigError;
use grid::{CellGrid, CellSource, Shared};
pub use schedule::FrameStats;

#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    elements: &'static ElementTable,
    grid: CellGrid,
    chunks: ChunkTracker,
    rng: SmallRng,
    generation: u32,
    max_jitter: usize,
    last_frame: FrameStats,
}

impl Simulation {
    /// Default settings for a `width x height` grid.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::with_config(SimConfig::new(width, height))
    }

    pub fn with_config(config: SimConfig) -> Result<Self, ConfigError> {
        Self::with_elements(config, ElementTable::standard())
    }

    /// Run a custom material table. Wall and empty keep their fixed ids.
    pub fn with_elements(
        config: SimConfig,
        elements: &'static ElementTable,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let chunks = ChunkTracker::new(
            config.width,
            config.height,
            config.chunk_size,
            config.stay_awake_frames,
            config.reawaken_chance,
        );
        let max_jitter = config.effective_row_jitter();
        if max_jitter < config.max_row_jitter {
            log::debug!(
                "row jitter clamped from {} to {max_jitter} for chunk size {}",
                config.max_row_jitter,
                config.chunk_size
            );
        }
        log::debug!(
            "simulation {}x{} with {}x{} chunks of {}",
            config.width,
            config.height,
            chunks.chunks_wide(),
            chunks.chunks_high(),
            config.chunk_size
        );
        Ok(Self {
            grid: CellGrid::new(config.width, config.height),
            chunks,
            elements,
            rng,
            generation: 0,
            max_jitter,
            last_frame: FrameStats::default(),
            config,
        })
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.chunks.begin_frame();
        let jitter = schedule::draw_jitter(&mut self.rng, self.max_jitter);
        let even_seed = self.rng.random();
        let odd_seed = self.rng.random();
        let shared = Shared {
            chunks: &self.chunks,
            elements: self.elements,
            generation: self.generation,
        };
        let even = schedule::run_phase(
            &mut self.grid,
            shared,
            self.chunks.even_rows(),
            jitter,
            even_seed,
        );
        let odd = schedule::run_phase(
            &mut self.grid,
            shared,
            self.chunks.odd_rows(),
            jitter,
            odd_seed,
        );
        self.chunks.end_frame();
        self.last_frame = FrameStats { jitter, ..even.merge(odd) };
        log::trace!("frame {}: {:?}", self.generation, self.last_frame);
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid.get(row, col)
    }

    #[must_use]
    pub fn material(&self, row: usize, col: usize) -> Species {
        self.grid.get(row, col).species
    }

    /// Row-major cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    /// Write `cell` as is, keeping its color offset. The touched chunks are
    /// processed next frame and report as updated after it even when a wall
    /// refused the write.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        let shared = Shared {
            chunks: &self.chunks,
            elements: self.elements,
            generation: self.generation,
        };
        let written = self.grid.whole(shared).set(row, col, cell);
        self.chunks.wake_now(row, col);
        written
    }

    /// Paint a brand new cell of `species`, like [`Simulation::set_cell`].
    pub fn draw_cell(&mut self, row: usize, col: usize, species: Species) -> bool {
        let cell = Cell::fresh(species, &mut self.rng);
        self.set_cell(row, col, cell)
    }

    /// Whether the chunk holding `(row, col)` changed during the last frame.
    #[must_use]
    pub fn chunk_was_updated(&self, row: usize, col: usize) -> bool {
        self.chunks.was_updated(self.chunks.chunk_index(row, col))
    }

    /// Cells of `species`. `Species::Empty` counts everything that is
    /// neither empty nor wall.
    #[must_use]
    pub fn debug_count(&self, species: Species) -> usize {
        let wanted = |cell: &&Cell| match species {
            Species::Empty => !matches!(cell.species, Species::Empty | Species::Wall),
            other => cell.species == other,
        };
        self.grid.cells().iter().filter(wanted).count()
    }

    #[must_use]
    pub fn is_swappable(&self, src_row: i32, src_col: i32, dst_row: i32, dst_col: i32) -> bool {
        swap::is_swappable(&self.grid, self.elements, src_row, src_col, dst_row, dst_col)
    }

    /// Commit a move between frames. Both ends wake like a paint.
    pub fn move_and_swap(&mut self, src_row: i32, src_col: i32, dst_row: i32, dst_col: i32) -> bool {
        let shared = Shared {
            chunks: &self.chunks,
            elements: self.elements,
            generation: self.generation,
        };
        let moved = self
            .grid
            .whole(shared)
            .move_and_swap(src_row, src_col, dst_row, dst_col, &mut self.rng);
        if moved {
            for (row, col) in [(src_row, src_col), (dst_row, dst_col)] {
                if self.grid.in_bounds(row, col) {
                    self.chunks.wake_now(row as usize, col as usize);
                }
            }
        }
        moved
    }

    #[must_use]
    pub fn cell_color(&self, row: usize, col: usize) -> Rgb {
        let cell = self.grid.get(row, col);
        self.elements.get(cell.species).color_at(cell.color_offset)
    }

    #[must_use]
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// Frames stepped so far, wrapping.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn chunks(&self) -> &ChunkTracker {
        &self.chunks
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn elements(&self) -> &'static ElementTable {
        self.elements
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }
}
