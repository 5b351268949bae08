//! ASCII grids for unit tests.
//!
//! `.` empty, `s` sand, `#` wall, `o` wood, `w` water, `f` fire, `m` smoke.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::api::SandApi;
use crate::cell::{Cell, Species};
use crate::chunks::ChunkTracker;
use crate::config::DEFAULT_STAY_AWAKE_FRAMES;
use crate::elements::ElementTable;
use crate::grid::{CellGrid, Shared, Stripe};

fn symbol(species: Species) -> char {
    match species {
        Species::Empty => '.',
        Species::Sand => 's',
        Species::Wall => '#',
        Species::Wood => 'o',
        Species::Water => 'w',
        Species::Fire => 'f',
        Species::Smoke => 'm',
    }
}

fn species_for(symbol: char) -> Species {
    match symbol {
        '.' => Species::Empty,
        's' => Species::Sand,
        '#' => Species::Wall,
        'o' => Species::Wood,
        'w' => Species::Water,
        'f' => Species::Fire,
        'm' => Species::Smoke,
        other => panic!("no material for {other:?}"),
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// A grid with its own tracker and no scheduler. Chunk size is the largest
/// that divides both sides; sleeping chunks never reawaken by chance.
#[derive(Debug)]
pub(crate) struct Fixture {
    pub grid: CellGrid,
    pub chunks: ChunkTracker,
    pub elements: &'static ElementTable,
    pub generation: u32,
    width: usize,
    height: usize,
}

impl Fixture {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_elements(width, height, ElementTable::standard())
    }

    pub fn with_elements(width: usize, height: usize, elements: &'static ElementTable) -> Self {
        let chunk_size = gcd(width, height);
        assert!(chunk_size >= 2, "{width}x{height} has no usable chunk size");
        Self {
            grid: CellGrid::new(width, height),
            chunks: ChunkTracker::new(width, height, chunk_size, DEFAULT_STAY_AWAKE_FRAMES, 0.0),
            elements,
            generation: 1,
            width,
            height,
        }
    }

    pub fn stripe(&mut self) -> Stripe<'_> {
        let shared = Shared {
            chunks: &self.chunks,
            elements: self.elements,
            generation: self.generation,
        };
        self.grid.whole(shared)
    }

    /// Api focused on `(row, col)` with a seeded stream.
    pub fn api(&mut self, row: usize, col: usize, seed: u64) -> SandApi<'_> {
        let mut api = SandApi::new(self.stripe(), SmallRng::seed_from_u64(seed));
        api.focus(row, col);
        api
    }

    pub fn place(&mut self, row: usize, col: usize, cell: Cell) {
        self.stripe().set(row, col, cell);
    }

    /// Replace the whole grid. Goes through the write protocol so chunk
    /// counts stay exact.
    pub fn paint(&mut self, rows: &[&str]) {
        let width = self.width;
        assert_eq!(rows.len(), self.height, "row count");
        let mut stripe = self.stripe();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), width, "row {row} width");
            for (col, symbol) in line.chars().enumerate() {
                stripe.set(row, col, Cell::empty());
                stripe.set(row, col, Cell::new(species_for(symbol)));
            }
        }
    }

    pub fn dump(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| symbol(self.grid.get(row, col).species))
                    .collect()
            })
            .collect()
    }

    pub fn species(&self, row: usize, col: usize) -> Species {
        self.grid.get(row, col).species
    }

    pub fn counts(&self) -> [usize; Species::COUNT] {
        let mut counts = [0; Species::COUNT];
        for cell in self.grid.cells() {
            counts[cell.species as usize] += 1;
        }
        counts
    }
}
