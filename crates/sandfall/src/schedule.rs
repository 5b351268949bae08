//! Per-frame scheduling.
//!
//! A frame runs in two phases: every even chunk-row, then every odd one.
//! Each phase hands every chunk-row its own band of rows (a [`Stripe`])
//! reaching half a chunk past both of its edges. Bands of one phase never
//! overlap, so the chunk-rows of a phase can run on separate threads.

use std::ops::Range;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::api::SandApi;
use crate::cell::Species;
use crate::elements;
use crate::grid::{CellGrid, CellSource, Shared, Stripe};

/// Counters for one frame, mostly for debugging and benchmarks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Row offset applied to every chunk this frame.
    pub jitter: i32,
    pub chunks_processed: u32,
    /// Cells whose behavior ran.
    pub cells_visited: u32,
    pub moves: u32,
}

impl FrameStats {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            jitter: self.jitter,
            chunks_processed: self.chunks_processed + other.chunks_processed,
            cells_visited: self.cells_visited + other.cells_visited,
            moves: self.moves + other.moves,
        }
    }
}

/// Uniform magnitude in `0..=max` with a random sign.
pub fn draw_jitter<R: Rng>(rng: &mut R, max: usize) -> i32 {
    if max == 0 {
        return 0;
    }
    let magnitude = rng.random_range(0..=max) as i32;
    if rng.random() {
        magnitude
    } else {
        -magnitude
    }
}

/// Rows a chunk-row's task may touch, clipped to the grid.
#[must_use]
pub fn stripe_span(chunk_row: usize, chunk_size: usize, height: usize) -> Range<usize> {
    let start = (chunk_row * chunk_size).saturating_sub(chunk_size / 2);
    let end = (chunk_row + 1) * chunk_size + (chunk_size - chunk_size / 2);
    start..end.min(height)
}

/// Independent stream for one chunk-row of one phase.
fn stripe_rng(phase_seed: u64, chunk_row: usize) -> SmallRng {
    SmallRng::seed_from_u64(phase_seed ^ (chunk_row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Run every chunk-row in `chunk_rows` (ascending, pairwise non-adjacent).
pub fn run_phase(
    grid: &mut CellGrid,
    shared: Shared<'_>,
    chunk_rows: &[usize],
    jitter: i32,
    phase_seed: u64,
) -> FrameStats {
    let chunk_size = shared.chunks.chunk_size();
    let spans: Vec<_> = chunk_rows
        .iter()
        .map(|&row| stripe_span(row, chunk_size, grid.height()))
        .collect();
    let jobs: Vec<_> = chunk_rows
        .iter()
        .copied()
        .zip(grid.stripes(&spans, shared))
        .collect();

    #[cfg(feature = "parallel")]
    let stats = jobs
        .into_par_iter()
        .map(|(row, stripe)| run_stripe(stripe, row, jitter, stripe_rng(phase_seed, row)))
        .reduce(FrameStats::default, FrameStats::merge);

    #[cfg(not(feature = "parallel"))]
    let stats = jobs
        .into_iter()
        .map(|(row, stripe)| run_stripe(stripe, row, jitter, stripe_rng(phase_seed, row)))
        .fold(FrameStats::default(), FrameStats::merge);

    stats
}

/// Visit the active chunks of one chunk-row, each in a fresh random order.
fn run_stripe(stripe: Stripe<'_>, chunk_row: usize, jitter: i32, rng: SmallRng) -> FrameStats {
    let chunks = stripe.chunks();
    let table = stripe.elements();
    let generation = stripe.generation();
    let height = stripe.height();
    let cs = chunks.chunk_size();
    let mut order: Vec<usize> = (0..cs * cs).collect();
    let mut stats = FrameStats::default();
    let mut api = SandApi::new(stripe, rng);

    for chunk_col in 0..chunks.chunks_wide() {
        let index = chunk_row * chunks.chunks_wide() + chunk_col;
        if !chunks.should_process(index, api.rng()) {
            continue;
        }
        stats.chunks_processed += 1;
        order.shuffle(api.rng());
        for &local in &order {
            let row = (chunk_row * cs + local / cs) as i32 + jitter;
            if row < 0 || row as usize >= height {
                continue;
            }
            let (row, col) = (row as usize, chunk_col * cs + local % cs);
            let species = api.stripe().get(row, col).species;
            if species == Species::Empty
                || table.get(species).is_static
                || api.stripe().clock(row, col) == generation
            {
                continue;
            }
            stats.cells_visited += 1;
            api.focus(row, col);
            elements::update_cell(species, &mut api);
        }
    }

    stats.moves = api.into_stripe().moves();
    stats
}
