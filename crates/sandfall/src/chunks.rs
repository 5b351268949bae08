//! Chunk activity tracking: sleep/wake, dirty flags and occupancy counts.
//!
//! Chunks own no cells. A chunk is a `chunk_size x chunk_size` window of the
//! grid addressed by `row / chunk_size`, `col / chunk_size`. During a frame
//! the tracker is shared between stripe tasks, so every per-chunk field that
//! a task may write is atomic. Frame boundaries take `&mut self`.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use rand::Rng;

use crate::cell::Species;

#[derive(Debug)]
pub struct ChunkTracker {
    chunk_size: usize,
    chunks_wide: usize,
    chunks_high: usize,
    stay_awake: u8,
    reawaken_chance: f32,
    cell_count: Vec<AtomicU32>,
    wake_time: Vec<AtomicU8>,
    should_awaken: Vec<AtomicBool>,
    updated: Vec<AtomicBool>,
    /// Painted between frames; folded into `updated` by `begin_frame`.
    painted: Vec<bool>,
    even_rows: Vec<usize>,
    odd_rows: Vec<usize>,
}

impl ChunkTracker {
    /// Tracker for a `width x height` grid. Dimensions must already be
    /// validated as multiples of `chunk_size`.
    #[must_use]
    pub fn new(
        width: usize,
        height: usize,
        chunk_size: usize,
        stay_awake: u8,
        reawaken_chance: f32,
    ) -> Self {
        let chunks_wide = width / chunk_size;
        let chunks_high = height / chunk_size;
        let n = chunks_wide * chunks_high;
        Self {
            chunk_size,
            chunks_wide,
            chunks_high,
            stay_awake,
            reawaken_chance,
            cell_count: (0..n).map(|_| AtomicU32::new(0)).collect(),
            wake_time: (0..n).map(|_| AtomicU8::new(0)).collect(),
            should_awaken: (0..n).map(|_| AtomicBool::new(false)).collect(),
            // Everything needs drawing once.
            updated: (0..n).map(|_| AtomicBool::new(true)).collect(),
            painted: vec![false; n],
            even_rows: (0..chunks_high).step_by(2).collect(),
            odd_rows: (1..chunks_high).step_by(2).collect(),
        }
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[must_use]
    pub fn chunks_wide(&self) -> usize {
        self.chunks_wide
    }

    #[must_use]
    pub fn chunks_high(&self) -> usize {
        self.chunks_high
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cell_count.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell_count.is_empty()
    }

    /// Chunk-rows processed in the first phase of a frame.
    #[must_use]
    pub fn even_rows(&self) -> &[usize] {
        &self.even_rows
    }

    /// Chunk-rows processed in the second phase of a frame.
    #[must_use]
    pub fn odd_rows(&self) -> &[usize] {
        &self.odd_rows
    }

    #[must_use]
    pub fn chunk_index(&self, row: usize, col: usize) -> usize {
        (row / self.chunk_size) * self.chunks_wide + col / self.chunk_size
    }

    #[must_use]
    pub fn cell_count(&self, index: usize) -> u32 {
        self.cell_count[index].load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn wake_time(&self, index: usize) -> u8 {
        self.wake_time[index].load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn was_updated(&self, index: usize) -> bool {
        self.updated[index].load(Ordering::Relaxed)
    }

    /// The owning chunk of `(row, col)` followed by the chunks across any
    /// boundary the cell sits on. Diagonal neighbours are never included.
    fn touched(&self, row: usize, col: usize) -> [Option<usize>; 5] {
        let cs = self.chunk_size;
        let (chunk_row, chunk_col) = (row / cs, col / cs);
        let (local_row, local_col) = (row % cs, col % cs);
        let at = |r: usize, c: usize| Some(r * self.chunks_wide + c);
        [
            at(chunk_row, chunk_col),
            if local_row == 0 && chunk_row > 0 { at(chunk_row - 1, chunk_col) } else { None },
            if local_row == cs - 1 && chunk_row + 1 < self.chunks_high {
                at(chunk_row + 1, chunk_col)
            } else {
                None
            },
            if local_col == 0 && chunk_col > 0 { at(chunk_row, chunk_col - 1) } else { None },
            if local_col == cs - 1 && chunk_col + 1 < self.chunks_wide {
                at(chunk_row, chunk_col + 1)
            } else {
                None
            },
        ]
    }

    /// Flag the chunk of `(row, col)` and any neighbour across a touching
    /// boundary for processing next frame and for redraw.
    pub fn awaken(&self, row: usize, col: usize) {
        for index in self.touched(row, col).into_iter().flatten() {
            self.should_awaken[index].store(true, Ordering::Relaxed);
            self.updated[index].store(true, Ordering::Relaxed);
        }
    }

    /// Keep the chunk of `(row, col)` from falling asleep after this frame.
    pub fn dont_sleep_next_frame(&self, row: usize, col: usize) {
        let index = self.chunk_index(row, col);
        // Err means already at the cap.
        self.wake_time[index]
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |wake| {
                (wake <= 1).then_some(wake + 1)
            })
            .ok();
    }

    /// Occupancy bookkeeping for a write at `(row, col)`.
    pub fn cell_changed(&self, row: usize, col: usize, old: Species, new: Species) {
        let index = self.chunk_index(row, col);
        match (old == Species::Empty, new == Species::Empty) {
            (true, false) => {
                self.cell_count[index].fetch_add(1, Ordering::Relaxed);
            }
            (false, true) => {
                self.cell_count[index].fetch_sub(1, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    /// Wake for an external paint: processed next frame and reported as
    /// updated after it, whatever happens in between.
    pub fn wake_now(&mut self, row: usize, col: usize) {
        for index in self.touched(row, col).into_iter().flatten() {
            let wake = self.wake_time[index].get_mut();
            *wake = (*wake).max(self.stay_awake);
            self.painted[index] = true;
        }
    }

    /// Whether chunk `index` takes part in the current frame.
    pub fn should_process<R: Rng>(&self, index: usize, rng: &mut R) -> bool {
        self.cell_count(index) > 0
            && (self.wake_time(index) > 0 || rng.random::<f32>() < self.reawaken_chance)
    }

    pub fn begin_frame(&mut self) {
        for ((updated, awaken), painted) in self
            .updated
            .iter_mut()
            .zip(&mut self.should_awaken)
            .zip(&mut self.painted)
        {
            *updated.get_mut() = std::mem::take(painted);
            *awaken.get_mut() = false;
        }
    }

    pub fn end_frame(&mut self) {
        for (wake, awaken) in self.wake_time.iter_mut().zip(&mut self.should_awaken) {
            let wake = wake.get_mut();
            *wake = if *awaken.get_mut() {
                self.stay_awake
            } else {
                wake.saturating_sub(1)
            };
        }
    }
}
