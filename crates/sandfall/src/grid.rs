//! Cell storage and the mutation protocol.
//!
//! `CellGrid` owns the cells and a per-position update clock. All writes go
//! through a [`Stripe`]: a contiguous band of whole rows borrowed mutably
//! from the grid. The whole grid is one stripe; a scheduling phase splits it
//! into several disjoint ones that can run on different threads.

use std::ops::Range;

use crate::cell::{Cell, Species};
use crate::chunks::ChunkTracker;
use crate::elements::ElementTable;

/// Read access shared by the grid and its stripes.
pub trait CellSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Cell at an in-bounds position. Panics otherwise.
    fn cell(&self, row: usize, col: usize) -> Cell;

    fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width()
    }

    /// Signed lookup; `None` off the grid.
    fn cell_at(&self, row: i32, col: i32) -> Option<Cell> {
        self.in_bounds(row, col)
            .then(|| self.cell(row as usize, col as usize))
    }
}

#[derive(Debug)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    clocks: Vec<u32>,
}

impl CellGrid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::empty(); width * height],
            clocks: vec![0; width * height],
        }
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.height && col < self.width, "({row}, {col}) is off the grid");
        self.cells[row * self.width + col]
    }

    /// Row-major cells, for renderers.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Generation of the last write at `(row, col)`.
    #[must_use]
    pub fn clock(&self, row: usize, col: usize) -> u32 {
        self.clocks[row * self.width + col]
    }

    /// The entire grid as one stripe.
    pub fn whole<'a>(&'a mut self, shared: Shared<'a>) -> Stripe<'a> {
        Stripe {
            first_row: 0,
            rows: self.height,
            width: self.width,
            height: self.height,
            cells: &mut self.cells,
            clocks: &mut self.clocks,
            shared,
            moves: 0,
        }
    }

    /// Split into one stripe per row span. Spans must be ascending and
    /// disjoint; rows between spans are left out.
    pub fn stripes<'a>(&'a mut self, spans: &[Range<usize>], shared: Shared<'a>) -> Vec<Stripe<'a>> {
        let (width, height) = (self.width, self.height);
        let mut cells: &'a mut [Cell] = &mut self.cells;
        let mut clocks: &'a mut [u32] = &mut self.clocks;
        let mut consumed = 0;
        let mut stripes = Vec::with_capacity(spans.len());
        for span in spans {
            assert!(
                consumed <= span.start && span.start <= span.end && span.end <= height,
                "stripe {span:?} overlaps or leaves the grid"
            );
            let skip = (span.start - consumed) * width;
            let len = span.len() * width;
            let (_, tail) = std::mem::take(&mut cells).split_at_mut(skip);
            let (band, tail) = tail.split_at_mut(len);
            cells = tail;
            let (_, tail) = std::mem::take(&mut clocks).split_at_mut(skip);
            let (clock_band, tail) = tail.split_at_mut(len);
            clocks = tail;
            consumed = span.end;
            stripes.push(Stripe {
                first_row: span.start,
                rows: span.len(),
                width,
                height,
                cells: band,
                clocks: clock_band,
                shared,
                moves: 0,
            });
        }
        stripes
    }
}

impl CellSource for CellGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.get(row, col)
    }
}

/// Frame-wide state every stripe reads.
#[derive(Clone, Copy, Debug)]
pub struct Shared<'a> {
    pub chunks: &'a ChunkTracker,
    pub elements: &'a ElementTable,
    pub generation: u32,
}

/// Mutable view of rows `first_row..first_row + rows`.
#[derive(Debug)]
pub struct Stripe<'a> {
    first_row: usize,
    rows: usize,
    width: usize,
    height: usize,
    cells: &'a mut [Cell],
    clocks: &'a mut [u32],
    shared: Shared<'a>,
    moves: u32,
}

impl<'a> Stripe<'a> {
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row >= self.first_row && row < self.first_row + self.rows && col < self.width,
            "({row}, {col}) is outside stripe rows {}..{}",
            self.first_row,
            self.first_row + self.rows
        );
        (row - self.first_row) * self.width + col
    }

    #[must_use]
    pub fn rows(&self) -> Range<usize> {
        self.first_row..self.first_row + self.rows
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    #[must_use]
    pub fn clock(&self, row: usize, col: usize) -> u32 {
        self.clocks[self.index(row, col)]
    }

    /// The one write path. A wall only ever gives way to empty. A
    /// successful write updates the chunk counts, wakes the chunk and its
    /// bordering neighbours, and stamps the position with this generation.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        let i = self.index(row, col);
        let old = self.cells[i].species;
        if old == Species::Wall && cell.species != Species::Empty {
            return false;
        }
        self.cells[i] = cell;
        self.clocks[i] = self.shared.generation;
        self.shared.chunks.cell_changed(row, col, old, cell.species);
        self.shared.chunks.awaken(row, col);
        true
    }

    #[must_use]
    pub fn chunks(&self) -> &'a ChunkTracker {
        self.shared.chunks
    }

    #[must_use]
    pub fn elements(&self) -> &'a ElementTable {
        self.shared.elements
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.shared.generation
    }

    /// Committed moves so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub(crate) fn count_move(&mut self) {
        self.moves += 1;
    }
}

impl CellSource for Stripe<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.get(row, col)
    }
}
