//! Relative-offset API for element update functions.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::cell::{Cell, Species};
use crate::elements::ElementTable;
use crate::grid::{CellSource, Stripe};

/// A behavior's view of the grid, centred on the cell being updated.
///
/// Offsets are `(dr, dc)` with positive `dr` pointing down. Reads off the
/// grid yield `None`; moves off the top delete the cell.
#[derive(Debug)]
pub struct SandApi<'a> {
    stripe: Stripe<'a>,
    rng: SmallRng,
    row: i32,
    col: i32,
}

impl<'a> SandApi<'a> {
    #[must_use]
    pub fn new(stripe: Stripe<'a>, rng: SmallRng) -> Self {
        Self {
            stripe,
            rng,
            row: 0,
            col: 0,
        }
    }

    /// Point the api at another cell.
    pub fn focus(&mut self, row: usize, col: usize) {
        self.row = row as i32;
        self.col = col as i32;
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row as usize
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.col as usize
    }

    #[must_use]
    pub fn get(&self, dr: i32, dc: i32) -> Option<Cell> {
        self.stripe.cell_at(self.row + dr, self.col + dc)
    }

    #[must_use]
    pub fn is_swappable(&self, dr: i32, dc: i32) -> bool {
        self.stripe
            .is_swappable(self.row, self.col, self.row + dr, self.col + dc)
    }

    pub fn move_and_swap(&mut self, dr: i32, dc: i32) -> bool {
        self.stripe
            .move_and_swap(self.row, self.col, self.row + dr, self.col + dc, &mut self.rng)
    }

    /// Turn the current cell into a brand new cell of `species`.
    pub fn replace(&mut self, species: Species) -> bool {
        let cell = Cell::fresh(species, &mut self.rng);
        self.stripe.set(self.row(), self.col(), cell)
    }

    pub fn dont_sleep_next_frame(&self) {
        self.stripe
            .chunks()
            .dont_sleep_next_frame(self.row(), self.col());
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.rng.random::<f32>() < p
    }

    /// `-1` or `1`.
    pub fn coin_flip(&mut self) -> i32 {
        if self.rng.random() {
            1
        } else {
            -1
        }
    }

    /// `-1`, `0` or `1`.
    pub fn random_step(&mut self) -> i32 {
        self.rng.random_range(-1..=1)
    }

    #[must_use]
    pub fn elements(&self) -> &'a ElementTable {
        self.stripe.elements()
    }

    #[must_use]
    pub fn stripe(&self) -> &Stripe<'a> {
        &self.stripe
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    #[must_use]
    pub fn into_stripe(self) -> Stripe<'a> {
        self.stripe
    }
}
