//! Swap eligibility and the commit path every movement goes through.

use rand::Rng;

use crate::cell::{Cell, Species};
use crate::elements::{ElementTable, State};
use crate::grid::{CellSource, Stripe};

/// Whether the cell at `src` may move into `dst`. Query only.
///
/// Rows above the grid are an open sink. Solids are never displaced. A
/// non-solid only displaces strictly lighter material; solids skip the
/// density comparison.
pub fn is_swappable<G: CellSource + ?Sized>(
    grid: &G,
    elements: &ElementTable,
    src_row: i32,
    src_col: i32,
    dst_row: i32,
    dst_col: i32,
) -> bool {
    if dst_row < 0 {
        return true;
    }
    let (Some(src), Some(dst)) = (grid.cell_at(src_row, src_col), grid.cell_at(dst_row, dst_col))
    else {
        return false;
    };
    if elements.state(dst.species) == State::Solid {
        return false;
    }
    elements.state(src.species) == State::Solid
        || elements.density(src.species) > elements.density(dst.species)
}

impl Stripe<'_> {
    pub fn is_swappable(&self, src_row: i32, src_col: i32, dst_row: i32, dst_col: i32) -> bool {
        is_swappable(self, self.elements(), src_row, src_col, dst_row, dst_col)
    }

    /// Move the cell at `src` into `dst`, swapping whole cells so color
    /// offsets travel along. A destination above the grid deletes the source
    /// instead. Re-checks walls and density regardless of eligibility.
    pub fn move_and_swap<R: Rng>(
        &mut self,
        src_row: i32,
        src_col: i32,
        dst_row: i32,
        dst_col: i32,
        rng: &mut R,
    ) -> bool {
        let Some(src) = self.cell_at(src_row, src_col) else {
            return false;
        };
        if src.species == Species::Wall {
            return false;
        }
        let (src_row, src_col) = (src_row as usize, src_col as usize);
        if dst_row < 0 {
            self.set(src_row, src_col, Cell::fresh(Species::Empty, rng));
            self.count_move();
            return true;
        }
        let Some(dst) = self.cell_at(dst_row, dst_col) else {
            return false;
        };
        let (dst_row, dst_col) = (dst_row as usize, dst_col as usize);
        if (src_row, src_col) == (dst_row, dst_col) || dst.species == Species::Wall {
            return false;
        }
        let elements = self.elements();
        if elements.density(src.species) <= elements.density(dst.species) {
            return false;
        }
        self.set(src_row, src_col, dst);
        self.set(dst_row, dst_col, src);
        self.count_move();
        true
    }
}
