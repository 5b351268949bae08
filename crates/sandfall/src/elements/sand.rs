//! Sand element: falls straight down, occasionally slides diagonally.

use crate::api::SandApi;
use crate::movement::powder_fall;

/// Chance that an available diagonal slide is skipped this frame.
/// Keeps sand piles steep instead of flowing like a liquid.
const SLOW_FACTOR: f32 = 0.05;

pub fn update_sand(api: &mut SandApi<'_>) {
    powder_fall(api, SLOW_FACTOR);
}
