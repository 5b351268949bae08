//! Water element: falls like a powder, otherwise spreads sideways.

use crate::api::SandApi;
use crate::movement::liquid_spread;

/// Furthest horizontal step water takes in one frame.
const DISPERSION: u32 = 4;

/// Chance water holds still for a frame even though it could move.
const VISCOSITY: f32 = 0.1;

pub fn update_water(api: &mut SandApi<'_>) {
    liquid_spread(api, DISPERSION, VISCOSITY);
}
