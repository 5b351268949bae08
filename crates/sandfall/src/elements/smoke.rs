//! Smoke element: rises and drifts, thinning out over time.

use crate::api::SandApi;
use crate::cell::Species;
use crate::movement::gas_rise;

/// Per-frame chance to vanish.
const DISSIPATION: f32 = 0.0066;

const VOLATILITY: f32 = 0.22;
const DISPERSION: u32 = 3;
const UPWARD_PREFERENCE: f32 = 0.8;

pub fn update_smoke(api: &mut SandApi<'_>) {
    if api.chance(DISSIPATION) {
        api.replace(Species::Empty);
        return;
    }
    gas_rise(api, VOLATILITY, DISPERSION, UPWARD_PREFERENCE);
}
