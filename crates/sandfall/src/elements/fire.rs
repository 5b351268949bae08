//! Fire element: flickers upward and burns out into smoke.

use crate::api::SandApi;
use crate::cell::Species;
use crate::movement::gas_rise;

/// Per-frame chance to turn into smoke.
const BURN_OUT_CHANCE: f32 = 0.0086;

const VOLATILITY: f32 = 0.28;
const DISPERSION: u32 = 2;
const UPWARD_PREFERENCE: f32 = 0.108;

pub fn update_fire(api: &mut SandApi<'_>) {
    if api.chance(BURN_OUT_CHANCE) {
        api.replace(Species::Smoke);
        return;
    }
    gas_rise(api, VOLATILITY, DISPERSION, UPWARD_PREFERENCE);
}
