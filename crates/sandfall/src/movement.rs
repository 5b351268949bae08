//! Movement primitives shared by element behaviors.
//!
//! Each primitive decides on at most one destination and commits it with a
//! single `move_and_swap`. When a random gate holds back a move that was
//! possible, the chunk is kept awake for another frame.

use crate::api::SandApi;

/// Column offset of the best cell in row `dr`: straight ahead when eligible,
/// else a random eligible diagonal.
pub fn fall_target(api: &mut SandApi<'_>, dr: i32) -> Option<i32> {
    if api.is_swappable(dr, 0) {
        return Some(0);
    }
    match (api.is_swappable(dr, -1), api.is_swappable(dr, 1)) {
        (true, true) => Some(api.coin_flip()),
        (true, false) => Some(-1),
        (false, true) => Some(1),
        (false, false) => None,
    }
}

/// Furthest horizontal offset reachable in one frame, walking up to
/// `dispersion` cells in a random eligible direction.
fn spread_target(api: &mut SandApi<'_>, dispersion: u32) -> Option<i32> {
    if dispersion == 0 {
        return None;
    }
    let dir = match (api.is_swappable(0, -1), api.is_swappable(0, 1)) {
        (true, true) => api.coin_flip(),
        (true, false) => -1,
        (false, true) => 1,
        (false, false) => return None,
    };
    let mut reach = 1;
    while reach < dispersion as i32 && api.is_swappable(0, dir * (reach + 1)) {
        reach += 1;
    }
    Some(dir * reach)
}

/// Fall straight down, or slide diagonally unless held back by
/// `slow_factor`. Returns whether the cell moved.
pub fn powder_fall(api: &mut SandApi<'_>, slow_factor: f32) -> bool {
    match fall_target(api, 1) {
        Some(0) => api.move_and_swap(1, 0),
        Some(dc) if api.chance(1.0 - slow_factor) => api.move_and_swap(1, dc),
        Some(_) => {
            api.dont_sleep_next_frame();
            false
        }
        None => false,
    }
}

/// Fall like a powder, else spread sideways. `viscosity` is the chance of
/// staying put for the frame.
pub fn liquid_spread(api: &mut SandApi<'_>, dispersion: u32, viscosity: f32) -> bool {
    let target = match fall_target(api, 1) {
        Some(dc) => Some((1, dc)),
        None => spread_target(api, dispersion).map(|dc| (0, dc)),
    };
    let Some((dr, dc)) = target else {
        return false;
    };
    if api.chance(1.0 - viscosity) {
        api.move_and_swap(dr, dc)
    } else {
        api.dont_sleep_next_frame();
        false
    }
}

/// Upside-down liquid with two extra knobs. `volatility` is the chance of a
/// random jump to any neighbour first; `upward_preference` is the chance the
/// rise/spread logic runs at all this frame.
pub fn gas_rise(
    api: &mut SandApi<'_>,
    volatility: f32,
    dispersion: u32,
    upward_preference: f32,
) -> bool {
    if api.chance(volatility) {
        let dr = api.random_step();
        let dc = if dr == 0 {
            api.coin_flip()
        } else {
            api.random_step()
        };
        if api.is_swappable(dr, dc) {
            return api.move_and_swap(dr, dc);
        }
    }
    if !api.chance(upward_preference) {
        return false;
    }
    let target = match fall_target(api, -1) {
        Some(dc) => Some((-1, dc)),
        None => spread_target(api, dispersion).map(|dc| (0, dc)),
    };
    match target {
        Some((dr, dc)) => api.move_and_swap(dr, dc),
        None => false,
    }
}
