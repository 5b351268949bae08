//! Element descriptors and the per-element update functions dispatched
//! from the scheduler.

mod fire;
mod sand;
mod smoke;
mod water;


use crate::api::SandApi;
use crate::cell::Species;

/// Physical state. Decides which moves the swap rules allow.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum State {
    Solid,
    Liquid,
    Gas,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Per-cell update. Runs at most once per cell per frame.
pub type Behavior = fn(&mut SandApi<'_>);

/// Constant attributes shared by every cell of one material.
#[derive(Clone, Copy, Debug)]
pub struct Element {
    pub name: &'static str,
    pub state: State,
    pub density: f32,
    pub color_a: Rgb,
    pub color_b: Rgb,
    pub is_static: bool,
    pub behavior: Behavior,
}

impl Element {
    /// Gradient color for a cell offset, quantised to 256 steps.
    #[must_use]
    pub fn color_at(&self, offset: f32) -> Rgb {
        let t = f32::from((offset.clamp(0.0, 1.0) * 255.0) as u8) / 255.0;
        let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8;
        Rgb {
            r: lerp(self.color_a.r, self.color_b.r),
            g: lerp(self.color_a.g, self.color_b.g),
            b: lerp(self.color_a.b, self.color_b.b),
        }
    }
}

/// Immutable table indexed by material id.
#[derive(Debug)]
pub struct ElementTable {
    elements: [Element; Species::COUNT],
}

impl ElementTable {
    #[must_use]
    pub const fn new(elements: [Element; Species::COUNT]) -> Self {
        Self { elements }
    }

    /// The built-in materials.
    #[must_use]
    pub fn standard() -> &'static ElementTable {
        &STANDARD
    }

    #[must_use]
    pub fn get(&self, species: Species) -> &Element {
        &self.elements[species as usize]
    }

    #[must_use]
    pub fn density(&self, species: Species) -> f32 {
        self.get(species).density
    }

    #[must_use]
    pub fn state(&self, species: Species) -> State {
        self.get(species).state
    }
}

/// Behavior for materials that never act on their own.
pub fn inert(_api: &mut SandApi<'_>) {}

static STANDARD: ElementTable = ElementTable::new([
    Element {
        name: "Empty",
        state: State::Gas,
        density: 0.0,
        color_a: Rgb::new(70, 70, 70),
        color_b: Rgb::new(70, 70, 70),
        is_static: false,
        behavior: inert,
    },
    Element {
        name: "Sand",
        state: State::Solid,
        density: 2.0,
        color_a: Rgb::new(244, 218, 128),
        color_b: Rgb::new(222, 194, 104),
        is_static: false,
        behavior: sand::update_sand,
    },
    Element {
        name: "Wall",
        state: State::Solid,
        density: 2.0,
        color_a: Rgb::new(112, 109, 100),
        color_b: Rgb::new(90, 90, 90),
        is_static: true,
        behavior: inert,
    },
    Element {
        name: "Wood",
        state: State::Solid,
        density: 2.0,
        color_a: Rgb::new(110, 77, 34),
        color_b: Rgb::new(84, 58, 24),
        is_static: true,
        behavior: inert,
    },
    Element {
        name: "Water",
        state: State::Liquid,
        density: 1.0,
        color_a: Rgb::new(66, 135, 245),
        color_b: Rgb::new(52, 112, 214),
        is_static: false,
        behavior: water::update_water,
    },
    Element {
        name: "Fire",
        state: State::Gas,
        density: 0.2,
        color_a: Rgb::new(255, 94, 0),
        color_b: Rgb::new(255, 77, 0),
        is_static: false,
        behavior: fire::update_fire,
    },
    Element {
        name: "Smoke",
        state: State::Gas,
        density: 0.2,
        color_a: Rgb::new(214, 214, 214),
        color_b: Rgb::new(200, 200, 200),
        is_static: false,
        behavior: smoke::update_smoke,
    },
]);

/// Run the behavior of `species` for the cell the api is focused on.
pub fn update_cell(species: Species, api: &mut SandApi<'_>) {
    let behavior = api.elements().get(species).behavior;
    behavior(api);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::fixture::Fixture;
    use proptest::prelude::*;

    #[test]
    fn empty_is_weightless_gas() {
        let empty = ElementTable::standard().get(Species::Empty);
        assert_eq!(empty.state, State::Gas);
        assert_eq!(empty.density, 0.0);
    }

    #[test]
    fn names_follow_species_ids() {
        let table = ElementTable::standard();
        for species in Species::ALL {
            assert_eq!(table.get(species).name, species.to_string());
        }
    }

    #[test]
    fn statics_are_solid() {
        let table = ElementTable::standard();
        for species in Species::ALL {
            let element = table.get(species);
            if element.is_static {
                assert_eq!(element.state, State::Solid, "{species} is static but not solid");
            }
            assert!(element.density >= 0.0);
        }
    }

    #[test]
    fn color_gradient_endpoints() {
        let wall = ElementTable::standard().get(Species::Wall);
        assert_eq!(wall.color_at(0.0), wall.color_a);
        assert_eq!(wall.color_at(1.0), wall.color_b);
        let mid = wall.color_at(0.5);
        assert!(mid.r <= wall.color_a.r && mid.r >= wall.color_b.r);
    }

    #[test]
    fn air_renders_as_background() {
        let empty = ElementTable::standard().get(Species::Empty);
        assert_eq!(empty.color_at(0.73), Rgb::new(70, 70, 70));
    }

    #[test]
    fn inert_materials_never_change() {
        let mut fixture = Fixture::new(4, 4);
        fixture.paint(&["....", ".#o.", "....", "...."]);
        let before = fixture.dump();
        for (row, col) in [(1, 1), (1, 2)] {
            let species = fixture.grid.get(row, col).species;
            let mut api = fixture.api(row, col, 3);
            update_cell(species, &mut api);
        }
        assert_eq!(fixture.dump(), before);
    }

    /// Strategy: a grid of materials that never leave through the top.
    fn arb_heavy_grid(size: usize) -> impl Strategy<Value = Vec<Species>> {
        proptest::collection::vec(
            prop_oneof![
                4 => Just(Species::Empty),
                2 => Just(Species::Sand),
                2 => Just(Species::Water),
                1 => Just(Species::Wall),
                1 => Just(Species::Wood),
            ],
            size * size,
        )
    }

    proptest! {
        #[test]
        fn prop_species_conserved_by_single_updates(
            species in arb_heavy_grid(8),
            row in 0usize..8,
            col in 0usize..8,
            seed in any::<u64>(),
        ) {
            let mut fixture = Fixture::new(8, 8);
            for (i, &sp) in species.iter().enumerate() {
                fixture.place(i / 8, i % 8, Cell::new(sp));
            }
            let before = fixture.counts();
            let target = fixture.grid.get(row, col).species;
            let mut api = fixture.api(row, col, seed);
            update_cell(target, &mut api);
            prop_assert_eq!(fixture.counts(), before);
        }
    }
}
