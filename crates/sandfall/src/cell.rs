//! Cell and Species types for the simulation grid.

use std::fmt;

use rand::Rng;

use crate::error::UnknownMaterial;

/// Material id. Discriminants index the element table, do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Species {
    Empty = 0,
    Sand = 1,
    Wall = 2,
    Wood = 3,
    Water = 4,
    Fire = 5,
    Smoke = 6,
}

impl Species {
    pub const COUNT: usize = 7;

    pub const ALL: [Species; Self::COUNT] = [
        Self::Empty,
        Self::Sand,
        Self::Wall,
        Self::Wood,
        Self::Water,
        Self::Fire,
        Self::Smoke,
    ];

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Species {
    type Error = UnknownMaterial;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(UnknownMaterial(id))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Sand => write!(f, "Sand"),
            Self::Wall => write!(f, "Wall"),
            Self::Wood => write!(f, "Wood"),
            Self::Water => write!(f, "Water"),
            Self::Fire => write!(f, "Fire"),
            Self::Smoke => write!(f, "Smoke"),
        }
    }
}

/// One grid cell. `color_offset` is chosen when the cell is created and
/// travels with it through swaps; only replacing the cell draws a new one.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    pub species: Species,
    pub color_offset: f32,
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.species)
    }
}

impl Cell {
    /// A cell with a fixed offset of zero. Mostly useful in tests.
    #[must_use]
    pub fn new(species: Species) -> Self {
        Self {
            species,
            color_offset: 0.0,
        }
    }

    /// A brand new cell with a random offset in `[0, 1)`.
    pub fn fresh<R: Rng>(species: Species, rng: &mut R) -> Self {
        Self {
            species,
            color_offset: rng.random::<f32>(),
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Species::Empty)
    }

    #[must_use]
    pub fn wall() -> Self {
        Self::new(Species::Wall)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species == Species::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn species_discriminant_values() {
        assert_eq!(Species::Empty as u8, 0);
        assert_eq!(Species::Sand as u8, 1);
        assert_eq!(Species::Wall as u8, 2);
        assert_eq!(Species::Wood as u8, 3);
        assert_eq!(Species::Water as u8, 4);
        assert_eq!(Species::Fire as u8, 5);
        assert_eq!(Species::Smoke as u8, 6);
    }

    #[test]
    fn all_lists_species_in_id_order() {
        for (i, species) in Species::ALL.iter().enumerate() {
            assert_eq!(usize::from(species.id()), i);
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(Species::try_from(4u8), Ok(Species::Water));
        assert_eq!(Species::try_from(7u8), Err(UnknownMaterial(7)));
        assert_eq!(Species::try_from(255u8), Err(UnknownMaterial(255)));
    }

    #[test]
    fn cell_constructors() {
        let empty = Cell::empty();
        assert_eq!(empty.species, Species::Empty);
        assert!(empty.is_empty());
        assert_eq!(empty.color_offset, 0.0);

        let wall = Cell::wall();
        assert_eq!(wall.species, Species::Wall);
        assert!(!wall.is_empty());
    }

    #[test]
    fn cell_default_is_empty() {
        assert_eq!(Cell::default(), Cell::empty());
    }

    #[test]
    fn species_display() {
        assert_eq!(format!("{}", Species::Sand), "Sand");
        assert_eq!(format!("{}", Cell::new(Species::Smoke)), "Smoke");
    }

    proptest! {
        #[test]
        fn prop_fresh_offsets_stay_in_unit_range(seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            for species in Species::ALL {
                let cell = Cell::fresh(species, &mut rng);
                prop_assert_eq!(cell.species, species);
                prop_assert!((0.0..1.0).contains(&cell.color_offset));
            }
        }
    }
}
