//! Sector assembly: the row-major scan over the hex grid.
//!
//! Each hex gets one percentile presence check against the density
//! profile. Occupied hexes grow a primary star, possible companions,
//! and a name; volumes whose star never produced a mainworld are
//! dropped before the sector is assembled.

use std::collections::HashSet;

use log::{debug, info};

use crate::config::GeneratorConfig;
use crate::dice::Dice;
use crate::geometry::HexCoord;
use crate::names;
use crate::stars::{self, Star};
use crate::world::World;

/// Grid width in hex columns.
pub const COLUMNS: u32 = 32;
/// Grid height in hex rows.
pub const ROWS: u32 = 40;

// Companion-star count by 2d6.
const COMPANION_COUNTS: [usize; 13] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2];

/// One inhabited hex: a named star system at a coordinate.
#[derive(Debug, Clone)]
pub struct Volume {
    pub coord: HexCoord,
    pub name: String,
    pub star: Star,
}

impl Volume {
    /// The system's mainworld. Assembly drops volumes without one, so
    /// this always resolves for volumes inside a sector.
    pub fn world(&self) -> &World {
        self.star.world().expect("assembled volume has a mainworld")
    }
}

/// A generated sector: the ordered set of inhabited volumes.
/// Immutable after assembly.
#[derive(Debug, Clone)]
pub struct Sector {
    pub name: String,
    pub volumes: Vec<Volume>,
}

impl Sector {
    pub fn volume(&self, coord: HexCoord) -> Option<&Volume> {
        self.volumes.iter().find(|v| v.coord == coord)
    }

    /// Coordinates of every inhabited volume, for route queries.
    pub fn occupied(&self) -> HashSet<HexCoord> {
        self.volumes.iter().map(|v| v.coord).collect()
    }
}

fn generate_volume(coord: HexCoord, dice: &mut Dice, config: &GeneratorConfig) -> Option<Volume> {
    let name = names::volume_name(dice);
    let mut star = stars::generate_primary(dice, config);

    let count = COMPANION_COUNTS[dice.two_d6().min(12) as usize];
    for ternary in 0..count {
        let (companion, orbit_index) = stars::generate_companion(dice, &star, ternary, config);
        stars::attach_companion(&mut star, companion, orbit_index);
    }

    // Refuelling depends on the finished orbit list, so the flag lands
    // after companion splicing settles it.
    let has_giant = star.has_gas_giant();
    let world = star.world_mut()?;
    world.bases.gas_giant = has_giant;

    debug!("volume {} \"{}\": {}", coord, name, star.crib());
    Some(Volume { coord, name, star })
}

/// Assembles a sector by scanning the full grid in row-major order.
pub fn generate(config: &GeneratorConfig, dice: &mut Dice) -> Sector {
    let chance = config.density.chance();
    info!(
        "assembling sector \"{}\" at density {} ({}%)",
        config.name, config.density, chance
    );

    let mut volumes = Vec::new();
    for row in 1..=ROWS {
        for column in 1..=COLUMNS {
            if dice.percentile() > chance {
                continue;
            }
            if let Some(volume) = generate_volume(HexCoord::new(column, row), dice, config) {
                volumes.push(volume);
            }
        }
    }

    info!(
        "sector \"{}\": {} inhabited volumes across {} hexes",
        config.name,
        volumes.len(),
        COLUMNS * ROWS
    );
    Sector {
        name: config.name.clone(),
        volumes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DensityProfile;
    use crate::orbits::Body;

    fn sample_sector(seed: u64, density: DensityProfile) -> Sector {
        let config = GeneratorConfig {
            density,
            ..GeneratorConfig::default()
        };
        let mut dice = Dice::seeded(seed);
        generate(&config, &mut dice)
    }

    #[test]
    fn test_coordinates_are_unique_and_in_bounds() {
        let sector = sample_sector(1, DensityProfile::Standard);
        let mut seen = HashSet::new();
        for volume in &sector.volumes {
            assert!(seen.insert(volume.coord), "duplicate {}", volume.coord);
            assert!((1..=COLUMNS).contains(&volume.coord.column));
            assert!((1..=ROWS).contains(&volume.coord.row));
        }
    }

    #[test]
    fn test_every_volume_has_a_mainworld() {
        let sector = sample_sector(2, DensityProfile::Dense);
        assert!(!sector.volumes.is_empty());
        for volume in &sector.volumes {
            assert!(volume.star.has_world());
            assert_eq!(volume.world().uwp().len(), 9);
        }
    }

    #[test]
    fn test_volumes_arrive_in_row_major_order() {
        let sector = sample_sector(3, DensityProfile::Standard);
        for pair in sector.volumes.windows(2) {
            let a = (pair[0].coord.row, pair[0].coord.column);
            let b = (pair[1].coord.row, pair[1].coord.column);
            assert!(a < b);
        }
    }

    #[test]
    fn test_density_orders_volume_counts() {
        let rift = sample_sector(4, DensityProfile::Rift);
        let core = sample_sector(4, DensityProfile::Core);
        assert!(rift.volumes.len() < core.volumes.len());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let first = sample_sector(5, DensityProfile::Standard);
        let second = sample_sector(5, DensityProfile::Standard);
        assert_eq!(first.volumes.len(), second.volumes.len());
        for (a, b) in first.volumes.iter().zip(&second.volumes) {
            assert_eq!(a.coord, b.coord);
            assert_eq!(a.name, b.name);
            assert_eq!(a.world().uwp(), b.world().uwp());
        }
    }

    #[test]
    fn test_gas_giant_flag_matches_orbits() {
        let sector = sample_sector(6, DensityProfile::Cluster);
        for volume in &sector.volumes {
            let has_giant = volume
                .star
                .orbits
                .iter()
                .any(|o| matches!(o.body, Body::GasGiant(_)));
            assert_eq!(volume.world().bases.gas_giant, has_giant);
        }
    }

    #[test]
    fn test_occupied_set_matches_volumes() {
        let sector = sample_sector(7, DensityProfile::Standard);
        let occupied = sector.occupied();
        assert_eq!(occupied.len(), sector.volumes.len());
        for volume in &sector.volumes {
            assert!(occupied.contains(&volume.coord));
            assert!(sector.volume(volume.coord).is_some());
        }
    }
}
