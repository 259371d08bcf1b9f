//! JSON volume index for the interactive viewer.
//!
//! The viewer answers "show me volume 1101" and "nearby systems" from a
//! single document keyed by 4-digit coordinate, so the map data is a
//! flat object rather than the grid itself.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::orbits::{Moon, Orbit};
use crate::sector::{Sector, Volume};
use crate::stars::Star;
use crate::world::World;

use super::ExportError;

#[derive(Serialize)]
struct SectorDoc {
    name: String,
    volumes: BTreeMap<String, VolumeDoc>,
}

#[derive(Serialize)]
struct VolumeDoc {
    name: String,
    uwp: String,
    star: StarDoc,
}

#[derive(Serialize)]
struct StarDoc {
    classification: String,
    orbits: Vec<OrbitDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    world: Option<WorldDoc>,
}

#[derive(Serialize)]
struct OrbitDoc {
    kind: char,
    uwp: String,
    au: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    moons: Vec<MoonDoc>,
}

#[derive(Serialize)]
struct MoonDoc {
    radii: i32,
    uwp: String,
}

#[derive(Serialize)]
struct WorldDoc {
    uwp: String,
    temperature: char,
    bases: String,
    travel_zone: String,
    trade_codes: Vec<String>,
    factions: Vec<String>,
}

impl From<&Moon> for MoonDoc {
    fn from(moon: &Moon) -> Self {
        Self {
            radii: moon.orbit_radii,
            uwp: moon.uwp(),
        }
    }
}

impl From<&Orbit> for OrbitDoc {
    fn from(orbit: &Orbit) -> Self {
        Self {
            kind: orbit.body.code(),
            uwp: orbit.uwp(),
            au: orbit.au,
            moons: orbit.body.moons().iter().map(MoonDoc::from).collect(),
        }
    }
}

impl From<&World> for WorldDoc {
    fn from(world: &World) -> Self {
        Self {
            uwp: world.uwp(),
            temperature: world.temperature.code(),
            bases: world.bases.flags(),
            travel_zone: world.travel_zone().to_string(),
            trade_codes: world.trade_codes.iter().map(|c| c.code().to_string()).collect(),
            factions: world.factions.iter().map(|f| f.code().to_string()).collect(),
        }
    }
}

impl From<&Star> for StarDoc {
    fn from(star: &Star) -> Self {
        Self {
            classification: star.crib(),
            orbits: star.orbits.iter().map(OrbitDoc::from).collect(),
            world: star.world().map(WorldDoc::from),
        }
    }
}

impl From<&Volume> for VolumeDoc {
    fn from(volume: &Volume) -> Self {
        Self {
            name: volume.name.clone(),
            uwp: volume.world().uwp(),
            star: StarDoc::from(&volume.star),
        }
    }
}

/// Serializes the sector's volume index as pretty-printed JSON.
pub fn sector_to_json(sector: &Sector) -> Result<String, ExportError> {
    let doc = SectorDoc {
        name: sector.name.clone(),
        volumes: sector
            .volumes
            .iter()
            .map(|v| (v.coord.to_string(), VolumeDoc::from(v)))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Writes the JSON volume index to `path`.
pub fn write_json(sector: &Sector, path: &Path) -> Result<(), ExportError> {
    fs::write(path, sector_to_json(sector)?)?;
    Ok(())
}
