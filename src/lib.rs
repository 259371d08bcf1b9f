//! Procedural star-sector generator.
//!
//! This crate generates a 32x40 hex sector of star systems for
//! tabletop-RPG play: chained dice rolls and lookup tables derive each
//! system's stars, orbits, planets, moons, and socio-economic world
//! profile, and a hex-grid routing engine selects the connectivity
//! edges drawn between nearby inhabited systems.

pub mod config;
pub mod dice;
pub mod export;
pub mod geometry;
pub mod names;
pub mod orbits;
pub mod routing;
pub mod sector;
pub mod stars;
pub mod world;

pub use config::{DensityProfile, Genre, GeneratorConfig};
pub use dice::Dice;
pub use geometry::HexCoord;
pub use orbits::{Body, Orbit, Zone};
pub use routing::{nearby, sector_routes, Route, JUMP_RANGE};
pub use sector::{Sector, Volume};
pub use stars::Star;
pub use world::World;
