//! Generation configuration: density profile, genre rules, tech floor.

use std::fmt;
use std::str::FromStr;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Unknown density profile '{0}'")]
    UnknownDensity(String),
    #[error("Unknown genre '{0}'")]
    UnknownGenre(String),
}

/// How likely a hex is to contain a star system.
///
/// Each profile maps to a percentage checked against one percentile roll
/// per hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityProfile {
    ExtraGalactic,
    Rift,
    Sparse,
    Scattered,
    Standard,
    Dense,
    Cluster,
    Core,
}

impl DensityProfile {
    /// Percent chance (1-100) that a hex holds a system.
    pub fn chance(self) -> i32 {
        match self {
            DensityProfile::ExtraGalactic => 1,
            DensityProfile::Rift => 3,
            DensityProfile::Sparse => 17,
            DensityProfile::Scattered => 33,
            DensityProfile::Standard => 50,
            DensityProfile::Dense => 66,
            DensityProfile::Cluster => 83,
            DensityProfile::Core => 91,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DensityProfile::ExtraGalactic => "extra_galactic",
            DensityProfile::Rift => "rift",
            DensityProfile::Sparse => "sparse",
            DensityProfile::Scattered => "scattered",
            DensityProfile::Standard => "standard",
            DensityProfile::Dense => "dense",
            DensityProfile::Cluster => "cluster",
            DensityProfile::Core => "core",
        }
    }
}

impl Default for DensityProfile {
    fn default() -> Self {
        DensityProfile::Standard
    }
}

impl fmt::Display for DensityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DensityProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extra_galactic" => Ok(DensityProfile::ExtraGalactic),
            "rift" => Ok(DensityProfile::Rift),
            "sparse" => Ok(DensityProfile::Sparse),
            "scattered" => Ok(DensityProfile::Scattered),
            "standard" => Ok(DensityProfile::Standard),
            "dense" => Ok(DensityProfile::Dense),
            "cluster" => Ok(DensityProfile::Cluster),
            "core" => Ok(DensityProfile::Core),
            other => Err(ConfigError::UnknownDensity(other.to_string())),
        }
    }
}

/// Genre switch for world-generation strictness.
///
/// `Opera` re-derives atmosphere and hydrographics with harsher
/// small-world rules; `Firm` additionally penalises population and
/// shifts the starport roll by the population delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Genre {
    #[default]
    Standard,
    Opera,
    Firm,
}

impl Genre {
    /// Whether the stricter atmosphere/hydrographics rules apply.
    pub fn hard_environment(self) -> bool {
        matches!(self, Genre::Opera | Genre::Firm)
    }

    /// Whether population and starport adjustments apply.
    pub fn restrictive(self) -> bool {
        matches!(self, Genre::Firm)
    }
}

impl FromStr for Genre {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Genre::Standard),
            "opera" => Ok(Genre::Opera),
            "firm" => Ok(Genre::Firm),
            other => Err(ConfigError::UnknownGenre(other.to_string())),
        }
    }
}

/// Settings consumed by the generation pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sector name, used in file naming and map labels.
    pub name: String,
    pub density: DensityProfile,
    pub genre: Genre,
    /// Optional lower bound applied to generated tech levels.
    pub tech_floor: Option<i32>,
    /// Fixed RNG seed; clock-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: "Unnamed Sector".to_string(),
            density: DensityProfile::default(),
            genre: Genre::default(),
            tech_floor: None,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from an optional TOML file merged with
    /// `SECTORGEN_*` environment variables. Missing files are not an
    /// error; missing keys take their defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix("SECTORGEN"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_chances_are_ordered() {
        let profiles = [
            DensityProfile::ExtraGalactic,
            DensityProfile::Rift,
            DensityProfile::Sparse,
            DensityProfile::Scattered,
            DensityProfile::Standard,
            DensityProfile::Dense,
            DensityProfile::Cluster,
            DensityProfile::Core,
        ];
        for pair in profiles.windows(2) {
            assert!(pair[0].chance() < pair[1].chance());
        }
    }

    #[test]
    fn test_density_round_trips_through_name() {
        let profile: DensityProfile = "scattered".parse().unwrap();
        assert_eq!(profile, DensityProfile::Scattered);
        assert_eq!(profile.name(), "scattered");
        assert!("suburban".parse::<DensityProfile>().is_err());
    }

    #[test]
    fn test_genre_flags() {
        assert!(!Genre::Standard.hard_environment());
        assert!(Genre::Opera.hard_environment());
        assert!(!Genre::Opera.restrictive());
        assert!(Genre::Firm.hard_environment());
        assert!(Genre::Firm.restrictive());
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.density, DensityProfile::Standard);
        assert_eq!(config.genre, Genre::Standard);
        assert!(config.tech_floor.is_none());
    }
}
