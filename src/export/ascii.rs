//! Sector text format.
//!
//! One summary line per volume, followed by indented orbit and moon
//! detail lines. The summary line is the interchange record: the SVG
//! renderer and the nearby-systems query re-parse it rather than
//! re-running generation. Lines that do not begin with a 4-digit
//! coordinate are detail lines and are skipped on read.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::HexCoord;
use crate::orbits::Zone;
use crate::sector::{Sector, Volume};

use super::ExportError;

/// Errors raised by strict parsing of a single summary line.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("summary line does not start with a coordinate: '{0}'")]
    BadCoordinate(String),
    #[error("summary line is missing the {0} field")]
    MissingField(&'static str),
}

/// The parsed form of one volume summary line.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeSummary {
    pub coord: HexCoord,
    pub uwp: String,
    pub temperature: char,
    pub bases: String,
    pub travel_zone: String,
    pub trade_codes: Vec<String>,
    pub factions: Vec<String>,
    pub stars: Vec<String>,
    pub name: String,
}

impl VolumeSummary {
    /// Whether the record reduces to the uninhabited placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.uwp.contains("X000000")
    }
}

impl FromStr for VolumeSummary {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut segments = line.split('\t');
        let details = segments.next().unwrap_or_default();
        let mut fields = details.split_whitespace();

        let coord = fields
            .next()
            .and_then(HexCoord::parse)
            .ok_or_else(|| ParseError::BadCoordinate(line.to_string()))?;
        let uwp = fields
            .next()
            .ok_or(ParseError::MissingField("UWP"))?
            .to_string();
        let temperature = fields
            .next()
            .and_then(|f| f.chars().next())
            .ok_or(ParseError::MissingField("temperature"))?;
        let bases = fields
            .next()
            .ok_or(ParseError::MissingField("bases"))?
            .to_string();
        let travel_zone = fields
            .next()
            .ok_or(ParseError::MissingField("travel zone"))?
            .to_string();

        let list = |segment: Option<&str>, separator: char| -> Vec<String> {
            segment
                .unwrap_or_default()
                .split(separator)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        let trade_codes = list(segments.next(), ',');
        let factions = list(segments.next(), ',');
        let stars = list(segments.next(), '/');
        let name = segments.next().unwrap_or_default().trim().to_string();

        Ok(Self {
            coord,
            uwp,
            temperature,
            bases,
            travel_zone,
            trade_codes,
            factions,
            stars,
            name,
        })
    }
}

/// Parses every summary line in a sector text. Detail lines, malformed
/// records, and duplicate coordinates are skipped, never fatal.
pub fn parse_summaries(text: &str) -> Vec<VolumeSummary> {
    let mut seen = HashSet::new();
    text.lines()
        .filter_map(|line| line.parse::<VolumeSummary>().ok())
        .filter(|summary| seen.insert(summary.coord))
        .collect()
}

fn summary_line(volume: &Volume) -> String {
    let world = volume.world();
    let trade_codes: Vec<&str> = world.trade_codes.iter().map(|c| c.code()).collect();
    let factions: String = world
        .factions
        .iter()
        .map(|f| f.code().to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{} {} {} {} {}\t{}\t{}\t{}\t{}",
        volume.coord,
        world.uwp(),
        world.temperature.code(),
        world.bases.flags(),
        world.travel_zone(),
        trade_codes.join(","),
        factions,
        volume.star.crib(),
        volume.name,
    )
}

fn volume_lines(volume: &Volume, out: &mut Vec<String>) {
    out.push(summary_line(volume));
    for orbit in &volume.star.orbits {
        let marker = if orbit.zone == Zone::Biozone { '*' } else { ' ' };
        out.push(format!(
            "  -- {:2}. {}  {} // {} // {:4.1} au",
            orbit.index + 1,
            marker,
            orbit.body.code(),
            orbit.uwp(),
            orbit.au,
        ));
        for moon in orbit.body.moons() {
            out.push(format!(
                "{:28}/  {:3} rad. {}",
                "",
                moon.orbit_radii,
                moon.uwp()
            ));
        }
    }
}

/// Renders the whole sector as text, one summary block per volume.
pub fn sector_to_ascii(sector: &Sector) -> String {
    let mut lines = Vec::new();
    for volume in &sector.volumes {
        volume_lines(volume, &mut lines);
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Writes the sector text to `path`.
pub fn write_sector(sector: &Sector, path: &Path) -> Result<(), ExportError> {
    fs::write(path, sector_to_ascii(sector))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DensityProfile, GeneratorConfig};
    use crate::dice::Dice;
    use crate::sector;

    fn sample_sector(seed: u64) -> Sector {
        let config = GeneratorConfig {
            density: DensityProfile::Standard,
            ..GeneratorConfig::default()
        };
        let mut dice = Dice::seeded(seed);
        sector::generate(&config, &mut dice)
    }

    #[test]
    fn test_summary_line_shape() {
        let sector = sample_sector(21);
        let volume = &sector.volumes[0];
        let line = summary_line(volume);
        let details = line.split('\t').next().unwrap();
        let fields: Vec<&str> = details.split_whitespace().collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], volume.coord.to_string());
        assert_eq!(fields[1].len(), 9);
        assert_eq!(fields[3].len(), 5);
        assert!(fields[4] == ".." || fields[4] == "AZ");
        assert_eq!(line.split('\t').count(), 5);
    }

    #[test]
    fn test_summary_lines_round_trip() {
        let sector = sample_sector(22);
        let text = sector_to_ascii(&sector);
        let summaries = parse_summaries(&text);
        assert_eq!(summaries.len(), sector.volumes.len());
        for (summary, volume) in summaries.iter().zip(&sector.volumes) {
            assert_eq!(summary.coord, volume.coord);
            assert_eq!(summary.uwp, volume.world().uwp());
            assert_eq!(summary.name, volume.name);
            assert_eq!(summary.stars.len(), volume.star.companions.len() + 1);
        }
    }

    #[test]
    fn test_seeded_export_is_byte_identical() {
        let first = sector_to_ascii(&sample_sector(24));
        let second = sector_to_ascii(&sample_sector(24));
        assert_eq!(first, second);
    }

    #[test]
    fn test_detail_lines_are_skipped() {
        let text = "  --  1. *  W // A867945-8 //  1.1 au\n\
                    0101 A867945-8 T N.G.. ..\tAg,Ga\tO,F\tG2V\tHaven\n\
                    garbage line\n";
        let summaries = parse_summaries(text);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].coord, HexCoord::new(1, 1));
        assert_eq!(summaries[0].trade_codes, vec!["Ag", "Ga"]);
        assert_eq!(summaries[0].factions, vec!["O", "F"]);
        assert_eq!(summaries[0].name, "Haven");
    }

    #[test]
    fn test_duplicate_coordinates_are_dropped() {
        let text = "0101 A867945-8 T N.G.. ..\tAg\tO\tG2V\tHaven\n\
                    0101 B550000-0 F ..... AZ\t\t\tK5V\tEcho\n";
        let summaries = parse_summaries(text);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Haven");
    }

    #[test]
    fn test_empty_segments_parse_to_empty_lists() {
        let line = "0203 X550000-0 F ..... AZ\t\t\tM2V\tBarrens";
        let summary: VolumeSummary = line.parse().unwrap();
        assert!(summary.trade_codes.is_empty());
        assert!(summary.factions.is_empty());
        assert_eq!(summary.stars, vec!["M2V"]);
    }

    #[test]
    fn test_placeholder_detection() {
        let line = "0203 X000000-0 F ..... AZ\tBa\t\tM2V\tBarrens";
        let summary: VolumeSummary = line.parse().unwrap();
        assert!(summary.is_placeholder());
    }

    #[test]
    fn test_moon_lines_render_under_orbits() {
        let sector = sample_sector(23);
        let text = sector_to_ascii(&sector);
        let has_moons = sector
            .volumes
            .iter()
            .flat_map(|v| v.star.orbits.iter())
            .any(|o| !o.body.moons().is_empty());
        if has_moons {
            assert!(text.contains(" rad. X"));
        }
    }
}
