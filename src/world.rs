//! Mainworld attribute derivation.
//!
//! Attributes are derived in a fixed order, each step reading only what
//! earlier steps produced: environment (size, atmosphere, temperature,
//! hydrographics), then starport, population, government, law, factions,
//! tech level, the temperature override, bases, and finally trade codes.
//! The rule set lives in immutable tables so each step is auditable on
//! its own.

use crate::config::{Genre, GeneratorConfig};
use crate::dice::Dice;
use crate::orbits::{Moon, Zone};

/// Climate band of a world, from its two-dice temperature roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureClass {
    Frozen,
    Cold,
    Temperate,
    Hot,
    Roasting,
}

impl TemperatureClass {
    /// Single-letter code used in sector text output.
    pub fn code(self) -> char {
        match self {
            TemperatureClass::Frozen => 'F',
            TemperatureClass::Cold => 'C',
            TemperatureClass::Temperate => 'T',
            TemperatureClass::Hot => 'H',
            TemperatureClass::Roasting => 'R',
        }
    }
}

/// Starport quality class, worst (X) to best (A).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Starport {
    A,
    B,
    C,
    D,
    E,
    X,
}

impl Starport {
    pub fn code(self) -> char {
        match self {
            Starport::A => 'A',
            Starport::B => 'B',
            Starport::C => 'C',
            Starport::D => 'D',
            Starport::E => 'E',
            Starport::X => 'X',
        }
    }

    fn tech_modifier(self) -> i32 {
        match self {
            Starport::A => 6,
            Starport::B => 4,
            Starport::C => 2,
            Starport::D | Starport::E => 0,
            Starport::X => -4,
        }
    }

    /// Base-presence thresholds: a 2d6 roll at or above the threshold
    /// places the facility. Order: navy, scout, consulate, pirate.
    fn base_thresholds(self) -> (i32, i32, i32, i32) {
        match self {
            Starport::A => (8, 10, 6, 20),
            Starport::B => (8, 8, 8, 12),
            Starport::C => (20, 8, 10, 10),
            Starport::D => (20, 7, 20, 12),
            Starport::E | Starport::X => (20, 20, 20, 20),
        }
    }
}

/// Relative strength of a cultural or political faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactionStrength {
    Obscure,
    Fringe,
    Minor,
    Notable,
    Significant,
    Prevailing,
}

impl FactionStrength {
    pub fn code(self) -> char {
        match self {
            FactionStrength::Obscure => 'O',
            FactionStrength::Fringe => 'F',
            FactionStrength::Minor => 'M',
            FactionStrength::Notable => 'N',
            FactionStrength::Significant => 'S',
            FactionStrength::Prevailing => 'P',
        }
    }
}

/// Two-letter economic/environmental classification tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeCode {
    Agricultural,
    Asteroid,
    Barren,
    Desert,
    Fluid,
    Garden,
    HighPopulation,
    HighTech,
    IceCapped,
    Industrial,
    LowPopulation,
    LowTech,
    NonAgricultural,
    NonIndustrial,
    Poor,
    Rich,
    Vacuum,
    Water,
}

impl TradeCode {
    pub fn code(self) -> &'static str {
        match self {
            TradeCode::Agricultural => "Ag",
            TradeCode::Asteroid => "As",
            TradeCode::Barren => "Ba",
            TradeCode::Desert => "De",
            TradeCode::Fluid => "Fl",
            TradeCode::Garden => "Ga",
            TradeCode::HighPopulation => "Hi",
            TradeCode::HighTech => "Ht",
            TradeCode::IceCapped => "IC",
            TradeCode::Industrial => "In",
            TradeCode::LowPopulation => "Lo",
            TradeCode::LowTech => "Lt",
            TradeCode::NonAgricultural => "Na",
            TradeCode::NonIndustrial => "NI",
            TradeCode::Poor => "Po",
            TradeCode::Rich => "Ri",
            TradeCode::Vacuum => "Va",
            TradeCode::Water => "Wa",
        }
    }
}

/// Facility presence flags, rendered as the 5-character NSGCP field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bases {
    pub navy: bool,
    pub scout: bool,
    pub gas_giant: bool,
    pub consulate: bool,
    pub pirate: bool,
}

impl Bases {
    /// Fixed-order flag string: navy, scout, gas giant, consulate,
    /// pirate; absent facilities render as '.'.
    pub fn flags(self) -> String {
        let mark = |present: bool, letter: char| if present { letter } else { '.' };
        [
            mark(self.navy, 'N'),
            mark(self.scout, 'S'),
            mark(self.gas_giant, 'G'),
            mark(self.consulate, 'C'),
            mark(self.pirate, 'P'),
        ]
        .iter()
        .collect()
    }
}

/// A fully derived mainworld.
#[derive(Debug, Clone)]
pub struct World {
    pub size: i32,
    pub atmosphere: i32,
    pub temperature: TemperatureClass,
    pub hydrographics: i32,
    pub starport: Starport,
    pub population: i32,
    pub government: i32,
    pub law: i32,
    pub tech: i32,
    pub trade_codes: Vec<TradeCode>,
    pub factions: Vec<FactionStrength>,
    pub bases: Bases,
    pub moons: Vec<Moon>,
}

impl World {
    /// The 9-character Universal World Profile:
    /// starport, size, atmosphere, hydrographics, population,
    /// government, law, '-', tech. Numeric fields are hex digits.
    pub fn uwp(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}-{}",
            self.starport.code(),
            hex_digit(self.size),
            hex_digit(self.atmosphere),
            hex_digit(self.hydrographics),
            hex_digit(self.population),
            hex_digit(self.government),
            hex_digit(self.law),
            hex_digit(self.tech),
        )
    }

    /// Whether the profile is the uninhabited placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.uwp().contains("X000000")
    }

    /// Travel advisory: amber for hostile atmospheres and unstable or
    /// extreme governance, clear otherwise.
    pub fn travel_zone(&self) -> &'static str {
        let unstable = matches!(self.government, 0 | 7 | 10);
        let extreme = matches!(self.law, 0 | 9 | 10 | 11 | 12 | 13);
        if self.atmosphere > 9 || unstable || extreme {
            "AZ"
        } else {
            ".."
        }
    }
}

/// Encodes an attribute value as a UWP hex digit; values above 15 clamp
/// to 'F', negatives to '0'.
pub fn hex_digit(value: i32) -> char {
    match value {
        i32::MIN..=-1 => '0',
        0..=9 => (b'0' + value as u8) as char,
        10..=15 => (b'A' + (value - 10) as u8) as char,
        _ => 'F',
    }
}

/// Decodes a UWP hex digit back to its value.
pub fn hex_value(digit: char) -> Option<i32> {
    match digit {
        '0'..='9' => Some(digit as i32 - '0' as i32),
        'A'..='F' => Some(digit as i32 - 'A' as i32 + 10),
        _ => None,
    }
}

// Temperature modifier by atmosphere, then roll-to-band buckets.
const TEMPERATURE_MODIFIER: [i32; 16] = [0, 0, -2, -2, -1, -1, 0, 0, 1, 1, 2, 6, 6, 2, -1, 2];
const TEMPERATURE_BANDS: [TemperatureClass; 17] = {
    use TemperatureClass::*;
    [
        Frozen, Frozen, Frozen, Cold, Cold, Temperate, Temperate, Temperate, Temperate, Temperate,
        Hot, Hot, Roasting, Roasting, Roasting, Roasting, Roasting,
    ]
};

// Firm-genre population penalty by atmosphere.
const POPULATION_MODIFIER: [i32; 16] = [-1, -1, -1, -1, -1, 1, 1, -1, 1, -1, -1, -1, -1, -1, -1, -1];

// Starport class by (possibly shifted) 2d6 roll.
const STARPORT_CLASSES: [Starport; 20] = {
    use Starport::*;
    [X, X, X, E, E, D, D, C, C, B, B, A, A, A, A, A, A, A, A, A]
};

// Faction strength by 2d6 roll.
const FACTION_TABLE: [FactionStrength; 13] = {
    use FactionStrength::*;
    [
        Obscure, Obscure, Obscure, Obscure, Fringe, Fringe, Minor, Minor, Notable, Notable,
        Significant, Significant, Prevailing,
    ]
};

// Tech-level modifiers keyed by world attributes; out-of-table values
// contribute nothing.
const TECH_SIZE: [i32; 16] = [2, 2, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
const TECH_ATMOSPHERE: [i32; 21] = [
    1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];
const TECH_HYDROGRAPHICS: [i32; 11] = [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2];
const TECH_POPULATION: [i32; 13] = [0, 1, 1, 1, 1, 1, 0, 0, 0, 1, 2, 3, 4];
const TECH_GOVERNMENT: [i32; 16] = [1, 0, 0, 0, 0, 1, 0, 2, 0, 0, 0, 0, 0, -2, -2, 0];

// Hard ceiling on tech by atmosphere; unknown atmospheres fall back to
// the common ceiling.
const ENVIRONMENTAL_CEILING: [i32; 14] = [8, 8, 5, 5, 3, 0, 0, 3, 0, 8, 9, 10, 5, 8];

// Trade-code predicates over the final attribute set, all evaluated
// independently.
const TRADE_PREDICATES: &[(TradeCode, fn(&World) -> bool)] = &[
    (TradeCode::Agricultural, |w| {
        (4..=9).contains(&w.atmosphere)
            && (4..=8).contains(&w.hydrographics)
            && (5..=7).contains(&w.population)
    }),
    (TradeCode::Asteroid, |w| {
        w.size == 0 && w.atmosphere == 0 && w.hydrographics == 0
    }),
    (TradeCode::Barren, |w| {
        w.population == 0 && w.government == 0 && w.law == 0
    }),
    (TradeCode::Desert, |w| w.atmosphere > 1 && w.hydrographics == 0),
    (TradeCode::Fluid, |w| w.atmosphere > 9 && w.hydrographics > 0),
    (TradeCode::Garden, |w| {
        w.size > 4 && (4..=9).contains(&w.atmosphere) && (4..=8).contains(&w.hydrographics)
    }),
    (TradeCode::HighPopulation, |w| w.population > 8),
    (TradeCode::HighTech, |w| w.tech > 12),
    (TradeCode::IceCapped, |w| {
        w.atmosphere < 2 && w.hydrographics > 0
    }),
    (TradeCode::Industrial, |w| {
        matches!(w.atmosphere, 0 | 1 | 2 | 4 | 7 | 9) && w.population > 8
    }),
    (TradeCode::LowPopulation, |w| (1..=3).contains(&w.population)),
    (TradeCode::LowTech, |w| w.tech < 6),
    (TradeCode::NonAgricultural, |w| {
        (0..=3).contains(&w.atmosphere)
            && (0..=3).contains(&w.hydrographics)
            && w.population > 5
    }),
    (TradeCode::NonIndustrial, |w| (4..=6).contains(&w.population)),
    (TradeCode::Poor, |w| {
        (2..=5).contains(&w.atmosphere) && (0..=3).contains(&w.hydrographics)
    }),
    (TradeCode::Rich, |w| {
        matches!(w.atmosphere, 6 | 8) && (6..=8).contains(&w.population)
    }),
    (TradeCode::Vacuum, |w| w.atmosphere == 0),
    (TradeCode::Water, |w| w.hydrographics == 10),
];

/// Evaluates every trade predicate against the world's current
/// attributes. Always recomputed, never patched incrementally.
pub fn classify(world: &World) -> Vec<TradeCode> {
    TRADE_PREDICATES
        .iter()
        .filter(|(_, applies)| applies(world))
        .map(|(code, _)| *code)
        .collect()
}

// Physical environment of a terrestrial body, before the social steps.
struct Environment {
    size: i32,
    atmosphere: i32,
    temperature: TemperatureClass,
    hydrographics: i32,
}

fn environment(dice: &mut Dice, zone: Zone, genre: Genre) -> Environment {
    let size = dice.roll(2, 1);
    let atmosphere = dice.roll(2, 0);

    let index = (dice.two_d6()
        + TEMPERATURE_MODIFIER
            .get(atmosphere as usize)
            .copied()
            .unwrap_or(0))
    .clamp(0, TEMPERATURE_BANDS.len() as i32 - 1);
    let temperature = TEMPERATURE_BANDS[index as usize];

    let mut hydrographics = if size < 2 || zone != Zone::Biozone {
        0
    } else {
        let drop = if matches!(atmosphere, 0 | 1 | 10 | 11 | 12) {
            11
        } else {
            7
        };
        (dice.roll(2, drop) + size).min(10)
    };
    hydrographics -= match temperature {
        TemperatureClass::Hot => 2,
        TemperatureClass::Roasting => 6,
        _ => 0,
    };
    let mut hydrographics = hydrographics.max(0);

    // Harsher small-world rules for the opera/firm genres: little
    // worlds cannot hold a breathable atmosphere or surface water.
    let mut atmosphere = atmosphere;
    if genre.hard_environment() {
        atmosphere = if size < 3 || (size < 4 && atmosphere < 3) {
            0
        } else if (3..=4).contains(&size) && (3..=5).contains(&atmosphere) {
            1
        } else if (3..=4).contains(&size) && atmosphere > 5 {
            10
        } else {
            atmosphere
        };
        if ((3..=4).contains(&size) && atmosphere == 10) || atmosphere < 2 {
            hydrographics -= 6;
        }
        if matches!(atmosphere, 2 | 3 | 11 | 12) {
            hydrographics -= 4;
        }
        hydrographics = hydrographics.max(0);
    }

    Environment {
        size,
        atmosphere,
        temperature,
        hydrographics,
    }
}

fn derive_factions(dice: &mut Dice, population: i32, law: i32) -> Vec<FactionStrength> {
    if population == 0 {
        return Vec::new();
    }
    let mut count = dice.d3().max(3);
    if law == 0 || law == 7 {
        count += 1;
    }
    if law > 9 {
        count -= 1;
    }
    let rolls = [
        dice.two_d6(),
        dice.two_d6(),
        dice.two_d6(),
        dice.two_d6(),
        dice.two_d6(),
    ];
    rolls
        .iter()
        .take(count.max(0) as usize)
        .map(|&roll| FACTION_TABLE[roll.clamp(0, 12) as usize])
        .collect()
}

fn derive_tech(
    dice: &mut Dice,
    env: &Environment,
    starport: Starport,
    population: i32,
    government: i32,
    config: &GeneratorConfig,
) -> i32 {
    let lookup = |table: &[i32], index: i32| {
        usize::try_from(index)
            .ok()
            .and_then(|i| table.get(i).copied())
            .unwrap_or(0)
    };
    let mut modifier = starport.tech_modifier();
    modifier += lookup(&TECH_SIZE, env.size);
    modifier += lookup(&TECH_ATMOSPHERE, env.atmosphere);
    modifier += lookup(&TECH_HYDROGRAPHICS, env.hydrographics);
    modifier += lookup(&TECH_POPULATION, population);
    modifier += lookup(&TECH_GOVERNMENT, government);

    let ceiling = ENVIRONMENTAL_CEILING
        .get(env.atmosphere as usize)
        .copied()
        .unwrap_or(8);
    let mut tech = (dice.d6() + modifier).min(ceiling);
    if let Some(floor) = config.tech_floor {
        tech = tech.max(floor);
    }
    tech.min(ceiling).min(population).max(0)
}

fn derive_bases(dice: &mut Dice, starport: Starport) -> Bases {
    let (navy, scout, consulate, pirate) = starport.base_thresholds();
    Bases {
        navy: dice.two_d6() >= navy,
        scout: dice.two_d6() >= scout,
        gas_giant: false,
        consulate: dice.two_d6() >= consulate,
        pirate: dice.two_d6() >= pirate,
    }
}

/// Runs the full attribute pipeline for a mainworld in the given zone.
///
/// The gas-giant refuelling flag is filled in later, once the whole
/// orbit list exists.
pub(crate) fn generate(dice: &mut Dice, zone: Zone, config: &GeneratorConfig) -> World {
    let env = environment(dice, zone, config.genre);

    // The starport base roll happens before population, but in the firm
    // genre its value shifts by the population delta before mapping.
    let mut port_roll = dice.two_d6();

    let mut population = dice.d6();
    if config.genre.restrictive() {
        if env.size < 3 || env.size > 9 {
            population -= 1;
        }
        population += POPULATION_MODIFIER
            .get(env.atmosphere as usize)
            .copied()
            .unwrap_or(-1);
        port_roll = (port_roll - 7 + population.max(0)).max(0);
    }
    let population = population.max(0);

    let starport = STARPORT_CLASSES[port_roll.clamp(0, 19) as usize];

    let government = (dice.roll(2, 7) + population).max(0);
    let law = (dice.roll(2, 7) + government).max(0);

    let factions = derive_factions(dice, population, law);
    let tech = derive_tech(dice, &env, starport, population, government, config);

    // An unpopulated world has no institutions to measure.
    let (government, law, tech) = if population == 0 {
        (0, 0, 0)
    } else {
        (government, law, tech)
    };

    let mut world = World {
        size: env.size,
        atmosphere: env.atmosphere,
        temperature: env.temperature,
        hydrographics: env.hydrographics,
        starport,
        population,
        government,
        law,
        tech,
        trade_codes: Vec::new(),
        factions,
        bases: Bases::default(),
        moons: Vec::new(),
    };

    // Temperature override from the provisional classification: airless
    // ice is frozen, garden-class worlds read temperate.
    let provisional = classify(&world);
    if provisional.contains(&TradeCode::IceCapped) || provisional.contains(&TradeCode::Vacuum) {
        world.temperature = TemperatureClass::Frozen;
    }
    let temperate_codes = [
        TradeCode::Agricultural,
        TradeCode::Garden,
        TradeCode::Rich,
        TradeCode::Water,
    ];
    if world.temperature != TemperatureClass::Temperate
        && provisional.iter().any(|c| temperate_codes.contains(c))
    {
        world.temperature = TemperatureClass::Temperate;
    }

    world.bases = derive_bases(dice, starport);
    world.trade_codes = classify(&world);
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;

    fn sample_world() -> World {
        World {
            size: 5,
            atmosphere: 6,
            temperature: TemperatureClass::Temperate,
            hydrographics: 5,
            starport: Starport::C,
            population: 6,
            government: 5,
            law: 4,
            tech: 7,
            trade_codes: Vec::new(),
            factions: Vec::new(),
            bases: Bases::default(),
            moons: Vec::new(),
        }
    }

    fn generate_many(seed_base: u64, count: usize, config: &GeneratorConfig) -> Vec<World> {
        (0..count)
            .map(|i| {
                let mut dice = Dice::seeded(seed_base + i as u64);
                generate(&mut dice, Zone::Biozone, config)
            })
            .collect()
    }

    #[test]
    fn test_uwp_shape() {
        let config = GeneratorConfig::default();
        for world in generate_many(100, 200, &config) {
            let uwp = world.uwp();
            assert_eq!(uwp.len(), 9, "bad UWP {uwp}");
            assert_eq!(uwp.as_bytes()[7], b'-');
            for (i, c) in uwp.chars().enumerate() {
                if i == 0 || i == 7 {
                    continue;
                }
                assert!(
                    c.is_ascii_digit() || ('A'..='F').contains(&c),
                    "bad digit {c} in {uwp}"
                );
            }
        }
    }

    #[test]
    fn test_unpopulated_worlds_have_no_institutions() {
        let mut config = GeneratorConfig::default();
        config.genre = Genre::Firm;
        for world in generate_many(7000, 500, &config) {
            if world.population == 0 {
                assert_eq!(world.government, 0);
                assert_eq!(world.law, 0);
                assert_eq!(world.tech, 0);
                assert!(world.factions.is_empty());
            }
        }
    }

    #[test]
    fn test_hex_codec_is_a_bijection() {
        for value in 0..=15 {
            let digit = hex_digit(value);
            assert_eq!(hex_value(digit), Some(value));
        }
        assert_eq!(hex_digit(20), 'F');
        assert_eq!(hex_digit(-3), '0');
        assert_eq!(hex_value('-'), None);
    }

    #[test]
    fn test_uwp_round_trips_attribute_digits() {
        let world = sample_world();
        let uwp = world.uwp();
        let digits: Vec<i32> = uwp
            .chars()
            .filter(|&c| c != '-')
            .skip(1)
            .map(|c| hex_value(c).expect("hex digit"))
            .collect();
        assert_eq!(
            digits,
            vec![
                world.size,
                world.atmosphere,
                world.hydrographics,
                world.population,
                world.government,
                world.law,
                world.tech
            ]
        );
    }

    #[test]
    fn test_asteroid_worlds_classify_as_belts_never_farms() {
        let mut world = sample_world();
        world.size = 0;
        world.atmosphere = 0;
        world.hydrographics = 0;
        let codes = classify(&world);
        assert!(codes.contains(&TradeCode::Asteroid));
        assert!(codes.contains(&TradeCode::Vacuum));
        assert!(!codes.contains(&TradeCode::Agricultural));
    }

    #[test]
    fn test_trade_codes_can_stack() {
        let mut world = sample_world();
        world.atmosphere = 6;
        world.hydrographics = 5;
        world.population = 6;
        let codes = classify(&world);
        assert!(codes.contains(&TradeCode::Agricultural));
        assert!(codes.contains(&TradeCode::Garden));
        assert!(codes.contains(&TradeCode::Rich));
        assert!(codes.contains(&TradeCode::NonIndustrial));
    }

    #[test]
    fn test_temperature_override_applied() {
        let config = GeneratorConfig::default();
        for world in generate_many(400, 300, &config) {
            if world.trade_codes.contains(&TradeCode::Vacuum)
                || world.trade_codes.contains(&TradeCode::IceCapped)
            {
                assert_eq!(world.temperature, TemperatureClass::Frozen);
            }
            if world.trade_codes.contains(&TradeCode::Agricultural) {
                assert_eq!(world.temperature, TemperatureClass::Temperate);
            }
        }
    }

    #[test]
    fn test_tech_respects_environmental_ceiling_and_floor() {
        let mut config = GeneratorConfig::default();
        config.tech_floor = Some(4);
        for world in generate_many(900, 300, &config) {
            if world.population == 0 {
                continue;
            }
            let ceiling = ENVIRONMENTAL_CEILING
                .get(world.atmosphere as usize)
                .copied()
                .unwrap_or(8);
            assert!(world.tech <= ceiling, "tech {} over {}", world.tech, ceiling);
            assert!(world.tech >= 4.min(ceiling).min(world.population));
        }
    }

    #[test]
    fn test_bases_flags_format() {
        let bases = Bases {
            navy: true,
            scout: false,
            gas_giant: true,
            consulate: false,
            pirate: true,
        };
        assert_eq!(bases.flags(), "N.G.P");
        assert_eq!(Bases::default().flags(), ".....");
    }

    #[test]
    fn test_travel_zone_rules() {
        let mut world = sample_world();
        assert_eq!(world.travel_zone(), "..");
        world.atmosphere = 10;
        assert_eq!(world.travel_zone(), "AZ");
        world.atmosphere = 6;
        world.government = 7;
        assert_eq!(world.travel_zone(), "AZ");
        world.government = 5;
        world.law = 9;
        assert_eq!(world.travel_zone(), "AZ");
    }

    #[test]
    fn test_faction_counts() {
        let mut dice = Dice::seeded(42);
        assert!(derive_factions(&mut dice, 0, 5).is_empty());
        for seed in 0..50 {
            let mut dice = Dice::seeded(seed);
            let factions = derive_factions(&mut dice, 5, 5);
            assert_eq!(factions.len(), 3);
            let mut dice = Dice::seeded(seed);
            let factions = derive_factions(&mut dice, 5, 7);
            assert_eq!(factions.len(), 4);
            let mut dice = Dice::seeded(seed);
            let factions = derive_factions(&mut dice, 5, 11);
            assert_eq!(factions.len(), 2);
        }
    }
}
