//! Star classification, orbit scaffolding, and companion stars.
//!
//! Spectral and luminosity classes drive three lookup tables (inner
//! limit, biozone, and mass) that bound where orbits may sit and how
//! they are populated. Orbit distances follow a Bode progression from
//! the inner limit, doubling per slot.

use log::debug;

use crate::config::GeneratorConfig;
use crate::dice::Dice;
use crate::orbits::{self, Body, Companion, Orbit, Zone};
use crate::world::World;

/// Spectral class; `D` covers degenerate white dwarfs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    D,
}

impl SpectralClass {
    pub fn code(self) -> char {
        match self {
            SpectralClass::O => 'O',
            SpectralClass::B => 'B',
            SpectralClass::A => 'A',
            SpectralClass::F => 'F',
            SpectralClass::G => 'G',
            SpectralClass::K => 'K',
            SpectralClass::M => 'M',
            SpectralClass::D => 'D',
        }
    }

    /// Spectral subtype digits observed for this class.
    fn subtypes(self) -> &'static [u8] {
        match self {
            SpectralClass::O => &[9],
            SpectralClass::B => &[0, 2, 5, 8],
            SpectralClass::A => &[0, 2, 5],
            SpectralClass::F => &[0, 2, 5],
            SpectralClass::G => &[0, 2, 5, 8],
            SpectralClass::K => &[0, 2, 5],
            SpectralClass::M => &[0, 2, 4, 6],
            SpectralClass::D => &[0],
        }
    }
}

/// Luminosity class, supergiants through dwarfs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuminosityClass {
    Ia,
    Ib,
    II,
    III,
    IV,
    V,
    VI,
    Dwarf,
}

impl LuminosityClass {
    pub fn roman(self) -> &'static str {
        match self {
            LuminosityClass::Ia => "Ia",
            LuminosityClass::Ib => "Ib",
            LuminosityClass::II => "II",
            LuminosityClass::III => "III",
            LuminosityClass::IV => "IV",
            LuminosityClass::V => "V",
            LuminosityClass::VI => "VI",
            LuminosityClass::Dwarf => "D",
        }
    }

    fn index(self) -> usize {
        match self {
            LuminosityClass::Ia => 0,
            LuminosityClass::Ib => 1,
            LuminosityClass::II => 2,
            LuminosityClass::III => 3,
            LuminosityClass::IV => 4,
            LuminosityClass::V => 5,
            LuminosityClass::VI => 6,
            LuminosityClass::Dwarf => 7,
        }
    }
}

// Primary star tables, indexed by a capped 2d6.
const PRIMARY_CLASSES: [SpectralClass; 13] = {
    use SpectralClass::*;
    [B, B, A, M, M, M, M, M, K, G, F, F, F]
};
const PRIMARY_LUMINOSITIES: [LuminosityClass; 13] = {
    use LuminosityClass::*;
    [Ia, Ib, II, III, IV, V, V, V, V, V, V, VI, Dwarf]
};

// Companion tables, indexed by a capped 2d6 plus the primary's DM.
const COMPANION_CLASSES: [SpectralClass; 13] = {
    use SpectralClass::*;
    [B, B, A, F, F, G, G, K, K, M, M, M, M]
};
const COMPANION_LUMINOSITIES: [LuminosityClass; 14] = {
    use LuminosityClass::*;
    [Ia, Ib, II, III, IV, Dwarf, Dwarf, V, V, VI, Dwarf, Dwarf, Dwarf, Dwarf]
};

// Companion separation in AU per 3d6 bracket, scaled by 2d6.
const COMPANION_SEPARATION: [f64; 20] = [
    0.05, 0.05, 0.5, 0.5, 0.5, 2.0, 2.0, 10.0, 10.0, 10.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0,
    50.0, 50.0, 50.0, 50.0,
];

// Bode constants; M V dwarfs pack their orbits tighter.
const BODE_RATIOS: [f64; 11] = [0.3, 0.3, 0.3, 0.3, 0.35, 0.35, 0.35, 0.4, 0.4, 0.4, 0.4];
const M_DWARF_BODE: f64 = 0.2;

fn inner_limits(class: SpectralClass) -> &'static [f64] {
    match class {
        SpectralClass::O => &[16.0, 13.0, 10.0],
        SpectralClass::B => &[10.0, 6.3, 5.0, 4.0, 3.8, 0.6, 0.0],
        SpectralClass::A => &[4.0, 1.0, 0.4, 0.0, 0.0, 0.0, 0.0],
        SpectralClass::F => &[4.0, 1.0, 0.3, 0.1, 0.0, 0.0, 0.0],
        SpectralClass::G => &[3.1, 1.0, 0.3, 0.1, 0.0, 0.0, 0.0],
        SpectralClass::K => &[2.5, 1.0, 0.3, 0.1, 0.0, 0.0, 0.0],
        SpectralClass::M => &[2.0, 1.0, 0.3, 0.1, 0.0, 0.0, 0.0],
        SpectralClass::D => &[0.0],
    }
}

fn biozones(class: SpectralClass) -> &'static [(f64, f64)] {
    match class {
        SpectralClass::O => &[(790.0, 1190.0), (630.0, 950.0), (500.0, 750.0)],
        SpectralClass::B => &[
            (500.0, 700.0),
            (320.0, 480.0),
            (250.0, 375.0),
            (200.0, 300.0),
            (180.0, 270.0),
            (30.0, 45.0),
        ],
        SpectralClass::A => &[
            (200.0, 300.0),
            (50.0, 75.0),
            (20.0, 30.0),
            (5.0, 7.5),
            (4.0, 6.0),
            (3.1, 4.7),
        ],
        SpectralClass::F => &[
            (200.0, 300.0),
            (50.0, 75.0),
            (13.0, 19.0),
            (2.5, 3.7),
            (2.0, 3.0),
            (1.6, 2.4),
            (0.5, 0.8),
        ],
        SpectralClass::G => &[
            (200.0, 300.0),
            (50.0, 75.0),
            (13.0, 19.0),
            (2.5, 3.7),
            (2.0, 3.0),
            (1.6, 2.4),
            (0.5, 0.8),
        ],
        SpectralClass::K => &[
            (125.0, 190.0),
            (50.0, 75.0),
            (13.0, 19.0),
            (4.0, 5.9),
            (1.0, 1.5),
            (0.5, 0.6),
            (0.2, 0.3),
        ],
        SpectralClass::M => &[
            (100.0, 150.0),
            (50.0, 76.0),
            (16.0, 24.0),
            (5.0, 7.5),
            (0.0, 0.0),
            (0.1, 0.2),
            (0.1, 0.1),
        ],
        SpectralClass::D => &[(0.03, 0.03)],
    }
}

fn masses(class: SpectralClass) -> &'static [f64] {
    match class {
        SpectralClass::O => &[70.0, 60.0, 0.0, 0.0, 50.0, 0.0],
        SpectralClass::B => &[50.0, 40.0, 35.0, 30.0, 20.0, 10.0],
        SpectralClass::A => &[30.0, 16.0, 10.0, 6.0, 4.0, 3.0],
        SpectralClass::F => &[15.0, 13.0, 8.0, 2.5, 2.2, 1.9],
        SpectralClass::G => &[12.0, 10.0, 6.0, 2.7, 1.8, 1.1, 0.8],
        SpectralClass::K => &[15.0, 12.0, 6.0, 3.0, 2.3, 0.9, 0.5],
        SpectralClass::M => &[20.0, 16.0, 8.0, 4.0, 0.3, 0.2],
        SpectralClass::D => &[0.8, 0.8, 0.8, 0.8, 0.8, 0.8],
    }
}

/// A star and its orbital system.
#[derive(Debug, Clone)]
pub struct Star {
    pub class: SpectralClass,
    pub luminosity: LuminosityClass,
    pub subtype: u8,
    pub bode: f64,
    type_dm: i32,
    size_dm: i32,
    pub orbits: Vec<Orbit>,
    pub companions: Vec<Star>,
}

impl Star {
    /// Spectral classification string, e.g. `G2V` or `DB` for white
    /// dwarfs.
    pub fn classification(&self) -> String {
        if self.class == SpectralClass::D {
            "DB".to_string()
        } else {
            format!(
                "{}{}{}",
                self.class.code(),
                self.subtype,
                self.luminosity.roman()
            )
        }
    }

    /// All classifications in this system, primary first.
    pub fn crib(&self) -> String {
        let mut parts = vec![self.classification()];
        parts.extend(self.companions.iter().map(|c| c.classification()));
        parts.join("/")
    }

    /// Minimum AU below which orbits stay empty.
    pub fn inner_limit(&self) -> f64 {
        inner_limits(self.class)
            .get(self.luminosity.index())
            .copied()
            .unwrap_or(0.0)
    }

    /// Habitable band in AU, when this star has one.
    pub fn biozone(&self) -> Option<(f64, f64)> {
        let band = biozones(self.class)
            .get(self.luminosity.index())
            .copied()?;
        if band.1 <= 0.0 {
            None
        } else {
            Some(band)
        }
    }

    pub fn mass(&self) -> f64 {
        masses(self.class)
            .get(self.luminosity.index())
            .copied()
            .unwrap_or(0.3)
    }

    /// Maximum AU beyond which orbits are not populated.
    pub fn outer_limit(&self) -> f64 {
        40.0 * self.mass()
    }

    /// AU distance for an orbit index: a geometric progression from the
    /// inner limit, strictly increasing with index.
    pub fn orbit_au(&self, index: usize) -> f64 {
        self.inner_limit() + self.bode * 2f64.powi(index as i32)
    }

    /// Smallest orbit index at or beyond the given distance.
    pub fn orbit_for_au(&self, au: f64) -> usize {
        let mut index = 0;
        while self.orbit_au(index) < au && index < 32 {
            index += 1;
        }
        index
    }

    pub fn has_world(&self) -> bool {
        self.orbits.iter().any(|o| o.body.is_world())
    }

    pub fn has_gas_giant(&self) -> bool {
        self.orbits.iter().any(|o| o.body.is_gas_giant())
    }

    /// The mainworld, when one was generated.
    pub fn world(&self) -> Option<&World> {
        self.orbits.iter().find_map(|o| match &o.body {
            Body::World(w) => Some(w.as_ref()),
            _ => None,
        })
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.orbits.iter_mut().find_map(|o| match &mut o.body {
            Body::World(w) => Some(w.as_mut()),
            _ => None,
        })
    }
}

fn build_star(
    class: SpectralClass,
    luminosity: LuminosityClass,
    type_dm: i32,
    size_dm: i32,
    dice: &mut Dice,
) -> Star {
    let subtype = *dice.pick(class.subtypes());
    // Degenerate stars lose their spectral identity.
    let class = if luminosity == LuminosityClass::Dwarf {
        SpectralClass::D
    } else {
        class
    };
    let bode = if class == SpectralClass::M && luminosity == LuminosityClass::V {
        M_DWARF_BODE
    } else {
        *dice.pick(&BODE_RATIOS)
    };
    Star {
        class,
        luminosity,
        subtype,
        bode,
        type_dm,
        size_dm,
        orbits: Vec::new(),
        companions: Vec::new(),
    }
}

fn generate_orbits(star: &mut Star, dice: &mut Dice, config: &GeneratorConfig) {
    let mut dm = match star.luminosity {
        LuminosityClass::III => 4,
        LuminosityClass::Ia | LuminosityClass::Ib | LuminosityClass::II => 8,
        _ => 0,
    };
    dm += match star.class {
        SpectralClass::M => -4,
        SpectralClass::K => -2,
        _ => 0,
    };

    let count = (dice.two_d6() + dm).max(0) as usize;
    let mut orbits = Vec::with_capacity(count);
    for index in 0..count {
        if star.orbit_au(index) > star.outer_limit() {
            break;
        }
        orbits.push(orbits::populate(star, index, dice, config));
    }

    // Trailing vacancies add nothing to the system.
    while matches!(orbits.last().map(|o| &o.body), Some(Body::Empty)) {
        orbits.pop();
    }
    star.orbits = orbits;
}

/// Generates a primary star with a fully populated orbital system.
pub fn generate_primary(dice: &mut Dice, config: &GeneratorConfig) -> Star {
    let type_dm = dice.two_d6().min(12);
    let size_dm = dice.two_d6().min(12);
    let class = PRIMARY_CLASSES[type_dm as usize];
    let luminosity = PRIMARY_LUMINOSITIES[size_dm as usize];

    let mut star = build_star(class, luminosity, type_dm, size_dm, dice);
    generate_orbits(&mut star, dice, config);
    debug!(
        "generated primary {} with {} orbits",
        star.classification(),
        star.orbits.len()
    );
    star
}

/// Generates a companion star and the primary orbit index it occupies.
/// Companions carry their own (usually sparse) orbital systems.
pub fn generate_companion(
    dice: &mut Dice,
    primary: &Star,
    ternary: usize,
    config: &GeneratorConfig,
) -> (Star, usize) {
    let bracket = (dice.roll(3, 0) + 4 * ternary as i32 - 2)
        .clamp(0, COMPANION_SEPARATION.len() as i32 - 1) as usize;
    let separation = dice.two_d6() as f64 * COMPANION_SEPARATION[bracket];
    let orbit_index = primary.orbit_for_au(separation).saturating_sub(1);

    let class_index = (dice.two_d6() + primary.type_dm).min(12) as usize;
    let size_index = (dice.two_d6() + primary.size_dm).min(12) as usize;
    let class = COMPANION_CLASSES[class_index];
    let luminosity = COMPANION_LUMINOSITIES[size_index];

    let mut companion = build_star(class, luminosity, primary.type_dm, primary.size_dm, dice);
    generate_orbits(&mut companion, dice, config);
    (companion, orbit_index)
}

/// Splices a companion into the primary's orbit list. Orbits between
/// 0.67x and 3x the companion's distance are gravitationally forbidden
/// and removed; the survivors are renumbered with their distances
/// recomputed, which keeps AU strictly increasing.
pub fn attach_companion(primary: &mut Star, companion: Star, orbit_index: usize) {
    let au = primary.orbit_au(orbit_index);
    primary
        .orbits
        .retain(|o| o.au < au * 0.67 || o.au > au * 3.0);

    let (zone, distant) = orbits::classify_au(primary, au);
    let slot = Orbit {
        index: orbit_index,
        au,
        zone,
        distant,
        body: Body::Companion(Companion {
            classification: companion.classification(),
        }),
    };
    let position = primary
        .orbits
        .iter()
        .position(|o| o.index > orbit_index)
        .unwrap_or(primary.orbits.len());
    primary.orbits.insert(position, slot);
    primary.companions.push(companion);

    let slots: Vec<(f64, Zone, bool)> = (0..primary.orbits.len())
        .map(|index| {
            let au = primary.orbit_au(index);
            let (zone, distant) = orbits::classify_au(primary, au);
            (au, zone, distant)
        })
        .collect();
    for (index, (orbit, (au, zone, distant))) in
        primary.orbits.iter_mut().zip(slots).enumerate()
    {
        orbit.index = index;
        orbit.au = au;
        orbit.zone = zone;
        orbit.distant = distant;
    }
}
