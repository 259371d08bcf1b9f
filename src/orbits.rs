//! Orbit slots and the bodies that fill them.
//!
//! Each orbit holds exactly one body variant; rendering and profile
//! logic switch exhaustively on the kind. Population is driven by the
//! orbit's zone relative to the star's biozone.

use crate::config::GeneratorConfig;
use crate::dice::Dice;
use crate::stars::Star;
use crate::world::{self, hex_digit, World};

/// Position of an orbit relative to the star's habitable band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Inner,
    Biozone,
    Outer,
}

/// One numbered orbital slot.
#[derive(Debug, Clone)]
pub struct Orbit {
    pub index: usize,
    pub au: f64,
    pub zone: Zone,
    /// Set when the orbit lies beyond ten times the biozone's outer
    /// edge; distant outer orbits skew toward gas giants.
    pub distant: bool,
    pub body: Body,
}

impl Orbit {
    /// Profile string for this slot, the empty placeholder when vacant.
    pub fn uwp(&self) -> String {
        self.body.uwp()
    }
}

/// Gas giant size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiantSize {
    Large,
    Small,
}

impl GiantSize {
    pub fn code(self) -> char {
        match self {
            GiantSize::Large => 'L',
            GiantSize::Small => 'S',
        }
    }
}

/// A minor planet: rockballs and hostile worlds.
#[derive(Debug, Clone)]
pub struct Planet {
    pub size: i32,
    pub atmosphere: i32,
    pub hydrographics: i32,
    pub moons: Vec<Moon>,
}

/// A gas giant and its satellite system.
#[derive(Debug, Clone)]
pub struct GasGiant {
    pub size: GiantSize,
    pub moons: Vec<Moon>,
}

/// A secondary star occupying an orbit of the primary.
#[derive(Debug, Clone)]
pub struct Companion {
    pub classification: String,
}

/// Mutually exclusive contents of an orbit.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Rockball(Planet),
    Hostile(Planet),
    Belt,
    GasGiant(GasGiant),
    World(Box<World>),
    Companion(Companion),
}

impl Body {
    /// Single-letter kind code used in cribs and map symbols.
    pub fn code(&self) -> char {
        match self {
            Body::Empty => '.',
            Body::Rockball(_) => 'R',
            Body::Hostile(_) => 'H',
            Body::Belt => 'B',
            Body::GasGiant(_) => 'G',
            Body::World(_) => 'W',
            Body::Companion(_) => 'S',
        }
    }

    /// The 9-character profile column for this body.
    pub fn uwp(&self) -> String {
        match self {
            Body::Empty => ".......-.".to_string(),
            Body::Belt => "XR00000-0".to_string(),
            Body::Rockball(p) | Body::Hostile(p) => format!(
                "X{}{}{}000-0",
                hex_digit(p.size),
                hex_digit(p.atmosphere),
                hex_digit(p.hydrographics),
            ),
            Body::GasGiant(g) => match g.size {
                GiantSize::Large => "Large GG ".to_string(),
                GiantSize::Small => "Small GG ".to_string(),
            },
            Body::World(w) => w.uwp(),
            Body::Companion(c) => format!("{:<9}", c.classification),
        }
    }

    pub fn moons(&self) -> &[Moon] {
        match self {
            Body::Rockball(p) | Body::Hostile(p) => &p.moons,
            Body::GasGiant(g) => &g.moons,
            Body::World(w) => &w.moons,
            _ => &[],
        }
    }

    pub fn is_world(&self) -> bool {
        matches!(self, Body::World(_))
    }

    pub fn is_gas_giant(&self) -> bool {
        matches!(self, Body::GasGiant(_))
    }
}

/// A satellite. Orbital radius is in planetary radii; sub-threshold
/// moons carry no atmosphere or surface water.
#[derive(Debug, Clone)]
pub struct Moon {
    pub orbit_radii: i32,
    pub size: i32,
    pub atmosphere: i32,
    pub hydrographics: i32,
}

impl Moon {
    /// 7-character satellite profile: no starport, population, or
    /// institutions beyond placeholders. Sub-asteroid sizes render as
    /// 'S', rings as 'R'.
    pub fn uwp(&self) -> String {
        let size = if self.size < 0 {
            'S'
        } else if self.size == 0 {
            'R'
        } else {
            hex_digit(self.size)
        };
        format!(
            "X{}{}{}000",
            size,
            hex_digit(self.atmosphere),
            hex_digit(self.hydrographics),
        )
    }
}

// Moon orbital-radius families: a base table indexed by 2d6, scaled by
// the family multiplier. Rings hug the planet.
const RING_RADII: [i32; 6] = [1, 1, 1, 2, 2, 3];
const BASE_RADII: [i32; 14] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14];
const FAR_MULTIPLIER: i32 = 5;
const EXTREME_MULTIPLIER: i32 = 25;

#[derive(Clone, Copy)]
enum MoonHost {
    Terrestrial(i32),
    Giant(GiantSize),
}

fn moon(dice: &mut Dice, host: MoonHost, zone: Zone, index: i32) -> Moon {
    let size = match host {
        MoonHost::Giant(GiantSize::Large) => dice.roll(2, 4),
        MoonHost::Giant(GiantSize::Small) => dice.roll(2, 6),
        MoonHost::Terrestrial(parent_size) => parent_size - dice.d6(),
    };

    let orbit_radii = if size < 1 {
        RING_RADII[(dice.d6() - 1) as usize]
    } else {
        let placement = dice.roll(2, index);
        let base = BASE_RADII[dice.two_d6() as usize];
        if placement == 12 && matches!(host, MoonHost::Giant(GiantSize::Large)) {
            base * EXTREME_MULTIPLIER
        } else if placement < 8 {
            base
        } else {
            base * FAR_MULTIPLIER
        }
    };

    let (atmosphere, hydrographics) = if size < 1 {
        (0, 0)
    } else {
        let hydrographics = match zone {
            Zone::Inner => 0,
            Zone::Outer => dice.roll(2, 4),
            Zone::Biozone => dice.roll(2, 7),
        };
        let atmosphere = dice.roll(2, 7) + size;
        let atmosphere = match zone {
            Zone::Biozone => atmosphere,
            _ => (atmosphere - 4).max(0),
        };
        (atmosphere, hydrographics)
    };

    Moon {
        orbit_radii,
        size,
        atmosphere,
        hydrographics,
    }
}

fn generate_moons(count: i32, host: MoonHost, zone: Zone, dice: &mut Dice) -> Vec<Moon> {
    let mut moons: Vec<Moon> = (0..count).map(|i| moon(dice, host, zone, i)).collect();
    moons.sort_by_key(|m| m.orbit_radii);
    moons
}

fn rockball(dice: &mut Dice, zone: Zone) -> Body {
    let size = dice.d6();
    let moons = generate_moons(dice.roll(1, 3), MoonHost::Terrestrial(size), zone, dice);
    Body::Rockball(Planet {
        size,
        atmosphere: 0,
        hydrographics: 0,
        moons,
    })
}

fn hostile(dice: &mut Dice, zone: Zone) -> Body {
    let size = dice.d6();
    let atmosphere = *dice.pick(&[10, 11, 12, 13, 14]);
    let hydrographics = dice.roll(2, 4);
    let moons = generate_moons(dice.roll(1, 3), MoonHost::Terrestrial(size), zone, dice);
    Body::Hostile(Planet {
        size,
        atmosphere,
        hydrographics,
        moons,
    })
}

fn gas_giant(dice: &mut Dice, zone: Zone) -> Body {
    let size = if dice.d6() < 4 {
        GiantSize::Large
    } else {
        GiantSize::Small
    };
    let mut count = dice.two_d6();
    if size == GiantSize::Small {
        count = (count - 4).max(0);
    }
    let moons = generate_moons(count, MoonHost::Giant(size), zone, dice);
    Body::GasGiant(GasGiant { size, moons })
}

fn mainworld(dice: &mut Dice, zone: Zone, config: &GeneratorConfig) -> Body {
    let mut world = world::generate(dice, zone, config);
    world.moons = generate_moons(
        dice.roll(1, 3),
        MoonHost::Terrestrial(world.size),
        zone,
        dice,
    );
    Body::World(Box::new(world))
}

fn inner_body(dice: &mut Dice) -> Body {
    match dice.two_d6() {
        roll if roll < 5 => Body::Empty,
        5..=6 => hostile(dice, Zone::Inner),
        7..=9 => rockball(dice, Zone::Inner),
        10..=11 => Body::Belt,
        _ => gas_giant(dice, Zone::Inner),
    }
}

fn outer_body(dice: &mut Dice, distant: bool) -> Body {
    let mut roll = dice.d6();
    if distant {
        roll += 1;
    }
    match roll {
        1 => rockball(dice, Zone::Outer),
        2 => Body::Belt,
        3 => Body::Empty,
        4..=7 => gas_giant(dice, Zone::Outer),
        _ => rockball(dice, Zone::Outer),
    }
}

/// Classifies an AU distance against a star's biozone. Stars without a
/// biozone treat every orbit as inner.
pub(crate) fn classify_au(star: &Star, au: f64) -> (Zone, bool) {
    match star.biozone() {
        Some((inner, outer)) => {
            let zone = if au < inner {
                Zone::Inner
            } else if au > outer {
                Zone::Outer
            } else {
                Zone::Biozone
            };
            (zone, au > outer * 10.0)
        }
        None => (Zone::Inner, false),
    }
}

/// Builds the orbit at `index` for `star`, rolling its contents.
/// Orbits inside the star's inner limit stay empty but keep their slot.
pub(crate) fn populate(
    star: &Star,
    index: usize,
    dice: &mut Dice,
    config: &GeneratorConfig,
) -> Orbit {
    let au = star.orbit_au(index);
    let (zone, distant) = classify_au(star, au);

    if au < star.inner_limit() {
        return Orbit {
            index,
            au,
            zone,
            distant,
            body: Body::Empty,
        };
    }

    let body = match zone {
        Zone::Biozone => mainworld(dice, zone, config),
        Zone::Inner => inner_body(dice),
        Zone::Outer => outer_body(dice, distant),
    };

    Orbit {
        index,
        au,
        zone,
        distant,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_codes_are_distinct() {
        let bodies = [
            Body::Empty,
            Body::Belt,
            Body::Rockball(Planet {
                size: 3,
                atmosphere: 0,
                hydrographics: 0,
                moons: Vec::new(),
            }),
            Body::GasGiant(GasGiant {
                size: GiantSize::Large,
                moons: Vec::new(),
            }),
            Body::Companion(Companion {
                classification: "M4V".to_string(),
            }),
        ];
        let codes: Vec<char> = bodies.iter().map(|b| b.code()).collect();
        assert_eq!(codes, vec!['.', 'B', 'R', 'G', 'S']);
    }

    #[test]
    fn test_fixed_profiles() {
        assert_eq!(Body::Empty.uwp(), ".......-.");
        assert_eq!(Body::Belt.uwp(), "XR00000-0");
        let small = Body::GasGiant(GasGiant {
            size: GiantSize::Small,
            moons: Vec::new(),
        });
        assert_eq!(small.uwp(), "Small GG ");
        let companion = Body::Companion(Companion {
            classification: "K2V".to_string(),
        });
        assert_eq!(companion.uwp(), "K2V      ");
        assert_eq!(companion.uwp().len(), 9);
    }

    #[test]
    fn test_hostile_atmosphere_band() {
        let mut dice = Dice::seeded(5);
        for _ in 0..50 {
            if let Body::Hostile(p) = hostile(&mut dice, Zone::Inner) {
                assert!((10..=14).contains(&p.atmosphere));
            } else {
                unreachable!();
            }
        }
    }

    #[test]
    fn test_small_giants_carry_fewer_moons() {
        let mut dice = Dice::seeded(8);
        for _ in 0..100 {
            if let Body::GasGiant(g) = gas_giant(&mut dice, Zone::Outer) {
                match g.size {
                    GiantSize::Small => assert!(g.moons.len() <= 8),
                    GiantSize::Large => assert!((2..=12).contains(&g.moons.len())),
                }
            }
        }
    }

    #[test]
    fn test_sub_threshold_moons_are_barren() {
        let mut dice = Dice::seeded(11);
        for index in 0..200 {
            let m = moon(&mut dice, MoonHost::Terrestrial(2), Zone::Biozone, index % 3);
            if m.size < 1 {
                assert_eq!(m.atmosphere, 0);
                assert_eq!(m.hydrographics, 0);
                assert!((1..=3).contains(&m.orbit_radii));
            }
        }
    }

    #[test]
    fn test_moons_sorted_by_radius() {
        let mut dice = Dice::seeded(13);
        for _ in 0..50 {
            let moons = generate_moons(6, MoonHost::Giant(GiantSize::Large), Zone::Outer, &mut dice);
            for pair in moons.windows(2) {
                assert!(pair[0].orbit_radii <= pair[1].orbit_radii);
            }
        }
    }

    #[test]
    fn test_moon_uwp_shape() {
        let m = Moon {
            orbit_radii: 5,
            size: -1,
            atmosphere: 0,
            hydrographics: 0,
        };
        assert_eq!(m.uwp(), "XS00000");
        assert_eq!(m.uwp().len(), 7);
        let m = Moon {
            orbit_radii: 5,
            size: 11,
            atmosphere: 12,
            hydrographics: 9,
        };
        assert_eq!(m.uwp(), "XBC9000");
    }
}
