//! Volume naming.
//!
//! Names are drawn uniformly from a fixed table; collisions across a
//! sector are acceptable and match charted-space practice of reused
//! colony names.

use crate::dice::Dice;

const NAMES: &[&str] = &[
    "Omivarium",
    "Teradoma",
    "Achernar",
    "Aldebara",
    "Altamira",
    "Anduril",
    "Ansible",
    "Arcadia",
    "Ashfall",
    "Avernus",
    "Baldur",
    "Barrens",
    "Belerion",
    "Boreas",
    "Brightwater",
    "Caldera",
    "Callisto Minor",
    "Candela",
    "Carthage",
    "Cascade",
    "Cathedral",
    "Cinder",
    "Corvus",
    "Creche",
    "Crossing",
    "Daedalus",
    "Deepwell",
    "Drift",
    "Dunmarrow",
    "Eidolon",
    "Elysium",
    "Ember",
    "Erebus",
    "Farhold",
    "Fenris",
    "Firstfall",
    "Foundry",
    "Gateway",
    "Glimmer",
    "Grayport",
    "Gyre",
    "Halcyon",
    "Harrow",
    "Haven",
    "Hearth",
    "Helios Down",
    "Hollowmark",
    "Icefield",
    "Ironvale",
    "Jasper",
    "Kelpie",
    "Keystone",
    "Kiln",
    "Lacuna",
    "Landfall",
    "Lastlight",
    "Leeward",
    "Lighthouse",
    "Longreach",
    "Marrow",
    "Meridian",
    "Mistral",
    "Mooring",
    "Nadir",
    "Nocturne",
    "Oberon's Rest",
    "Olverin",
    "Outermost",
    "Palisade",
    "Parallax",
    "Pharos",
    "Quarry",
    "Redoubt",
    "Reverie",
    "Rimward",
    "Saltmarsh",
    "Sanctum",
    "Silvermane",
    "Solace",
    "Spindle",
    "Starfall",
    "Stonewake",
    "Sundering",
    "Tannhauser",
    "Tempest",
    "Thule",
    "Torchlight",
    "Umber",
    "Vantage",
    "Veldt",
    "Vesper",
    "Waypoint",
    "Windward",
    "Wintermoor",
    "Yonder",
    "Zenith",
];

/// Picks a name for a newly generated volume.
pub fn volume_name(dice: &mut Dice) -> String {
    dice.pick(NAMES).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_nonempty_and_trimmed() {
        for name in NAMES {
            assert!(!name.is_empty());
            assert_eq!(*name, name.trim());
        }
    }

    #[test]
    fn test_volume_name_comes_from_table() {
        let mut dice = Dice::seeded(17);
        for _ in 0..100 {
            let name = volume_name(&mut dice);
            assert!(NAMES.contains(&name.as_str()));
        }
    }
}
