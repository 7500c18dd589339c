//! Lair bosses, instanced like operations but fought as a single encounter.

use super::encounters::BossEntry;

pub(super) static LAIR_BOSSES: &[BossEntry] = &[
    // Toborro's Palace
    BossEntry::new("Toborro's Palace", "Golden Fury", &[3232800408862720, 3210174521147392, 3232817588731904, 3232735984353280]),
    // Xeno
    BossEntry::new("Xeno", "Xenoanalyst II", &[3213924027596800, 3153545377349632, 3213928322564096, 3213919732629504]),
    // Eyeless
    BossEntry::new("Eyeless", "The Eyeless", &[3328376316100608, 3319090596806656, 3328380611067904, 3328372021133312]),
    // Queen's Hive
    BossEntry::new("Queen's Hive", "Mutated Geonosian Queen", &[4204768687816704, 4197299739688960, 4204772982784000, 4204764392849408]),
    // Propagator Core
    BossEntry::new("Propagator Core", "Propagator Core XR-53", &[4829566170300416, 4831241207545856, 4831533265321984, 4831722243883008, 4845470434197504, 4847325860069376, 4861868619333632, 4824927605620736]),
    // Colossal Monolith
    BossEntry::new("Colossal Monolith", "Colossal Monolith", &[3570951774011392, 3541140406009856, 3570956068978688, 3570947479044096]),
];
