//! Discipline GUIDs from `DisciplineChanged` lines, mapped to class and role.

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Character role in group content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    Healer,
    Dps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discipline {
    pub name: &'static str,
    pub class: &'static str,
    pub role: Role,
}

impl Discipline {
    const fn new(name: &'static str, class: &'static str, role: Role) -> Self {
        Self { name, class, role }
    }

    /// Look up discipline from its GUID (from combat log)
    pub fn from_guid(guid: i64) -> Option<&'static Discipline> {
        DISCIPLINES.get(&guid)
    }
}

static DISCIPLINES: phf::Map<i64, Discipline> = phf_map! {
    2031339142381586i64 => Discipline::new("Lightning", "Sorcerer", Role::Dps),
    2031339142381584i64 => Discipline::new("Madness", "Sorcerer", Role::Dps),
    2031339142381587i64 => Discipline::new("Corruption", "Sorcerer", Role::Healer),
    2031339142381580i64 => Discipline::new("Hatred", "Assassin", Role::Dps),
    2031339142381582i64 => Discipline::new("Darkness", "Assassin", Role::Tank),
    2031339142381583i64 => Discipline::new("Deception", "Assassin", Role::Dps),
    2031339142381576i64 => Discipline::new("Vengeance", "Juggernaut", Role::Dps),
    2031339142381577i64 => Discipline::new("Immortal", "Juggernaut", Role::Tank),
    2031339142381578i64 => Discipline::new("Rage", "Juggernaut", Role::Dps),
    2031339142381572i64 => Discipline::new("Annihilation", "Marauder", Role::Dps),
    2031339142381573i64 => Discipline::new("Carnage", "Marauder", Role::Dps),
    2031339142381574i64 => Discipline::new("Fury", "Marauder", Role::Dps),
    2031339142381601i64 => Discipline::new("Arsenal", "Mercenary", Role::Dps),
    2031339142381598i64 => Discipline::new("Innovative Ordnance", "Mercenary", Role::Dps),
    2031339142381600i64 => Discipline::new("Bodyguard", "Mercenary", Role::Healer),
    2031339142381604i64 => Discipline::new("Shield Tech", "Powertech", Role::Tank),
    2031339142381602i64 => Discipline::new("Pyrotech", "Powertech", Role::Dps),
    2031339142381605i64 => Discipline::new("Advanced Prototype", "Powertech", Role::Dps),
    2031339142381595i64 => Discipline::new("Concealment", "Operative", Role::Dps),
    2031339142381593i64 => Discipline::new("Lethality", "Operative", Role::Dps),
    2031339142381596i64 => Discipline::new("Medicine", "Operative", Role::Healer),
    2031339142381591i64 => Discipline::new("Marksmanship", "Sniper", Role::Dps),
    2031339142381592i64 => Discipline::new("Engineering", "Sniper", Role::Dps),
    2031339142381589i64 => Discipline::new("Virulence", "Sniper", Role::Dps),
    2031339142381618i64 => Discipline::new("Telekinetics", "Sage", Role::Dps),
    2031339142381619i64 => Discipline::new("Seer", "Sage", Role::Healer),
    2031339142381616i64 => Discipline::new("Balance", "Sage", Role::Dps),
    2031339142381620i64 => Discipline::new("Infiltration", "Shadow", Role::Dps),
    2031339142381622i64 => Discipline::new("Kinetic Combat", "Shadow", Role::Tank),
    2031339142381623i64 => Discipline::new("Serenity", "Shadow", Role::Dps),
    2031339142381607i64 => Discipline::new("Focus", "Guardian", Role::Dps),
    2031339142381610i64 => Discipline::new("Vigilance", "Guardian", Role::Dps),
    2031339142381609i64 => Discipline::new("Defense", "Guardian", Role::Tank),
    2031339142381613i64 => Discipline::new("Combat", "Sentinel", Role::Dps),
    2031339142381614i64 => Discipline::new("Watchman", "Sentinel", Role::Dps),
    2031339142381611i64 => Discipline::new("Concentration", "Sentinel", Role::Dps),
    2031339142381636i64 => Discipline::new("Gunnery", "Commando", Role::Dps),
    2031339142381634i64 => Discipline::new("Assault Specialist", "Commando", Role::Dps),
    2031339142381637i64 => Discipline::new("Combat Medic", "Commando", Role::Healer),
    2031339142381638i64 => Discipline::new("Plasmatech", "Vanguard", Role::Dps),
    2031339142381641i64 => Discipline::new("Shield Specialist", "Vanguard", Role::Tank),
    2031339142381640i64 => Discipline::new("Tactics", "Vanguard", Role::Dps),
    2031339142381632i64 => Discipline::new("Scrapper", "Scoundrel", Role::Dps),
    2031339142381629i64 => Discipline::new("Ruffian", "Scoundrel", Role::Dps),
    2031339142381631i64 => Discipline::new("Sawbones", "Scoundrel", Role::Healer),
    2031339142381627i64 => Discipline::new("Sharpshooter", "Gunslinger", Role::Dps),
    2031339142381628i64 => Discipline::new("Saboteur", "Gunslinger", Role::Dps),
    2031339142381625i64 => Discipline::new("Dirty Fighting", "Gunslinger", Role::Dps),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healer_and_tank_guids() {
        let corruption = Discipline::from_guid(2031339142381587).unwrap();
        assert_eq!(corruption.name, "Corruption");
        assert_eq!(corruption.role, Role::Healer);

        let immortal = Discipline::from_guid(2031339142381577).unwrap();
        assert_eq!(immortal.class, "Juggernaut");
        assert_eq!(immortal.role, Role::Tank);

        assert!(Discipline::from_guid(1).is_none());
    }
}
