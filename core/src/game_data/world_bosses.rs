//! Open world bosses, matched by name since their npc ids vary by phase and event.

use super::encounters::BossEntry;

pub(super) static WORLD_BOSSES: &[BossEntry] = &[
    // Coruscant
    BossEntry::new("Coruscant", "SD-0", &[1476433662705664]),
    // Dromund Kaas
    BossEntry::new("Dromund Kaas", "The First", &[1467216662888448]),
    // Taris
    BossEntry::new("Taris", "Subject Alpha", &[1514096230924288]),
    // Balmorra
    BossEntry::new("Balmorra", "Grandfather", &[1486561195589632]),
    // Nar Shaddaa
    BossEntry::new("Nar Shaddaa", "R4-GL", &[1512537157795840]),
    // Tatooine
    BossEntry::new("Tatooine", "Trapjaw", &[1491212645171200]),
    // Alderaan
    BossEntry::new("Alderaan", "Siegebreaker", &[1506708887175168]),
    // Taris
    BossEntry::new("Taris", "Ancient One", &[2455746335735808]),
    // Quesh
    BossEntry::new("Quesh", "Cartel Warbot", &[1781380635688960]),
    // Hoth
    BossEntry::new("Hoth", "Gargath", &[1514109115826176]),
    BossEntry::new("Hoth", "Snowblind", &[1780723505692672]),
    // Belsavis
    BossEntry::new("Belsavis", "Primal Destroyer", &[2276465810866176]),
    // Corellia
    BossEntry::new("Corellia", "Lucky", &[3207528821293056]),
    // Voss
    BossEntry::new("Voss", "Nightmare Pilgrim", &[2821282412363776]),
    // Section X
    BossEntry::new("Section X", "Dreadtooth", &[2963995585675264]),
    // Yavin 4
    BossEntry::new("Yavin 4", "Lance Command Unit", &[3427461211619328]),
    BossEntry::new("Yavin 4", "Ancient Threat", &[3511870203887616]),
    // Ossus
    BossEntry::new("Ossus", "Kil'Cik", &[4208651338252288]),
    BossEntry::new("Ossus", "R8-X8", &[4208664223154176]),
    // Mek-Sha
    BossEntry::new("Mek-Sha", "Karvoy", &[4351227072610304]),
    // Ruhnuk
    BossEntry::new("Ruhnuk", "Kithrawl", &[4641141660057600]),
    // Gree Event
    BossEntry::new("Gree Event", "Surgok'k", &[3213232537862144]),
    BossEntry::new("Gree Event", "Gravak'k", &[3211450126434304]),
    // Rakghoul Event
    BossEntry::new("Rakghoul Event", "Shellshock", &[3339998497603584]),
    BossEntry::new("Rakghoul Event", "Toxxun", &[3340011382505472]),
    BossEntry::new("Rakghoul Event", "Plaguehorn", &[3339968432832512]),
    // Dark vs Light
    BossEntry::new("Dark vs Light", "Night Stalker Raxine", &[4046713891323904]),
    BossEntry::new("Dark vs Light", "Keeper Anais", &[4048023856349184]),
    BossEntry::new("Dark vs Light", "Erdi the Relentless", &[4048268669485056]),
    BossEntry::new("Dark vs Light", "Gorso the Nightmare King", &[4046718186291200]),
    BossEntry::new("Dark vs Light", "Justice Orzmod", &[4048187065106432]),
    BossEntry::new("Dark vs Light", "Tulo the Fearless", &[4048199950008320]),
    BossEntry::new("Dark vs Light", "Cortella the Righteous", &[4046344524136448]),
    BossEntry::new("Dark vs Light", "Guardian Silaraz", &[4038355884965888]),
    BossEntry::new("Dark vs Light", "Preeda the Butcher", &[4048251489615872]),
    BossEntry::new("Dark vs Light", "Jaadel the Vindicator", &[4046709596356608]),
    BossEntry::new("Dark vs Light", "Thundering Bozwed", &[4048212834910208]),
    BossEntry::new("Dark vs Light", "Yezzil the Raging Storm", &[4037965042941952]),
    BossEntry::new("Dark vs Light", "Aloeek the Voracious", &[4048242899681280]),
    BossEntry::new("Dark vs Light", "Chanta the Unforgiving", &[4048255784583168]),
    BossEntry::new("Dark vs Light", "Overseer Qezzed", &[4048247194648576]),
    BossEntry::new("Dark vs Light", "Warden Nymessa", &[4048230014779392]),
    BossEntry::new("Dark vs Light", "Tormentor Urdig", &[4038360179933184]),
    BossEntry::new("Dark vs Light", "Malussa the Gleaming Star", &[4048221424844800]),
    BossEntry::new("Dark vs Light", "Defender Gilada", &[4038020877516800]),
];
