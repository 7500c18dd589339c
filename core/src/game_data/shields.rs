//! Effects that place an absorb shield on their target, and tank cooldowns.

use phf::{phf_map, phf_set};

/// Absorb shield effect ids and their display names.
pub static SHIELD_EFFECTS: phf::Map<i64, &'static str> = phf_map! {
    784716294782976i64 => "Shield Probe",
    962484991164416i64 => "Defense Screen",
    3394012006318080i64 => "Ballistic Dampers",
    3404298452992000i64 => "Ballistic Dampers",
    814192655335739i64 => "Decoy",
    3165584170680320i64 => "Decoy",
    3169672979546112i64 => "Decoy",
    801273393709344i64 => "Decoy",
    3182695320387849i64 => "Energy Redoubt",
    3394840935006476i64 => "Energy Redoubt",
    3174264299585801i64 => "Energy Redoubt",
    3413631416926473i64 => "Energy Redoubt",
    985226842997040i64 => "Shell Shield",
    4498402716942602i64 => "Shell Shield",
    999516199190834i64 => "Trauma Shield",
    4561689060048896i64 => "Trauma Shield",
    3411286364782592i64 => "Static Barrier",
    3411286364782955i64 => "Static Barrier",
    3411286364782957i64 => "Static Barrier",
    3411286364782959i64 => "Static Barrier",
    812736661422080i64 => "Force Armor",
    812736661422603i64 => "Mending Force Armor",
    812736661422605i64 => "Preserved Force Armor",
    812736661422607i64 => "Imbued Force Armor",
    3120895035965733i64 => "Enduring Bastion",
    3120895035965737i64 => "Enduring Bastion",
    3120895035965741i64 => "Enduring Bastion",
    3120895035965745i64 => "Enduring Bastion",
    3120899330933026i64 => "Enduring Bastion",
    3120899330933056i64 => "Enduring Bastion",
    3120899330933058i64 => "Enduring Bastion",
    3120899330933060i64 => "Enduring Bastion",
    812169725739008i64 => "Saber Ward",
    807793154064384i64 => "Saber Ward",
    2308467612188672i64 => "Blade Barrier",
    2308471907155968i64 => "Sonic Barrier",
    3430016717160448i64 => "Guardianship",
    3426550678552576i64 => "Sonic Wall",
    4470962170888192i64 => "Zealous Defense",
    4468780327501824i64 => "Zealous Defense",
    4499652552425472i64 => "Seething Defense",
    4490306703589376i64 => "Seething Defense",
    4505867370102784i64 => "Mini Shield",
    4505867370103064i64 => "Mini Shield",
    4307220837695488i64 => "Mini Shield",
    4307220837695785i64 => "Mini Shield",
    4511704230658308i64 => "Emergency Power",
    4511704230658312i64 => "Supercommando",
    4511704230658314i64 => "Supercommando",
    4511704230658316i64 => "Supercommando",
    4364455571882266i64 => "Emergency Power",
    4364455571882268i64 => "Emergency Power",
    4511717115559936i64 => "Resilient Powerbase",
    4511717115560216i64 => "Battle Meditation",
    4511717115560218i64 => "Battle Meditation",
    4511717115560220i64 => "Battle Meditation",
    4374866572607488i64 => "Multibarrier",
    4374866572607773i64 => "Multibarrier",
    870894813577216i64 => "Emergency Shield Generator",
    870869043773440i64 => "Portable Deflector Shield",
    4394902595043328i64 => "Bek's Pre-Boom Precautions",
    3774812396716032i64 => "Advanced Battle Shield Adrenal",
    3774825281617920i64 => "Advanced Field Tech Shield Adrenal",
    3774833871552512i64 => "Advanced Bio-Enhanced Shield Adrenal",
    3774838166519808i64 => "Advanced Experimental Shield Adrenal",
    3774846756454400i64 => "Advanced Exotech Shield Adrenal",
    3774851051421696i64 => "Advanced Hyper-Battle Shield Adrenal",
    3774855346388992i64 => "Advanced Nano-Infused Shield Adrenal",
    3774859641356288i64 => "Advanced Anodyne Shield Adrenal",
    3827816588115968i64 => "Advanced Battle Shield Adrenal",
    3827820883083264i64 => "Advanced Field Tech Shield Adrenal",
    3827825178050560i64 => "Advanced Bio-Enhanced Shield Adrenal",
    3827829473017856i64 => "Advanced Experimental Shield Adrenal",
    3827833767985152i64 => "Advanced Exotech Shield Adrenal",
    3827838062952448i64 => "Advanced Hyper-Battle Shield Adrenal",
    3827842357919744i64 => "Advanced Nano-Infused Shield Adrenal",
    3827846652887040i64 => "Advanced Anodyne Shield Adrenal",
    3827889602560000i64 => "Advanced Polybiotic Shield Adrenal",
    3871522175320064i64 => "Advanced Polybiotic Shield Adrenal",
    4258855210975232i64 => "Advanced Kyrprax Shield Adrenal",
    3774872526258176i64 => "Battle Shield Adrenal",
    3776126656708608i64 => "Field Tech Shield Adrenal",
    3776130951675904i64 => "Bio-Enhanced Shield Adrenal",
    3776135246643200i64 => "Experimental Shield Adrenal",
    3776139541610496i64 => "Exotech Shield Adrenal",
    3776143836577792i64 => "Hyper-Battle Shield Adrenal",
    3776148131545088i64 => "Nano-Infused Shield Adrenal",
    3776152426512384i64 => "Anodyne Shield Adrenal",
    3827850947854336i64 => "Battle Shield Adrenal",
    3827855242821632i64 => "Field Tech Shield Adrenal",
    3827859537788928i64 => "Bio-Enhanced Shield Adrenal",
    3827863832756224i64 => "Experimental Shield Adrenal",
    3827868127723520i64 => "Exotech Shield Adrenal",
    3827872422690816i64 => "Hyper-Battle Shield Adrenal",
    3827876717658112i64 => "Nano-Infused Shield Adrenal",
    3827881012625408i64 => "Anodyne Shield Adrenal",
    3827885307592704i64 => "Polybiotic Shield Adrenal",
    3871526470287360i64 => "Polybiotic Shield Adrenal",
    4258859505942528i64 => "Prototype Kyrprax Shield Adrenal",
};

/// Defensive cooldowns whose uptime is compared against damage taken outside it.
pub static TANK_COOLDOWNS: phf::Set<&'static str> = phf_set! {
    "Saber Ward",
    "Invincible",
    "Endure Pain",
    "Enraged Defense",
    "Warding Call",
    "Blade Blitz",
    "Deflection",
    "Force Shroud",
    "Resilience",
    "Battle Readiness",
    "Energy Shield",
    "Reactive Shield",
    "Adrenaline Rush",
    "Kolto Overload",
    "Evasion",
};

/// Abilities that remove a harmful effect from a friendly target.
pub static CLEANSE_ABILITIES: phf::Set<&'static str> = phf_set! {
    "Cleanse",
    "Purge",
    "Restoration",
    "Toxin Scan",
    "Triage",
    "Cure",
    "Field Aid",
};

pub fn is_shield_effect(effect_id: i64) -> bool {
    SHIELD_EFFECTS.contains_key(&effect_id)
}

pub fn is_tank_cooldown(effect_name: &str) -> bool {
    TANK_COOLDOWNS.contains(effect_name)
}

pub fn is_cleanse(ability_name: &str) -> bool {
    CLEANSE_ABILITIES.contains(ability_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_shields_resolve_by_id() {
        assert_eq!(SHIELD_EFFECTS.get(&3411286364782592), Some(&"Static Barrier"));
        assert!(is_shield_effect(812736661422080));
        assert!(!is_shield_effect(0));
    }

    #[test]
    fn cooldowns_and_cleanses_match_by_name() {
        assert!(is_tank_cooldown("Saber Ward"));
        assert!(!is_tank_cooldown("Static Barrier"));
        assert!(is_cleanse("Purge"));
    }
}
