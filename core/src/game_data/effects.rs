//! Numeric ids the game writes into the effect and payload fields.

/// `Type {id}` in the effect field. The game has no others.
pub mod effect_type_id {
    pub const EVENT: i64 = 836045448945472;
    pub const SPEND: i64 = 836045448945473;
    pub const RESTORE: i64 = 836045448945476;
    pub const APPLYEFFECT: i64 = 836045448945477;
    pub const REMOVEEFFECT: i64 = 836045448945478;
    pub const AREAENTERED: i64 = 836045448953664;
    pub const DISCIPLINECHANGED: i64 = 836045448953665;
    pub const MODIFYCHARGES: i64 = 836045448953666;
}

/// `Name {id}` in the effect field, for the effects the engine reacts to.
pub mod effect_id {
    // Event
    pub const ABILITYACTIVATE: i64 = 836045448945479;
    pub const ABILITYINTERRUPT: i64 = 836045448945482;
    pub const ENTERCOMBAT: i64 = 836045448945489;
    pub const EXITCOMBAT: i64 = 836045448945490;
    pub const DEATH: i64 = 836045448945493;
    pub const REVIVED: i64 = 836045448945494;
    pub const TARGETSET: i64 = 836045448953668;
    pub const TARGETCLEARED: i64 = 836045448953669;

    // ApplyEffect
    pub const HEAL: i64 = 836045448945500;
    pub const DAMAGE: i64 = 836045448945501;

    /// Never written by the game. Marks absorb events synthesized from shield attribution.
    pub const PROCESSED_ABSORB: i64 = -1;
}

/// Ids following a `-word` or `absorbed` in a damage payload.
pub mod defense_type {
    pub const MISS: i64 = 836045448945502;
    pub const PARRY: i64 = 836045448945503;
    pub const DODGE: i64 = 836045448945505;
    pub const IMMUNE: i64 = 836045448945506;
    pub const RESIST: i64 = 836045448945507;
    pub const DEFLECT: i64 = 836045448945508;
    pub const SHIELD: i64 = 836045448945509;
    pub const ABSORBED: i64 = 836045448945511;
    pub const REFLECTED: i64 = 836045448953649;

    /// Defenses that negate the whole hit. A tank shield only reduces it.
    pub fn is_avoidance(id: i64) -> bool {
        matches!(id, MISS | PARRY | DODGE | IMMUNE | RESIST | DEFLECT)
    }
}

// Trauma Probe and Kolto Shell apply with one charge fewer than they really have
const UNDERCOUNTED_CHARGES: [i64; 2] = [999516199190528, 985226842996736];

/// Charge count an ApplyEffect line really means. ModifyCharges lines are accurate.
pub fn correct_apply_charges(effect_id: i64, charges: u32) -> u32 {
    if UNDERCOUNTED_CHARGES.contains(&effect_id) {
        charges.saturating_add(1)
    } else {
        charges
    }
}
