//! Rate statistics over a built combat
//!
//! - **rate**: totals per second, zero for zero-length combats
//! - **burst**: peak sliding-window rates
//! - **reaction**: healer response to big hits

mod burst;
mod reaction;

pub use burst::{BurstFamily, BurstTracker, BurstValues, max_window_mean};
pub use reaction::{ReactionStats, healers, reaction_times};

use crate::combat_log::EntityType;
use crate::context::IStr;
use crate::encounter::Combat;

/// `total / duration_secs`, or 0 when the duration is not positive.
pub fn rate(total: f64, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        total / duration_secs
    } else {
        0.0
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Per-entity statistics snapshot for one combat.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetrics {
    pub entity_id: i64,
    pub name: IStr,
    pub entity_type: EntityType,

    // Damage dealing
    pub total_damage: f64,
    pub dps: f64,
    pub edps: f64,
    pub damage_crit_pct: f64,

    // Healing dealing
    pub total_healing: f64,
    pub hps: f64,
    pub ehps: f64,
    pub heal_crit_pct: f64,

    // Shielding
    pub total_shielding: f64,
    pub aps: f64,

    // Damage taken
    pub total_damage_taken: f64,
    pub dtps: f64,
    pub htps: f64,
    pub damage_saved: f64,
    pub avoided_estimate: f64,

    // General
    pub tps: f64,
    pub apm: f64,
    pub interrupts: u32,
    pub cleanses: u32,

    pub burst: BurstValues,
    pub reaction: Option<ReactionStats>,
}

impl EntityMetrics {
    /// Metrics for every entity in the combat, highest dps first.
    pub fn from_combat(combat: &Combat) -> Vec<EntityMetrics> {
        let secs = combat.duration_secs();
        let mut stats: Vec<EntityMetrics> = combat
            .iter_totals()
            .filter(|(entity, _)| !entity.is_unknown())
            .map(|(entity, t)| EntityMetrics {
                entity_id: entity.log_id,
                name: entity.name.clone(),
                entity_type: entity.entity_type,
                total_damage: t.damage,
                dps: rate(t.damage, secs),
                edps: rate(t.damage_effective, secs),
                damage_crit_pct: percent(t.damage_crits, t.damage_hits),
                total_healing: t.healing,
                hps: rate(t.healing, secs),
                ehps: rate(t.healing_effective, secs),
                heal_crit_pct: percent(t.heal_crits, t.heal_hits),
                total_shielding: t.shielding,
                aps: rate(t.shielding, secs),
                total_damage_taken: t.damage_taken,
                dtps: rate(t.damage_taken, secs),
                htps: rate(t.healing_taken, secs),
                damage_saved: t.damage_saved,
                avoided_estimate: t.avoided_estimate,
                tps: rate(t.threat, secs),
                apm: rate(t.activations as f64 * 60.0, secs),
                interrupts: t.interrupts,
                cleanses: t.cleanses,
                burst: combat.burst.values(entity.log_id),
                reaction: combat.reactions.get(&entity.log_id).copied(),
            })
            .collect();

        stats.sort_by(|a, b| b.dps.total_cmp(&a.dps));
        stats
    }
}
