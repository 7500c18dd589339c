//! Damage saved by defensive cooldowns.

use chrono::TimeDelta;
use hashbrown::HashMap;

use super::Combat;
use crate::effects::{Modifier, ModifierFilter, ModifierTimeline};
use crate::game_data::is_tank_cooldown;

fn is_cooldown(m: &Modifier) -> bool {
    is_tank_cooldown(&m.name)
}

#[derive(Debug, Default, Clone, Copy)]
struct Samples {
    inside: f64,
    count_inside: usize,
    outside: f64,
    count_outside: usize,
}

/// Per target: for every ability hitting it both with and without a cooldown up,
/// `max(0, mean_outside - mean_inside) * hits_inside`, summed.
pub fn damage_saved(
    combat: &Combat,
    timeline: &ModifierTimeline,
    min_samples: usize,
) -> HashMap<i64, f64> {
    let t0 = combat.start;
    let t1 = combat.end + TimeDelta::milliseconds(1);
    let mut saved = HashMap::new();

    for entity in combat.entities() {
        let Some(logs) = combat.logs(entity.log_id) else {
            continue;
        };
        if logs.damage_in.is_empty() {
            continue;
        }
        let filter = ModifierFilter::any().target(entity.log_id).matching(is_cooldown);
        let cooldowns = timeline.overlapping(t0, t1, &filter);
        if cooldowns.is_empty() {
            continue;
        }

        let mut per_ability: HashMap<i64, Samples> = HashMap::new();
        for hit in &logs.damage_in {
            let ts = hit.timestamp;
            // clipped copies always carry a stop
            let covered = cooldowns
                .iter()
                .any(|m| m.start <= ts && m.stop.is_none_or(|stop| ts <= stop));
            let samples = per_ability.entry(hit.action.id).or_default();
            if covered {
                samples.inside += hit.value.effective;
                samples.count_inside += 1;
            } else {
                samples.outside += hit.value.effective;
                samples.count_outside += 1;
            }
        }

        let total: f64 = per_ability
            .values()
            .filter(|s| s.count_inside > min_samples && s.count_outside > min_samples)
            .map(|s| {
                let mean_in = s.inside / s.count_inside as f64;
                let mean_out = s.outside / s.count_outside as f64;
                (mean_out - mean_in).max(0.0) * s.count_inside as f64
            })
            .sum();
        if total > 0.0 {
            saved.insert(entity.log_id, total);
        }
    }
    saved
}
