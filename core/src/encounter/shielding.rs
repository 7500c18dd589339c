//! Credit absorbed damage to the shields that took it.
//!
//! The log only says how much a hit was absorbed, not by whose shield. Each hit
//! is matched against the shield intervals on its target: a lone shield takes the
//! whole amount, two or more split it in application order.

use chrono::{NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::Combat;
use crate::combat_log::{Action, CombatEvent, Effect, EffectType, Entity, Value};
use crate::context::{AnalysisConfig, StringPool};
use crate::effects::{Modifier, ModifierFilter, ModifierTimeline};
use crate::game_data::{effect_id, is_shield_effect};

const PROCESSED_ABSORB: &str = "Processed Absorb";

fn is_shield(m: &Modifier) -> bool {
    is_shield_effect(m.effect_id)
}

/// Share of `hit`'s absorbed amount per candidate shield, in candidate order.
fn split_absorb(hit: &CombatEvent, candidates: usize) -> Vec<f64> {
    let absorbed = hit.value.absorbed();
    match candidates {
        0 => Vec::new(),
        1 => vec![absorbed],
        _ => {
            let raw = hit.value.raw;
            if (raw - absorbed).abs() <= 0.001 {
                vec![absorbed]
            } else {
                let first = absorbed.min(raw - absorbed).max(0.0);
                vec![first, absorbed - first]
            }
        }
    }
}

#[derive(Debug)]
struct Credit {
    source: Arc<Entity>,
    target: Arc<Entity>,
    effect_id: i64,
    name: Arc<str>,
    timestamp: NaiveDateTime,
    amount: f64,
}

/// Build the synthetic absorb events for `combat`. Works on copies of the
/// shield intervals, so the timeline is left as it was.
pub fn attribute_shields(
    combat: &Combat,
    timeline: &ModifierTimeline,
    pool: &StringPool,
    config: &AnalysisConfig,
) -> Vec<CombatEvent> {
    let grace = TimeDelta::milliseconds(config.shield_grace_ms);
    let window_start = combat.start - grace;
    let window_end = combat.end + TimeDelta::milliseconds(1);

    // (source, shield name, stop) -> credit
    let mut credits: BTreeMap<(i64, Arc<str>, Option<NaiveDateTime>), Credit> = BTreeMap::new();

    for entity in combat.entities() {
        let Some(logs) = combat.logs(entity.log_id) else {
            continue;
        };
        if logs.mitigated_in.is_empty() {
            continue;
        }
        let filter = ModifierFilter::any().target(entity.log_id).matching(is_shield);
        let mut shields = timeline.intervals_between(window_start, window_end, &filter);
        if shields.is_empty() {
            continue;
        }

        for hit in &logs.mitigated_in {
            let ts = hit.timestamp;
            let candidates: Vec<usize> = shields
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    !s.counted && s.start <= ts && s.stop.is_none_or(|stop| ts <= stop + grace)
                })
                .map(|(idx, _)| idx)
                .collect();
            if candidates.is_empty() {
                tracing::debug!(line = hit.line_number, "absorb without an active shield");
                continue;
            }

            for (idx, amount) in candidates.iter().zip(split_absorb(hit, candidates.len())) {
                let shield = &mut shields[*idx];
                // a shield that already broke and let damage through is spent
                if shield.stop.is_some_and(|stop| stop <= ts) && hit.value.effective > 0.0 {
                    shield.counted = true;
                }
                if amount <= 0.0 {
                    continue;
                }
                let key = (shield.source.log_id, Arc::clone(&shield.name), shield.stop);
                let credit = credits.entry(key).or_insert_with(|| Credit {
                    source: Arc::clone(&shield.source),
                    target: Arc::clone(&shield.target),
                    effect_id: shield.effect_id,
                    name: Arc::clone(&shield.name),
                    timestamp: shield.stop.unwrap_or(ts),
                    amount: 0.0,
                });
                credit.amount += amount;
                if shield.stop.is_none() {
                    credit.timestamp = credit.timestamp.max(ts);
                }
            }
        }
    }

    let effect_name = pool.intern(PROCESSED_ABSORB);
    let first_line = combat.last_line() + 1;
    credits
        .into_values()
        .enumerate()
        .map(|(n, credit)| CombatEvent {
            line_number: first_line + n as u64,
            byte_len: 0,
            timestamp: credit.timestamp,
            source: credit.source,
            target: credit.target,
            source_health: (0, 0),
            target_health: (0, 0),
            action: Action {
                name: credit.name,
                id: credit.effect_id,
            },
            effect: Effect {
                kind: EffectType::ApplyEffect,
                effect_id: effect_id::PROCESSED_ABSORB,
                effect_name: Arc::clone(&effect_name),
                ..Effect::default()
            },
            value: Value {
                raw: credit.amount,
                effective: credit.amount,
                ..Value::default()
            },
            threat: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn single_and_split_shares() {
        let mut log = LogFixture::new();
        let me = player("Galen", 100);
        let boss = npc("Gharj", 2016946706972672, 9, 1_000_000);
        let hit = |log: &mut LogFixture, payload: &str| {
            log.parse(&line("20:00:01.000", &boss, &me, &ability("Slam", 5), DAMAGE, payload))
        };

        // 1000 raw, 300 absorbed
        let partial = hit(&mut log, "(1000 ~700 kinetic {836045448940873} 300 absorbed {836045448945511})");
        assert_eq!(split_absorb(&partial, 1), vec![300.0]);
        assert_eq!(split_absorb(&partial, 2), vec![300.0, 0.0]);

        // 1000 raw, 800 absorbed: the first shield can only have taken what the second did not
        let deep = hit(&mut log, "(1000 ~200 kinetic {836045448940873} 800 absorbed {836045448945511})");
        assert_eq!(split_absorb(&deep, 2), vec![200.0, 600.0]);

        // fully absorbed goes to the first shield
        let full = hit(&mut log, "(1000 ~0 kinetic {836045448940873} 1000 absorbed {836045448945511})");
        assert_eq!(split_absorb(&full, 3), vec![1000.0]);
    }
}
