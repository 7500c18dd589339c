//! Healer reaction to big hits.

use hashbrown::HashMap;

use crate::context::{AnalysisConfig, SessionContext};
use crate::encounter::Combat;
use crate::game_data::Role;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReactionStats {
    pub count: u32,
    pub mean_ms: f64,
    /// reactions faster than the fast threshold
    pub fast: u32,
}

/// Healers at combat start. Falls back to characters that healed when no
/// discipline was announced.
pub fn healers(combat: &Combat, session: &SessionContext) -> Vec<i64> {
    let characters = || combat.entities().iter().filter(|e| e.is_character());
    let by_role: Vec<i64> = characters()
        .filter(|e| session.role_at(e.log_id, combat.start) == Some(Role::Healer))
        .map(|e| e.log_id)
        .collect();
    if !by_role.is_empty() {
        return by_role;
    }
    characters()
        .filter(|e| combat.logs(e.log_id).is_some_and(|l| !l.healing_out.is_empty()))
        .map(|e| e.log_id)
        .collect()
}

/// For each healer, delay from every big hit to its next activation on the hit target.
pub fn reaction_times(
    combat: &Combat,
    session: &SessionContext,
    config: &AnalysisConfig,
) -> HashMap<i64, ReactionStats> {
    let mut out = HashMap::new();
    for healer in healers(combat, session) {
        let Some(logs) = combat.logs(healer) else {
            continue;
        };
        let mut delays = Vec::new();
        for (target, hits) in &combat.big_hits {
            for hit in hits {
                let next = logs
                    .activations
                    .iter()
                    .find(|a| a.timestamp >= *hit && a.target.log_id == *target);
                if let Some(activation) = next {
                    let ms = (activation.timestamp - *hit).num_milliseconds();
                    if ms <= config.max_reaction_ms {
                        delays.push(ms);
                    }
                }
            }
        }
        if delays.is_empty() {
            continue;
        }
        let count = delays.len() as u32;
        let mean_ms = delays.iter().sum::<i64>() as f64 / delays.len() as f64;
        let fast = delays
            .iter()
            .filter(|ms| **ms < config.fast_reaction_ms)
            .count() as u32;
        out.insert(
            healer,
            ReactionStats {
                count,
                mean_ms,
                fast,
            },
        );
    }
    out
}
