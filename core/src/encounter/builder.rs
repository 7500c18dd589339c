//! Turns event batches into a `Combat`.
//!
//! A full build and a series of incremental updates over the same events run the
//! same per-event code, then re-derive everything that is not a running sum.

use chrono::{NaiveDateTime, TimeDelta};
use hashbrown::HashMap;
use std::sync::Arc;

use super::cooldowns::damage_saved;
use super::identity::identify;
use super::shielding::attribute_shields;
use super::{BuildError, Combat, EntityLogs};
use crate::combat_log::CombatEvent;
use crate::context::{AnalysisConfig, SessionContext};
use crate::game_data::{EncounterCatalog, effect_id, is_cleanse};
use crate::metrics::{BurstFamily, reaction_times};

pub struct CombatBuilder<'a> {
    session: &'a SessionContext,
    catalog: &'a EncounterCatalog,
    config: &'a AnalysisConfig,
}

impl<'a> CombatBuilder<'a> {
    pub fn new(session: &'a SessionContext) -> Self {
        Self {
            session,
            catalog: EncounterCatalog::builtin(),
            config: &session.config().analysis,
        }
    }

    pub fn with_catalog(mut self, catalog: &'a EncounterCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Build a finished combat from all of its events.
    pub fn build(&self, events: &[Arc<CombatEvent>]) -> Result<Combat, BuildError> {
        let mut combat = self.begin(events)?;
        self.finalize(&mut combat);
        Ok(combat)
    }

    /// Start a live combat from its first batch.
    pub fn begin(&self, events: &[Arc<CombatEvent>]) -> Result<Combat, BuildError> {
        let first = events.first().ok_or(BuildError::EmptyBootstrap)?;
        let mut combat = Combat::empty(first.timestamp);
        self.update(&mut combat, events);
        Ok(combat)
    }

    /// Apply a batch to a live combat and refresh the derived statistics.
    pub fn update(&self, combat: &mut Combat, events: &[Arc<CombatEvent>]) {
        for event in events {
            apply_event(combat, event);
        }
        self.derive(combat);
        combat.burst.maybe_refresh(
            combat.end,
            combat.entities().len(),
            self.config.burst_window_secs,
            self.config.burst_refresh_secs,
        );
    }

    /// Last step of every finished combat.
    pub fn finalize(&self, combat: &mut Combat) {
        combat.burst.refresh(self.config.burst_window_secs);
    }

    /// A non-destructive view of `combat` over `[t0, t1]`, reporting `t1 - t0` as its duration.
    pub fn phase_view(
        &self,
        combat: &Combat,
        t0: NaiveDateTime,
        t1: NaiveDateTime,
    ) -> Result<Combat, BuildError> {
        let events: Vec<Arc<CombatEvent>> = combat
            .log_events()
            .filter(|e| e.timestamp >= t0 && e.timestamp <= t1)
            .cloned()
            .collect();
        if events.is_empty() {
            return Err(BuildError::EmptyBootstrap);
        }
        let mut view = Combat::empty(t0);
        view.kill_override = combat.kill_override;
        self.update(&mut view, &events);
        view.end = view.end.max(t1);
        view.duration_override = Some((t1 - t0).num_milliseconds().max(0) as f64 / 1000.0);
        self.finalize(&mut view);
        Ok(view)
    }

    // Statistics that depend on the whole history. Recomputed from the buckets
    // on every build so incremental and full builds agree.
    fn derive(&self, combat: &mut Combat) {
        combat.big_hits = big_hits(combat, self.config.big_hit_fraction);

        for (logs, totals) in combat.logs.iter().zip(combat.totals.iter_mut()) {
            totals.avoided_estimate = avoided_estimate(logs);
        }

        let pool = self.session.pool();
        let absorbs = attribute_shields(combat, &self.session.timeline, &pool, self.config);
        for (logs, totals) in combat.logs.iter_mut().zip(combat.totals.iter_mut()) {
            logs.shielding_out.clear();
            totals.shielding = 0.0;
        }
        // a newer log line may already sit on a stale synthetic key
        for stale in combat.processed_absorbs.drain(..) {
            if combat
                .events
                .get(&stale.line_number)
                .is_some_and(|e| Arc::ptr_eq(e, &stale))
            {
                combat.events.remove(&stale.line_number);
            }
        }
        for event in absorbs {
            let event = Arc::new(event);
            let idx = combat.register(&event.source);
            combat.logs[idx].shielding_out.push(Arc::clone(&event));
            combat.totals[idx].shielding += event.value.effective;
            combat.events.insert(event.line_number, Arc::clone(&event));
            combat.processed_absorbs.push(event);
        }

        let saved = damage_saved(
            combat,
            &self.session.timeline,
            self.config.cooldown_min_samples,
        );
        for (entity, totals) in combat.entities.iter().zip(combat.totals.iter_mut()) {
            totals.damage_saved = saved.get(&entity.log_id).copied().unwrap_or_default();
        }

        combat.identity = identify(combat, self.session, self.catalog);

        combat.reactions = reaction_times(combat, self.session, self.config);
    }
}

/// Running sums for one event. The only place buckets and totals are written.
fn apply_event(combat: &mut Combat, event: &Arc<CombatEvent>) {
    let s = combat.register(&event.source);
    let t = combat.register(&event.target);
    combat.events.insert(event.line_number, Arc::clone(event));
    combat.last_real_line = combat.last_real_line.max(event.line_number);
    combat.end = combat.end.max(event.timestamp);
    combat.max_hp[s] = combat.max_hp[s].max(event.source_health.1);
    combat.max_hp[t] = combat.max_hp[t].max(event.target_health.1);

    let second = ((event.timestamp - combat.start).num_milliseconds().max(0) / 1000) as usize;
    let value = &event.value;
    combat.totals[s].threat += event.threat;

    if event.is_damage() {
        if s != t {
            combat.logs[s].damage_out.push(Arc::clone(event));
            let source = &mut combat.totals[s];
            source.damage += value.raw;
            source.damage_effective += value.effective;
            source.damage_hits += 1;
            source.damage_crits += u32::from(value.crit);
            source.max_hit = source.max_hit.max(value.raw);
            combat
                .burst
                .add(BurstFamily::DamageDealt, event.source.log_id, second, value.raw);
        }

        combat.logs[t].damage_in.push(Arc::clone(event));
        let absorbed = value.absorbed();
        if absorbed > 0.0 {
            combat.logs[t].mitigated_in.push(Arc::clone(event));
        }
        let target = &mut combat.totals[t];
        target.damage_taken += value.raw;
        target.damage_taken_effective += value.effective;
        target.hits_taken += 1;
        target.avoided += u32::from(value.is_avoided());
        target.absorbed_taken += absorbed;
        combat
            .burst
            .add(BurstFamily::DamageTaken, event.target.log_id, second, value.raw);
    } else if event.is_heal() {
        combat.logs[s].healing_out.push(Arc::clone(event));
        let source = &mut combat.totals[s];
        source.healing += value.raw;
        source.healing_effective += value.effective;
        source.heal_hits += 1;
        source.heal_crits += u32::from(value.crit);
        source.max_heal = source.max_heal.max(value.raw);

        combat.logs[t].healing_in.push(Arc::clone(event));
        let target = &mut combat.totals[t];
        target.healing_taken += value.raw;
        target.healing_taken_effective += value.effective;

        combat.burst.add(
            BurstFamily::HealingDealt,
            event.source.log_id,
            second,
            value.effective,
        );
        combat.burst.add(
            BurstFamily::HealingTaken,
            event.target.log_id,
            second,
            value.effective,
        );
    } else if event.is_ability_activate() {
        combat.logs[s].activations.push(Arc::clone(event));
        combat.totals[s].activations += 1;
        if is_cleanse(&event.action.name) {
            combat.totals[s].cleanses += 1;
        }
    } else if event.is_event(effect_id::ABILITYINTERRUPT) {
        combat.totals[s].interrupts += 1;
    }
}

/// Timestamps where a target lost at least `fraction` of its max health, in
/// one hit or within one second.
fn big_hits(combat: &Combat, fraction: f64) -> HashMap<i64, Vec<NaiveDateTime>> {
    let window = TimeDelta::seconds(1);
    let mut out = HashMap::new();
    for entity in combat.entities() {
        let max_hp = combat.max_hp(entity.log_id);
        let Some(logs) = combat.logs(entity.log_id) else {
            continue;
        };
        if max_hp <= 0 || logs.damage_in.is_empty() {
            continue;
        }
        let threshold = fraction * max_hp as f64;
        let mut hits = Vec::new();
        let mut window_start = 0;
        let mut window_sum = 0.0;
        for (i, hit) in logs.damage_in.iter().enumerate() {
            window_sum += hit.value.effective;
            while hit.timestamp - logs.damage_in[window_start].timestamp >= window {
                window_sum -= logs.damage_in[window_start].value.effective;
                window_start += 1;
            }
            if hit.value.effective >= threshold || window_sum >= threshold {
                hits.push(hit.timestamp);
                // the next big hit needs fresh damage
                window_start = i + 1;
                window_sum = 0.0;
            }
        }
        if !hits.is_empty() {
            out.insert(entity.log_id, hits);
        }
    }
    out
}

/// Damage the avoided hits would have done, estimated from the same ability's
/// landed hits on the same target.
fn avoided_estimate(logs: &EntityLogs) -> f64 {
    let mut landed: HashMap<i64, (f64, u32)> = HashMap::new();
    let mut avoided: HashMap<i64, u32> = HashMap::new();
    for hit in &logs.damage_in {
        if hit.value.is_avoided() {
            *avoided.entry(hit.action.id).or_default() += 1;
        } else {
            let entry = landed.entry(hit.action.id).or_default();
            entry.0 += hit.value.effective;
            entry.1 += 1;
        }
    }
    avoided
        .iter()
        .filter_map(|(ability, count)| {
            let (sum, n) = landed.get(ability)?;
            Some(sum / *n as f64 * *count as f64)
        })
        .sum()
}
