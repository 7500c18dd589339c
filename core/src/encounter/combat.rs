use chrono::NaiveDateTime;
use hashbrown::HashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::EncounterIdentity;
use crate::combat_log::{CombatEvent, Entity};
use crate::metrics::{BurstTracker, ReactionStats};

/// Per-entity event buckets. Every bucket holds shared events in log order.
#[derive(Debug, Clone, Default)]
pub struct EntityLogs {
    pub damage_out: Vec<Arc<CombatEvent>>,
    pub damage_in: Vec<Arc<CombatEvent>>,
    pub healing_out: Vec<Arc<CombatEvent>>,
    pub healing_in: Vec<Arc<CombatEvent>>,
    /// incoming damage with an absorb component
    pub mitigated_in: Vec<Arc<CombatEvent>>,
    pub activations: Vec<Arc<CombatEvent>>,
    /// synthetic absorb events credited to this entity's shields
    pub shielding_out: Vec<Arc<CombatEvent>>,
}

/// Running sums and maxima for one entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTotals {
    // Damage dealing
    pub damage: f64,
    pub damage_effective: f64,
    pub damage_hits: u32,
    pub damage_crits: u32,
    pub max_hit: f64,

    // Damage receiving
    pub damage_taken: f64,
    pub damage_taken_effective: f64,
    pub hits_taken: u32,
    pub avoided: u32,
    pub absorbed_taken: f64,

    // Healing given
    pub healing: f64,
    pub healing_effective: f64,
    pub heal_hits: u32,
    pub heal_crits: u32,
    pub max_heal: f64,

    // Healing received
    pub healing_taken: f64,
    pub healing_taken_effective: f64,

    // General
    pub threat: f64,
    pub activations: u32,
    pub interrupts: u32,
    pub cleanses: u32,

    // Derived after every build
    pub shielding: f64,
    pub damage_saved: f64,
    pub avoided_estimate: f64,
}

/// One fight. Mutated by the builder while it is live, shared as `Arc<Combat>` afterwards.
#[derive(Debug, Clone)]
pub struct Combat {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Set on phase views, which report their own length
    pub(crate) duration_override: Option<f64>,
    /// Log lines plus the synthetic absorbs of the latest build, keyed by line number
    pub events: BTreeMap<u64, Arc<CombatEvent>>,
    pub(crate) last_real_line: u64,
    pub(crate) entities: Vec<Arc<Entity>>,
    pub(crate) index: HashMap<i64, usize>,
    pub(crate) logs: Vec<EntityLogs>,
    pub(crate) totals: Vec<EntityTotals>,
    pub(crate) max_hp: Vec<i32>,
    /// target log id -> timestamps of hits that took a large share of its health
    pub big_hits: HashMap<i64, Vec<NaiveDateTime>>,
    pub(crate) burst: BurstTracker,
    /// healer log id -> reaction stats
    pub reactions: HashMap<i64, ReactionStats>,
    /// synthetic absorb events, numbered after the last real line
    pub processed_absorbs: Vec<Arc<CombatEvent>>,
    pub identity: EncounterIdentity,
    pub(crate) kill_override: Option<bool>,
}

impl Combat {
    pub(crate) fn empty(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start,
            duration_override: None,
            events: BTreeMap::new(),
            last_real_line: 0,
            entities: Vec::new(),
            index: HashMap::new(),
            logs: Vec::new(),
            totals: Vec::new(),
            max_hp: Vec::new(),
            big_hits: HashMap::new(),
            burst: BurstTracker::default(),
            reactions: HashMap::new(),
            processed_absorbs: Vec::new(),
            identity: EncounterIdentity::default(),
            kill_override: None,
        }
    }

    /// Combat length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_override
            .unwrap_or_else(|| (self.end - self.start).num_milliseconds() as f64 / 1000.0)
    }

    /// Stable arena index of `entity`, registering it on first sight.
    pub(crate) fn register(&mut self, entity: &Arc<Entity>) -> usize {
        if let Some(idx) = self.index.get(&entity.log_id) {
            return *idx;
        }
        let idx = self.entities.len();
        self.entities.push(Arc::clone(entity));
        self.index.insert(entity.log_id, idx);
        self.logs.push(EntityLogs::default());
        self.totals.push(EntityTotals::default());
        self.max_hp.push(0);
        idx
    }

    pub fn entities(&self) -> &[Arc<Entity>] {
        &self.entities
    }

    pub fn index_of(&self, log_id: i64) -> Option<usize> {
        self.index.get(&log_id).copied()
    }

    pub fn entity(&self, log_id: i64) -> Option<&Arc<Entity>> {
        self.index_of(log_id).map(|idx| &self.entities[idx])
    }

    pub fn logs(&self, log_id: i64) -> Option<&EntityLogs> {
        self.index_of(log_id).map(|idx| &self.logs[idx])
    }

    pub fn totals(&self, log_id: i64) -> Option<&EntityTotals> {
        self.index_of(log_id).map(|idx| &self.totals[idx])
    }

    /// Largest max-health seen for the entity in this combat.
    pub fn max_hp(&self, log_id: i64) -> i32 {
        self.index_of(log_id).map(|idx| self.max_hp[idx]).unwrap_or(0)
    }

    /// Entities with their totals, in arena order.
    pub fn iter_totals(&self) -> impl Iterator<Item = (&Arc<Entity>, &EntityTotals)> {
        self.entities.iter().zip(self.totals.iter())
    }

    /// Number of the last log line seen. Synthetic absorbs are numbered after it.
    pub fn last_line(&self) -> u64 {
        self.last_real_line
    }

    /// Events read from the log, without the synthetic absorbs.
    pub fn log_events(&self) -> impl Iterator<Item = &Arc<CombatEvent>> {
        self.events.range(..=self.last_real_line).map(|(_, e)| e)
    }

    /// Whether `log_id` was one of this combat's bosses.
    pub fn is_boss(&self, log_id: i64) -> bool {
        self.identity.boss_ids.contains(&log_id)
    }

    pub fn is_boss_killed(&self) -> bool {
        self.identity.killed
    }

    /// Force the kill state, e.g. for encounters the log cannot resolve.
    pub fn set_kill_override(&mut self, killed: Option<bool>) {
        self.kill_override = killed;
        if let Some(killed) = killed {
            self.identity.killed = killed;
        }
    }

    /// Display name: the encounter if known, otherwise the area.
    pub fn name(&self) -> String {
        self.identity
            .name
            .clone()
            .or_else(|| self.identity.area.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}
