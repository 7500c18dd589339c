//! Interval store answering "what was active on X at time T".
//!
//! Fed one event at a time in log order. Range queries hand out copies so the
//! stored intervals are never modified by readers.

use chrono::NaiveDateTime;
use hashbrown::HashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::Modifier;
use crate::combat_log::{CombatEvent, EffectType};
use crate::game_data::{correct_apply_charges, effect_id};

/// Optional constraints for timeline queries. The default matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierFilter<'a> {
    pub source: Option<i64>,
    pub target: Option<i64>,
    pub effect_ids: Option<&'a [i64]>,
    pub predicate: Option<fn(&Modifier) -> bool>,
}

impl<'a> ModifierFilter<'a> {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn source(mut self, log_id: i64) -> Self {
        self.source = Some(log_id);
        self
    }

    pub fn target(mut self, log_id: i64) -> Self {
        self.target = Some(log_id);
        self
    }

    pub fn effects(mut self, ids: &'a [i64]) -> Self {
        self.effect_ids = Some(ids);
        self
    }

    pub fn matching(mut self, predicate: fn(&Modifier) -> bool) -> Self {
        self.predicate = Some(predicate);
        self
    }

    fn accepts_effect(&self, effect_id: i64) -> bool {
        self.effect_ids.is_none_or(|ids| ids.contains(&effect_id))
    }

    pub fn accepts(&self, m: &Modifier) -> bool {
        self.source.is_none_or(|id| m.source.log_id == id)
            && self.target.is_none_or(|id| m.target.log_id == id)
            && self.accepts_effect(m.effect_id)
            && self.predicate.is_none_or(|p| p(m))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModifierTimeline {
    /// effect id -> instance id -> interval
    modifiers: HashMap<i64, BTreeMap<u64, Modifier>>,
    next_instance: u64,
}

impl ModifierTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one log event to the timeline.
    pub fn observe(&mut self, event: &CombatEvent) {
        if event.target.is_unknown() {
            return;
        }
        match event.effect.kind {
            EffectType::ApplyEffect
                if event.effect.effect_id != effect_id::DAMAGE
                    && event.effect.effect_id != effect_id::HEAL =>
            {
                self.apply(event);
            }
            EffectType::RemoveEffect => self.remove(event),
            EffectType::ModifyCharges => self.modify_charges(event),
            _ => {}
        }
    }

    fn open_instance(&self, effect: i64, source: Option<i64>, target: i64) -> Option<u64> {
        self.modifiers
            .get(&effect)?
            .values()
            .rev()
            .find(|m| {
                m.is_open()
                    && m.target.log_id == target
                    && source.is_none_or(|s| m.source.log_id == s)
            })
            .map(|m| m.instance_id)
    }

    /// Open an interval, or refresh the charges of the one already open for the
    /// same effect, source and target.
    fn apply(&mut self, event: &CombatEvent) -> u64 {
        let effect = event.effect.effect_id;
        let charges = (event.value.charges > 0)
            .then(|| correct_apply_charges(effect, event.value.charges));

        if let Some(instance) =
            self.open_instance(effect, Some(event.source.log_id), event.target.log_id)
        {
            if let Some(charges) = charges
                && let Some(m) = self.get_mut(effect, instance)
            {
                m.charges.insert(event.timestamp, charges);
            }
            return instance;
        }

        let instance_id = self.next_instance;
        self.next_instance += 1;
        let mut modifier = Modifier {
            instance_id,
            effect_id: effect,
            name: Arc::clone(&event.effect.effect_name),
            source: Arc::clone(&event.source),
            target: Arc::clone(&event.target),
            start: event.timestamp,
            stop: None,
            charges: BTreeMap::new(),
            counted: false,
        };
        if let Some(charges) = charges {
            modifier.charges.insert(event.timestamp, charges);
        }
        self.modifiers
            .entry(effect)
            .or_default()
            .insert(instance_id, modifier);
        instance_id
    }

    /// Close the most recent open interval for effect, source and target.
    /// Removals logged by a different source fall back to effect and target.
    fn remove(&mut self, event: &CombatEvent) {
        let effect = event.effect.effect_id;
        let target = event.target.log_id;
        let instance = self
            .open_instance(effect, Some(event.source.log_id), target)
            .or_else(|| self.open_instance(effect, None, target));

        match instance.and_then(|i| self.get_mut(effect, i)) {
            Some(m) => m.stop = Some(event.timestamp.max(m.start)),
            None => tracing::debug!(
                line = event.line_number,
                effect = %event.effect.effect_name,
                "remove without a matching apply"
            ),
        }
    }

    fn modify_charges(&mut self, event: &CombatEvent) {
        let effect = event.effect.effect_id;
        let target = event.target.log_id;
        let instance = self
            .open_instance(effect, Some(event.source.log_id), target)
            .or_else(|| self.open_instance(effect, None, target));
        if let Some(m) = instance.and_then(|i| self.get_mut(effect, i)) {
            m.charges.insert(event.timestamp, event.value.charges);
        }
    }

    pub fn get(&self, effect: i64, instance_id: u64) -> Option<&Modifier> {
        self.modifiers.get(&effect)?.get(&instance_id)
    }

    fn get_mut(&mut self, effect: i64, instance_id: u64) -> Option<&mut Modifier> {
        self.modifiers.get_mut(&effect)?.get_mut(&instance_id)
    }

    /// Flag a modifier as consumed. Returns false when it does not exist.
    pub fn mark_counted(&mut self, effect: i64, instance_id: u64) -> bool {
        match self.get_mut(effect, instance_id) {
            Some(m) => {
                m.counted = true;
                true
            }
            None => false,
        }
    }

    // the filter is only borrowed while iterating; results live as long as `self`
    fn candidates<'s, 'f>(
        &'s self,
        filter: &'f ModifierFilter<'_>,
    ) -> impl Iterator<Item = &'s Modifier> {
        self.modifiers
            .iter()
            .filter(move |(effect, _)| filter.accepts_effect(**effect))
            .flat_map(|(_, instances)| instances.values())
            .filter(move |m| filter.accepts(m))
    }

    /// Modifiers whose `[start, stop)` contains `ts`.
    pub fn active_at(&self, ts: NaiveDateTime, filter: &ModifierFilter<'_>) -> Vec<&Modifier> {
        let mut active: Vec<&Modifier> = self.candidates(filter).filter(|m| m.contains(ts)).collect();
        active.sort_by_key(|m| (m.start, m.instance_id));
        active
    }

    /// Copies of the modifiers overlapping `[t0, t1)`, clipped to that range.
    pub fn overlapping(
        &self,
        t0: NaiveDateTime,
        t1: NaiveDateTime,
        filter: &ModifierFilter<'_>,
    ) -> Vec<Modifier> {
        let mut clipped: Vec<Modifier> = self
            .candidates(filter)
            .filter(|m| m.overlaps(t0, t1))
            .map(|m| m.clipped(t0, t1))
            .collect();
        clipped.sort_by_key(|m| (m.start, m.instance_id));
        clipped
    }

    /// Unclipped copies of the modifiers overlapping `[t0, t1)`.
    pub fn intervals_between(
        &self,
        t0: NaiveDateTime,
        t1: NaiveDateTime,
        filter: &ModifierFilter<'_>,
    ) -> Vec<Modifier> {
        let mut found: Vec<Modifier> = self
            .candidates(filter)
            .filter(|m| m.overlaps(t0, t1))
            .cloned()
            .collect();
        found.sort_by_key(|m| (m.start, m.instance_id));
        found
    }

    pub fn len(&self) -> usize {
        self.modifiers.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.modifiers.clear();
        self.next_instance = 0;
    }
}
