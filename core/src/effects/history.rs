use chrono::NaiveDateTime;
use hashbrown::HashMap;
use std::collections::BTreeMap;

/// Per-entity record of a value over time, answered with nearest-prior lookups.
#[derive(Debug, Clone)]
pub struct ValueHistory<T> {
    entries: HashMap<i64, BTreeMap<NaiveDateTime, T>>,
}

impl<T> Default for ValueHistory<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T> ValueHistory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entity: i64, ts: NaiveDateTime, value: T) {
        self.entries.entry(entity).or_default().insert(ts, value);
    }

    /// The value in effect for `entity` at `ts`; `None` when nothing was recorded before it.
    pub fn at(&self, entity: i64, ts: NaiveDateTime) -> Option<&T> {
        self.entries
            .get(&entity)?
            .range(..=ts)
            .next_back()
            .map(|(_, v)| v)
    }

    pub fn latest(&self, entity: i64) -> Option<&T> {
        self.entries.get(&entity)?.values().next_back()
    }

    pub fn entities(&self) -> impl Iterator<Item = i64> + '_ {
        self.entries.keys().copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
