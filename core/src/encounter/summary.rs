//! Encounter history for the current log and human-readable pull names.

use hashbrown::HashMap;
use serde::Serialize;
use std::collections::BTreeMap;

use super::Combat;
use crate::context::SessionContext;
use crate::game_data::ContentType;

/// Summary of a finished combat.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterSummary {
    pub display_name: String,
    pub content_type: Option<ContentType>,
    /// ISO 8601 start time
    pub start_time: String,
    pub end_time: String,
    pub duration_secs: f64,
    pub killed: bool,
    pub area_name: Option<String>,
    pub difficulty: Option<String>,
    pub boss_name: Option<String>,
    /// True if this combat is the first after an area change
    pub is_phase_start: bool,
    /// Names of enemy npcs, with a count when more than one
    pub npc_names: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EncounterHistory {
    summaries: Vec<EncounterSummary>,
    boss_pull_counts: HashMap<String, u32>,
    trash_pull_count: u32,
    /// Area generation of the last recorded combat. Re-entering the same area
    /// counts as a change.
    current_generation: Option<u64>,
}

impl EncounterHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> &[EncounterSummary] {
        &self.summaries
    }

    pub fn clear(&mut self) {
        self.summaries.clear();
        self.boss_pull_counts.clear();
        self.trash_pull_count = 0;
        self.current_generation = None;
    }

    /// Start numbering pulls afresh when `generation` differs from the last
    /// recorded one. Returns whether it did.
    pub fn enter_area(&mut self, generation: u64) -> bool {
        let changed = self.current_generation != Some(generation);
        if changed {
            self.current_generation = Some(generation);
            self.trash_pull_count = 0;
            self.boss_pull_counts.clear();
        }
        changed
    }

    /// "Brontes - 7" for bosses, a numbered trash label otherwise.
    pub fn next_pull_name(
        &mut self,
        content_type: Option<ContentType>,
        boss_name: Option<&str>,
    ) -> String {
        if let Some(name) = boss_name {
            let count = self.boss_pull_counts.entry(name.to_string()).or_insert(0);
            *count += 1;
            return format!("{} - {}", name, count);
        }
        self.trash_pull_count += 1;
        let label = match content_type {
            Some(ContentType::Operation) => "Operation Trash",
            Some(ContentType::Flashpoint) => "Flashpoint Trash",
            Some(ContentType::LairBoss) => "Lair Trash",
            Some(ContentType::TrainingDummy) => "Dummy Parse",
            Some(ContentType::OpenWorld) | None => "Open World",
        };
        format!("{} {}", label, self.trash_pull_count)
    }

    /// Pull number an in-progress boss combat would get.
    pub fn peek_pull_count(&self, boss_name: &str) -> u32 {
        self.boss_pull_counts.get(boss_name).copied().unwrap_or(0) + 1
    }

    /// Summarize a finished combat and append it to the history.
    pub fn record(&mut self, combat: &Combat, session: &SessionContext) -> &EncounterSummary {
        let area = session.area_at(combat.start);
        let is_phase_start = area.is_some_and(|a| self.enter_area(a.generation));

        let identity = &combat.identity;
        let boss_name = identity
            .is_boss()
            .then(|| identity.name.clone())
            .flatten();
        let display_name = self.next_pull_name(identity.content_type, boss_name.as_deref());

        let mut npcs: BTreeMap<&str, u32> = BTreeMap::new();
        for npc in combat.entities().iter().filter(|e| e.is_npc()) {
            *npcs.entry(&*npc.name).or_default() += 1;
        }
        let npc_names = npcs
            .into_iter()
            .map(|(name, count)| match count {
                1 => name.to_string(),
                n => format!("{name} ({n})"),
            })
            .collect();

        let difficulty = identity
            .difficulty
            .map(|d| d.short_name().to_string())
            .or_else(|| {
                area.filter(|a| !a.difficulty_name.is_empty())
                    .map(|a| a.difficulty_name.to_string())
            });

        tracing::info!(name = %display_name, killed = identity.killed, "encounter recorded");
        self.summaries.push(EncounterSummary {
            display_name,
            content_type: identity.content_type,
            start_time: combat.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end_time: combat.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            duration_secs: combat.duration_secs(),
            killed: identity.killed,
            area_name: identity.area.clone(),
            difficulty,
            boss_name,
            is_phase_start,
            npc_names,
        });
        let last = self.summaries.len() - 1;
        &self.summaries[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_and_trash_counters_reset_on_area_change() {
        let mut history = EncounterHistory::new();
        assert!(history.enter_area(1));
        assert_eq!(history.next_pull_name(Some(ContentType::Operation), None), "Operation Trash 1");
        assert_eq!(history.next_pull_name(Some(ContentType::Operation), Some("Brontes")), "Brontes - 1");
        assert_eq!(history.peek_pull_count("Brontes"), 2);
        assert_eq!(history.next_pull_name(Some(ContentType::Operation), Some("Brontes")), "Brontes - 2");
        assert!(!history.enter_area(1));

        assert!(history.enter_area(2));
        assert_eq!(history.next_pull_name(Some(ContentType::Operation), Some("Brontes")), "Brontes - 1");
        assert_eq!(history.next_pull_name(None, None), "Open World 1");
    }
}
