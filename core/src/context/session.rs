//! Per-log session state shared by the historical and live paths.

use chrono::NaiveDateTime;
use std::sync::Arc;

use super::{EngineConfig, EntityRegistry, IStr, StringPool};
use crate::combat_log::{CombatEvent, EffectType, Entity, LogParser};
use crate::effects::{ModifierTimeline, ValueHistory};
use crate::game_data::{Difficulty, Discipline, Role, effect_id};

/// The area the log owner was in, as announced by `AreaEntered`.
#[derive(Debug, Clone)]
pub struct AreaInfo {
    pub name: IStr,
    pub area_id: i64,
    pub difficulty_name: IStr,
    pub difficulty_id: i64,
    pub entered_at: NaiveDateTime,
    /// Increments on every area change, including re-entering the same area
    pub generation: u64,
}

impl AreaInfo {
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_game_string(&self.difficulty_name)
    }
}

/// Owns everything that outlives a single combat: entity identities, the
/// string pool, the modifier timeline and the discipline/target/area histories.
#[derive(Debug)]
pub struct SessionContext {
    registry: Arc<EntityRegistry>,
    pool: Arc<StringPool>,
    pub timeline: ModifierTimeline,
    disciplines: ValueHistory<i64>,
    targets: ValueHistory<i64>,
    areas: ValueHistory<AreaInfo>,
    area_generation: u64,
    log_date: Option<NaiveDateTime>,
    local_player: Option<Arc<Entity>>,
    timing_offset_ms: Option<i64>,
    config: EngineConfig,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SessionContext {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: Arc::new(EntityRegistry::new()),
            pool: Arc::new(StringPool::new()),
            timeline: ModifierTimeline::new(),
            disciplines: ValueHistory::new(),
            targets: ValueHistory::new(),
            areas: ValueHistory::new(),
            area_generation: 0,
            log_date: None,
            local_player: None,
            timing_offset_ms: None,
            config,
        }
    }

    pub fn registry(&self) -> Arc<EntityRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn pool(&self) -> Arc<StringPool> {
        Arc::clone(&self.pool)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn log_date(&self) -> Option<NaiveDateTime> {
        self.log_date
    }

    /// Start a new log. Drops pooled strings and every history from the previous one.
    pub fn set_log_date(&mut self, date: NaiveDateTime) {
        self.log_date = Some(date);
        self.pool.clear();
        self.timeline.clear();
        self.disciplines.clear();
        self.targets.clear();
        self.areas.clear();
        self.area_generation = 0;
        if let Some(previous) = self.local_player.take() {
            previous.set_local_player(false);
        }
    }

    /// A parser bound to this session's registry, pool and log date.
    pub fn parser(&self) -> LogParser {
        LogParser::new(
            self.log_date.unwrap_or_default(),
            Arc::clone(&self.registry),
            Arc::clone(&self.pool),
        )
    }

    pub fn local_player(&self) -> Option<&Arc<Entity>> {
        self.local_player.as_ref()
    }

    pub fn timing_offset_ms(&self) -> Option<i64> {
        self.timing_offset_ms
    }

    pub fn set_timing_offset_ms(&mut self, ms: i64) {
        self.timing_offset_ms = Some(ms);
    }

    /// Feed one event in log order. Returns the local player the first time it is identified.
    pub fn observe(&mut self, event: &CombatEvent) -> Option<Arc<Entity>> {
        self.timeline.observe(event);

        let ts = event.timestamp;
        let mut identified = None;
        match event.effect.kind {
            EffectType::DisciplineChanged => {
                self.disciplines
                    .record(event.source.log_id, ts, event.effect.secondary_id);
                identified = self.identify_local_player(&event.source);
            }
            EffectType::AreaEntered => {
                identified = self.identify_local_player(&event.source);
                self.area_generation += 1;
                self.areas.record(
                    event.source.log_id,
                    ts,
                    AreaInfo {
                        name: Arc::clone(&event.effect.effect_name),
                        area_id: event.effect.effect_id,
                        difficulty_name: Arc::clone(&event.effect.secondary_name),
                        difficulty_id: event.effect.secondary_id,
                        entered_at: ts,
                        generation: self.area_generation,
                    },
                );
            }
            EffectType::Event => match event.effect.effect_id {
                effect_id::TARGETSET => {
                    self.targets.record(event.source.log_id, ts, event.target.log_id)
                }
                effect_id::TARGETCLEARED => self.targets.record(event.source.log_id, ts, 0),
                effect_id::DEATH => event.target.set_dead(true),
                effect_id::REVIVED => event.target.set_dead(false),
                _ => {}
            },
            _ => {}
        }
        identified
    }

    // the log owner announces its discipline and area before anyone else
    fn identify_local_player(&mut self, source: &Arc<Entity>) -> Option<Arc<Entity>> {
        if self.local_player.is_some() || !source.is_character() {
            return None;
        }
        source.set_local_player(true);
        self.local_player = Some(Arc::clone(source));
        tracing::info!(name = %source.name, id = source.log_id, "local player identified");
        Some(Arc::clone(source))
    }

    pub fn discipline_at(&self, entity: i64, ts: NaiveDateTime) -> Option<&'static Discipline> {
        self.disciplines
            .at(entity, ts)
            .and_then(|id| Discipline::from_guid(*id))
    }

    /// Role at `ts`, `None` when no discipline was announced yet.
    pub fn role_at(&self, entity: i64, ts: NaiveDateTime) -> Option<Role> {
        self.discipline_at(entity, ts).map(|d| d.role)
    }

    /// Target selected by `entity` at `ts`; `Some(0)` after an explicit clear.
    pub fn target_at(&self, entity: i64, ts: NaiveDateTime) -> Option<i64> {
        self.targets.at(entity, ts).copied()
    }

    pub fn area_at(&self, ts: NaiveDateTime) -> Option<&AreaInfo> {
        let owner = self.local_player.as_ref()?;
        self.areas.at(owner.log_id, ts)
    }

    pub fn current_area(&self) -> Option<&AreaInfo> {
        let owner = self.local_player.as_ref()?;
        self.areas.latest(owner.log_id)
    }
}
