//! Helpers for writing combat log lines in unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

use crate::combat_log::{CombatEvent, LogParser};
use crate::context::{EntityRegistry, SessionContext, StringPool};

pub const ENTER_COMBAT: &str = "Event {836045448945472}: EnterCombat {836045448945489}";
pub const EXIT_COMBAT: &str = "Event {836045448945472}: ExitCombat {836045448945490}";
pub const ACTIVATE: &str = "Event {836045448945472}: AbilityActivate {836045448945479}";
pub const DEATH: &str = "Event {836045448945472}: Death {836045448945493}";
pub const INTERRUPT: &str = "Event {836045448945472}: AbilityInterrupt {836045448945482}";
pub const DAMAGE: &str = "ApplyEffect {836045448945477}: Damage {836045448945501}";
pub const HEAL: &str = "ApplyEffect {836045448945477}: Heal {836045448945500}";
pub const TARGET_SET: &str = "Event {836045448945472}: TargetSet {836045448953668}";

pub const STATIC_BARRIER: i64 = 3411286364782592;
pub const FORCE_ARMOR: i64 = 812736661422080;
pub const SABER_WARD: i64 = 812169725739008;

pub fn apply(name: &str, id: i64) -> String {
    format!("ApplyEffect {{836045448945477}}: {name} {{{id}}}")
}

pub fn remove(name: &str, id: i64) -> String {
    format!("RemoveEffect {{836045448945478}}: {name} {{{id}}}")
}

pub fn area_entered(area: &str, area_id: i64, difficulty: &str) -> String {
    format!("AreaEntered {{836045448953664}}: {area} {{{area_id}}} {difficulty} {{836045448953655}}")
}

pub fn discipline(class: &str, discipline: &str, id: i64) -> String {
    format!("DisciplineChanged {{836045448953665}}: {class} {{16140905232405801950}}/{discipline} {{{id}}}")
}

pub fn player(name: &str, id: i64) -> String {
    format!("@{name}#{id}|(0.00,0.00,0.00,0.00)|(400000/400000)")
}

pub fn npc(name: &str, class_id: i64, log_id: i64, max_hp: i32) -> String {
    format!("{name} {{{class_id}}}:{log_id}|(0.00,0.00,0.00,0.00)|({max_hp}/{max_hp})")
}

pub fn ability(name: &str, id: i64) -> String {
    format!("{name} {{{id}}}")
}

/// `[time] [source] [target] [ability] [effect] payload`
pub fn line(time: &str, source: &str, target: &str, ability: &str, effect: &str, payload: &str) -> String {
    format!("[{time}] [{source}] [{target}] [{ability}] [{effect}] {payload}")
}

pub fn session_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(20, 0, 0))
        .unwrap_or_default()
}

pub fn ts(time: &str) -> NaiveDateTime {
    let t = chrono::NaiveTime::parse_from_str(time, "%H:%M:%S%.3f").unwrap_or_default();
    session_start().date().and_time(t)
}

/// Parses lines in order, numbering them from 1.
pub struct LogFixture {
    pub parser: LogParser,
    pub registry: Arc<EntityRegistry>,
    pub pool: Arc<StringPool>,
    next_line: u64,
    previous: Option<NaiveDateTime>,
}

impl LogFixture {
    pub fn new() -> Self {
        let registry = Arc::new(EntityRegistry::new());
        let pool = Arc::new(StringPool::new());
        Self::with(registry, pool)
    }

    pub fn for_session(session: &SessionContext) -> Self {
        Self::with(session.registry(), session.pool())
    }

    fn with(registry: Arc<EntityRegistry>, pool: Arc<StringPool>) -> Self {
        Self {
            parser: LogParser::new(session_start(), Arc::clone(&registry), Arc::clone(&pool)),
            registry,
            pool,
            next_line: 1,
            previous: None,
        }
    }

    pub fn parse(&mut self, text: &str) -> CombatEvent {
        let event = self
            .parser
            .parse_line(self.next_line, text, self.previous)
            .unwrap_or_else(|e| panic!("bad fixture line {text}: {e}"));
        self.next_line += 1;
        self.previous = Some(event.timestamp);
        event
    }

    pub fn parse_all(&mut self, lines: &[String]) -> Vec<Arc<CombatEvent>> {
        lines.iter().map(|l| Arc::new(self.parse(l))).collect()
    }
}
