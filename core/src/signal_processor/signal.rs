use chrono::NaiveDateTime;
use std::path::PathBuf;
use std::sync::Arc;

use crate::combat_log::{CombatEvent, Entity};

/// Combat lifecycle batches produced by the log streamer.
#[derive(Debug, Clone)]
pub enum CombatMessage {
    /// Combat began. Carries the first in-combat lines of the poll.
    Start {
        start_time: NaiveDateTime,
        events: Vec<Arc<CombatEvent>>,
        location: String,
    },
    /// In-combat lines read since the previous message
    Update { events: Vec<Arc<CombatEvent>> },
    /// Combat ended. Carries every line of the combat.
    Stop { events: Vec<Arc<CombatEvent>> },
}

/// Everything the streamer publishes to its consumer.
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    Combat(CombatMessage),
    LocalPlayerIdentified(Arc<Entity>),
    /// Last log timestamp minus wall clock, in milliseconds
    TimingOffset { ms: i64 },
    /// The streamer moved to a newer log file
    LogRotated { path: PathBuf },
}
