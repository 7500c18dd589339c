pub mod combat_log;
pub mod context;
pub mod effects;
pub mod encounter;
pub mod game_data;
pub mod metrics;
pub mod signal_processor;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports for convenience
pub use combat_log::*;
pub use context::watcher as directory_watcher;
pub use context::{AnalysisConfig, EngineConfig, SessionContext};
pub use effects::{Modifier, ModifierFilter, ModifierTimeline, ValueHistory};
pub use encounter::{Combat, CombatBuilder, EncounterHistory, EncounterSummary};
pub use game_data::{ContentType, Difficulty, Discipline, Role};
pub use metrics::EntityMetrics;
pub use signal_processor::{CombatMessage, CombatMonitor, CombatSnapshot, MonitorEvent};
