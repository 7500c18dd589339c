//! Combat boundaries and the live consumer loop.

mod combat_state;
mod monitor;
mod signal;

pub use combat_state::{
    CombatState, CombatStateMachine, Observation, Placement, Transition, resume_after,
    split_combats,
};
pub use monitor::{CombatMonitor, CombatSnapshot};
pub use signal::{CombatMessage, MonitorEvent};
