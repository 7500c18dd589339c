//! Modifier tracking
//!
//! - **Modifier**: one buff/debuff/shield interval with its charge history
//! - **Timeline**: every modifier seen this session, queried by time range
//! - **History**: nearest-prior lookups for per-entity values (discipline, target, area)

mod history;
mod modifier;
mod timeline;

#[cfg(test)]
mod timeline_tests;

pub use history::ValueHistory;
pub use modifier::Modifier;
pub use timeline::{ModifierFilter, ModifierTimeline};
