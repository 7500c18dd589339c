//! Combats and everything derived from them.
//!
//! [`CombatBuilder`] folds event batches into a [`Combat`]: per-entity buckets and
//! running totals first, then shield attribution, cooldown savings, encounter
//! identity and reaction times, recomputed from the buckets after every batch.

mod builder;
mod combat;
mod cooldowns;
mod error;
mod identity;
mod shielding;
mod summary;


pub use builder::CombatBuilder;
pub use combat::{Combat, EntityLogs, EntityTotals};
pub use cooldowns::damage_saved;
pub use error::BuildError;
pub use identity::{EncounterIdentity, identify};
pub use shielding::attribute_shields;
pub use summary::{EncounterHistory, EncounterSummary};
