mod discipline;
mod effects;
mod encounters;
mod flashpoints;
mod lairs;
mod operations;
mod shields;
mod world_bosses;

pub use discipline::{Discipline, Role};
pub use effects::*;
pub use encounters::{
    BossEntry, ContentType, Difficulty, EncounterCatalog, EncounterDefinition,
    TRAINING_DUMMY_MIN_HP, is_training_dummy,
};
pub use shields::{is_cleanse, is_shield_effect, is_tank_cooldown};
