use hashbrown::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::combat_log::{Entity, EntityType};

/// Log id reserved for the placeholder used by empty or unreadable descriptors.
pub const UNKNOWN_ENTITY_ID: i64 = 0;
pub const UNKNOWN_ENTITY_NAME: &str = "Unknown";

/// Id-keyed identity cache. Two descriptors with the same log id always
/// resolve to the same `Arc<Entity>`.
#[derive(Debug)]
pub struct EntityRegistry {
    entities: RwLock<HashMap<i64, Arc<Entity>>>,
    unknown: Arc<Entity>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
            unknown: Arc::new(Entity::new(
                UNKNOWN_ENTITY_ID,
                0,
                Arc::from(UNKNOWN_ENTITY_NAME),
                EntityType::Unknown,
            )),
        }
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The placeholder for `[]` and descriptors that cannot be resolved
    pub fn unknown(&self) -> Arc<Entity> {
        Arc::clone(&self.unknown)
    }

    pub fn get(&self, log_id: i64) -> Option<Arc<Entity>> {
        if log_id == UNKNOWN_ENTITY_ID {
            return Some(self.unknown());
        }
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&log_id)
            .cloned()
    }

    /// Return the entity for `log_id`, creating it with `create` on first sighting.
    pub fn get_or_insert_with(&self, log_id: i64, create: impl FnOnce() -> Entity) -> Arc<Entity> {
        if let Some(existing) = self.get(log_id) {
            return existing;
        }
        let mut entities = self.entities.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            entities
                .entry(log_id)
                .or_insert_with(|| Arc::new(create())),
        )
    }

    pub fn len(&self) -> usize {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All known entities, in no particular order
    pub fn entities(&self) -> Vec<Arc<Entity>> {
        self.entities
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
