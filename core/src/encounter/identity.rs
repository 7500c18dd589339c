//! Which encounter a combat was, and whether it ended in a kill.

use hashbrown::HashSet;

use super::Combat;
use crate::context::SessionContext;
use crate::game_data::{
    ContentType, Difficulty, EncounterCatalog, EncounterDefinition, effect_id, is_training_dummy,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterIdentity {
    pub name: Option<String>,
    pub area: Option<String>,
    pub content_type: Option<ContentType>,
    pub difficulty: Option<Difficulty>,
    /// log ids of the boss entities present
    pub boss_ids: Vec<i64>,
    pub killed: bool,
}

impl EncounterIdentity {
    pub fn is_boss(&self) -> bool {
        !self.boss_ids.is_empty()
    }
}

/// Classify `combat` from the area active at its start and the npcs it contains.
pub fn identify(
    combat: &Combat,
    session: &SessionContext,
    catalog: &EncounterCatalog,
) -> EncounterIdentity {
    let area = session.area_at(combat.start);
    let mut identity = EncounterIdentity {
        area: area.map(|a| a.name.to_string()),
        ..Default::default()
    };

    let npcs = || combat.entities().iter().filter(|e| e.is_npc());

    // Instanced bosses are keyed by template id
    let instanced = npcs().find_map(|e| catalog.by_npc_id(e.class_id));
    let definition = instanced.or_else(|| npcs().find_map(|e| catalog.world_boss(&e.name)));

    if let Some(def) = definition {
        identity.name = Some(def.name.clone());
        identity.content_type = Some(def.content_type);
        if def.content_type.is_instanced() {
            identity.difficulty = area.and_then(|a| a.difficulty());
        }
        identity.boss_ids = npcs()
            .filter(|e| {
                def.is_boss_id(e.class_id)
                    || (def.content_type == ContentType::OpenWorld
                        && e.name.eq_ignore_ascii_case(&def.name))
            })
            .map(|e| e.log_id)
            .collect();
        identity.killed = combat
            .kill_override
            .unwrap_or_else(|| is_killed(combat, def));
        return identity;
    }

    if let Some(dummy) = npcs().find(|e| is_training_dummy(&e.name, combat.max_hp(e.log_id))) {
        identity.name = Some(dummy.name.to_string());
        identity.content_type = Some(ContentType::TrainingDummy);
    } else {
        identity.content_type = area
            .and_then(|a| catalog.area_content_type(&a.name))
            .or(Some(ContentType::OpenWorld));
        identity.difficulty = area.and_then(|a| a.difficulty());
    }
    identity.killed = combat.kill_override.unwrap_or(false);
    identity
}

fn is_killed(combat: &Combat, def: &EncounterDefinition) -> bool {
    let present: HashSet<i64> = combat
        .entities()
        .iter()
        .filter(|e| e.is_npc())
        .map(|e| e.class_id)
        .collect();
    let died: HashSet<i64> = combat
        .log_events()
        .filter(|e| e.is_event(effect_id::DEATH))
        .map(|e| e.target.class_id)
        .collect();

    // only the kill targets that took part in this fight can be required
    let required: Vec<i64> = def
        .required_kills()
        .iter()
        .copied()
        .filter(|id| present.contains(id))
        .collect();

    let deaths_met = if required.is_empty() {
        false
    } else if def.content_type == ContentType::OpenWorld {
        required.iter().any(|id| died.contains(id))
    } else {
        required.iter().all(|id| died.contains(id))
    };

    let finishing_ability = def
        .kill_ability
        .is_some_and(|id| combat.log_events().any(|e| e.action.id == id));

    deaths_met || finishing_ability
}
