//! Encounter identification data
//!
//! Instanced encounters are keyed by npc template id. Open world bosses are
//! keyed by name, and training dummies by their health pool.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::flashpoints::FLASHPOINT_BOSSES;
use super::lairs::LAIR_BOSSES;
use super::operations::OPERATION_BOSSES;
use super::world_bosses::WORLD_BOSSES;

/// Minimum max-HP for an npc named like a training dummy to count as one.
/// Guards against the low-health dummies scattered around fleet and starter planets.
pub const TRAINING_DUMMY_MIN_HP: i32 = 1_000_000;
const TRAINING_DUMMY_NAME: &str = "Training Dummy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Operation,
    Flashpoint,
    LairBoss,
    TrainingDummy,
    OpenWorld,
}

impl ContentType {
    pub fn is_instanced(&self) -> bool {
        matches!(
            self,
            ContentType::Operation | ContentType::Flashpoint | ContentType::LairBoss
        )
    }
}

/// Difficulty mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    // 4-man (Flashpoints)
    Veteran4,
    Master4,
    // 8-man
    Story8,
    Veteran8,
    Master8,
    // 16-man
    Story16,
    Veteran16,
    Master16,
}

impl Difficulty {
    /// Returns the group size (4, 8, or 16)
    pub fn group_size(&self) -> u8 {
        match self {
            Difficulty::Veteran4 | Difficulty::Master4 => 4,
            Difficulty::Story8 | Difficulty::Veteran8 | Difficulty::Master8 => 8,
            Difficulty::Story16 | Difficulty::Veteran16 | Difficulty::Master16 => 16,
        }
    }

    /// Short display name (e.g., "SM 8", "HM 16", "NiM 8")
    pub fn short_name(&self) -> &'static str {
        match self {
            Difficulty::Veteran4 => "Vet",
            Difficulty::Master4 => "MM",
            Difficulty::Story8 => "SM 8",
            Difficulty::Story16 => "SM 16",
            Difficulty::Veteran8 => "HM 8",
            Difficulty::Veteran16 => "HM 16",
            Difficulty::Master8 => "NiM 8",
            Difficulty::Master16 => "NiM 16",
        }
    }

    /// Parse from the area-entered difficulty string (e.g., "4 Player Veteran", "8 Player Story Mode")
    pub fn from_game_string(s: &str) -> Option<Self> {
        let s_lower = s.to_ascii_lowercase();

        let size = if s_lower.contains("16") {
            16
        } else if s_lower.contains('8') {
            8
        } else if s_lower.contains('4') {
            4
        } else {
            return None;
        };

        let is_master = s_lower.contains("master") || s_lower.contains("nightmare");
        let is_veteran = s_lower.contains("veteran") || s_lower.contains("hard");

        match (size, is_master, is_veteran) {
            (4, true, _) => Some(Difficulty::Master4),
            (4, _, _) => Some(Difficulty::Veteran4),
            (8, true, _) => Some(Difficulty::Master8),
            (8, _, true) => Some(Difficulty::Veteran8),
            (8, _, _) => Some(Difficulty::Story8),
            (16, true, _) => Some(Difficulty::Master16),
            (16, _, true) => Some(Difficulty::Veteran16),
            (16, _, _) => Some(Difficulty::Story16),
            _ => None,
        }
    }
}

/// Compact static row for one boss across all of its difficulties.
#[derive(Debug)]
pub struct BossEntry {
    pub area: &'static str,
    pub name: &'static str,
    pub npc_ids: &'static [i64],
    /// Ids that must die for a kill. Empty means every boss id present in the fight.
    pub kill_targets: &'static [i64],
}

impl BossEntry {
    pub(super) const fn new(area: &'static str, name: &'static str, npc_ids: &'static [i64]) -> Self {
        Self {
            area,
            name,
            npc_ids,
            kill_targets: &[],
        }
    }

    pub(super) const fn with_kill_targets(
        area: &'static str,
        name: &'static str,
        npc_ids: &'static [i64],
        kill_targets: &'static [i64],
    ) -> Self {
        Self {
            area,
            name,
            npc_ids,
            kill_targets,
        }
    }
}

/// An encounter the builder can recognize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterDefinition {
    pub name: String,
    pub area: String,
    pub content_type: ContentType,
    pub npc_ids: Vec<i64>,
    pub kill_targets: Vec<i64>,
    /// Ability whose appearance anywhere in the fight counts as a kill
    pub kill_ability: Option<i64>,
}

impl EncounterDefinition {
    fn from_entry(entry: &BossEntry, content_type: ContentType) -> Self {
        Self {
            name: entry.name.to_string(),
            area: entry.area.to_string(),
            content_type,
            npc_ids: entry.npc_ids.to_vec(),
            kill_targets: entry.kill_targets.to_vec(),
            kill_ability: None,
        }
    }

    pub fn is_boss_id(&self, class_id: i64) -> bool {
        self.npc_ids.contains(&class_id)
    }

    /// Ids whose deaths are required for a kill
    pub fn required_kills(&self) -> &[i64] {
        if self.kill_targets.is_empty() {
            &self.npc_ids
        } else {
            &self.kill_targets
        }
    }
}

/// Read-only lookup over every known encounter.
#[derive(Debug, Default)]
pub struct EncounterCatalog {
    definitions: Vec<EncounterDefinition>,
    by_npc: HashMap<i64, usize>,
    by_world_name: HashMap<String, usize>,
    area_content: HashMap<String, ContentType>,
}

static BUILTIN: LazyLock<EncounterCatalog> = LazyLock::new(|| {
    let tables: [(&[BossEntry], ContentType); 4] = [
        (OPERATION_BOSSES, ContentType::Operation),
        (FLASHPOINT_BOSSES, ContentType::Flashpoint),
        (LAIR_BOSSES, ContentType::LairBoss),
        (WORLD_BOSSES, ContentType::OpenWorld),
    ];
    let definitions = tables
        .iter()
        .flat_map(|(entries, content_type)| {
            entries
                .iter()
                .map(|e| EncounterDefinition::from_entry(e, *content_type))
        })
        .collect();
    EncounterCatalog::new(definitions)
});

impl EncounterCatalog {
    pub fn new(definitions: Vec<EncounterDefinition>) -> Self {
        let mut by_npc = HashMap::new();
        let mut by_world_name = HashMap::new();
        let mut area_content = HashMap::new();

        for (idx, def) in definitions.iter().enumerate() {
            if def.content_type == ContentType::OpenWorld {
                by_world_name.insert(def.name.to_ascii_lowercase(), idx);
                continue;
            }
            area_content.insert(def.area.clone(), def.content_type);
            for id in &def.npc_ids {
                by_npc.insert(*id, idx);
            }
        }

        Self {
            definitions,
            by_npc,
            by_world_name,
            area_content,
        }
    }

    /// The catalog compiled from the static boss tables.
    pub fn builtin() -> &'static EncounterCatalog {
        &BUILTIN
    }

    pub fn definitions(&self) -> &[EncounterDefinition] {
        &self.definitions
    }

    pub fn by_npc_id(&self, class_id: i64) -> Option<&EncounterDefinition> {
        self.by_npc.get(&class_id).map(|idx| &self.definitions[*idx])
    }

    pub fn world_boss(&self, name: &str) -> Option<&EncounterDefinition> {
        self.by_world_name
            .get(&name.to_ascii_lowercase())
            .map(|idx| &self.definitions[*idx])
    }

    /// Content type of a named area, `None` for areas without known encounters
    pub fn area_content_type(&self, area: &str) -> Option<ContentType> {
        self.area_content.get(area).copied()
    }
}

pub fn is_training_dummy(name: &str, max_hp: i32) -> bool {
    name.contains(TRAINING_DUMMY_NAME) && max_hp >= TRAINING_DUMMY_MIN_HP
}
