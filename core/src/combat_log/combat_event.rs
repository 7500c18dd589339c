use crate::context::{IStr, empty_istr};
use crate::game_data::{defense_type, effect_id, effect_type_id};
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq, Default, Copy, Hash)]
pub enum EntityType {
    Player,
    Npc,
    Companion,
    #[default]
    Unknown,
}

/// Canonical identity for an actor, shared by every combat of a session.
///
/// Flags that change over a session are atomics so the shared `Arc` can be
/// updated in place.
#[derive(Debug)]
pub struct Entity {
    pub log_id: i64,
    /// Npc or companion template id, 0 for players
    pub class_id: i64,
    pub name: IStr,
    pub entity_type: EntityType,
    is_local_player: AtomicBool,
    is_dead: AtomicBool,
}

impl Entity {
    pub fn new(log_id: i64, class_id: i64, name: IStr, entity_type: EntityType) -> Self {
        Self {
            log_id,
            class_id,
            name,
            entity_type,
            is_local_player: AtomicBool::new(false),
            is_dead: AtomicBool::new(false),
        }
    }

    pub fn is_character(&self) -> bool {
        self.entity_type == EntityType::Player
    }

    pub fn is_companion(&self) -> bool {
        self.entity_type == EntityType::Companion
    }

    pub fn is_npc(&self) -> bool {
        self.entity_type == EntityType::Npc
    }

    pub fn is_unknown(&self) -> bool {
        self.entity_type == EntityType::Unknown
    }

    pub fn is_local_player(&self) -> bool {
        self.is_local_player.load(Ordering::Relaxed)
    }

    pub fn set_local_player(&self, value: bool) {
        self.is_local_player.store(value, Ordering::Relaxed);
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead.load(Ordering::Relaxed)
    }

    pub fn set_dead(&self, value: bool) {
        self.is_dead.store(value, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone)]
pub struct Action {
    pub name: IStr,
    pub id: i64,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            name: empty_istr(),
            id: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EffectType {
    ApplyEffect,
    RemoveEffect,
    Event,
    Spend,
    Restore,
    ModifyCharges,
    AreaEntered,
    DisciplineChanged,
    #[default]
    Other,
}

impl EffectType {
    pub fn from_type_id(type_id: i64) -> Self {
        match type_id {
            effect_type_id::APPLYEFFECT => EffectType::ApplyEffect,
            effect_type_id::REMOVEEFFECT => EffectType::RemoveEffect,
            effect_type_id::EVENT => EffectType::Event,
            effect_type_id::SPEND => EffectType::Spend,
            effect_type_id::RESTORE => EffectType::Restore,
            effect_type_id::MODIFYCHARGES => EffectType::ModifyCharges,
            effect_type_id::AREAENTERED => EffectType::AreaEntered,
            effect_type_id::DISCIPLINECHANGED => EffectType::DisciplineChanged,
            _ => EffectType::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Effect {
    pub kind: EffectType,
    pub type_id: i64,
    pub type_name: IStr,
    pub effect_id: i64,
    pub effect_name: IStr,
    /// Difficulty for `AreaEntered`, discipline for `DisciplineChanged`
    pub secondary_name: IStr,
    pub secondary_id: i64,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            kind: EffectType::Other,
            type_id: 0,
            type_name: empty_istr(),
            effect_id: 0,
            effect_name: empty_istr(),
            secondary_name: empty_istr(),
            secondary_id: 0,
        }
    }
}

/// The nested `(B absorbed {id})` part of a damage payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Absorb {
    pub amount: f64,
    pub type_id: i64,
}

/// Which payload grammar a value was read with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueShape {
    #[default]
    Empty,
    Plain,
    PartialHeal,
    Nullified,
    Damage,
    Charges,
    Avoided,
    PartialTyped,
    PartialDamage,
    PvpArtifact,
    Reflected,
    DefendedDamage,
    PartialReflected,
    PartialDefended,
    ShieldOverflow,
    Absorbed,
    TankOverflow,
    TankAbsorbed,
    Unrecognized,
}

#[derive(Debug, Clone)]
pub struct Value {
    pub raw: f64,
    pub effective: f64,
    pub mitigated: f64,
    pub crit: bool,
    pub damage_type: IStr,
    pub damage_type_id: i64,
    /// Avoid or defense word (`miss`, `shield`, ...), empty when none
    pub mitigation: IStr,
    pub mitigation_id: i64,
    pub reflected: bool,
    pub absorb: Option<Absorb>,
    pub charges: u32,
    pub charge_ability_id: i64,
    pub shape: ValueShape,
}

impl Default for Value {
    fn default() -> Self {
        Self {
            raw: 0.0,
            effective: 0.0,
            mitigated: 0.0,
            crit: false,
            damage_type: empty_istr(),
            damage_type_id: 0,
            mitigation: empty_istr(),
            mitigation_id: 0,
            reflected: false,
            absorb: None,
            charges: 0,
            charge_ability_id: 0,
            shape: ValueShape::Empty,
        }
    }
}

impl Value {
    pub fn absorbed(&self) -> f64 {
        self.absorb.map(|a| a.amount).unwrap_or_default()
    }

    /// A hit that did nothing: dodged, parried, resisted and so on.
    pub fn is_avoided(&self) -> bool {
        self.shape == ValueShape::Avoided
            || (self.effective == 0.0 && defense_type::is_avoidance(self.mitigation_id))
    }
}

/// One parsed log line. Immutable once built and shared as `Arc<CombatEvent>`.
#[derive(Debug, Clone)]
pub struct CombatEvent {
    pub line_number: u64,
    pub byte_len: usize,
    pub timestamp: NaiveDateTime,
    pub source: Arc<Entity>,
    pub target: Arc<Entity>,
    pub source_health: (i32, i32),
    pub target_health: (i32, i32),
    pub action: Action,
    pub effect: Effect,
    pub value: Value,
    pub threat: f64,
}

impl CombatEvent {
    pub fn is_damage(&self) -> bool {
        self.effect.kind == EffectType::ApplyEffect && self.effect.effect_id == effect_id::DAMAGE
    }

    pub fn is_heal(&self) -> bool {
        self.effect.kind == EffectType::ApplyEffect && self.effect.effect_id == effect_id::HEAL
    }

    pub fn is_ability_activate(&self) -> bool {
        self.effect.kind == EffectType::Event
            && self.effect.effect_id == effect_id::ABILITYACTIVATE
    }

    pub fn is_event(&self, id: i64) -> bool {
        self.effect.kind == EffectType::Event && self.effect.effect_id == id
    }

    pub fn is_processed_absorb(&self) -> bool {
        self.effect.effect_id == effect_id::PROCESSED_ABSORB
    }
}
