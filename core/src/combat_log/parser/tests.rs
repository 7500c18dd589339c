use super::*;
use crate::game_data::{defense_type, effect_id, effect_type_id};
use chrono::NaiveDateTime;

fn test_parser() -> LogParser {
    let date = NaiveDateTime::parse_from_str("2024-01-01 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    LogParser::new(date, Arc::new(EntityRegistry::new()), Arc::new(StringPool::new()))
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f").unwrap()
}

const DAMAGE_LINE: &str = "[20:15:03.123] [@Galen Ayder#690129185314118|(-4700.43,-4750.48,710.03,-0.71)|(414851/414851)] [Dread Master Bestia {3273941900591104}:5320000112163|(137.28,-120.98,-8.85,81.28)|(19000000/19129210)] [Force Lightning {808226247589888}] [ApplyEffect {836045448945477}: Damage {836045448945501}] (5765* energy {836045448940874}) <5765.0>";

#[test]
fn test_split_fields() {
    let fields = split_fields(DAMAGE_LINE).unwrap();
    assert_eq!(fields.time, "20:15:03.123");
    assert_eq!(fields.action, "Force Lightning {808226247589888}");
    assert_eq!(fields.effect, "ApplyEffect {836045448945477}: Damage {836045448945501}");
    assert!(fields.rest.contains("<5765.0>"));
}

#[test]
fn test_split_fields_truncated() {
    assert!(split_fields("[20:15:03.123] [@Galen Ayder#1|(0,0,0,0)|(1/1)] [=] [Sa").is_none());
}

#[test]
fn test_incomplete_line_error() {
    let parser = test_parser();
    let err = parser.parse_line(4, "[20:15:03.123] [", None).unwrap_err();
    assert!(matches!(err, ParseError::IncompleteLine { line_number: 4 }));
}

#[test]
fn test_invalid_timestamp_error() {
    let parser = test_parser();
    let line = "[2x:15:03.123] [] [] [] [Event {836045448945472}: AbilityActivate {836045448945479}]";
    let err = parser.parse_line(1, line, None).unwrap_err();
    assert!(matches!(err, ParseError::InvalidTimestamp { .. }));
}

#[test]
fn test_parse_damage_line() {
    let parser = test_parser();
    let event = parser.parse_line(1, DAMAGE_LINE, None).unwrap();

    assert_eq!(event.timestamp, ts("2024-01-01 20:15:03.123"));
    assert_eq!(&*event.source.name, "Galen Ayder");
    assert_eq!(event.source.entity_type, EntityType::Player);
    assert_eq!(event.source.log_id, 690129185314118);
    assert_eq!(event.source_health, (414851, 414851));

    assert_eq!(&*event.target.name, "Dread Master Bestia");
    assert_eq!(event.target.class_id, 3273941900591104);
    assert_eq!(event.target.log_id, 5320000112163);
    assert_eq!(event.target.entity_type, EntityType::Npc);
    assert_eq!(event.target_health, (19000000, 19129210));

    assert_eq!(&*event.action.name, "Force Lightning");
    assert_eq!(event.action.id, 808226247589888);
    assert_eq!(event.effect.kind, EffectType::ApplyEffect);
    assert_eq!(event.effect.effect_id, effect_id::DAMAGE);
    assert!(event.is_damage());

    assert_eq!(event.value.raw, 5765.0);
    assert!(event.value.crit);
    assert_eq!(&*event.value.damage_type, "energy");
    assert_eq!(event.threat, 5765.0);
}

#[test]
fn test_self_reference_target() {
    let parser = test_parser();
    let line = "[20:15:03.123] [@Galen Ayder#690129185314118|(0,0,0,0)|(300/400)] [=] [Kolto Probe {814832605462528}] [ApplyEffect {836045448945477}: Heal {836045448945500}] (3500 ~2000) <1000>";
    let event = parser.parse_line(1, line, None).unwrap();

    assert!(Arc::ptr_eq(&event.source, &event.target));
    assert_eq!(event.target_health, (300, 400));
    assert!(event.is_heal());
    assert_eq!(event.value.effective, 2000.0);
    assert_eq!(event.threat, 1000.0);
}

#[test]
fn test_empty_entity_is_unknown() {
    let parser = test_parser();
    let line = "[20:15:03.123] [] [] [] [Event {836045448945472}: TargetCleared {836045448953669}]";
    let event = parser.parse_line(1, line, None).unwrap();

    assert_eq!(event.source.log_id, 0);
    assert!(event.source.is_unknown());
    assert_eq!(&*event.source.name, "Unknown");
    assert_eq!(event.effect.kind, EffectType::Event);
    assert_eq!(event.action.id, 0);
}

#[test]
fn test_unresolvable_entity_is_named_unknown() {
    let parser = test_parser();
    let line = "[20:15:03.123] [Garbled Mob|(0,0,0,0)|(10/10)] [@Galen Ayder#690129185314118|(0,0,0,0)|(1/1)] [] [Event {836045448945472}: TargetSet {836045448953668}]";
    let event = parser.parse_line(1, line, None).unwrap();

    assert!(event.source.is_unknown());
    assert_eq!(&*event.source.name, "Unknown");
    assert_eq!(event.source_health, (10, 10));
    assert_eq!(&*event.target.name, "Galen Ayder");
}

#[test]
fn test_companion_descriptor() {
    let parser = test_parser();
    let line = "[20:15:03.123] [@Jerran Zeva#689501114780828/Raina Temple {493328533553152}:87481369009487|(4749.87,4694.53,710.05,0.00)|(288866/288866)] [=] [] [Event {836045448945472}: EnterCombat {836045448945489}]";
    let event = parser.parse_line(1, line, None).unwrap();

    assert_eq!(&*event.source.name, "Raina Temple");
    assert_eq!(event.source.class_id, 493328533553152);
    assert_eq!(event.source.log_id, 87481369009487);
    assert!(event.source.is_companion());
}

#[test]
fn test_handle_descriptors() {
    let parser = test_parser();
    let player = parser
        .resolve_entity("galen@ayder#690129185314118")
        .unwrap();
    assert_eq!(&*player.name, "galen");
    assert!(player.is_character());

    let companion = parser.resolve_entity("galen@ayder/Raina Temple{493328533553152}").unwrap();
    assert!(companion.is_companion());
    assert_eq!(companion.log_id, 493328533553152);
}

#[test]
fn test_vehicle_shorthand_reuses_known_name() {
    let parser = test_parser();
    let turret = parser.resolve_entity("Defense Turret::1234").unwrap();
    let again = parser.resolve_entity("::1234").unwrap();
    assert!(Arc::ptr_eq(&turret, &again));
    assert_eq!(&*again.name, "Defense Turret");

    let anonymous = parser.resolve_entity("::99").unwrap();
    assert_eq!(&*anonymous.name, "Unknown");
}

#[test]
fn test_same_id_same_entity_across_spellings() {
    let parser = test_parser();
    let a = parser.resolve_entity("@Galen Ayder#690129185314118").unwrap();
    let b = parser.resolve_entity("galen@ayder#690129185314118").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_area_entered_difficulty() {
    let parser = test_parser();
    let line = "[20:15:03.123] [@Galen Ayder#690129185314118|(0,0,0,0)|(1/1)] [] [] [AreaEntered {836045448953664}: Dxun - The CI-004 Facility {833571547775792} 8 Player Master {836045448953655}] (he3001) <v7.0.0b>";
    let event = parser.parse_line(1, line, None).unwrap();

    assert_eq!(event.effect.kind, EffectType::AreaEntered);
    assert_eq!(event.effect.type_id, effect_type_id::AREAENTERED);
    assert_eq!(&*event.effect.effect_name, "Dxun - The CI-004 Facility");
    assert_eq!(event.effect.effect_id, 833571547775792);
    assert_eq!(&*event.effect.secondary_name, "8 Player Master");
    assert_eq!(event.effect.secondary_id, 836045448953655);
}

#[test]
fn test_discipline_changed() {
    let parser = test_parser();
    let line = "[20:15:03.123] [@Galen Ayder#690129185314118|(0,0,0,0)|(1/1)] [] [] [DisciplineChanged {836045448953665}: Sorcerer {16141067504602942620}/Corruption {2031339142381587}]";
    let event = parser.parse_line(1, line, None).unwrap();

    assert_eq!(event.effect.kind, EffectType::DisciplineChanged);
    assert_eq!(&*event.effect.effect_name, "Sorcerer");
    assert_eq!(&*event.effect.secondary_name, "Corruption");
    assert_eq!(event.effect.secondary_id, 2031339142381587);
}

#[test]
fn test_shielded_damage_absorb() {
    let parser = test_parser();
    let line = "[20:15:03.123] [Dread Master Bestia {3273941900591104}:5320000112163|(0,0,0,0)|(1/1)] [@Galen Ayder#690129185314118|(0,0,0,0)|(1/1)] [Swipe {3273998290452480}] [ApplyEffect {836045448945477}: Damage {836045448945501}] (5000 ~3000 kinetic {836045448940873} (2000 absorbed {836045448945511})) <5000.0>";
    let event = parser.parse_line(1, line, None).unwrap();

    assert_eq!(event.value.effective, 3000.0);
    assert_eq!(event.value.absorbed(), 2000.0);
    assert_eq!(event.threat, 5000.0);
}

#[test]
fn test_miss() {
    let parser = test_parser();
    let line = "[20:15:03.123] [Dread Master Bestia {3273941900591104}:5320000112163|(0,0,0,0)|(1/1)] [@Galen Ayder#690129185314118|(0,0,0,0)|(1/1)] [Swipe {3273998290452480}] [ApplyEffect {836045448945477}: Damage {836045448945501}] (0 -miss {836045448945502}) <15000.0>";
    let event = parser.parse_line(1, line, None).unwrap();

    assert!(event.value.is_avoided());
    assert_eq!(event.value.mitigation_id, defense_type::MISS);
    assert_eq!(event.threat, 15000.0);
}

#[test]
fn test_unrecognized_payload_degrades_to_zero() {
    let parser = test_parser();
    let line = "[20:15:03.123] [] [] [] [ApplyEffect {836045448945477}: Damage {836045448945501}] (1 2 3 4 5 6 7 8 9 10 11)";
    let event = parser.parse_line(1, line, None).unwrap();

    assert_eq!(event.value.shape, ValueShape::Unrecognized);
    assert_eq!(event.value.raw, 0.0);
}

#[test]
fn test_charges_payload() {
    let parser = test_parser();
    let line = "[20:15:03.123] [@Galen Ayder#690129185314118|(0,0,0,0)|(1/1)] [=] [Trauma Probe {999516199190528}] [ModifyCharges {836045448953666}: Trauma Probe {999516199190528}] (5 charges {999516199190528})";
    let event = parser.parse_line(1, line, None).unwrap();

    assert_eq!(event.effect.kind, EffectType::ModifyCharges);
    assert_eq!(event.value.charges, 5);
    assert_eq!(event.value.charge_ability_id, 999516199190528);
}

#[test]
fn test_midnight_rollover() {
    let parser = test_parser();
    let line = "[00:00:01.000] [] [] [] [Event {836045448945472}: AbilityActivate {836045448945479}]";

    let previous = ts("2024-01-01 23:59:59.500");
    let event = parser.parse_line(1, line, Some(previous)).unwrap();
    assert_eq!(event.timestamp, ts("2024-01-02 00:00:01.000"));

    // slightly out of order lines stay on the same day
    let line = "[23:59:59.400] [] [] [] [Event {836045448945472}: AbilityActivate {836045448945479}]";
    let event = parser.parse_line(2, line, Some(previous)).unwrap();
    assert_eq!(event.timestamp, ts("2024-01-01 23:59:59.400"));
}

#[test]
fn test_split_named_id() {
    assert_eq!(split_named_id("Saber Ward {812169725739008}"), ("Saber Ward", 812169725739008));
    assert_eq!(split_named_id("plain"), ("plain", 0));
}
