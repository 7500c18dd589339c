//! Payload grammar for the `( ... )` part of a log line.
//!
//! The payload is split into tokens, then dispatched on the token sequence.
//! Every documented layout is one arm of [`interpret`].

use super::{Absorb, ParseError, Value, ValueShape};
use crate::context::StringPool;
use crate::game_data::defense_type;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Amount { value: f64, crit: bool },
    Effective(f64),
    Avoid(&'a str),
    Id(i64),
    Word(&'a str),
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

fn tokenize(payload: &str) -> Vec<Token<'_>> {
    payload
        .split(is_separator)
        .filter(|t| !t.is_empty())
        .map(classify)
        .collect()
}

fn parse_number(s: &str) -> Option<f64> {
    if !s.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok()
}

fn classify(token: &str) -> Token<'_> {
    if let Some(rest) = token.strip_prefix('~')
        && let Some(v) = parse_number(rest)
    {
        return Token::Effective(v);
    }
    if let Some(rest) = token.strip_suffix('~')
        && let Some(v) = parse_number(rest)
    {
        return Token::Effective(v);
    }
    if let Some(rest) = token.strip_prefix('-') {
        return Token::Avoid(rest);
    }
    if let Some(inner) = token.strip_prefix('{').and_then(|t| t.strip_suffix('}'))
        && let Ok(id) = inner.parse::<i64>()
    {
        return Token::Id(id);
    }
    let (digits, crit) = match token.strip_suffix('*') {
        Some(d) => (d, true),
        None => (token, false),
    };
    match parse_number(digits) {
        Some(value) => Token::Amount { value, crit },
        None => Token::Word(token),
    }
}

/// Parse a payload (without the outer parentheses) into a [`Value`].
///
/// Returns `InvalidValue` when the tokens match no known layout; callers log
/// it and fall back to [`Value::unrecognized`].
pub fn parse_value(line_number: u64, payload: &str, pool: &StringPool) -> Result<Value, ParseError> {
    let tokens = tokenize(payload);
    interpret(&tokens, pool).ok_or_else(|| ParseError::InvalidValue {
        line_number,
        detail: payload.trim().to_string(),
    })
}

impl Value {
    pub fn unrecognized() -> Self {
        Value {
            shape: ValueShape::Unrecognized,
            ..Default::default()
        }
    }
}

fn partial(raw: f64, effective: f64) -> f64 {
    (raw - effective).max(0.0)
}

fn interpret(tokens: &[Token<'_>], pool: &StringPool) -> Option<Value> {
    use Token::*;

    let mut v = Value::default();
    match *tokens {
        [] => {}
        // AreaEntered carries the game build tag here
        [Word(_)] => {}
        [Amount { value, crit }] => {
            v.raw = value;
            v.effective = value;
            v.crit = crit;
            v.shape = ValueShape::Plain;
        }
        [Amount { value, crit }, Effective(eff)] => {
            v.raw = value;
            v.effective = eff;
            v.crit = crit;
            v.shape = ValueShape::PartialHeal;
        }
        // reflect nullified
        [Amount { value, crit }, Avoid("")] => {
            v.raw = value;
            v.crit = crit;
            v.reflected = true;
            v.mitigation_id = defense_type::REFLECTED;
            v.shape = ValueShape::Nullified;
        }
        [Amount { value, .. }, Word("charges"), Id(ability)] => {
            v.charges = value as u32;
            v.charge_ability_id = ability;
            v.shape = ValueShape::Charges;
        }
        [Amount { value, crit }, Avoid(avoid), Id(avoid_id)] => {
            v.raw = value;
            v.crit = crit;
            v.mitigation = pool.intern(avoid);
            v.mitigation_id = avoid_id;
            v.shape = ValueShape::Avoided;
        }
        [Amount { value, crit }, Word(kind), Id(kind_id)] => {
            v.raw = value;
            v.effective = value;
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.shape = ValueShape::Damage;
        }
        [Amount { value, crit }, Effective(eff), Id(kind_id)] => {
            v.raw = value;
            v.effective = eff;
            v.mitigated = partial(value, eff);
            v.crit = crit;
            v.damage_type_id = kind_id;
            v.shape = ValueShape::PartialTyped;
        }
        [Amount { value, crit }, Effective(eff), Word(kind), Id(kind_id)] => {
            v.raw = value;
            v.effective = eff;
            v.mitigated = partial(value, eff);
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.shape = ValueShape::PartialDamage;
        }
        // pvp lines occasionally carry a stray fourth token, nothing in them is usable
        [_, _, _, _] => {
            v.shape = ValueShape::PvpArtifact;
        }
        [Amount { value, crit }, Word(kind), Id(kind_id), Word("reflected"), Id(_)] => {
            v.raw = value;
            v.effective = value;
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.reflected = true;
            v.shape = ValueShape::Reflected;
        }
        [Amount { value, crit }, Word(kind), Id(kind_id), Avoid(def), Id(def_id)] => {
            v.raw = value;
            v.effective = value;
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.mitigation = pool.intern(def);
            v.mitigation_id = def_id;
            v.shape = ValueShape::DefendedDamage;
        }
        // damage landing on a target that already died: `(A ~0 type {t} -)`
        [Amount { value, crit }, Effective(eff), Word(kind), Id(kind_id), Avoid(def)] => {
            v.raw = value;
            v.effective = eff;
            v.mitigated = partial(value, eff);
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.mitigation = pool.intern(def);
            v.shape = ValueShape::PartialDefended;
        }
        [Amount { value, crit }, Effective(eff), Word(kind), Id(kind_id), Word("reflected"), Id(_)] => {
            v.raw = value;
            v.effective = eff;
            v.mitigated = partial(value, eff);
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.reflected = true;
            v.shape = ValueShape::PartialReflected;
        }
        [Amount { value, crit }, Effective(eff), Word(kind), Id(kind_id), Avoid(def), Id(def_id)] => {
            v.raw = value;
            v.effective = eff;
            v.mitigated = partial(value, eff);
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.mitigation = pool.intern(def);
            v.mitigation_id = def_id;
            v.shape = ValueShape::PartialDefended;
        }
        [Amount { value, crit }, Word(kind), Id(kind_id), Amount { value: absorbed, .. }, Word("absorbed"), Id(absorb_id)] => {
            overflow(&mut v, value, absorbed, absorb_id);
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.shape = ValueShape::ShieldOverflow;
        }
        [Amount { value, crit }, Effective(eff), Word(kind), Id(kind_id), Amount { value: absorbed, .. }, Word("absorbed"), Id(absorb_id)] => {
            v.raw = value;
            v.effective = eff;
            v.mitigated = absorbed;
            v.absorb = Some(Absorb {
                amount: absorbed,
                type_id: absorb_id,
            });
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.shape = ValueShape::Absorbed;
        }
        [Amount { value, crit }, Word(kind), Id(kind_id), Avoid(def), Id(def_id), Amount { value: absorbed, .. }, Word("absorbed"), Id(absorb_id)] => {
            overflow(&mut v, value, absorbed, absorb_id);
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.mitigation = pool.intern(def);
            v.mitigation_id = def_id;
            v.shape = ValueShape::TankOverflow;
        }
        [Amount { value, crit }, Effective(eff), Word(kind), Id(kind_id), Avoid(def), Id(def_id), Amount { value: absorbed, .. }, Word("absorbed"), Id(absorb_id)] => {
            v.raw = value;
            v.effective = eff;
            v.mitigated = absorbed;
            v.absorb = Some(Absorb {
                amount: absorbed,
                type_id: absorb_id,
            });
            v.crit = crit;
            v.damage_type = pool.intern(kind);
            v.damage_type_id = kind_id;
            v.mitigation = pool.intern(def);
            v.mitigation_id = def_id;
            v.shape = ValueShape::TankAbsorbed;
        }
        _ => return None,
    }
    Some(v)
}

/// Absorb without an effective marker: the shield can never take more than the hit.
fn overflow(v: &mut Value, raw: f64, absorbed: f64, absorb_id: i64) {
    let mitigated = absorbed.min(raw);
    v.raw = raw;
    v.mitigated = mitigated;
    v.effective = raw - mitigated;
    v.absorb = Some(Absorb {
        amount: mitigated,
        type_id: absorb_id,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_data::defense_type;

    fn parse(payload: &str) -> Value {
        parse_value(1, payload, &StringPool::new()).unwrap()
    }

    #[test]
    fn heal_shapes() {
        let plain = parse("3500");
        assert_eq!(plain.shape, ValueShape::Plain);
        assert_eq!(plain.effective, 3500.0);

        let crit = parse("5000*");
        assert!(crit.crit);
        assert_eq!(crit.raw, 5000.0);

        let partial = parse("4000 ~2000");
        assert_eq!(partial.shape, ValueShape::PartialHeal);
        assert_eq!(partial.raw, 4000.0);
        assert_eq!(partial.effective, 2000.0);
    }

    #[test]
    fn nullified_reflect() {
        let v = parse("0 -");
        assert_eq!(v.shape, ValueShape::Nullified);
        assert!(v.reflected);
        assert_eq!(v.effective, 0.0);
    }

    #[test]
    fn three_token_shapes() {
        let dmg = parse("5765 energy {836045448940874}");
        assert_eq!(dmg.shape, ValueShape::Damage);
        assert_eq!(&*dmg.damage_type, "energy");
        assert_eq!(dmg.damage_type_id, 836045448940874);
        assert_eq!(dmg.effective, 5765.0);

        let charges = parse("3 charges {836045448953667}");
        assert_eq!(charges.shape, ValueShape::Charges);
        assert_eq!(charges.charges, 3);
        assert_eq!(charges.charge_ability_id, 836045448953667);

        let miss = parse("0 -miss {836045448945502}");
        assert_eq!(miss.shape, ValueShape::Avoided);
        assert_eq!(&*miss.mitigation, "miss");
        assert_eq!(miss.mitigation_id, defense_type::MISS);
        assert!(miss.is_avoided());

        let typed = parse("1500* 1200~ {123}");
        assert_eq!(typed.shape, ValueShape::PartialTyped);
        assert!(typed.crit);
        assert_eq!(typed.raw, 1500.0);
        assert_eq!(typed.effective, 1200.0);
        assert_eq!(typed.damage_type_id, 123);
    }

    #[test]
    fn partial_damage_mitigation() {
        let v = parse("5000 ~3500 kinetic {836045448940873}");
        assert_eq!(v.shape, ValueShape::PartialDamage);
        assert_eq!(v.mitigated, 1500.0);
    }

    #[test]
    fn unknown_four_token_payload_is_artifact() {
        let v = parse("12 foo bar baz");
        assert_eq!(v.shape, ValueShape::PvpArtifact);
        assert_eq!(v.raw, 0.0);
    }

    #[test]
    fn reflected_and_defended() {
        let v = parse("116010 kinetic {836045448940873}(reflected {836045448953649})");
        assert_eq!(v.shape, ValueShape::Reflected);
        assert!(v.reflected);
        assert_eq!(v.effective, 116010.0);

        let v = parse("2000 kinetic {836045448940873} -parry {836045448945503}");
        assert_eq!(v.shape, ValueShape::DefendedDamage);
        assert_eq!(v.mitigation_id, defense_type::PARRY);
    }

    #[test]
    fn damage_after_death() {
        let v = parse("41422 ~0 energy {836045448940874} -");
        assert_eq!(v.shape, ValueShape::PartialDefended);
        assert_eq!(v.effective, 0.0);
        assert_eq!(&*v.damage_type, "energy");
    }

    #[test]
    fn shield_overflow_caps_absorb_at_hit() {
        let v = parse("1000 energy {836045448940874} (1500 absorbed {836045448945511})");
        assert_eq!(v.shape, ValueShape::ShieldOverflow);
        assert_eq!(v.mitigated, 1000.0);
        assert_eq!(v.effective, 0.0);
        assert_eq!(v.absorbed(), 1000.0);
    }

    #[test]
    fn absorbed_with_effective() {
        let v = parse("5000 ~3000 kinetic {836045448940873} (2000 absorbed {836045448945511})");
        assert_eq!(v.shape, ValueShape::Absorbed);
        assert_eq!(v.effective, 3000.0);
        assert_eq!(v.mitigated, 2000.0);
        assert_eq!(v.absorb.unwrap().type_id, defense_type::ABSORBED);
    }

    #[test]
    fn tank_shapes() {
        let v = parse(
            "2583* energy {836045448940874} -shield {836045448945509} (1150 absorbed {836045448945511})",
        );
        assert_eq!(v.shape, ValueShape::TankOverflow);
        assert_eq!(v.mitigation_id, defense_type::SHIELD);
        assert_eq!(v.mitigated, 1150.0);
        assert_eq!(v.effective, 1433.0);

        let v = parse(
            "2583* ~1000 energy {836045448940874} -shield {836045448945509} (1583 absorbed {836045448945511})",
        );
        assert_eq!(v.shape, ValueShape::TankAbsorbed);
        assert_eq!(v.effective, 1000.0);
        assert_eq!(v.absorbed(), 1583.0);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_value(9, "a b c d e f g h i j", &StringPool::new()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { line_number: 9, .. }));
    }

    #[test]
    fn empty_payload_is_empty_value() {
        assert_eq!(parse("").shape, ValueShape::Empty);
    }
}
