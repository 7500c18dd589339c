use super::value::parse_value;
use super::*;
use crate::context::{EntityRegistry, StringPool, UNKNOWN_ENTITY_NAME};
use chrono::{Days, NaiveDateTime, NaiveTime, TimeDelta};
use memchr::memchr;
use std::sync::Arc;

#[cfg(test)]
mod tests;

macro_rules! parse_i64 {
    ($s:expr) => {
        $s.trim().parse::<i64>().unwrap_or_default()
    };
}
macro_rules! parse_i32 {
    ($s:expr) => {
        $s.trim().parse::<i32>().unwrap_or_default()
    };
}

/// A timestamp this far behind the previous line means the clock passed midnight.
pub(crate) const ROLLOVER_THRESHOLD: TimeDelta = TimeDelta::hours(12);

/// The five bracketed fields of a line plus whatever follows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFields<'a> {
    pub time: &'a str,
    pub source: &'a str,
    pub target: &'a str,
    pub action: &'a str,
    pub effect: &'a str,
    pub rest: &'a str,
}

/// Split a raw line into its bracketed fields. Returns `None` when fewer than
/// five complete fields are present.
pub fn split_fields(line: &str) -> Option<LineFields<'_>> {
    let bytes = line.as_bytes();
    let mut fields = [""; 5];
    let mut pos = 0;
    for field in fields.iter_mut() {
        let open = pos + memchr(b'[', &bytes[pos..])?;
        let close = open + 1 + memchr(b']', &bytes[open + 1..])?;
        *field = &line[open + 1..close];
        pos = close + 1;
    }
    let [time, source, target, action, effect] = fields;
    Some(LineFields {
        time,
        source,
        target,
        action,
        effect,
        rest: &line[pos..],
    })
}

/// Split `Name {id}` into its trimmed name and id. Missing braces yield id 0.
pub fn split_named_id(segment: &str) -> (&str, i64) {
    let bytes = segment.as_bytes();
    match (memchr::memrchr(b'{', bytes), memchr::memrchr(b'}', bytes)) {
        (Some(open), Some(close)) if open < close => {
            (segment[..open].trim(), parse_i64!(&segment[open + 1..close]))
        }
        _ => (segment.trim(), 0),
    }
}

/// An entity descriptor after resolution, before the health part is attached.
enum Descriptor {
    SelfReference,
    Resolved(Arc<Entity>),
}

pub struct LogParser {
    session_date: NaiveDateTime,
    registry: Arc<EntityRegistry>,
    pool: Arc<StringPool>,
}

impl LogParser {
    pub fn new(session_date: NaiveDateTime, registry: Arc<EntityRegistry>, pool: Arc<StringPool>) -> Self {
        Self {
            session_date,
            registry,
            pool,
        }
    }

    pub fn session_date(&self) -> NaiveDateTime {
        self.session_date
    }

    /// Parse one decoded line. `previous` is the timestamp of the line before,
    /// used to detect midnight rollover; the session start is used when absent.
    pub fn parse_line(
        &self,
        line_number: u64,
        line: &str,
        previous: Option<NaiveDateTime>,
    ) -> Result<CombatEvent, ParseError> {
        let fields = split_fields(line).ok_or(ParseError::IncompleteLine { line_number })?;

        let time = parse_time(fields.time).ok_or_else(|| ParseError::InvalidTimestamp {
            line_number,
            segment: fields.time.to_string(),
        })?;
        let timestamp = self.resolve_timestamp(time, previous);

        let (source, source_health) = self.parse_entity(fields.source);
        let source = match source {
            Descriptor::Resolved(entity) => entity,
            // a self-referencing source has nothing to point at
            Descriptor::SelfReference => self.registry.unknown(),
        };
        let (target, target_health) = match self.parse_entity(fields.target) {
            (Descriptor::SelfReference, _) => (Arc::clone(&source), source_health),
            (Descriptor::Resolved(entity), health) => (entity, health),
        };

        let action = self.parse_action(fields.action);
        let effect = self.parse_effect(fields.effect);
        let (value, threat) = self.parse_details(line_number, fields.rest);

        Ok(CombatEvent {
            line_number,
            byte_len: line.len(),
            timestamp,
            source,
            target,
            source_health,
            target_health,
            action,
            effect,
            value,
            threat,
        })
    }

    fn resolve_timestamp(&self, time: NaiveTime, previous: Option<NaiveDateTime>) -> NaiveDateTime {
        let anchor = previous.unwrap_or(self.session_date);
        let candidate = anchor.date().and_time(time);
        if anchor - candidate > ROLLOVER_THRESHOLD {
            candidate.checked_add_days(Days::new(1)).unwrap_or(candidate)
        } else {
            candidate
        }
    }

    fn parse_entity(&self, segment: &str) -> (Descriptor, (i32, i32)) {
        let mut parts = segment.split('|');
        let name_segment = parts.next().unwrap_or_default().trim();
        // coordinates are not used
        let _ = parts.next();
        let health = parts.next().map(parse_health).unwrap_or_default();

        if name_segment == "=" {
            return (Descriptor::SelfReference, health);
        }
        let entity = self
            .resolve_entity(name_segment)
            .unwrap_or_else(|| self.registry.unknown());
        (Descriptor::Resolved(entity), health)
    }

    fn resolve_entity(&self, segment: &str) -> Option<Arc<Entity>> {
        if segment.is_empty() {
            return None;
        }
        let bytes = segment.as_bytes();

        // vehicle and turret shorthand: `Name::id` or `::id`
        if let Some(pos) = memchr::memmem::find(bytes, b"::") {
            let log_id = parse_i64!(&segment[pos + 2..]);
            if log_id == 0 {
                return None;
            }
            let name = segment[..pos].trim();
            if name.is_empty() {
                return Some(self.registry.get_or_insert_with(log_id, || {
                    Entity::new(log_id, 0, self.pool.intern(UNKNOWN_ENTITY_NAME), EntityType::Npc)
                }));
            }
            return Some(self.entity(log_id, 0, name, EntityType::Npc));
        }

        let hash = memchr(b'#', bytes);
        let slash = memchr(b'/', bytes);

        match (hash, slash) {
            // @Owner#oid/Companion {tid}:id
            (Some(_), Some(slash)) => self.companion(&segment[slash + 1..]),
            // @Name#id or name@handle#id
            (Some(hash), None) => {
                let log_id = parse_i64!(&segment[hash + 1..]);
                let name = &segment[..hash];
                let name = match name.strip_prefix('@') {
                    Some(stripped) => stripped,
                    None => name.split('@').next().unwrap_or(name),
                };
                (log_id != 0).then(|| self.entity(log_id, 0, name.trim(), EntityType::Player))
            }
            // name@handle/companion{id}
            (None, Some(slash)) if memchr(b'@', &bytes[..slash]).is_some() => {
                self.companion(&segment[slash + 1..])
            }
            _ => self.npc(segment),
        }
    }

    fn companion(&self, segment: &str) -> Option<Arc<Entity>> {
        let (name, template_id, log_id) = split_template(segment)?;
        Some(self.entity(log_id, template_id, name, EntityType::Companion))
    }

    // `Name {id}:{inner}` puts the instance id after the colon
    fn npc(&self, segment: &str) -> Option<Arc<Entity>> {
        let (name, template_id, log_id) = split_template(segment)?;
        Some(self.entity(log_id, template_id, name, EntityType::Npc))
    }

    fn entity(&self, log_id: i64, class_id: i64, name: &str, kind: EntityType) -> Arc<Entity> {
        self.registry
            .get_or_insert_with(log_id, || Entity::new(log_id, class_id, self.pool.intern(name), kind))
    }

    fn parse_action(&self, segment: &str) -> Action {
        if segment.trim().is_empty() {
            return Action::default();
        }
        let (name, id) = split_named_id(segment);
        Action {
            name: self.pool.intern(name),
            id,
        }
    }

    fn parse_effect(&self, segment: &str) -> Effect {
        let bytes = segment.as_bytes();
        let Some(type_end) = memchr(b'}', bytes) else {
            return Effect::default();
        };
        let (type_name, type_id) = split_named_id(&segment[..=type_end]);
        let rest = segment[type_end + 1..].trim_start();
        let rest = rest.strip_prefix(':').unwrap_or(rest);

        let (effect_part, secondary_part) = match memchr(b'}', rest.as_bytes()) {
            Some(end) => (&rest[..=end], &rest[end + 1..]),
            None => (rest, ""),
        };
        let (effect_name, effect_id) = split_named_id(effect_part);
        // discipline follows a slash, difficulty just follows the area
        let secondary_part = secondary_part.trim_start().trim_start_matches('/');
        let (secondary_name, secondary_id) = split_named_id(secondary_part);

        Effect {
            kind: EffectType::from_type_id(type_id),
            type_id,
            type_name: self.pool.intern(type_name),
            effect_id,
            effect_name: self.pool.intern(effect_name),
            secondary_name: self.pool.intern(secondary_name),
            secondary_id,
        }
    }

    fn parse_details(&self, line_number: u64, segment: &str) -> (Value, f64) {
        let bytes = segment.as_bytes();

        let payload_end = memchr(b'(', bytes).map(|open| {
            let close = rfind_matching_paren(bytes, open);
            (open, close)
        });

        let value = match payload_end {
            Some((open, close)) => {
                let payload = &segment[open + 1..close.unwrap_or(segment.len())];
                parse_value(line_number, payload, &self.pool).unwrap_or_else(|err| {
                    tracing::warn!(line = line_number, error = %err, "unrecognized value payload");
                    Value::unrecognized()
                })
            }
            None => Value::default(),
        };

        let threat_from = payload_end
            .and_then(|(_, close)| close)
            .map(|c| c + 1)
            .unwrap_or(0);
        let threat = parse_threat(&segment[threat_from..]);

        (value, threat)
    }
}

// parse HH:MM:SS.mmm
fn parse_time(segment: &str) -> Option<NaiveTime> {
    let b = segment.as_bytes();
    if b.len() != 12 || b[2] != b':' || b[5] != b':' || b[8] != b'.' {
        return None;
    }
    let digit = |i: usize| -> Option<u32> {
        b[i].is_ascii_digit().then(|| (b[i] - b'0') as u32)
    };

    let hour = digit(0)? * 10 + digit(1)?;
    let minute = digit(3)? * 10 + digit(4)?;
    let second = digit(6)? * 10 + digit(7)?;
    let millis = digit(9)? * 100 + digit(10)? * 10 + digit(11)?;

    NaiveTime::from_hms_milli_opt(hour, minute, second, millis)
}

fn parse_health(segment: &str) -> (i32, i32) {
    let inner = segment.trim().trim_start_matches('(').trim_end_matches(')');
    match inner.split_once('/') {
        Some((current, max)) => (parse_i32!(current), parse_i32!(max)),
        None => (0, 0),
    }
}

fn parse_threat(segment: &str) -> f64 {
    let bytes = segment.as_bytes();
    memchr(b'<', bytes)
        .zip(memchr(b'>', bytes))
        .and_then(|(s, e)| (s < e).then(|| segment[s + 1..e].trim()))
        .and_then(|t| t.parse::<f64>().ok())
        .unwrap_or_default()
}

/// `Name {template}` or `Name {template}:instance`, returning (name, template, log id).
fn split_template(segment: &str) -> Option<(&str, i64, i64)> {
    let bytes = segment.as_bytes();
    let brace = memchr(b'{', bytes)?;
    let end_brace = brace + memchr(b'}', &bytes[brace..])?;
    let name = segment[..brace].trim();
    let template_id = parse_i64!(&segment[brace + 1..end_brace]);

    let instance = segment[end_brace + 1..].trim_start();
    let log_id = match instance.strip_prefix(':') {
        Some(inner) => {
            let inner = inner.trim().trim_start_matches('{').trim_end_matches('}');
            parse_i64!(inner)
        }
        None => template_id,
    };
    (log_id != 0).then_some((name, template_id, log_id))
}

/// Find matching closing paren, handling nested parens
fn rfind_matching_paren(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, &b) in bytes[start..].iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i);
                }
            }
            _ => {}
        }
    }
    None
}
