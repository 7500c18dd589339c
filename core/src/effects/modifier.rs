//! A single buff, debuff or shield interval.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::combat_log::Entity;
use crate::context::IStr;

/// One apply/remove pair for an effect instance.
///
/// `stop` is `None` while the effect is still on the target. Once set it is
/// never earlier than `start`.
#[derive(Debug, Clone)]
pub struct Modifier {
    pub instance_id: u64,
    pub effect_id: i64,
    pub name: IStr,
    pub source: Arc<Entity>,
    pub target: Arc<Entity>,
    pub start: NaiveDateTime,
    pub stop: Option<NaiveDateTime>,
    /// Charge count as of each timestamp it changed
    pub charges: BTreeMap<NaiveDateTime, u32>,
    /// Set by shield attribution once this shield has been consumed
    pub counted: bool,
}

impl Modifier {
    pub fn is_open(&self) -> bool {
        self.stop.is_none()
    }

    /// Whether `ts` falls within `[start, stop)`.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        self.start <= ts && self.stop.is_none_or(|stop| ts < stop)
    }

    /// Whether the interval intersects `[t0, t1)`.
    pub fn overlaps(&self, t0: NaiveDateTime, t1: NaiveDateTime) -> bool {
        self.start < t1 && self.stop.is_none_or(|stop| stop > t0)
    }

    /// Copy of this modifier restricted to `[t0, t1)`. Open modifiers are closed at `t1`.
    pub fn clipped(&self, t0: NaiveDateTime, t1: NaiveDateTime) -> Modifier {
        let start = self.start.max(t0);
        let stop = self.stop.map_or(t1, |stop| stop.min(t1)).max(start);
        Modifier {
            start,
            stop: Some(stop),
            ..self.clone()
        }
    }

    /// Charge count in effect at `ts`, if any was ever recorded before it.
    pub fn charges_at(&self, ts: NaiveDateTime) -> Option<u32> {
        self.charges.range(..=ts).next_back().map(|(_, c)| *c)
    }

    pub fn duration_secs(&self) -> Option<f64> {
        self.stop
            .map(|stop| (stop - self.start).num_milliseconds() as f64 / 1000.0)
    }
}
