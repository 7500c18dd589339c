//! Combat boundary detection.
//!
//! The state machine decides which lines belong to a combat:
//! - Idle: waiting for `EnterCombat`
//! - InCombat: accumulating, ended by `ExitCombat`, `AreaEntered`, a new
//!   `EnterCombat` or an activity timeout
//! - AwaitingExit: combat ended, trailing damage inside the grace window still belongs to it

use chrono::{NaiveDateTime, TimeDelta};
use std::sync::Arc;

use crate::combat_log::{CombatEvent, EffectType};
use crate::context::EngineConfig;
use crate::game_data::effect_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombatState {
    #[default]
    Idle,
    InCombat {
        started_at: NaiveDateTime,
        last_activity: NaiveDateTime,
    },
    AwaitingExit {
        started_at: NaiveDateTime,
        exit_time: NaiveDateTime,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Inside,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started(NaiveDateTime),
    Ended(NaiveDateTime),
}

/// Where a line landed and which boundaries it crossed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub placement: Placement,
    pub transitions: Vec<Transition>,
}

impl Observation {
    fn outside() -> Self {
        Self {
            placement: Placement::Outside,
            transitions: Vec::new(),
        }
    }

    fn inside() -> Self {
        Self {
            placement: Placement::Inside,
            transitions: Vec::new(),
        }
    }

    fn ended(mut self, at: NaiveDateTime) -> Self {
        self.transitions.insert(0, Transition::Ended(at));
        self
    }
}

#[derive(Debug, Clone)]
pub struct CombatStateMachine {
    state: CombatState,
    timeout: TimeDelta,
    grace: TimeDelta,
}

impl Default for CombatStateMachine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl CombatStateMachine {
    pub fn new(timeout: TimeDelta, grace: TimeDelta) -> Self {
        Self {
            state: CombatState::Idle,
            timeout,
            grace,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            TimeDelta::seconds(config.combat_timeout_secs),
            TimeDelta::milliseconds(config.post_combat_grace_ms),
        )
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn in_combat(&self) -> bool {
        !matches!(self.state, CombatState::Idle)
    }

    pub fn reset(&mut self) {
        self.state = CombatState::Idle;
    }

    /// Advance on one line and report where it belongs.
    pub fn observe(&mut self, event: &CombatEvent) -> Observation {
        match self.state {
            CombatState::Idle => self.handle_idle(event),
            CombatState::InCombat {
                started_at,
                last_activity,
            } => self.handle_in_combat(event, started_at, last_activity),
            CombatState::AwaitingExit {
                started_at,
                exit_time,
            } => self.handle_awaiting_exit(event, started_at, exit_time),
        }
    }

    fn handle_idle(&mut self, event: &CombatEvent) -> Observation {
        if !event.is_event(effect_id::ENTERCOMBAT) {
            return Observation::outside();
        }
        let ts = event.timestamp;
        self.state = CombatState::InCombat {
            started_at: ts,
            last_activity: ts,
        };
        tracing::debug!(line = event.line_number, "combat started");
        let mut observation = Observation::inside();
        observation.transitions.push(Transition::Started(ts));
        observation
    }

    fn handle_in_combat(
        &mut self,
        event: &CombatEvent,
        started_at: NaiveDateTime,
        last_activity: NaiveDateTime,
    ) -> Observation {
        let ts = event.timestamp;

        if ts - last_activity >= self.timeout {
            tracing::debug!(line = event.line_number, "combat timed out");
            self.state = CombatState::Idle;
            return self.handle_idle(event).ended(last_activity);
        }

        if event.is_event(effect_id::ENTERCOMBAT) {
            // the enter line only belongs to the new combat
            self.state = CombatState::Idle;
            return self.handle_idle(event).ended(ts);
        }

        if event.effect.kind == EffectType::AreaEntered {
            self.state = CombatState::Idle;
            return Observation::outside().ended(ts);
        }

        if event.is_event(effect_id::EXITCOMBAT) {
            self.state = CombatState::AwaitingExit {
                started_at,
                exit_time: ts,
            };
            return Observation::inside();
        }

        if event.is_damage() || event.is_heal() {
            self.state = CombatState::InCombat {
                started_at,
                last_activity: ts,
            };
        }
        Observation::inside()
    }

    fn handle_awaiting_exit(
        &mut self,
        event: &CombatEvent,
        started_at: NaiveDateTime,
        exit_time: NaiveDateTime,
    ) -> Observation {
        if event.is_damage() && event.timestamp - exit_time <= self.grace {
            self.state = CombatState::AwaitingExit {
                started_at,
                exit_time,
            };
            return Observation::inside();
        }
        self.state = CombatState::Idle;
        self.handle_idle(event).ended(exit_time)
    }

    /// Close the combat when no more lines arrive: an elapsed grace window or
    /// an activity timeout measured against `now` (log time).
    pub fn expire(&mut self, now: NaiveDateTime) -> Option<Transition> {
        match self.state {
            CombatState::AwaitingExit { exit_time, .. } if now - exit_time > self.grace => {
                self.state = CombatState::Idle;
                Some(Transition::Ended(exit_time))
            }
            CombatState::InCombat { last_activity, .. } if now - last_activity >= self.timeout => {
                self.state = CombatState::Idle;
                Some(Transition::Ended(last_activity))
            }
            _ => None,
        }
    }
}

/// Split a whole log into combats, as the live path would have.
pub fn split_combats(
    events: &[Arc<CombatEvent>],
    config: &EngineConfig,
) -> Vec<Vec<Arc<CombatEvent>>> {
    let mut detector = CombatStateMachine::from_config(config);
    let mut combats = Vec::new();
    let mut current: Vec<Arc<CombatEvent>> = Vec::new();

    for event in events {
        let observation = detector.observe(event);
        for transition in &observation.transitions {
            if let Transition::Ended(_) = transition
                && !current.is_empty()
            {
                combats.push(std::mem::take(&mut current));
            }
        }
        if observation.placement == Placement::Inside {
            current.push(Arc::clone(event));
        }
    }
    if !current.is_empty() {
        combats.push(current);
    }
    combats
}

/// Replay `events` and return the detector positioned after them, together
/// with the lines of the combat still open at the end (empty when idle).
pub fn resume_after(
    events: &[Arc<CombatEvent>],
    config: &EngineConfig,
) -> (CombatStateMachine, Vec<Arc<CombatEvent>>) {
    let mut detector = CombatStateMachine::from_config(config);
    let mut open: Vec<Arc<CombatEvent>> = Vec::new();
    for event in events {
        let observation = detector.observe(event);
        if observation
            .transitions
            .iter()
            .any(|t| matches!(t, Transition::Ended(_)))
        {
            open.clear();
        }
        if observation.placement == Placement::Inside {
            open.push(Arc::clone(event));
        }
    }
    if !detector.in_combat() {
        open.clear();
    }
    (detector, open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    struct Script {
        log: LogFixture,
        me: String,
        boss: String,
    }

    impl Script {
        fn new() -> Self {
            Self {
                log: LogFixture::new(),
                me: player("Galen", 100),
                boss: npc("Gharj", 2016946706972672, 9, 1_000_000),
            }
        }

        fn enter(&mut self, time: &str) -> CombatEvent {
            let me = self.me.clone();
            self.log.parse(&line(time, &me, &me, "", ENTER_COMBAT, ""))
        }

        fn exit(&mut self, time: &str) -> CombatEvent {
            let me = self.me.clone();
            self.log.parse(&line(time, &me, &me, "", EXIT_COMBAT, ""))
        }

        fn hit(&mut self, time: &str) -> CombatEvent {
            let (me, boss) = (self.me.clone(), self.boss.clone());
            self.log.parse(&line(
                time,
                &me,
                &boss,
                &ability("Force Lightning", 1),
                DAMAGE,
                "(1000 energy {836045448940874})",
            ))
        }
    }

    #[test]
    fn enter_and_exit_with_trailing_damage() {
        let mut s = Script::new();
        let mut sm = CombatStateMachine::default();

        let start = sm.observe(&s.enter("20:00:00.000"));
        assert_eq!(start.placement, Placement::Inside);
        assert_eq!(start.transitions, vec![Transition::Started(ts("20:00:00.000"))]);

        assert_eq!(sm.observe(&s.hit("20:00:01.000")).placement, Placement::Inside);
        assert_eq!(sm.observe(&s.exit("20:00:10.000")).placement, Placement::Inside);
        assert!(matches!(sm.state(), CombatState::AwaitingExit { .. }));

        // within the grace window
        let trailing = sm.observe(&s.hit("20:00:14.000"));
        assert_eq!(trailing.placement, Placement::Inside);
        assert!(trailing.transitions.is_empty());

        let past = sm.observe(&s.hit("20:00:16.000"));
        assert_eq!(past.placement, Placement::Outside);
        assert_eq!(past.transitions, vec![Transition::Ended(ts("20:00:10.000"))]);
        assert_eq!(sm.state(), CombatState::Idle);
    }

    #[test]
    fn re_entering_ends_then_starts() {
        let mut s = Script::new();
        let mut sm = CombatStateMachine::default();
        sm.observe(&s.enter("20:00:00.000"));
        sm.observe(&s.hit("20:00:01.000"));

        let again = sm.observe(&s.enter("20:00:05.000"));
        assert_eq!(again.placement, Placement::Inside);
        assert_eq!(
            again.transitions,
            vec![
                Transition::Ended(ts("20:00:05.000")),
                Transition::Started(ts("20:00:05.000"))
            ]
        );

        // same from the grace window
        sm.observe(&s.exit("20:00:06.000"));
        let third = sm.observe(&s.enter("20:00:07.000"));
        assert_eq!(
            third.transitions,
            vec![
                Transition::Ended(ts("20:00:06.000")),
                Transition::Started(ts("20:00:07.000"))
            ]
        );
    }

    #[test]
    fn timeout_ends_at_last_activity_and_reevaluates_the_line() {
        let mut s = Script::new();
        let mut sm = CombatStateMachine::default();
        sm.observe(&s.enter("20:00:00.000"));
        sm.observe(&s.hit("20:00:02.000"));

        let late = sm.observe(&s.enter("20:01:30.000"));
        assert_eq!(
            late.transitions,
            vec![
                Transition::Ended(ts("20:00:02.000")),
                Transition::Started(ts("20:01:30.000"))
            ]
        );

        let quiet = sm.observe(&s.hit("20:03:00.000"));
        assert_eq!(quiet.placement, Placement::Outside);
        assert_eq!(quiet.transitions, vec![Transition::Ended(ts("20:01:30.000"))]);
    }

    #[test]
    fn area_change_ends_combat() {
        let mut s = Script::new();
        let mut sm = CombatStateMachine::default();
        sm.observe(&s.enter("20:00:00.000"));
        let me = s.me.clone();
        let area = s.log.parse(&line(
            "20:00:03.000",
            &me,
            "",
            "",
            &area_entered("Imperial Fleet", 137438989504, ""),
            "",
        ));
        let obs = sm.observe(&area);
        assert_eq!(obs.placement, Placement::Outside);
        assert_eq!(obs.transitions, vec![Transition::Ended(ts("20:00:03.000"))]);
    }

    #[test]
    fn expire_closes_grace_window_without_more_lines() {
        let mut s = Script::new();
        let mut sm = CombatStateMachine::default();
        sm.observe(&s.enter("20:00:00.000"));
        sm.observe(&s.exit("20:00:10.000"));

        assert_eq!(sm.expire(ts("20:00:12.000")), None);
        assert_eq!(
            sm.expire(ts("20:00:16.000")),
            Some(Transition::Ended(ts("20:00:10.000")))
        );
        assert_eq!(sm.expire(ts("20:00:20.000")), None);
    }

    #[test]
    fn split_combats_groups_lines() {
        let mut s = Script::new();
        let events: Vec<_> = vec![
            s.hit("19:59:00.000"),
            s.enter("20:00:00.000"),
            s.hit("20:00:01.000"),
            s.exit("20:00:02.000"),
            s.enter("20:01:00.000"),
            s.hit("20:01:01.000"),
        ]
        .into_iter()
        .map(Arc::new)
        .collect();

        let combats = split_combats(&events, &EngineConfig::default());
        assert_eq!(combats.len(), 2);
        assert_eq!(combats[0].len(), 3);
        assert_eq!(combats[1].len(), 2);
        assert_eq!(combats[1][0].line_number, 5);
    }

    #[test]
    fn resume_keeps_only_the_open_combat() {
        let mut s = Script::new();
        let events: Vec<_> = vec![
            s.enter("20:00:00.000"),
            s.hit("20:00:01.000"),
            s.exit("20:00:02.000"),
            s.hit("20:00:30.000"),
            s.enter("20:01:00.000"),
            s.hit("20:01:01.000"),
        ]
        .into_iter()
        .map(Arc::new)
        .collect();

        let (detector, open) = resume_after(&events, &EngineConfig::default());
        assert!(matches!(
            detector.state(),
            CombatState::InCombat { started_at, .. } if started_at == ts("20:01:00.000")
        ));
        let lines: Vec<_> = open.iter().map(|e| e.line_number).collect();
        assert_eq!(lines, [5, 6]);

        let (idle, none) = resume_after(&events[..4], &EngineConfig::default());
        assert_eq!(idle.state(), CombatState::Idle);
        assert!(none.is_empty());
    }
}
