//! Tests for ModifierTimeline interval tracking
//!
//! Verifies that:
//! - Apply/remove pairs produce closed intervals
//! - Range queries clip copies and never touch stored intervals
//! - Charges are recorded with the apply-charge correction

use crate::game_data::is_shield_effect;
use crate::test_support::*;

use super::{Modifier, ModifierFilter, ModifierTimeline};

fn sage() -> String {
    player("Sage", 100)
}

fn tank() -> String {
    player("Tank", 200)
}

fn feed(lines: &[String]) -> ModifierTimeline {
    let mut fixture = LogFixture::new();
    let mut timeline = ModifierTimeline::new();
    for line in lines {
        timeline.observe(&fixture.parse(line));
    }
    timeline
}

fn barrier_lines() -> Vec<String> {
    let barrier = ability("Static Barrier", STATIC_BARRIER);
    vec![
        line("20:00:01.000", &sage(), &tank(), &barrier, &apply("Static Barrier", STATIC_BARRIER), ""),
        line("20:00:09.000", &sage(), &tank(), &barrier, &remove("Static Barrier", STATIC_BARRIER), ""),
    ]
}

#[test]
fn apply_and_remove_close_the_interval() {
    let timeline = feed(&barrier_lines());
    let all = timeline.intervals_between(ts("20:00:00.000"), ts("20:01:00.000"), &ModifierFilter::any());

    assert_eq!(all.len(), 1);
    let m = &all[0];
    assert_eq!(m.start, ts("20:00:01.000"));
    assert_eq!(m.stop, Some(ts("20:00:09.000")));
    assert_eq!(&*m.name, "Static Barrier");
    assert_eq!(m.source.log_id, 100);
    assert_eq!(m.target.log_id, 200);
    assert!(is_shield_effect(m.effect_id));
}

#[test]
fn active_at_is_half_open() {
    let timeline = feed(&barrier_lines());
    let on_tank = ModifierFilter::any().target(200);

    assert_eq!(timeline.active_at(ts("20:00:01.000"), &on_tank).len(), 1);
    assert_eq!(timeline.active_at(ts("20:00:08.999"), &on_tank).len(), 1);
    assert!(timeline.active_at(ts("20:00:09.000"), &on_tank).is_empty());
    assert!(timeline.active_at(ts("20:00:05.000"), &ModifierFilter::any().target(100)).is_empty());
}

#[test]
fn active_modifiers_outlive_the_filter() {
    let timeline = feed(&barrier_lines());
    let active = {
        let ids = [STATIC_BARRIER];
        let filter = ModifierFilter::any().target(200).effects(&ids);
        timeline.active_at(ts("20:00:02.000"), &filter)
    };
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].source.log_id, 100);
    assert_eq!(active[0].effect_id, STATIC_BARRIER);
}

#[test]
fn overlapping_returns_clipped_copies() {
    let timeline = feed(&barrier_lines());
    let clipped = timeline.overlapping(ts("20:00:05.000"), ts("20:00:07.000"), &ModifierFilter::any());

    assert_eq!(clipped.len(), 1);
    assert_eq!(clipped[0].start, ts("20:00:05.000"));
    assert_eq!(clipped[0].stop, Some(ts("20:00:07.000")));

    let original = timeline.get(STATIC_BARRIER, clipped[0].instance_id).unwrap();
    assert_eq!(original.start, ts("20:00:01.000"));
    assert_eq!(original.stop, Some(ts("20:00:09.000")));
}

#[test]
fn open_modifier_clips_to_range_end() {
    let barrier = ability("Static Barrier", STATIC_BARRIER);
    let timeline = feed(&[line(
        "20:00:01.000",
        &sage(),
        &tank(),
        &barrier,
        &apply("Static Barrier", STATIC_BARRIER),
        "",
    )]);

    let clipped = timeline.overlapping(ts("20:00:00.000"), ts("20:00:30.000"), &ModifierFilter::any());
    assert_eq!(clipped[0].stop, Some(ts("20:00:30.000")));
    assert!(timeline.get(STATIC_BARRIER, clipped[0].instance_id).unwrap().is_open());
}

#[test]
fn reapply_while_open_refreshes_same_instance() {
    let barrier = ability("Static Barrier", STATIC_BARRIER);
    let timeline = feed(&[
        line("20:00:01.000", &sage(), &tank(), &barrier, &apply("Static Barrier", STATIC_BARRIER), ""),
        line("20:00:03.000", &sage(), &tank(), &barrier, &apply("Static Barrier", STATIC_BARRIER), ""),
    ]);
    assert_eq!(timeline.len(), 1);
}

#[test]
fn remove_by_other_source_falls_back_to_target() {
    let barrier = ability("Static Barrier", STATIC_BARRIER);
    let timeline = feed(&[
        line("20:00:01.000", &sage(), &tank(), &barrier, &apply("Static Barrier", STATIC_BARRIER), ""),
        line("20:00:04.000", &tank(), &tank(), &barrier, &remove("Static Barrier", STATIC_BARRIER), ""),
    ]);
    let all = timeline.intervals_between(ts("20:00:00.000"), ts("20:01:00.000"), &ModifierFilter::any());
    assert_eq!(all[0].stop, Some(ts("20:00:04.000")));
}

#[test]
fn charges_use_apply_correction() {
    let probe = ability("Trauma Probe", 999516199190528);
    let effect = apply("Trauma Probe", 999516199190528);
    let modify = "ModifyCharges {836045448953666}: Trauma Probe {999516199190528}";
    let timeline = feed(&[
        line("20:00:01.000", &sage(), &tank(), &probe, &effect, "(6 charges {999516199190528})"),
        line("20:00:04.000", &sage(), &tank(), &probe, modify, "(4 charges {999516199190528})"),
    ]);

    let all = timeline.intervals_between(ts("20:00:00.000"), ts("20:01:00.000"), &ModifierFilter::any());
    let m = &all[0];
    assert_eq!(m.charges_at(ts("20:00:02.000")), Some(7));
    assert_eq!(m.charges_at(ts("20:00:05.000")), Some(4));
    assert_eq!(m.charges_at(ts("20:00:00.500")), None);
}

#[test]
fn filter_by_effect_set_and_predicate() {
    let barrier = ability("Static Barrier", STATIC_BARRIER);
    let ward = ability("Saber Ward", SABER_WARD);
    let timeline = feed(&[
        line("20:00:01.000", &sage(), &tank(), &barrier, &apply("Static Barrier", STATIC_BARRIER), ""),
        line("20:00:02.000", &tank(), &tank(), &ward, &apply("Saber Ward", SABER_WARD), ""),
    ]);
    let at = ts("20:00:03.000");

    let only_ward = [SABER_WARD];
    assert_eq!(timeline.active_at(at, &ModifierFilter::any().effects(&only_ward)).len(), 1);
    assert_eq!(timeline.active_at(at, &ModifierFilter::any().source(200)).len(), 1);

    fn named_barrier(m: &Modifier) -> bool {
        &*m.name == "Static Barrier"
    }
    let found = timeline.active_at(at, &ModifierFilter::any().matching(named_barrier));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].effect_id, STATIC_BARRIER);
}

#[test]
fn mark_counted_flips_flag() {
    let mut timeline = feed(&barrier_lines());
    let id = timeline
        .intervals_between(ts("20:00:00.000"), ts("20:01:00.000"), &ModifierFilter::any())[0]
        .instance_id;
    assert!(timeline.mark_counted(STATIC_BARRIER, id));
    assert!(timeline.get(STATIC_BARRIER, id).unwrap().counted);
    assert!(!timeline.mark_counted(STATIC_BARRIER, id + 100));
}
