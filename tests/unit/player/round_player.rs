use super::*;
use crate::player::snapshot::MemoryStore;

const BALL: &str = "6 sc in MR\n2 sc in each (12)\n[sc, inc] x6 (18)\n[2sc, inc] x6 (24)";

fn player() -> RoundPlayer<MemoryStore> {
    RoundPlayer::new(MemoryStore::new(), PlayerConfig::default())
}

#[test]
fn starts_idle_and_empty() {
    let mut p = player();
    assert_eq!(p.state(), PlayerState::Idle);
    assert!(p.advance(&mut ()).is_none());
    assert_eq!(p.cursor(), 0);
}

#[test]
fn ball_builds_growing_linked_rounds() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    assert_eq!(p.state(), PlayerState::Ready { next: 0 });

    let mut scene: Vec<RoundGeometry> = Vec::new();
    for _ in 0..4 {
        assert!(p.advance(&mut scene).is_some());
    }

    let counts: Vec<usize> = p.rounds().iter().map(RoundGeometry::stitch_count).collect();
    assert_eq!(counts, vec![6, 12, 18, 24]);
    assert!(p.rounds()[0].cross_round().is_empty());
    for (i, r) in p.rounds().iter().enumerate().skip(1) {
        assert_eq!(r.cross_round().len(), counts[i]);
    }
    assert_eq!(scene.as_slice(), p.rounds());
}

#[test]
fn draining_makes_advance_a_no_op() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    assert_eq!(p.advance_all(&mut ()), 4);
    assert_eq!(p.state(), PlayerState::Idle);

    let autosaved = p.store().get(AUTOSAVE_KEY).map(str::to_owned);
    assert!(p.advance(&mut ()).is_none());
    assert_eq!(p.cursor(), 4);
    assert_eq!(p.store().get(AUTOSAVE_KEY).map(str::to_owned), autosaved);
}

#[test]
fn rounds_are_placed_by_cursor_and_stitch_count() {
    let mut p = player();
    p.load_pattern("16 sc in MR\nsc around", Terminology::Us);
    p.advance_all(&mut ());
    let second = &p.rounds()[1];
    for pos in second.positions() {
        assert!((pos.y - 0.6).abs() < 1e-12);
        assert!((pos.x.hypot(pos.z) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn wider_round_fans_into_previous_stitches() {
    let mut p = player();
    p.load_pattern("6 sc in MR\n2 sc in each (12)", Terminology::Us);
    p.advance_all(&mut ());
    let (first, second) = (&p.rounds()[0], &p.rounds()[1]);
    for (i, link) in second.cross_round().iter().enumerate() {
        assert_eq!(link.start(), first.anchors()[i % 6].position);
        assert_eq!(link.end(), second.anchors()[i].position);
    }
}

#[test]
fn empty_previous_round_is_not_linked() {
    let mut p = player();
    p.load_pattern("0 sc in MR\n(6)\n(1)\n(0)\n(3)", Terminology::Us);
    p.advance_all(&mut ());
    let rounds = p.rounds();
    assert_eq!(rounds[0].stitch_count(), 0);
    assert!(rounds[1].cross_round().is_empty());
    assert_eq!(rounds[2].cross_round().len(), 1);
    assert!(rounds[3].cross_round().is_empty());
    assert!(rounds[4].cross_round().is_empty());
}

#[test]
fn load_pattern_always_resets_progress() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    p.advance(&mut ());
    p.advance(&mut ());
    let old = Arc::clone(p.pattern());

    p.load_pattern(BALL, Terminology::Us);
    assert_eq!(p.cursor(), 0);
    assert!(p.rounds().is_empty());
    assert_eq!(old.len(), 4);
    assert!(!Arc::ptr_eq(&old, p.pattern()));
}

#[test]
fn uk_terms_are_normalized_before_parsing() {
    let mut p = player();
    p.load_pattern("6 dc in MR\n[dc, increase] x6", Terminology::Uk);
    let texts: Vec<&str> = p.pattern().iter().map(|r| r.source_text.as_str()).collect();
    assert_eq!(texts, vec!["6 sc in MR", "[sc, inc] x6"]);
    assert_eq!(p.pattern().stitch_counts(), vec![6, 18]);
}

#[test]
fn reset_keeps_pattern() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    p.advance_all(&mut ());
    p.reset();
    assert_eq!(p.cursor(), 0);
    assert_eq!(p.pattern().len(), 4);
    assert_eq!(p.state(), PlayerState::Ready { next: 0 });
}

#[test]
fn save_then_restore_roundtrips_pattern_but_not_progress() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    p.advance(&mut ());
    p.save().unwrap();

    let mut q = RoundPlayer::new(p.into_store(), PlayerConfig::default());
    assert!(q.restore());
    assert_eq!(q.pattern().stitch_counts(), vec![6, 12, 18, 24]);
    assert_eq!(q.cursor(), 0);
}

#[test]
fn restore_falls_back_to_default_ball() {
    let mut store = MemoryStore::new();
    store.write(MANUAL_KEY, "garbage").unwrap();
    let mut p = RoundPlayer::new(store, PlayerConfig::default());
    assert!(!p.restore());
    assert_eq!(p.pattern().stitch_counts(), vec![6, 12, 18, 24, 30]);
}

#[test]
fn autosave_tracks_every_load_and_advance() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    let snap = Snapshot::from_json(p.store().get(AUTOSAVE_KEY).unwrap()).unwrap();
    assert_eq!(snap.cursor, Some(0));
    assert_eq!(snap.pattern.len(), 4);

    p.advance(&mut ());
    let snap = Snapshot::from_json(p.store().get(AUTOSAVE_KEY).unwrap()).unwrap();
    assert_eq!(snap.cursor, Some(1));
    assert!(p.store().get(MANUAL_KEY).is_none());
}

#[test]
fn recover_rebuilds_autosaved_progress() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    p.advance(&mut ());
    p.advance(&mut ());
    p.advance(&mut ());
    let built = p.rounds().to_vec();

    let mut q = RoundPlayer::new(p.into_store(), PlayerConfig::default());
    let mut scene: Vec<RoundGeometry> = Vec::new();
    assert!(q.recover(&mut scene));
    assert_eq!(q.cursor(), 3);
    assert_eq!(q.rounds(), built.as_slice());
    assert_eq!(scene.len(), 3);
    assert_eq!(q.state(), PlayerState::Ready { next: 3 });
}

#[test]
fn recover_without_autosave_changes_nothing() {
    let mut p = player();
    assert!(!p.recover(&mut ()));
    assert!(p.pattern().is_empty());
}

#[test]
fn link_to_previous_uses_given_sag() {
    let below = crate::geometry::round::build_round(3, 1.0, 0.0);
    let above = crate::geometry::round::build_round(3, 1.0, 0.6);
    let links = link_to_previous(&below, &above, 0.0, 0.03);
    assert_eq!(links.len(), 3);
    assert!((links[0].midpoint().y - 0.3).abs() < 1e-12);
}

#[test]
fn reset_is_autosaved() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    p.advance_all(&mut ());
    p.reset();

    let mut q = RoundPlayer::new(p.into_store(), PlayerConfig::default());
    assert!(q.recover(&mut ()));
    assert_eq!(q.cursor(), 0);
    assert_eq!(q.pattern().len(), 4);
}

#[test]
fn restore_is_autosaved() {
    let mut p = player();
    p.load_pattern("6 sc in MR\n2 sc in each (12)", Terminology::Us);
    p.save().unwrap();
    p.load_pattern(BALL, Terminology::Us);
    p.advance(&mut ());

    assert!(p.restore());
    assert_eq!(p.pattern().len(), 2);

    let mut q = RoundPlayer::new(p.into_store(), PlayerConfig::default());
    assert!(q.recover(&mut ()));
    assert_eq!(q.pattern().stitch_counts(), vec![6, 12]);
    assert_eq!(q.cursor(), 0);
}

#[test]
fn restore_fallback_is_autosaved() {
    let mut p = player();
    p.load_pattern(BALL, Terminology::Us);
    p.advance(&mut ());
    assert!(!p.restore());

    let snap = Snapshot::from_json(p.store().get(AUTOSAVE_KEY).unwrap()).unwrap();
    assert_eq!(snap.pattern.len(), 5);
    assert_eq!(snap.cursor, Some(0));
}
