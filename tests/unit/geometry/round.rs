use super::*;

#[test]
fn empty_round_has_nothing() {
    for r in [0.1, 1.0, 25.0] {
        let g = build_round(0, r, 0.0);
        assert_eq!(g.stitch_count(), 0);
        assert!(g.within_round().is_empty());
        assert!(g.cross_round().is_empty());
    }
}

#[test]
fn single_stitch_has_no_connectors() {
    let g = build_round(1, 1.0, 0.6);
    assert_eq!(g.stitch_count(), 1);
    assert!(g.within_round().is_empty());
    assert_eq!(g.anchors()[0].position, DVec3::new(1.0, 0.6, 0.0));
}

#[test]
fn ring_closes_with_one_connector_per_stitch() {
    for n in [2u32, 3, 6, 24] {
        let g = build_round(n, 1.0, 0.0);
        assert_eq!(g.within_round().len(), n as usize);
        let last = g.within_round().last().unwrap();
        assert!(last.end().distance(g.anchors()[0].position) < 1e-12);
    }
}

#[test]
fn anchors_sit_on_the_circle_at_constant_height() {
    let g = build_round(12, 2.5, 1.8);
    for (i, p) in g.positions().enumerate() {
        assert!((p.y - 1.8).abs() < 1e-12);
        assert!((p.x.hypot(p.z) - 2.5).abs() < 1e-9);
        let angle = TAU * i as f64 / 12.0;
        assert!((p.x - angle.cos() * 2.5).abs() < 1e-9);
        assert!((p.z - angle.sin() * 2.5).abs() < 1e-9);
    }
}

#[test]
fn every_anchor_carries_the_configured_stitch() {
    let opts = LayoutOpts {
        stitch_kind: StitchKind::DoubleCrochet,
        ..LayoutOpts::default()
    };
    let g = build_round_with(5, 1.0, 0.0, &opts);
    assert!(
        g.anchors()
            .iter()
            .all(|a| a.stitch.kind() == StitchKind::DoubleCrochet)
    );
}

#[test]
fn connectors_use_layout_sag_and_thickness() {
    let opts = LayoutOpts {
        round_sag: 0.0,
        yarn_thickness: 0.07,
        ..LayoutOpts::default()
    };
    let g = build_round_with(4, 1.0, 3.0, &opts);
    for y in g.within_round() {
        assert!((y.midpoint().y - 3.0).abs() < 1e-12);
        assert_eq!(y.thickness(), 0.07);
    }
}

#[test]
fn oversized_rounds_are_clamped() {
    let opts = LayoutOpts {
        max_stitches: Some(16),
        ..LayoutOpts::default()
    };
    let g = build_round_with(u32::MAX, 1.0, 0.0, &opts);
    assert_eq!(g.stitch_count(), 16);
    assert_eq!(g.within_round().len(), 16);
}

#[test]
fn wide_rounds_are_not_capped_by_default() {
    let g = build_round(20_000, 1.0, 0.0);
    assert_eq!(g.stitch_count(), 20_000);
    assert_eq!(g.within_round().len(), 20_000);
}
