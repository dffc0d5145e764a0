use super::*;
use crate::geometry::stitch::StitchKind;

#[test]
fn defaults_validate() {
    PlayerConfig::default().validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = PlayerConfig::from_json_str(
        r#"{"layer_height": 1.0, "stitch_kind": "DoubleCrochet", "round_sag": 0.0}"#,
    )
    .unwrap();
    assert_eq!(cfg.layer_height, 1.0);
    assert_eq!(cfg.radius_scale, 0.25);
    assert_eq!(cfg.layout.stitch_kind, StitchKind::DoubleCrochet);
    assert_eq!(cfg.layout.round_sag, 0.0);
}

#[test]
fn rejects_bad_geometry() {
    for bad in [
        r#"{"layer_height": 0.0}"#,
        r#"{"radius_scale": -1.0}"#,
        r#"{"cross_sag": -0.1}"#,
        r#"{"max_stitches": 0}"#,
    ] {
        assert!(PlayerConfig::from_json_str(bad).is_err(), "{bad}");
    }
}

#[test]
fn radius_grows_with_sqrt_of_count() {
    let cfg = PlayerConfig::default();
    assert_eq!(cfg.radius_for(0), 0.0);
    assert!((cfg.radius_for(16) - 1.0).abs() < 1e-12);
    assert!((cfg.height_for(3) - 1.8).abs() < 1e-12);
}
