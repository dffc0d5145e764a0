use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StitchError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StitchError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        StitchError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StitchError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: StitchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, StitchError::Serde(_)));
}
