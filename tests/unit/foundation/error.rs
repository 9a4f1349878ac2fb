use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TimingError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TimingError::ingest("x").to_string().contains("ingest error:"));
    assert!(
        TimingError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        TimingError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        TimingError::transport("x")
            .to_string()
            .contains("transport error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TimingError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: TimingError = serde_json::from_str::<u64>("nope").unwrap_err().into();
    assert!(matches!(err, TimingError::Serde(_)));
}
