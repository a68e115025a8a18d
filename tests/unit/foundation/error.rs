use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DotfieldError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DotfieldError::render("x").to_string().contains("render error:"));
    assert!(DotfieldError::host("x").to_string().contains("host error:"));
    assert!(
        DotfieldError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DotfieldError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: DotfieldError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, DotfieldError::Serde(_)));
}
