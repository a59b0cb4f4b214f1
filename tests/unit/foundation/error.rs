use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VitrineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VitrineError::structure("x")
            .to_string()
            .contains("structure error:")
    );
    assert!(
        VitrineError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        VitrineError::preload("x")
            .to_string()
            .contains("preload error:")
    );
    assert!(
        VitrineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VitrineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
