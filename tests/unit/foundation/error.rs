use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MorphError::input("x")
            .to_string()
            .contains("input error:")
    );
    assert!(
        MorphError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        MorphError::index("x")
            .to_string()
            .contains("index error:")
    );
    assert!(
        MorphError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn kinds_follow_taxonomy() {
    assert_eq!(
        MorphError::InsufficientPoints { found: 2 }.kind(),
        ErrorKind::Input
    );
    assert_eq!(
        MorphError::LandmarkCountMismatch {
            source_len: 3,
            dest_len: 4
        }
        .kind(),
        ErrorKind::Input
    );
    assert_eq!(
        MorphError::InvalidFrameCount { frames: 1 }.kind(),
        ErrorKind::Input
    );
    assert_eq!(MorphError::DegenerateInput.kind(), ErrorKind::Geometry);
    assert_eq!(
        MorphError::IndexOutOfRange { index: 9, len: 4 }.kind(),
        ErrorKind::Index
    );
    assert_eq!(
        MorphError::no_landmarks("x").kind(),
        ErrorKind::Collaborator
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MorphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.kind(), ErrorKind::Collaborator);
}
