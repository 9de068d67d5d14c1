use super::*;

fn parse(json: &str) -> MorphResult<MorphConfig> {
    MorphConfig::from_reader(json.as_bytes())
}

const MINIMAL: &str = r#"{
    "source": { "image": "a.png", "landmarks": "a.json" },
    "dest": { "image": "b.png", "landmarks": "b.json" }
}"#;

#[test]
fn defaults_follow_five_seconds_at_25_fps() {
    let cfg = parse(MINIMAL).unwrap();
    assert_eq!(cfg.fps, 25);
    assert!(cfg.anchors);
    assert_eq!(cfg.frame_count(), 125);
    assert_eq!(cfg.threading, RenderThreading::default());
    cfg.validate().unwrap();
}

#[test]
fn duration_is_truncated_to_whole_frames() {
    let cfg = parse(
        r#"{
        "source": { "image": "a.png", "landmarks": "a.json" },
        "dest": { "image": "b.png", "landmarks": "b.json" },
        "fps": 24, "duration_secs": 0.55
    }"#,
    )
    .unwrap();
    assert_eq!(cfg.frame_count(), 13);
}

#[test]
fn explicit_frames_and_threading_are_read() {
    let cfg = parse(
        r#"{
        "source": { "image": "a.png", "landmarks": "a.json" },
        "dest": { "image": "b.png", "landmarks": "b.json" },
        "frames": 9, "anchors": false,
        "threading": { "parallel": true, "threads": 3 }
    }"#,
    )
    .unwrap();
    assert_eq!(cfg.frame_count(), 9);
    assert!(!cfg.anchors);
    assert!(cfg.threading.parallel);
    assert_eq!(cfg.threading.threads, Some(3));
    assert_eq!(cfg.threading.chunk_size, RenderThreading::default().chunk_size);
}

#[test]
fn invalid_timing_is_rejected() {
    let both = parse(
        r#"{
        "source": { "image": "a.png", "landmarks": "a.json" },
        "dest": { "image": "b.png", "landmarks": "b.json" },
        "frames": 10, "duration_secs": 2
    }"#,
    )
    .unwrap();
    assert!(matches!(both.validate(), Err(MorphError::Input(_))));

    let one = parse(
        r#"{
        "source": { "image": "a.png", "landmarks": "a.json" },
        "dest": { "image": "b.png", "landmarks": "b.json" },
        "frames": 1
    }"#,
    )
    .unwrap();
    assert!(matches!(
        one.validate(),
        Err(MorphError::InvalidFrameCount { frames: 1 })
    ));
}

#[test]
fn unknown_fields_are_parse_errors() {
    let err = parse(
        r#"{
        "source": { "image": "a.png", "landmarks": "a.json" },
        "dest": { "image": "b.png", "landmarks": "b.json" },
        "fsp": 30
    }"#,
    )
    .unwrap_err();
    assert!(matches!(err, MorphError::Input(_)));
}

#[test]
fn paths_resolve_against_job_file_directory() {
    let dir = Path::new("target/unit_config/resolve");
    std::fs::create_dir_all(dir).unwrap();
    let job = dir.join("job.json");
    std::fs::write(&job, MINIMAL.replace("}\n}", "},\n\"output\": \"out/m.mp4\"\n}")).unwrap();

    let cfg = MorphConfig::from_path(&job).unwrap();
    assert_eq!(cfg.resolve(Path::new("a.png")), dir.join("a.png"));
    assert_eq!(cfg.output_path(), Some(dir.join("out/m.mp4")));
    let abs = std::env::temp_dir().join("x.png");
    assert_eq!(cfg.resolve(&abs), abs);
}

#[test]
fn load_job_reads_images_and_landmarks() {
    let dir = Path::new("target/unit_config/load");
    std::fs::create_dir_all(dir).unwrap();
    RgbaImage::from_pixel(20, 16, image::Rgba([200, 10, 10, 255]))
        .save(dir.join("a.png"))
        .unwrap();
    RgbaImage::from_pixel(20, 16, image::Rgba([10, 10, 200, 255]))
        .save(dir.join("b.png"))
        .unwrap();
    std::fs::write(dir.join("a.json"), "[[6, 5], [14, 6], [10, 11]]").unwrap();
    std::fs::write(dir.join("b.json"), r#"{"points": [[7, 4], [13, 5], [9, 12]]}"#).unwrap();
    std::fs::write(
        dir.join("job.json"),
        r#"{
        "source": { "image": "a.png", "landmarks": "a.json" },
        "dest": { "image": "b.png", "landmarks": "b.json" },
        "frames": 3
    }"#,
    )
    .unwrap();

    let job = MorphConfig::from_path(dir.join("job.json"))
        .unwrap()
        .load_job()
        .unwrap();
    assert_eq!(job.frame_count(), 3);
    assert_eq!(job.source_landmarks().len(), 3 + 9);
    assert_eq!(job.canvas().width, 20);
}

#[test]
fn missing_image_is_a_collaborator_error() {
    let cfg = parse(MINIMAL).unwrap();
    let err = cfg.load_job().unwrap_err();
    assert_eq!(err.kind(), crate::foundation::error::ErrorKind::Collaborator);
}
