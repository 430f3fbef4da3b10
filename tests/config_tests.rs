use photo_gallery::config::Configuration;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn empty_document_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.image_root, PathBuf::from("images"));
    let ids: Vec<_> = cfg.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["losing-it", "explore", "stars", "more-stars", "blue"]);
    let prefixes: Vec<_> = cfg.sections.iter().map(|s| s.prefix.as_str()).collect();
    assert_eq!(prefixes, ["A", "B", "C", "D", "E"]);
    assert_eq!(cfg.extensions, ["jpg", "jpeg", "png", "gif", "webp"]);
    assert_eq!(cfg.max_index, 100);
    assert_eq!(cfg.miss_cutoff, 5);
    assert_eq!(cfg.initial_section, None);
    assert_eq!(cfg.star_mode.resize_debounce, Duration::from_millis(250));
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
image-root: "/srv/photos"
sections:
  - id: trip
    prefix: T
    display-name: Road trip
  - id: cats
    prefix: K
    display-name: cats
extensions: [PNG, jpg]
max-index: 20
miss-cutoff: 2
initial-section: cats
star-mode:
  margin: 40
  max-delay: 1s
  min-duration: 500ms
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.image_root, PathBuf::from("/srv/photos"));
    assert_eq!(cfg.sections[0].display_name, "Road trip");
    assert_eq!(cfg.initial_section.as_deref(), Some("cats"));
    assert!((cfg.star_mode.margin - 40.0).abs() < f32::EPSILON);
    assert!((cfg.star_mode.reserved - 200.0).abs() < f32::EPSILON);
    assert_eq!(cfg.star_mode.max_delay, Duration::from_secs(1));
    assert_eq!(cfg.star_mode.min_duration, Duration::from_millis(500));

    let opts = cfg.scan_options();
    assert_eq!(opts.extensions, ["png", "jpg"]);
    assert_eq!(opts.max_index, 20);
    assert_eq!(opts.miss_cutoff, 2);
}

#[test]
fn unknown_keys_are_rejected() {
    let yaml = r#"
image-root: images
photo-library-path: /photos
"#;
    assert!(serde_yaml::from_str::<Configuration>(yaml).is_err());

    let yaml = r#"
sections:
  - id: a
    prefix: A
    display-name: a
    colour: red
"#;
    assert!(serde_yaml::from_str::<Configuration>(yaml).is_err());
}

#[test]
fn duplicate_section_ids_fail_validation() {
    let yaml = r#"
sections:
  - { id: a, prefix: A, display-name: one }
  - { id: a, prefix: B, display-name: two }
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    let err = cfg.validated().unwrap_err();
    assert!(format!("{err:#}").contains("duplicate section id a"));
}

#[test]
fn invalid_values_fail_validation() {
    for yaml in [
        "sections: []",
        "sections: [{ id: a, prefix: '', display-name: a }]",
        "initial-section: nowhere",
        "extensions: []",
        "extensions: ['.jpg']",
        "max-index: 0",
        "miss-cutoff: 0",
        "star-mode: { margin: -1 }",
        "star-mode: { min-duration: 0s }",
    ] {
        let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.validated().is_err(), "expected {yaml:?} to be rejected");
    }
}

#[test]
fn from_yaml_file_reads_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gallery.yaml");
    std::fs::write(&path, "max-index: 12\n").unwrap();
    let cfg = Configuration::from_yaml_file(&path).unwrap();
    assert_eq!(cfg.max_index, 12);
    assert!(Configuration::from_yaml_file(dir.path().join("missing.yaml")).is_err());
}
