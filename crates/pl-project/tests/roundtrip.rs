use pl_project::{
    PipelineProject, ProjectError, ValidationError, from_yaml_str, load_yaml, save_yaml,
    to_yaml_string,
};

#[test]
fn roundtrip_yaml_default_project() {
    let project = PipelineProject::default();

    let path = std::env::temp_dir().join("pl_project_roundtrip_default.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let yaml = r#"
version: 1
name: single line
pipe:
  parallel: false
route:
  length_km: 50.0
"#;
    let project = from_yaml_str(yaml).unwrap();
    let defaults = PipelineProject::default();

    assert!(!project.pipe.parallel);
    assert_eq!(project.pipe.roughness_mm, defaults.pipe.roughness_mm);
    assert_eq!(project.route.length_km, 50.0);
    assert_eq!(project.route.curve_b, defaults.route.curve_b);
    assert_eq!(project.pumping, defaults.pumping);
    assert_eq!(project.sweep, defaults.sweep);
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let yaml = r#"
version: 1
name: broken
route:
  step_m: 0.0
"#;
    let err = from_yaml_str(yaml).unwrap_err();
    match err {
        ProjectError::Validation(ValidationError::InvalidValue { field, .. }) => {
            assert_eq!(field, "route.step_m");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let err = from_yaml_str("version: [not a number").unwrap_err();
    assert!(matches!(err, ProjectError::Yaml(_)));
}

#[test]
fn serialized_defaults_mention_every_section() {
    let text = to_yaml_string(&PipelineProject::default()).unwrap();
    for section in [
        "fluid:", "pipe:", "route:", "pumping:", "economics:", "friction:", "sweep:", "chart:",
    ] {
        assert!(text.contains(section), "missing {section}");
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("pl_project_definitely_missing.yaml");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(load_yaml(&path), Err(ProjectError::Io(_))));
}
