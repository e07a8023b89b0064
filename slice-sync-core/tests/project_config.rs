use std::fs::write;

use slice_sync_core::adapter::{resolve_layout, AdapterSpec, Project, ProjectManifest};
use slice_sync_core::error::SyncError;
use tempfile::tempdir;

#[test]
fn reads_string_adapter_and_libraries() {
    let dir = tempdir().unwrap();
    write(
        dir.path().join("slicemachine.config.json"),
        r#"{
            "repositoryName": "demo",
            "adapter": "@slicemachine/adapter-next",
            "libraries": ["./slices", "./src/other-slices"]
        }"#,
    )
    .unwrap();

    let project = Project::open(dir.path()).expect("project should open");

    assert_eq!(project.manifest.repository_name.as_deref(), Some("demo"));
    assert_eq!(project.manifest.adapter.name(), "@slicemachine/adapter-next");
    assert_eq!(
        project.manifest.libraries,
        vec!["./slices".to_string(), "./src/other-slices".to_string()]
    );
}

#[test]
fn reads_object_adapter_and_defaults_libraries() {
    let dir = tempdir().unwrap();
    write(
        dir.path().join("slicemachine.config.json"),
        r#"{ "adapter": { "resolve": "@slicemachine/adapter-sveltekit", "options": { "typescript": true } } }"#,
    )
    .unwrap();

    let project = Project::open(dir.path()).unwrap();

    assert!(matches!(project.manifest.adapter, AdapterSpec::Resolve { .. }));
    assert_eq!(
        project.manifest.adapter.name(),
        "@slicemachine/adapter-sveltekit"
    );
    assert_eq!(project.manifest.libraries, vec!["./slices".to_string()]);

    let layout = resolve_layout(&project.root, &project.manifest).unwrap();
    assert_eq!(layout.slice_libraries, vec![dir.path().join("./slices")]);
}

#[test]
fn missing_config_file_is_reported_with_path() {
    let dir = tempdir().unwrap();
    let err = Project::open(dir.path()).unwrap_err();
    match err {
        SyncError::ProjectConfig { path, .. } => {
            assert!(path.ends_with("slicemachine.config.json"))
        }
        other => panic!("expected ProjectConfig error, got {other:?}"),
    }
}

#[test]
fn invalid_config_json_is_a_parse_error() {
    let dir = tempdir().unwrap();
    write(dir.path().join("slicemachine.config.json"), "{ adapter: ").unwrap();
    assert!(matches!(
        Project::open(dir.path()).unwrap_err(),
        SyncError::ProjectConfigParse { .. }
    ));
}

#[test]
fn unsupported_adapter_is_rejected_after_parsing() {
    let manifest: ProjectManifest =
        serde_json::from_str(r#"{ "adapter": "@slicemachine/adapter-react" }"#).unwrap();
    let err = resolve_layout(std::path::Path::new("."), &manifest).unwrap_err();
    assert_eq!(err.to_string(), "unsupported adapter: @slicemachine/adapter-react");
}
