//! On-disk layout of a bundle written through the real filesystem.

use flate2::read::GzDecoder;
use kdiag_bundle::{BundleWriter, Object, OsFs, PrintOptions, ReaderSource, Scheme};
use serde_json::json;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};

fn scheme() -> Scheme {
    Scheme::new()
        .with("core/v1.Pod", "v1", "Pod")
        .with("apps/v1.StatefulSet", "apps/v1", "StatefulSet")
}

#[test]
fn test_nested_object_path_is_exact() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, scheme());

    writer.print_object(&Object::new("v1", "Pod", "web-1"), temp.path());

    assert!(writer.errors().is_empty(), "{:?}", writer.errors());
    let path = temp.path().join("pod_web-1").join("web-1.yaml");
    let yaml = std::fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("kind: Pod"));
    assert!(yaml.contains("name: web-1"));
}

#[test]
fn test_resolved_kind_is_written_into_document() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, scheme());
    let obj = Object::untyped("apps/v1.StatefulSet", "zk")
        .with_namespace("kudo-system")
        .with_field("spec", json!({"replicas": 3}));

    writer.print_object(&obj, temp.path());

    assert!(writer.errors().is_empty(), "{:?}", writer.errors());
    let yaml =
        std::fs::read_to_string(temp.path().join("statefulset_zk").join("zk.yaml")).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(doc["apiVersion"], "apps/v1");
    assert_eq!(doc["kind"], "StatefulSet");
    assert_eq!(doc["metadata"]["namespace"], "kudo-system");
    assert_eq!(doc["spec"]["replicas"], 3);
}

#[test]
fn test_flat_object_uses_kind_only() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, Scheme::new());
    let obj = Object::from_json(br#"{"apiVersion":"v1","kind":"NodeList","items":[]}"#).unwrap();

    writer.print_runtime_object(&obj, temp.path());

    assert!(writer.errors().is_empty(), "{:?}", writer.errors());
    assert!(temp.path().join("nodelist.yaml").is_file());
}

#[test]
fn test_error_record_holds_exact_message() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, Scheme::new());
    let err = std::io::Error::other("boom");

    writer.print_error(&err, temp.path(), "web-1");

    assert!(writer.errors().is_empty());
    assert_eq!(std::fs::read(temp.path().join("web-1.err")).unwrap(), b"boom");
}

#[test]
fn test_value_dump() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, Scheme::new());
    let mut settings = BTreeMap::new();
    settings.insert("namespace", "kudo-system");
    settings.insert("version", "v0.19.0");

    writer.print_value(&settings, temp.path().join("kudo"), "settings");

    let yaml = std::fs::read_to_string(temp.path().join("kudo").join("settings.yaml")).unwrap();
    assert_eq!(yaml, "namespace: kudo-system\nversion: v0.19.0\n");
}

#[test]
fn test_log_is_gzipped_next_to_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, scheme());
    let body = "starting\n".repeat(1000);

    writer.print_object(&Object::new("v1", "Pod", "web-1"), temp.path());
    writer.print_log(
        ReaderSource::new(Cursor::new(body.clone().into_bytes())),
        temp.path(),
        "web-1",
    );

    assert!(writer.errors().is_empty(), "{:?}", writer.errors());
    let pod_dir = temp.path().join("pod_web-1");
    assert!(pod_dir.join("web-1.yaml").is_file());

    let compressed = std::fs::read(pod_dir.join("web-1.log.gz")).unwrap();
    assert!(compressed.len() < body.len());
    let mut text = String::new();
    GzDecoder::new(&compressed[..])
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, body);
}

#[test]
fn test_shared_directory_created_twice_without_error() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, Scheme::new());
    let dir = temp.path().join("kudo");

    writer.print_error("first", &dir, "a");
    writer.print_error("second", &dir, "b");
    writer.print_value(&[1, 2, 3], &dir, "c");

    assert!(writer.errors().is_empty(), "{:?}", writer.errors());
    assert!(dir.join("a.err").is_file());
    assert!(dir.join("b.err").is_file());
    assert!(dir.join("c.yaml").is_file());
}

#[test]
fn test_same_kind_and_name_overwrites() {
    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, Scheme::new());

    writer.print_object(
        &Object::new("v1", "Pod", "web-1").with_field("spec", json!({"gen": 1})),
        temp.path(),
    );
    writer.print_object(
        &Object::new("v1", "Pod", "web-1").with_field("spec", json!({"gen": 2})),
        temp.path(),
    );

    assert!(writer.errors().is_empty());
    let yaml = std::fs::read_to_string(temp.path().join("pod_web-1/web-1.yaml")).unwrap();
    assert!(yaml.contains("gen: 2"));
    assert!(!yaml.contains("gen: 1"));
}

#[cfg(unix)]
#[test]
fn test_directories_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().unwrap();
    let mut writer = BundleWriter::new(OsFs, Scheme::new());

    writer.print_object(&Object::new("v1", "Pod", "web-1"), temp.path().join("diag"));

    for dir in ["diag", "diag/pod_web-1"] {
        let mode = std::fs::metadata(temp.path().join(dir))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o700, "{}", dir);
    }
}

#[test]
fn test_small_gzip_buffer_still_roundtrips() {
    let temp = tempfile::tempdir().unwrap();
    let options = PrintOptions {
        gzip_buffer_size: 3,
        ..PrintOptions::default()
    };
    let mut writer = BundleWriter::new(OsFs, Scheme::new()).with_options(options);

    writer.print_log(
        ReaderSource::new(Cursor::new(b"abcdefghij".to_vec())),
        temp.path(),
        "tiny",
    );

    let compressed = std::fs::read(temp.path().join("pod_tiny/tiny.log.gz")).unwrap();
    let mut text = String::new();
    GzDecoder::new(&compressed[..])
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "abcdefghij");
}
