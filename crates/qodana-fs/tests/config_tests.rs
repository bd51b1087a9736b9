use pretty_assertions::assert_eq;
use qodana_fs::{ConfigStore, Error, NormalizedPath};
use rstest::rstest;
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct Identity {
    ide: String,
    linter: String,
}

#[test]
fn test_load_yaml_ignores_unknown_fields() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("qodana.yaml");
    fs::write(&file, "version: \"1.0\"\nide: QDJVM\nexclude:\n  - name: All\n").unwrap();

    let identity: Identity = ConfigStore::new().load(&NormalizedPath::new(&file)).unwrap();
    assert_eq!(
        identity,
        Identity {
            ide: "QDJVM".into(),
            linter: String::new(),
        }
    );
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("qodana-config.json");
    fs::write(&file, r#"{"linter": "jetbrains/qodana-jvm"}"#).unwrap();

    let identity: Identity = ConfigStore::new().load(&NormalizedPath::new(&file)).unwrap();
    assert_eq!(identity.linter, "jetbrains/qodana-jvm");
}

#[rstest]
#[case("")]
#[case("   \n")]
#[case("# only a comment\n")]
#[case("---\n")]
fn test_load_or_default_blank_documents(#[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("qodana.yaml");
    fs::write(&file, content).unwrap();

    let identity: Identity = ConfigStore::new()
        .load_or_default(&NormalizedPath::new(&file))
        .unwrap();
    assert_eq!(identity, Identity::default());
}

#[test]
fn test_load_or_default_missing_file() {
    let temp = TempDir::new().unwrap();
    let file = NormalizedPath::new(temp.path().join("absent.yaml"));

    let identity: Identity = ConfigStore::new().load_or_default(&file).unwrap();
    assert_eq!(identity, Identity::default());
}

#[test]
fn test_load_malformed_yaml_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("qodana.yaml");
    fs::write(&file, "ide: [unterminated\n").unwrap();

    let err = ConfigStore::new()
        .load::<Identity>(&NormalizedPath::new(&file))
        .unwrap_err();
    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "YAML"));
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("qodana.ini");
    fs::write(&file, "ide=QDJVM").unwrap();

    let err = ConfigStore::new()
        .load::<Identity>(&NormalizedPath::new(&file))
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
}
