//! Tests for the build command's loading helpers.

use super::*;
use std::io::Write as _;
use tempfile::TempDir;

// ============================================================================
// Layer Loading Tests
// ============================================================================

/// Verify only the layer files present in the directory are loaded, in
/// hierarchy order.
#[test]
fn test_load_layers_skips_missing_levels() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("default.json"),
        r#"{ "publisher_name": "Default House" }"#,
    )
    .expect("write");
    fs::write(
        dir.path().join("tranche.json"),
        r#"{ "tranche_code": "WAVE-7" }"#,
    )
    .expect("write");

    let layers = load_layers(dir.path()).expect("layers load");

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].level, LayerLevel::Default);
    assert_eq!(layers[1].level, LayerLevel::Tranche);
}

/// Verify an empty directory yields an empty (but valid) stack.
#[test]
fn test_load_layers_empty_directory() {
    let dir = TempDir::new().expect("temp dir");

    let layers = load_layers(dir.path()).expect("empty stack is fine");

    assert!(layers.is_empty());
}

/// Verify a malformed layer fails the load.
#[test]
fn test_load_layers_malformed_layer_fails() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("imprint.json"),
        r#"{ "nested": { "not": "allowed" } }"#,
    )
    .expect("write");

    let result = load_layers(dir.path());

    assert!(matches!(result, Err(Error::Configuration(_))));
}

// ============================================================================
// Books Manifest Tests
// ============================================================================

/// Verify the books manifest parses into entries.
#[test]
fn test_load_books() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[
            {{
                "metadata": {{
                    "title": "The Quiet Orchard",
                    "physical": {{ "page_count": 248, "trim_width_mm": null, "trim_height_mm": null }}
                }}
            }}
        ]"#
    )
    .expect("write");

    let books = load_books(file.path()).expect("manifest parses");

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].metadata.title, "The Quiet Orchard");
}

/// Verify a malformed manifest reports the path.
#[test]
fn test_load_books_malformed() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "not json").expect("write");

    let result = load_books(file.path());

    assert!(matches!(result, Err(Error::ParseJsonFile { .. })));
}

// ============================================================================
// Schema Loading Tests
// ============================================================================

/// Verify the built-in schema is used when no template is supplied.
#[test]
fn test_load_schema_defaults_to_builtin() {
    let schema = load_schema(None).expect("builtin schema");

    assert_eq!(schema, standard_schema());
}

/// Verify the first line of a template file becomes the schema.
#[test]
fn test_load_schema_from_template_header() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "ISBN,Title,Series Name").expect("write");
    writeln!(file, "ignored,sample,row").expect("write");

    let schema = load_schema(Some(file.path())).expect("header parses");

    let columns: Vec<&str> = schema.iter().collect();
    assert_eq!(columns, vec!["ISBN", "Title", "Series Name"]);
}

// ============================================================================
// Completer Construction Tests
// ============================================================================

/// Verify completion is disabled when the config has no completion
/// section.
#[test]
fn test_build_completer_disabled_without_config() {
    let config = AppConfig::default();

    let completer = build_completer(&config);

    assert!(completer.is_ok());
}
