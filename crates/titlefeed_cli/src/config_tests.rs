//! Tests for CLI configuration loading.

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Verify a completion section parses with an explicit timeout.
#[test]
fn test_parse_completion_section() {
    let toml_text = r#"
        [completion]
        endpoint = "https://api.example.com/v1/chat/completions"
        model = "gpt-4o-mini"
        api_key_env = "TITLEFEED_COMPLETION_KEY"
        timeout_secs = 10
    "#;

    let config: AppConfig = toml::from_str(toml_text).expect("config parses");

    let completion = config.completion.expect("completion section present");
    assert_eq!(completion.model, "gpt-4o-mini");
    assert_eq!(completion.timeout(), Duration::from_secs(10));
}

/// Verify the timeout defaults to 30 seconds.
#[test]
fn test_timeout_defaults_to_thirty_seconds() {
    let toml_text = r#"
        [completion]
        endpoint = "https://api.example.com/v1/chat/completions"
        model = "gpt-4o-mini"
    "#;

    let config: AppConfig = toml::from_str(toml_text).expect("config parses");

    assert_eq!(
        config.completion.expect("present").timeout(),
        Duration::from_secs(30)
    );
}

/// Verify an empty document disables completion.
#[test]
fn test_empty_config_disables_completion() {
    let config: AppConfig = toml::from_str("").expect("empty config parses");

    assert!(config.completion.is_none());
}

/// Verify loading from a file on disk.
#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "[completion]").expect("write");
    writeln!(file, "endpoint = \"https://api.example.com/v1\"").expect("write");
    writeln!(file, "model = \"test-model\"").expect("write");

    let config = AppConfig::load_from_file(file.path()).expect("file loads");

    assert!(config.completion.is_some());
}

/// Verify load_or_default falls back to a disabled configuration when
/// no explicit path is given and no default file exists.
#[test]
fn test_load_or_default_without_file() {
    let config = AppConfig::load_or_default(None).expect("defaults load");

    assert!(config.completion.is_none());
}
