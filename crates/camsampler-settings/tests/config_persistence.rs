// Sampler config persistence tests
// Covers JSON/TOML round trips and rejection of unknown formats.

use camsampler_settings::{ExchangeMode, ExitStatusPolicy, SamplerConfig, SettingsError};
use std::path::PathBuf;
use tempfile::TempDir;

fn custom_config() -> SamplerConfig {
    SamplerConfig {
        python_bin: "/usr/bin/python3".to_string(),
        scripts_dir: PathBuf::from("/opt/opencamlib"),
        exchange_mode: ExchangeMode::Shared,
        exit_status: ExitStatusPolicy::Ignore,
        keep_exchange_files: true,
        ..SamplerConfig::default()
    }
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sampler.json");

    let config = custom_config();
    config.save_to_file(&path).unwrap();
    let loaded = SamplerConfig::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sampler.toml");

    let config = custom_config();
    config.save_to_file(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("exchange_mode = \"shared\""));

    let loaded = SamplerConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sampler.yaml");
    std::fs::write(&path, "python_bin: python").unwrap();

    let err = SamplerConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
    assert!(SamplerConfig::default().save_to_file(&path).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = SamplerConfig::load_from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}

#[test]
fn test_invalid_loaded_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sampler.json");
    std::fs::write(&path, r#"{ "sample_script": "" }"#).unwrap();

    assert!(SamplerConfig::load_from_file(&path).is_err());
}
