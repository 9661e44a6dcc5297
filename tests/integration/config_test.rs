use std::fs;

use jnx_enrich::core::config::DEFAULT_POLLING_FREQUENCY;
use jnx_enrich::{EnrichError, PluginConfig};
use tempfile::TempDir;

#[test]
fn test_load_plugin_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plugin.json");
    fs::write(
        &path,
        r#"{"main": {"polling_frequency": 900}, "metrics_group": {"include_disk_metrics_group": 1}}"#,
    )
    .unwrap();

    let config = PluginConfig::load(&path).unwrap();
    assert_eq!(config.polling_frequency(), 900);
    assert!(config.include_disk_metrics_group());
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plugin.json");
    fs::write(&path, "\n").unwrap();

    let config = PluginConfig::load(&path).unwrap();
    assert_eq!(config.polling_frequency(), DEFAULT_POLLING_FREQUENCY);
    assert!(!config.include_disk_metrics_group());
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("plugin.json");
    fs::write(&path, "{ main: 60 ").unwrap();

    let err = PluginConfig::load(&path).unwrap_err();
    assert!(matches!(err, EnrichError::Config(_)));
    assert!(err.to_string().contains("plugin.json"));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = PluginConfig::load(&temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, EnrichError::Io(_)));
}

#[test]
fn test_setters_override_loaded_values() {
    let mut config = PluginConfig::default();
    config.set_polling_frequency(300);
    config.set_include_disk_metrics_group(true);

    assert_eq!(config, PluginConfig::new(300, true));
}
