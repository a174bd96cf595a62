//! Unit tests for config module
//!
//! Tests configuration defaults, TOML parsing and default file creation.

#![allow(clippy::panic)]

use std::{fs, time::Duration};

use tempfile::TempDir;

use crate::config::{Config, LogLevel, PlayerConfig};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.player.position_poll_interval_ms, 1000);
    assert!(config.player.preferred_player.is_none());
    assert!(config.player.ignored_players.is_empty());
}

#[test]
fn config_serialize_toml() {
    let toml_str = Config::default().to_toml_string().unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[player]"));
    assert!(toml_str.contains("position_poll_interval_ms = 1000"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [player]
        preferred_player = "spotify"
        ignored_players = ["firefox", "chromium"]
    "#;

    let config = Config::from_toml_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.player.preferred_player.as_deref(), Some("spotify"));
    assert_eq!(config.player.ignored_players, vec!["firefox", "chromium"]);
    assert_eq!(config.player.position_poll_interval_ms, 1000);
}

#[test]
fn config_empty_toml() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_invalid_log_level_is_rejected() {
    let result = Config::from_toml_str(
        r#"
        [general]
        log_level = "loud"
    "#,
    );

    assert!(result.is_err());
}

#[test]
fn poll_interval_never_zero() {
    let config = PlayerConfig {
        position_poll_interval_ms: 0,
        ..PlayerConfig::default()
    };

    assert_eq!(config.position_poll_interval(), Duration::from_millis(1));
    assert_eq!(
        PlayerConfig::default().position_poll_interval(),
        Duration::from_secs(1)
    );
}

#[test]
fn load_from_creates_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested/config.toml");

    let config = Config::load_from(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config, Config::default());
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# nowplaying configuration file"));
}

#[test]
fn load_from_reads_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[player]\nposition_poll_interval_ms = 250\n").unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(
        config.player.position_poll_interval(),
        Duration::from_millis(250)
    );
}

#[test]
fn load_from_reports_parse_location() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[player\n").unwrap();

    let error = Config::load_from(&path).unwrap_err().to_string();

    assert!(error.contains("config.toml"), "unexpected error: {error}");
}

#[test]
fn json_schema_names_sections() {
    let schema = Config::json_schema().unwrap();

    assert!(schema.contains("general"));
    assert!(schema.contains("position_poll_interval_ms"));
}
