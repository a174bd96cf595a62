//! Unit tests for CLI module
//!
//! Tests command registry, help output, formatting and the commands that
//! need no session bus.

use std::sync::Arc;

use crate::cli::{
    CliError, CliService, CommandRegistry,
    formatting::{format_progress, format_time},
};
use crate::config::Config;
use crate::services::playback::{NowPlayingSong, PlaybackPosition};

fn service() -> CliService {
    CliService::new(Config::default())
}

#[tokio::test]
async fn command_registry_creation() {
    let registry = CommandRegistry::new(Arc::new(Config::default()));

    assert!(registry.list_commands().is_empty());
}

#[tokio::test]
async fn command_registry_categories() {
    let mut registry = CommandRegistry::new(Arc::new(Config::default()));
    registry.register_all_commands();

    let categories = registry.list_commands();
    let names: Vec<&str> = categories.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["config", "demo", "player"]);

    let player = &categories[2].1;
    assert_eq!(
        player,
        &vec![
            "info",
            "list",
            "next",
            "play-pause",
            "previous",
            "repeat",
            "shuffle",
            "watch"
        ]
    );
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let result = service().execute_command("volume", "up", &[]).await;

    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}

#[tokio::test]
async fn unknown_command_is_not_found() {
    let result = service().execute_command("player", "seek", &[]).await;

    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}

#[tokio::test]
async fn too_many_arguments_are_rejected() {
    let args = vec!["extra".to_string()];
    let result = service().execute_command("config", "schema", &args).await;

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn help_lists_every_category() {
    let help = service().execute_command("help", "", &[]).await.unwrap();

    assert!(help.contains("player"));
    assert!(help.contains("config"));
    assert!(help.contains("demo"));
}

#[tokio::test]
async fn category_help_describes_commands() {
    let help = service().execute_command("player", "", &[]).await.unwrap();

    assert!(help.contains("play-pause"));
    assert!(help.contains("player-id"));
    assert!(help.contains("nowplaying player watch spotify"));
}

#[tokio::test]
async fn config_show_prints_sections() {
    let output = service().execute_command("config", "show", &[]).await.unwrap();
    assert!(output.contains("[player]"));

    let args = vec!["player".to_string()];
    let output = service()
        .execute_command("config", "show", &args)
        .await
        .unwrap();
    assert!(output.contains("position_poll_interval_ms = 1000"));
}

#[tokio::test]
async fn config_show_rejects_unknown_section() {
    let args = vec!["styling".to_string()];
    let result = service().execute_command("config", "show", &args).await;

    assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
}

#[tokio::test]
async fn config_schema_is_json() {
    let output = service()
        .execute_command("config", "schema", &[])
        .await
        .unwrap();

    let schema: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(schema.get("properties").is_some());
}

#[tokio::test(start_paused = true)]
async fn demo_runs_without_a_player() {
    let output = service().execute_command("demo", "run", &[]).await.unwrap();

    assert!(output.contains("Headlights"));
    assert!(output.contains("SeekToStart at 0:12"));
    assert!(output.contains("SkipToPrevious near start"));
    assert!(!output.contains("After Hours"));
}

#[tokio::test]
async fn demo_rejects_bad_poll_interval() {
    let args = vec!["fast".to_string()];
    let result = service().execute_command("demo", "run", &args).await;

    assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
}

#[test]
fn format_time_minutes_and_hours() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(59.9), "0:59");
    assert_eq!(format_time(200.0), "3:20");
    assert_eq!(format_time(3600.0), "1:00:00");
    assert_eq!(format_time(f64::NAN), "0:00");
}

#[test]
fn format_progress_fills_bar() {
    let song = NowPlayingSong {
        duration: 200.0,
        ..NowPlayingSong::default()
    };

    let half = format_progress(&song, PlaybackPosition::from_secs_f64(100.0));
    assert!(half.starts_with("[##########----------]"));
    assert!(half.ends_with("1:40 / 3:20"));

    let seeking = format_progress(&song, PlaybackPosition::from_secs_f64(-2.0));
    assert!(seeking.contains("seeking"));
}
