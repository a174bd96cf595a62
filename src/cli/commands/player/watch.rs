use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use super::utils::{describe_song, open_session, player_arg};
use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_progress,
        types::CommandMetadata,
    },
    config::Config,
    services::playback::NowPlayingMirror,
};

/// Command to follow a player's now-playing state until interrupted
pub struct WatchCommand {
    config: Arc<Config>,
}

impl WatchCommand {
    /// Creates a new WatchCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn render(mirror: &NowPlayingMirror) -> String {
        let song = mirror.current();
        let state = mirror
            .current_state()
            .map(|state| state.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{:<10} {}  {}",
            state,
            describe_song(&song),
            format_progress(&song, mirror.position())
        )
    }
}

#[async_trait]
impl Command for WatchCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let (player_name, mut session) = open_session(&self.config.player, args.first()).await?;

        println!("Watching {player_name}...");
        println!("Press Ctrl+C to stop");

        let mirror = session.mirror().clone();
        let mut changes = Box::pin(mirror.watch());
        let mut last_line = String::new();

        loop {
            tokio::select! {
                change = changes.next() => {
                    if change.is_none() {
                        break;
                    }

                    let line = Self::render(&mirror);
                    if line != last_line {
                        println!("{line}");
                        last_line = line;
                    }
                }

                signal = tokio::signal::ctrl_c() => {
                    signal.map_err(CliError::IoError)?;
                    break;
                }
            }
        }

        session.teardown();
        Ok("Watch ended".to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "watch".to_string(),
            description: "Print now-playing changes of a player until interrupted".to_string(),
            category: "player".to_string(),
            args: vec![player_arg()],
            examples: vec![
                "nowplaying player watch".to_string(),
                "nowplaying player watch spotify".to_string(),
            ],
        }
    }
}
