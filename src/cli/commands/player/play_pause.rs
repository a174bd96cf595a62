use std::sync::Arc;

use async_trait::async_trait;

use super::utils::{describe_command, open_session, player_arg};
use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Command to toggle play/pause state of a media player
pub struct PlayPauseCommand {
    config: Arc<Config>,
}

impl PlayPauseCommand {
    /// Creates a new PlayPauseCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for PlayPauseCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let (player_name, session) = open_session(&self.config.player, args.first()).await?;
        let command = session.transport().toggle_play_pause().await;

        Ok(format!("{}: {player_name}", describe_command(command)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "play-pause".to_string(),
            description: "Toggle play/pause state of a media player".to_string(),
            category: "player".to_string(),
            args: vec![player_arg()],
            examples: vec![
                "nowplaying player play-pause".to_string(),
                "nowplaying player play-pause 1".to_string(),
            ],
        }
    }
}
