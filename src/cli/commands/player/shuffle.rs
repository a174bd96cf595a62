use std::sync::Arc;

use async_trait::async_trait;

use super::utils::{describe_command, open_session, player_arg};
use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
    services::playback::{ShuffleMode, TransportCommand},
};

/// Command to toggle shuffle mode
pub struct ShuffleCommand {
    config: Arc<Config>,
}

impl ShuffleCommand {
    /// Creates a new ShuffleCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for ShuffleCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let (player_name, session) = open_session(&self.config.player, args.first()).await?;
        let enabled = session.transport().toggle_shuffle().await;
        let command = TransportCommand::SetShuffleMode(ShuffleMode::from(enabled));

        Ok(format!("{}: {player_name}", describe_command(command)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "shuffle".to_string(),
            description: "Toggle shuffle mode for a media player".to_string(),
            category: "player".to_string(),
            args: vec![player_arg()],
            examples: vec![
                "nowplaying player shuffle".to_string(),
                "nowplaying player shuffle 1".to_string(),
                "nowplaying player shuffle spotify".to_string(),
            ],
        }
    }
}
