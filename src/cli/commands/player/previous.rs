use std::sync::Arc;

use async_trait::async_trait;

use super::utils::{describe_command, open_session, player_arg};
use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Command to restart the track if more than 5 seconds in, otherwise go to the previous track
pub struct PreviousCommand {
    config: Arc<Config>,
}

impl PreviousCommand {
    /// Creates a new PreviousCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for PreviousCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let (player_name, session) = open_session(&self.config.player, args.first()).await?;
        let command = session.transport().skip_backward().await;

        Ok(format!("{}: {player_name}", describe_command(command)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "previous".to_string(),
            description: "Restart the track if more than 5 seconds in, \
                          otherwise go to the previous track"
                .to_string(),
            category: "player".to_string(),
            args: vec![player_arg()],
            examples: vec![
                "nowplaying player previous".to_string(),
                "nowplaying player previous 1".to_string(),
            ],
        }
    }
}
