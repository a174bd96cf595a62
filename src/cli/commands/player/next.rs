use std::sync::Arc;

use async_trait::async_trait;

use super::utils::{describe_command, open_session, player_arg};
use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Command to skip to the next track
pub struct NextCommand {
    config: Arc<Config>,
}

impl NextCommand {
    /// Creates a new NextCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for NextCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let (player_name, session) = open_session(&self.config.player, args.first()).await?;
        let command = session.transport().skip_forward().await;

        Ok(format!("{}: {player_name}", describe_command(command)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "next".to_string(),
            description: "Skip to the next track".to_string(),
            category: "player".to_string(),
            args: vec![player_arg()],
            examples: vec![
                "nowplaying player next".to_string(),
                "nowplaying player next 1".to_string(),
            ],
        }
    }
}
