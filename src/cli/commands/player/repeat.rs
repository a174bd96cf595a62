use std::sync::Arc;

use async_trait::async_trait;

use super::utils::{describe_command, open_session, player_arg};
use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
    services::playback::TransportCommand,
};

/// Command to cycle the repeat mode: off, album, one song, off
pub struct RepeatCommand {
    config: Arc<Config>,
}

impl RepeatCommand {
    /// Creates a new RepeatCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for RepeatCommand {
    /// Advance the player's repeat mode by one step
    ///
    /// The starting point is the mode the player reports when the session
    /// is opened.
    async fn execute(&self, args: &[String]) -> CommandResult {
        let (player_name, session) = open_session(&self.config.player, args.first()).await?;
        let issued = session.transport().cycle_repeat_mode().await;
        let command = TransportCommand::SetRepeatMode(issued);

        Ok(format!("{}: {player_name}", describe_command(command)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "repeat".to_string(),
            description: "Cycle the repeat mode (off, album, one song)".to_string(),
            category: "player".to_string(),
            args: vec![player_arg()],
            examples: vec![
                "nowplaying player repeat".to_string(),
                "nowplaying player repeat vlc".to_string(),
            ],
        }
    }
}
