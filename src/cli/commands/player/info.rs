use std::sync::Arc;

use async_trait::async_trait;

use super::utils::{open_session, player_arg};
use crate::{
    cli::{
        Command, CommandResult,
        formatting::{format_header, format_progress},
        types::CommandMetadata,
    },
    config::Config,
};

/// Command to show what a player is doing right now
pub struct InfoCommand {
    config: Arc<Config>,
}

impl InfoCommand {
    /// Creates a new InfoCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for InfoCommand {
    /// Print the mirrored now-playing state of a player
    ///
    /// # Errors
    ///
    /// Returns CliError if no player matches
    async fn execute(&self, args: &[String]) -> CommandResult {
        let (player_name, session) = open_session(&self.config.player, args.first()).await?;
        let mirror = session.mirror();
        let song = mirror.current();

        let field = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        let state = mirror
            .current_state()
            .map(|state| state.to_string())
            .unwrap_or_else(|| "-".to_string());
        let artwork = if song.artwork.is_blank() { "none" } else { "available" };

        Ok(format!(
            "{}\n\n  Title:    {}\n  Artist:   {}\n  Album:    {}\n  State:    {}\n  Progress: {}\n  Repeat:   {}\n  Shuffle:  {}\n  Artwork:  {}",
            format_header(&player_name),
            field(&song.title),
            field(&song.artist),
            field(&song.album_title),
            state,
            format_progress(&song, mirror.position()),
            mirror.repeat_mode.get(),
            if mirror.shuffle.get() { "on" } else { "off" },
            artwork,
        ))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "info".to_string(),
            description: "Show the current track and transport state of a player".to_string(),
            category: "player".to_string(),
            args: vec![player_arg()],
            examples: vec![
                "nowplaying player info".to_string(),
                "nowplaying player info spotify".to_string(),
            ],
        }
    }
}
