use std::sync::Arc;

use async_trait::async_trait;
use zbus::Connection;

use super::utils::service_error;
use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
    services::playback::{
        MprisEngine, NowPlayingSong, PlaybackEngine, PlaybackState, list_players,
    },
};

/// Command to list all available media players
///
/// Shows player index, name, playback state and current track
pub struct ListCommand {
    config: Arc<Config>,
}

impl ListCommand {
    /// Creates a new ListCommand
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for ListCommand {
    /// Lists all available media players with their current state
    ///
    /// # Errors
    ///
    /// Returns CliError if the session bus cannot be queried
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let connection = Connection::session().await.map_err(service_error)?;
        let players = list_players(&connection, &self.config.player.ignored_players)
            .await
            .map_err(service_error)?;

        if players.is_empty() {
            return Ok("No media players found".to_string());
        }

        let mut output = format!("Found {} media player(s):\n\n", players.len());

        for (index, player) in players.iter().enumerate() {
            let player_num = index + 1;
            let identity = &player.identity;

            let (playback_state, track_info) =
                match MprisEngine::for_player(&connection, player.id.clone()).await {
                    Ok(engine) => {
                        let state = engine.playback_state().await.ok().flatten();
                        let song = NowPlayingSong::from(engine.current_item().await.ok().flatten());
                        (state, song)
                    }
                    Err(_) => (None, NowPlayingSong::default()),
                };

            let playback_state = match playback_state {
                Some(PlaybackState::Playing) => "▶ Playing",
                Some(PlaybackState::Paused) => "⏸ Paused",
                Some(PlaybackState::Stopped) => "⏹ Stopped",
                _ => "? Unknown",
            };

            let track_info = if !track_info.title.is_empty() {
                format!(" - {} by {}", track_info.title, track_info.artist)
            } else {
                String::new()
            };

            output.push_str(&format!(
                "{player_num:2}. {identity:<30} {playback_state:>12}{track_info}\n"
            ));
        }

        output.push_str("\nUse player number or partial name with other commands.");
        Ok(output)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List all available media players".to_string(),
            category: "player".to_string(),
            args: vec![],
            examples: vec!["nowplaying player list".to_string()],
        }
    }
}
