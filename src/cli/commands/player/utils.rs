use std::{fmt::Display, sync::Arc};

use crate::{
    cli::{
        CliError,
        types::{ArgType, CommandArg},
    },
    config::PlayerConfig,
    services::playback::{
        MprisEngine, NowPlayingSong, PlaybackEngine, PlayerSession, RepeatMode, TransportCommand,
    },
};

/// The optional player selector every player command accepts.
pub fn player_arg() -> CommandArg {
    CommandArg {
        name: "player-id".to_string(),
        description: "Player identifier - a number (1, 2, etc.) or partial name match \
                      (e.g., 'spotify'). Uses the preferred or first player if not specified."
            .to_string(),
        required: false,
        value_type: ArgType::String,
    }
}

/// Wrap a playback error for CLI output.
pub fn service_error(e: impl Display) -> CliError {
    CliError::ServiceError {
        service: "Playback".to_string(),
        details: e.to_string(),
    }
}

/// Attach to the player selected by `identifier`.
///
/// # Errors
///
/// Returns CliError if no player matches or the session bus is unavailable
pub async fn connect(
    config: &PlayerConfig,
    identifier: Option<&String>,
) -> Result<Arc<MprisEngine>, CliError> {
    let engine = MprisEngine::connect(config, identifier.map(String::as_str))
        .await
        .map_err(|e| CliError::InvalidArgument {
            arg: "player-id".to_string(),
            reason: e.to_string(),
        })?;

    Ok(Arc::new(engine))
}

/// Attach to a player and start a mirrored session on it.
///
/// Returns the player's display name with the session.
///
/// # Errors
///
/// Returns CliError if no player matches or the session bus is unavailable
pub async fn open_session(
    config: &PlayerConfig,
    identifier: Option<&String>,
) -> Result<(String, PlayerSession), CliError> {
    let engine = connect(config, identifier).await?;
    let name = engine.identity().to_string();
    let engine: Arc<dyn PlaybackEngine> = engine;

    Ok((name, PlayerSession::start(engine, config).await))
}

/// One-line `title - artist` summary, or a placeholder when nothing is loaded.
pub fn describe_song(song: &NowPlayingSong) -> String {
    match (song.title.is_empty(), song.artist.is_empty()) {
        (true, _) => "Nothing playing".to_string(),
        (false, true) => song.title.clone(),
        (false, false) => format!("{} - {}", song.title, song.artist),
    }
}

/// The transport command that was sent, in words.
///
/// Engines acknowledge commands without reporting the outcome, so this
/// describes the request rather than its effect.
pub fn describe_command(command: TransportCommand) -> String {
    match command {
        TransportCommand::Play => "Requested play".to_string(),
        TransportCommand::Pause => "Requested pause".to_string(),
        TransportCommand::SkipToNext => "Requested next track".to_string(),
        TransportCommand::SkipToPrevious => "Requested previous track".to_string(),
        TransportCommand::SeekToStart => "Requested restart of current track".to_string(),
        TransportCommand::SetRepeatMode(mode) => {
            format!("Requested repeat mode {}", RepeatMode::from(mode))
        }
        TransportCommand::SetShuffleMode(mode) => {
            format!("Requested shuffle {}", if mode.is_on() { "on" } else { "off" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::playback::{EngineRepeatMode, ShuffleMode};

    #[test]
    fn commands_are_described_as_requests() {
        for command in [
            TransportCommand::Play,
            TransportCommand::Pause,
            TransportCommand::SkipToNext,
            TransportCommand::SkipToPrevious,
            TransportCommand::SeekToStart,
            TransportCommand::SetRepeatMode(EngineRepeatMode::All),
            TransportCommand::SetShuffleMode(ShuffleMode::Songs),
        ] {
            assert!(describe_command(command).starts_with("Requested"));
        }
    }
}
