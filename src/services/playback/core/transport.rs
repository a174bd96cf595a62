use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::mirror::NowPlayingMirror;
use crate::services::playback::{
    engine::PlaybackEngine,
    types::{EngineRepeatMode, PlaybackPosition, PlaybackState, ShuffleMode, TransportCommand},
};

/// Elapsed seconds after which "previous" restarts the current item instead.
pub const RESTART_THRESHOLD_SECS: f64 = 5.0;

/// Turns user intents into engine commands.
///
/// Every operation is fire-and-forget: engine failures are logged and
/// dropped, and the mirror catches up through the event feed.
pub struct TransportController {
    engine: Arc<dyn PlaybackEngine>,
    mirror: Arc<NowPlayingMirror>,
}

impl TransportController {
    /// Create a controller issuing commands to `engine` and echoing local
    /// state into `mirror`.
    pub fn new(engine: Arc<dyn PlaybackEngine>, mirror: Arc<NowPlayingMirror>) -> Self {
        Self { engine, mirror }
    }

    /// Pause if the last observed state is playing, play otherwise.
    ///
    /// The state may change between the read and the command; the engine's
    /// next state event settles it.
    #[instrument(skip(self))]
    pub async fn toggle_play_pause(&self) -> TransportCommand {
        let command = match self.mirror.current_state() {
            Some(PlaybackState::Playing) => TransportCommand::Pause,
            _ => TransportCommand::Play,
        };

        self.dispatch(command).await;
        command
    }

    /// Restart the current item when past [`RESTART_THRESHOLD_SECS`],
    /// otherwise go to the previous one.
    #[instrument(skip(self))]
    pub async fn skip_backward(&self) -> TransportCommand {
        let position = self.current_position().await;

        let command = if position.as_secs_f64() > RESTART_THRESHOLD_SECS {
            TransportCommand::SeekToStart
        } else {
            TransportCommand::SkipToPrevious
        };

        self.dispatch(command).await;
        command
    }

    /// Advance to the next item.
    #[instrument(skip(self))]
    pub async fn skip_forward(&self) -> TransportCommand {
        let command = TransportCommand::SkipToNext;
        self.dispatch(command).await;
        command
    }

    /// Advance the repeat mode and send it to the engine.
    ///
    /// Returns the engine-facing mode that was issued.
    #[instrument(skip(self))]
    pub async fn cycle_repeat_mode(&self) -> EngineRepeatMode {
        let next = self.mirror.repeat_mode.get().next();
        self.mirror.set_repeat_mode(next);

        let engine_mode = next.to_engine();
        self.dispatch(TransportCommand::SetRepeatMode(engine_mode)).await;
        engine_mode
    }

    /// Flip shuffle and reflect the result in the mirror right away.
    ///
    /// Returns whether shuffle is now on.
    #[instrument(skip(self))]
    pub async fn toggle_shuffle(&self) -> bool {
        let current = match self.engine.shuffle_mode().await {
            Ok(mode) => mode,
            Err(e) => {
                debug!(error = %e, "Shuffle query failed, using mirrored flag");
                ShuffleMode::from(self.mirror.shuffle.get())
            }
        };

        let next = current.toggled();
        self.dispatch(TransportCommand::SetShuffleMode(next)).await;
        self.mirror.set_shuffle(next.is_on());
        next.is_on()
    }

    async fn current_position(&self) -> PlaybackPosition {
        match self.engine.current_position().await {
            Ok(seconds) => PlaybackPosition::from_secs_f64(seconds),
            Err(e) => {
                debug!(error = %e, "Position query failed, using mirrored position");
                self.mirror.position()
            }
        }
    }

    async fn dispatch(&self, command: TransportCommand) {
        let result = match command {
            TransportCommand::Play => self.engine.play().await,
            TransportCommand::Pause => self.engine.pause().await,
            TransportCommand::SkipToNext => self.engine.skip_to_next().await,
            TransportCommand::SkipToPrevious => self.engine.skip_to_previous().await,
            TransportCommand::SeekToStart => self.engine.seek_to_start().await,
            TransportCommand::SetRepeatMode(mode) => self.engine.set_repeat_mode(mode).await,
            TransportCommand::SetShuffleMode(mode) => self.engine.set_shuffle_mode(mode).await,
        };

        match result {
            Ok(()) => debug!(?command, "Transport command dispatched"),
            Err(e) => warn!(?command, error = %e, "Engine dropped transport command"),
        }
    }
}
