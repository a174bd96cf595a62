use async_trait::async_trait;
use futures::stream::BoxStream;

use super::{
    EngineError,
    core::Artwork,
    types::{EngineRepeatMode, PlaybackState, ShuffleMode, TrackId},
};

/// Raw description of an item as the engine reports it.
///
/// Every field is optional; the mirror decides what missing data looks like.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineItem {
    /// Engine-side identity of the item
    pub id: Option<TrackId>,

    /// Track title
    pub title: Option<String>,

    /// Album name
    pub album_title: Option<String>,

    /// Track artist(s)
    pub artist: Option<String>,

    /// Cover art
    pub artwork: Option<Artwork>,

    /// Length in seconds
    pub duration: Option<f64>,
}

/// Notifications pushed by the engine.
///
/// Delivery is at most once; nothing is redelivered.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Transport state changed; `None` when the engine could not say
    PlaybackStateChanged(Option<PlaybackState>),

    /// A different item is loaded; `None` when the queue ran out
    NowPlayingItemChanged(Option<EngineItem>),
}

/// Stream of engine notifications returned by [`PlaybackEngine::subscribe`].
///
/// Dropping the stream unsubscribes.
pub type EngineEvents = BoxStream<'static, EngineEvent>;

/// The external service that owns audio output, transport state and the queue.
///
/// Implementations must be internally synchronized; one handle is shared by
/// the mirror, its monitors and the transport controller.
#[async_trait]
pub trait PlaybackEngine: Send + Sync {
    /// Start or resume playback.
    async fn play(&self) -> Result<(), EngineError>;

    /// Pause playback.
    async fn pause(&self) -> Result<(), EngineError>;

    /// Advance to the next item.
    async fn skip_to_next(&self) -> Result<(), EngineError>;

    /// Go back to the previous item.
    async fn skip_to_previous(&self) -> Result<(), EngineError>;

    /// Restart the current item.
    async fn seek_to_start(&self) -> Result<(), EngineError>;

    /// Change the repeat mode.
    async fn set_repeat_mode(&self, mode: EngineRepeatMode) -> Result<(), EngineError>;

    /// Change the shuffle mode.
    async fn set_shuffle_mode(&self, mode: ShuffleMode) -> Result<(), EngineError>;

    /// Replace the queue with `items` and start playing the first one.
    ///
    /// # Errors
    ///
    /// Engines without queue control return `EngineError::OperationNotSupported`.
    async fn play_queue(&self, _items: Vec<EngineItem>) -> Result<(), EngineError> {
        Err(EngineError::OperationNotSupported(
            "replacing the play queue".to_string(),
        ))
    }

    /// The item currently loaded, if any.
    async fn current_item(&self) -> Result<Option<EngineItem>, EngineError>;

    /// The current transport state, if the engine can tell.
    async fn playback_state(&self) -> Result<Option<PlaybackState>, EngineError>;

    /// Signed playback position of the current item in seconds.
    async fn current_position(&self) -> Result<f64, EngineError>;

    /// The current shuffle mode.
    async fn shuffle_mode(&self) -> Result<ShuffleMode, EngineError>;

    /// The current repeat mode.
    async fn repeat_mode(&self) -> Result<EngineRepeatMode, EngineError>;

    /// Register for state and item change notifications.
    async fn subscribe(&self) -> Result<EngineEvents, EngineError>;
}
