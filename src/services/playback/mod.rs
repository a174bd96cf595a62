/// Album song lists and whole-album playback.
pub mod album;
/// Concrete playback engines.
pub mod backends;
/// Now-playing mirror, song model and transport controller.
pub mod core;
/// The engine boundary.
pub mod engine;
mod error;
mod monitoring;
mod session;
/// Shared value types.
pub mod types;

pub use album::{Album, AlbumDetail, AlbumRow, MediaLibrary, UNDEFINED_TITLE};
pub use backends::{
    InMemoryLibrary, MemoryEngine, MprisEngine, PlayerId, PlayerSummary, list_players,
    select_player,
};
pub use core::{
    Artwork, NowPlaying, NowPlayingMirror, NowPlayingSong, RESTART_THRESHOLD_SECS,
    TransportController, UNKNOWN_DURATION_SECS,
};
pub use engine::{EngineEvent, EngineEvents, EngineItem, PlaybackEngine};
pub use error::EngineError;
pub use monitoring::Subscription;
pub use session::{DEFAULT_POLL_INTERVAL, PlayerSession};
pub use types::{
    EngineRepeatMode, PlaybackPosition, PlaybackState, PositionTick, RepeatMode, ShuffleMode,
    TrackId, TransportCommand,
};
