/// Observable cache of the engine's now-playing state.
pub mod mirror;
/// Now-playing song model and its defaults.
pub mod song;
/// User intent to engine command translation.
pub mod transport;

pub use mirror::{NowPlaying, NowPlayingMirror};
pub use song::{Artwork, NowPlayingSong, UNKNOWN_DURATION_SECS};
pub use transport::{RESTART_THRESHOLD_SECS, TransportController};
