use std::sync::Arc;

use crate::services::playback::engine::EngineItem;

/// Duration shown for items whose length the engine does not report.
pub const UNKNOWN_DURATION_SECS: f64 = 10.0;

/// Cover art for an item.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Artwork {
    /// Placeholder used when the engine has no artwork
    #[default]
    Blank,

    /// Artwork the engine exposes by location
    Url(String),

    /// Encoded image bytes handed over by the engine
    Image(Arc<[u8]>),
}

impl Artwork {
    /// Whether this is the blank placeholder.
    pub fn is_blank(&self) -> bool {
        matches!(self, Artwork::Blank)
    }
}

/// The song the mirror shows as currently playing.
///
/// Replaced as a whole on every item change. Every field always holds a
/// value: missing engine data becomes the documented default.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingSong {
    /// Track title, empty when unknown
    pub title: String,

    /// Album name, empty when unknown
    pub album_title: String,

    /// Track artist(s), empty when unknown
    pub artist: String,

    /// Cover art, blank when unknown
    pub artwork: Artwork,

    /// Total length in seconds, [`UNKNOWN_DURATION_SECS`] when unknown
    pub duration: f64,
}

impl NowPlayingSong {
    /// Fraction of the song covered by `position_secs`, clamped to `0.0..=1.0`.
    pub fn progress(&self, position_secs: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (position_secs / self.duration).clamp(0.0, 1.0)
    }
}

impl Default for NowPlayingSong {
    fn default() -> Self {
        Self {
            title: String::new(),
            album_title: String::new(),
            artist: String::new(),
            artwork: Artwork::Blank,
            duration: UNKNOWN_DURATION_SECS,
        }
    }
}

impl From<EngineItem> for NowPlayingSong {
    fn from(item: EngineItem) -> Self {
        Self {
            title: item.title.unwrap_or_default(),
            album_title: item.album_title.unwrap_or_default(),
            artist: item.artist.unwrap_or_default(),
            artwork: item.artwork.unwrap_or_default(),
            duration: item.duration.unwrap_or(UNKNOWN_DURATION_SECS),
        }
    }
}

impl From<Option<EngineItem>> for NowPlayingSong {
    fn from(item: Option<EngineItem>) -> Self {
        item.map(Self::from).unwrap_or_default()
    }
}
