use std::fmt;
use std::time::Duration;

/// Identity of the track an engine has loaded.
///
/// Opaque to the mirror; only compared for equality when deciding whether a
/// position sample still belongs to the current item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    /// Wrap an engine-provided identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transport state reported by the playback engine.
///
/// The engine owns this value. States the engine reports that fall outside
/// the recognized set arrive as [`PlaybackState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing is playing
    Stopped,

    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Playback was interrupted by the system (call, other audio session)
    Interrupted,

    /// Fast-forwarding through the current item
    SeekingForward,

    /// Rewinding through the current item
    SeekingBackward,

    /// The engine reported a state this crate does not recognize
    Unknown,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Interrupted => "Interrupted",
            PlaybackState::SeekingForward => "Seeking forward",
            PlaybackState::SeekingBackward => "Seeking backward",
            PlaybackState::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Repeat mode as the user sees it.
///
/// Cycles NoRepeat → AlbumRepeat → OneSongRepeat → NoRepeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Play through the queue once
    #[default]
    NoRepeat,

    /// Loop the whole album / queue
    AlbumRepeat,

    /// Loop the current song
    OneSongRepeat,
}

impl RepeatMode {
    /// The mode that follows this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            RepeatMode::NoRepeat => RepeatMode::AlbumRepeat,
            RepeatMode::AlbumRepeat => RepeatMode::OneSongRepeat,
            RepeatMode::OneSongRepeat => RepeatMode::NoRepeat,
        }
    }

    /// The engine vocabulary for this mode.
    pub fn to_engine(self) -> EngineRepeatMode {
        match self {
            RepeatMode::NoRepeat => EngineRepeatMode::None,
            RepeatMode::AlbumRepeat => EngineRepeatMode::All,
            RepeatMode::OneSongRepeat => EngineRepeatMode::One,
        }
    }
}

impl From<EngineRepeatMode> for RepeatMode {
    fn from(mode: EngineRepeatMode) -> Self {
        match mode {
            EngineRepeatMode::None => RepeatMode::NoRepeat,
            EngineRepeatMode::All => RepeatMode::AlbumRepeat,
            EngineRepeatMode::One => RepeatMode::OneSongRepeat,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepeatMode::NoRepeat => "Off",
            RepeatMode::AlbumRepeat => "Album",
            RepeatMode::OneSongRepeat => "One song",
        };
        f.write_str(label)
    }
}

/// Repeat mode in the playback engine's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineRepeatMode {
    /// No repetition
    None,

    /// Repeat the whole queue
    All,

    /// Repeat the current item
    One,
}

/// Shuffle setting of the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleMode {
    /// Play the queue in order
    #[default]
    Off,

    /// Shuffle at song level
    Songs,
}

impl ShuffleMode {
    /// Whether shuffling is active.
    pub fn is_on(self) -> bool {
        matches!(self, ShuffleMode::Songs)
    }

    /// The opposite setting.
    pub fn toggled(self) -> Self {
        match self {
            ShuffleMode::Off => ShuffleMode::Songs,
            ShuffleMode::Songs => ShuffleMode::Off,
        }
    }
}

impl From<bool> for ShuffleMode {
    fn from(shuffle: bool) -> Self {
        if shuffle {
            Self::Songs
        } else {
            Self::Off
        }
    }
}

/// Playback position within the current item.
///
/// Engines occasionally report negative positions while a seek or a track
/// boundary is in flight. Those are kept apart as [`PlaybackPosition::Seeking`]
/// carrying the reported magnitude instead of being folded into the normal range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackPosition {
    /// Regular elapsed time
    Elapsed(Duration),

    /// The engine reported a negative position
    Seeking(Duration),
}

impl PlaybackPosition {
    /// Start of the item.
    pub const ZERO: Self = PlaybackPosition::Elapsed(Duration::ZERO);

    /// Convert a signed position in seconds as reported by an engine.
    ///
    /// Non-finite values are treated as the start of the item. Magnitudes
    /// too large for a [`Duration`] saturate to [`Duration::MAX`].
    pub fn from_secs_f64(seconds: f64) -> Self {
        if !seconds.is_finite() {
            return Self::ZERO;
        }

        let magnitude = Duration::try_from_secs_f64(seconds.abs()).unwrap_or(Duration::MAX);
        if seconds < 0.0 {
            PlaybackPosition::Seeking(magnitude)
        } else {
            PlaybackPosition::Elapsed(magnitude)
        }
    }

    /// Signed position in seconds; negative while seeking.
    pub fn as_secs_f64(&self) -> f64 {
        match self {
            PlaybackPosition::Elapsed(elapsed) => elapsed.as_secs_f64(),
            PlaybackPosition::Seeking(offset) => -offset.as_secs_f64(),
        }
    }

    /// Elapsed time, or `None` while the engine reports a seek.
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            PlaybackPosition::Elapsed(elapsed) => Some(*elapsed),
            PlaybackPosition::Seeking(_) => None,
        }
    }

    /// Whether the engine reported a negative position.
    pub fn is_seeking(&self) -> bool {
        matches!(self, PlaybackPosition::Seeking(_))
    }
}

impl Default for PlaybackPosition {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A position sample tagged with the track it was taken against.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTick {
    /// Track the mirror considered current when the sample was requested
    pub track: Option<TrackId>,

    /// The sampled position
    pub position: PlaybackPosition,
}

impl PositionTick {
    /// Build a tick from a raw engine reading in seconds.
    pub fn new(track: Option<TrackId>, seconds: f64) -> Self {
        Self {
            track,
            position: PlaybackPosition::from_secs_f64(seconds),
        }
    }
}

/// A command the transport layer issued to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Advance to the next item
    SkipToNext,

    /// Go back to the previous item
    SkipToPrevious,

    /// Restart the current item
    SeekToStart,

    /// Change the engine repeat mode
    SetRepeatMode(EngineRepeatMode),

    /// Change the engine shuffle mode
    SetShuffleMode(ShuffleMode),
}
