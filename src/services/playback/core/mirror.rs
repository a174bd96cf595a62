use std::sync::atomic::{AtomicBool, Ordering};

use futures::Stream;
use tracing::{debug, trace};

use super::song::NowPlayingSong;
use crate::services::common::Property;
use crate::services::playback::{
    engine::EngineItem,
    types::{PlaybackPosition, PlaybackState, PositionTick, RepeatMode, TrackId},
};
use crate::watch_all;

/// The current item together with the position reached in it.
///
/// Kept in one property so an item change and its position reset land in a
/// single update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NowPlaying {
    /// Engine identity of the item, when the engine provides one
    pub track: Option<TrackId>,

    /// What to show for the item
    pub song: NowPlayingSong,

    /// Last sampled position within the item
    pub position: PlaybackPosition,
}

/// Local, read-only cache of what the playback engine is doing.
///
/// Every handler replaces its slice of state wholesale; nothing is merged.
/// Once [`close`](Self::close) is called all further updates are ignored.
#[derive(Debug)]
pub struct NowPlayingMirror {
    /// Current item and position
    pub now_playing: Property<NowPlaying>,

    /// Last transport state the engine reported
    pub playback_state: Property<Option<PlaybackState>>,

    /// Repeat mode selected through the transport controls
    pub repeat_mode: Property<RepeatMode>,

    /// Whether shuffle is on
    pub shuffle: Property<bool>,

    closed: AtomicBool,
}

impl Default for NowPlayingMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl NowPlayingMirror {
    /// Create an empty mirror: default song, no state, repeat and shuffle off.
    pub fn new() -> Self {
        Self {
            now_playing: Property::new(NowPlaying::default()),
            playback_state: Property::new(None),
            repeat_mode: Property::new(RepeatMode::default()),
            shuffle: Property::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// The song currently shown.
    pub fn current(&self) -> NowPlayingSong {
        self.now_playing.get().song
    }

    /// The last transport state applied, `None` if the engine never said.
    pub fn current_state(&self) -> Option<PlaybackState> {
        self.playback_state.get()
    }

    /// The last position applied for the current item.
    pub fn position(&self) -> PlaybackPosition {
        self.now_playing.get().position
    }

    /// Identity of the current item.
    pub fn track_id(&self) -> Option<TrackId> {
        self.now_playing.get().track
    }

    /// Replace the current song with the engine's new item.
    ///
    /// The position resets to zero in the same update.
    pub fn on_now_playing_item_changed(&self, item: Option<EngineItem>) {
        if self.is_closed() {
            trace!("Mirror closed, ignoring item change");
            return;
        }

        let track = item.as_ref().and_then(|item| item.id.clone());
        let song = NowPlayingSong::from(item);
        debug!(title = %song.title, artist = %song.artist, "Now playing item changed");

        self.write(
            &self.now_playing,
            NowPlaying {
                track,
                song,
                position: PlaybackPosition::ZERO,
            },
        );
    }

    /// Replace the cached transport state.
    pub fn on_playback_state_changed(&self, state: Option<PlaybackState>) {
        if self.is_closed() {
            trace!("Mirror closed, ignoring state change");
            return;
        }

        debug!(?state, "Playback state changed");
        self.write(&self.playback_state, state);
    }

    /// Replace the cached position.
    ///
    /// Ticks sampled against a different item than the current one are
    /// discarded.
    pub fn on_position_tick(&self, tick: PositionTick) {
        if self.is_closed() {
            trace!("Mirror closed, ignoring position tick");
            return;
        }

        self.now_playing.update(|now_playing| {
            if self.is_closed() {
                return false;
            }

            if now_playing.track != tick.track {
                debug!(
                    sampled = ?tick.track,
                    current = ?now_playing.track,
                    "Discarding position tick for a previous item"
                );
                return false;
            }

            if now_playing.position == tick.position {
                return false;
            }

            trace!(position = ?tick.position, "Position tick");
            now_playing.position = tick.position;
            true
        });
    }

    pub(crate) fn set_repeat_mode(&self, mode: RepeatMode) {
        self.write(&self.repeat_mode, mode);
    }

    pub(crate) fn set_shuffle(&self, shuffle: bool) {
        self.write(&self.shuffle, shuffle);
    }

    /// Stop accepting updates.
    ///
    /// Writers check the flag while holding the property lock, so once this
    /// returns no handler running on another thread can still land a write.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);

        self.now_playing.update(|_| false);
        self.playback_state.update(|_| false);
        self.repeat_mode.update(|_| false);
        self.shuffle.update(|_| false);
    }

    /// Whether the mirror has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn write<T>(&self, property: &Property<T>, value: T)
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        property.set_unless(value, || self.is_closed());
    }

    /// Watch for any change in the mirror.
    ///
    /// Emits once immediately and then whenever any observable field changes.
    pub fn watch(&self) -> impl Stream<Item = ()> + Send + 'static {
        watch_all!(self, now_playing, playback_state, repeat_mode, shuffle)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::services::playback::core::Artwork;

    fn item(id: &str, title: &str, duration: f64) -> EngineItem {
        EngineItem {
            id: Some(TrackId::new(id)),
            title: Some(title.to_string()),
            duration: Some(duration),
            ..EngineItem::default()
        }
    }

    #[test]
    fn starts_with_defaults() {
        let mirror = NowPlayingMirror::new();

        assert_eq!(mirror.current(), NowPlayingSong::default());
        assert_eq!(mirror.current_state(), None);
        assert_eq!(mirror.position(), PlaybackPosition::ZERO);
        assert_eq!(mirror.repeat_mode.get(), RepeatMode::NoRepeat);
        assert!(!mirror.shuffle.get());
    }

    #[test]
    fn item_with_missing_fields_uses_defaults() {
        let mirror = NowPlayingMirror::new();

        mirror.on_now_playing_item_changed(Some(EngineItem {
            album_title: Some("Foo".to_string()),
            ..EngineItem::default()
        }));

        let song = mirror.current();
        assert_eq!(song.title, "");
        assert_eq!(song.album_title, "Foo");
        assert_eq!(song.artist, "");
        assert_eq!(song.artwork, Artwork::Blank);
        assert_eq!(song.duration, 10.0);
    }

    #[test]
    fn item_change_resets_position() {
        let mirror = NowPlayingMirror::new();
        mirror.on_now_playing_item_changed(Some(item("a", "Song A", 200.0)));
        mirror.on_position_tick(PositionTick::new(Some(TrackId::new("a")), 42.0));
        assert_eq!(mirror.position().as_secs_f64(), 42.0);

        mirror.on_now_playing_item_changed(Some(item("b", "Song B", 180.0)));

        let now_playing = mirror.now_playing.get();
        assert_eq!(now_playing.song.title, "Song B");
        assert_eq!(now_playing.position, PlaybackPosition::ZERO);
        assert_eq!(now_playing.track, Some(TrackId::new("b")));
    }

    #[test]
    fn playback_state_change_is_idempotent() {
        let mirror = NowPlayingMirror::new();

        mirror.on_playback_state_changed(Some(PlaybackState::Playing));
        assert_eq!(mirror.current_state(), Some(PlaybackState::Playing));

        mirror.on_playback_state_changed(Some(PlaybackState::Playing));
        assert_eq!(mirror.current_state(), Some(PlaybackState::Playing));
    }

    #[test]
    fn unknown_state_is_stored() {
        let mirror = NowPlayingMirror::new();

        mirror.on_playback_state_changed(Some(PlaybackState::Unknown));

        assert_eq!(mirror.current_state(), Some(PlaybackState::Unknown));
    }

    #[test]
    fn stale_position_tick_is_discarded() {
        let mirror = NowPlayingMirror::new();
        mirror.on_now_playing_item_changed(Some(item("b", "Song B", 180.0)));

        mirror.on_position_tick(PositionTick::new(Some(TrackId::new("a")), 150.0));

        assert_eq!(mirror.position(), PlaybackPosition::ZERO);
    }

    #[test]
    fn position_is_not_clamped_to_duration() {
        let mirror = NowPlayingMirror::new();
        mirror.on_now_playing_item_changed(Some(item("a", "Song A", 10.0)));

        mirror.on_position_tick(PositionTick::new(Some(TrackId::new("a")), 25.0));

        assert_eq!(mirror.position().as_secs_f64(), 25.0);
    }

    #[test]
    fn negative_tick_is_recorded_as_seeking() {
        let mirror = NowPlayingMirror::new();

        mirror.on_position_tick(PositionTick::new(None, -1.5));

        assert!(mirror.position().is_seeking());
    }

    #[test]
    fn oversized_tick_does_not_fail_the_mirror() {
        let mirror = NowPlayingMirror::new();

        mirror.on_position_tick(PositionTick::new(None, 1e20));

        assert_eq!(mirror.position(), PlaybackPosition::Elapsed(Duration::MAX));
    }

    #[test]
    fn closed_mirror_ignores_updates() {
        let mirror = NowPlayingMirror::new();
        mirror.on_now_playing_item_changed(Some(item("a", "Song A", 200.0)));
        mirror.close();

        mirror.on_now_playing_item_changed(Some(item("b", "Song B", 180.0)));
        mirror.on_playback_state_changed(Some(PlaybackState::Playing));
        mirror.on_position_tick(PositionTick::new(Some(TrackId::new("a")), 30.0));
        mirror.set_repeat_mode(RepeatMode::OneSongRepeat);
        mirror.set_shuffle(true);

        assert_eq!(mirror.current().title, "Song A");
        assert_eq!(mirror.current_state(), None);
        assert_eq!(mirror.position(), PlaybackPosition::ZERO);
        assert_eq!(mirror.repeat_mode.get(), RepeatMode::NoRepeat);
        assert!(!mirror.shuffle.get());
    }
}
