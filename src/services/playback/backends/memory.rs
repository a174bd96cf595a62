use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use crate::services::playback::{
    EngineError,
    album::{Album, MediaLibrary},
    engine::{EngineEvent, EngineEvents, EngineItem, PlaybackEngine},
    types::{EngineRepeatMode, PlaybackState, ShuffleMode, TransportCommand},
};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug)]
struct EngineState {
    queue: Vec<EngineItem>,
    index: Option<usize>,
    playback_state: Option<PlaybackState>,
    position: f64,
    playing_since: Option<Instant>,
    repeat: EngineRepeatMode,
    shuffle: ShuffleMode,
    reachable: bool,
    commands: Vec<TransportCommand>,
}

impl EngineState {
    fn current_item(&self) -> Option<EngineItem> {
        self.index.and_then(|index| self.queue.get(index).cloned())
    }

    fn position(&self) -> f64 {
        let running = self
            .playing_since
            .map(|since| since.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.position + running
    }

    fn freeze_position(&mut self) {
        self.position = self.position();
        self.playing_since = None;
    }

    fn reset_position(&mut self) {
        self.position = 0.0;
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }
}

/// A self-contained playback engine living in memory.
///
/// Keeps a queue, transport state, repeat and shuffle settings, and a
/// position that advances with the tokio clock while playing. Every accepted
/// transport command is recorded. Used by the demo command and by tests,
/// which can also push raw events, move the position and make the engine
/// unreachable.
#[derive(Debug)]
pub struct MemoryEngine {
    state: Mutex<EngineState>,
    events: broadcast::Sender<EngineEvent>,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// An engine with an empty queue, stopped.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            state: Mutex::new(EngineState {
                queue: Vec::new(),
                index: None,
                playback_state: Some(PlaybackState::Stopped),
                position: 0.0,
                playing_since: None,
                repeat: EngineRepeatMode::None,
                shuffle: ShuffleMode::Off,
                reachable: true,
                commands: Vec::new(),
            }),
            events,
        }
    }

    /// An engine with `items` queued and the first one loaded, paused.
    pub fn with_queue(items: Vec<EngineItem>) -> Self {
        let engine = Self::new();
        {
            let mut state = engine.lock();
            state.index = if items.is_empty() { None } else { Some(0) };
            state.queue = items;
            state.playback_state = Some(PlaybackState::Paused);
        }
        engine
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn broadcast(&self, events: Vec<EngineEvent>) {
        for event in events {
            // No subscribers is fine; events are not redelivered.
            let _ = self.events.send(event);
        }
    }

    fn accept(
        &self,
        command: TransportCommand,
    ) -> Result<MutexGuard<'_, EngineState>, EngineError> {
        let mut state = self.lock();
        if !state.reachable {
            return Err(EngineError::Unreachable(format!("{command:?} not delivered")));
        }
        state.commands.push(command);
        Ok(state)
    }

    /// Transport commands accepted so far, oldest first.
    pub fn commands(&self) -> Vec<TransportCommand> {
        self.lock().commands.clone()
    }

    /// The current queue.
    pub fn queue(&self) -> Vec<EngineItem> {
        self.lock().queue.clone()
    }

    /// Make every command and query fail, or recover.
    pub fn set_reachable(&self, reachable: bool) {
        self.lock().reachable = reachable;
    }

    /// Jump to an absolute position in seconds. Negative values are allowed.
    pub fn set_position(&self, seconds: f64) {
        let mut state = self.lock();
        state.position = seconds;
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
    }

    /// Load `item` as the current item and announce it.
    pub fn load_item(&self, item: EngineItem) {
        {
            let mut state = self.lock();
            state.queue.push(item.clone());
            state.index = Some(state.queue.len() - 1);
            state.reset_position();
        }
        self.broadcast(vec![EngineEvent::NowPlayingItemChanged(Some(item))]);
    }

    /// Change the transport state and announce it.
    pub fn set_playback_state(&self, playback_state: Option<PlaybackState>) {
        {
            let mut state = self.lock();
            match playback_state {
                Some(PlaybackState::Playing) => {
                    if state.playing_since.is_none() {
                        state.playing_since = Some(Instant::now());
                    }
                }
                _ => state.freeze_position(),
            }
            state.playback_state = playback_state;
        }
        self.broadcast(vec![EngineEvent::PlaybackStateChanged(playback_state)]);
    }

    /// Push a raw event to subscribers without touching engine state.
    pub fn emit(&self, event: EngineEvent) {
        self.broadcast(vec![event]);
    }

    fn move_to(state: &mut EngineState, index: Option<usize>) -> Vec<EngineEvent> {
        state.index = index;
        state.reset_position();

        let mut events = vec![EngineEvent::NowPlayingItemChanged(state.current_item())];
        if index.is_none() && state.playback_state != Some(PlaybackState::Stopped) {
            state.freeze_position();
            state.position = 0.0;
            state.playback_state = Some(PlaybackState::Stopped);
            events.push(EngineEvent::PlaybackStateChanged(state.playback_state));
        }
        events
    }
}

#[async_trait]
impl PlaybackEngine for MemoryEngine {
    async fn play(&self) -> Result<(), EngineError> {
        let events = {
            let mut state = self.accept(TransportCommand::Play)?;
            let mut events = Vec::new();

            if state.index.is_none() && !state.queue.is_empty() {
                state.index = Some(0);
                state.position = 0.0;
                events.push(EngineEvent::NowPlayingItemChanged(state.current_item()));
            }

            if state.index.is_some() && state.playback_state != Some(PlaybackState::Playing) {
                state.playing_since = Some(Instant::now());
                state.playback_state = Some(PlaybackState::Playing);
                events.push(EngineEvent::PlaybackStateChanged(state.playback_state));
            }
            events
        };

        self.broadcast(events);
        Ok(())
    }

    async fn pause(&self) -> Result<(), EngineError> {
        let events = {
            let mut state = self.accept(TransportCommand::Pause)?;
            if state.playback_state == Some(PlaybackState::Playing) {
                state.freeze_position();
                state.playback_state = Some(PlaybackState::Paused);
                vec![EngineEvent::PlaybackStateChanged(state.playback_state)]
            } else {
                Vec::new()
            }
        };

        self.broadcast(events);
        Ok(())
    }

    async fn skip_to_next(&self) -> Result<(), EngineError> {
        let events = {
            let mut state = self.accept(TransportCommand::SkipToNext)?;
            let len = state.queue.len();
            let next = match state.index {
                Some(index) if index + 1 < len => Some(index + 1),
                Some(_) if state.repeat == EngineRepeatMode::All && len > 0 => Some(0),
                Some(_) => None,
                None if len > 0 => Some(0),
                None => None,
            };
            Self::move_to(&mut state, next)
        };

        self.broadcast(events);
        Ok(())
    }

    async fn skip_to_previous(&self) -> Result<(), EngineError> {
        let events = {
            let mut state = self.accept(TransportCommand::SkipToPrevious)?;
            let len = state.queue.len();
            let previous = match state.index {
                Some(0) if state.repeat == EngineRepeatMode::All => Some(len - 1),
                Some(index) => Some(index.saturating_sub(1)),
                None if len > 0 => Some(0),
                None => None,
            };
            Self::move_to(&mut state, previous)
        };

        self.broadcast(events);
        Ok(())
    }

    async fn seek_to_start(&self) -> Result<(), EngineError> {
        let mut state = self.accept(TransportCommand::SeekToStart)?;
        state.reset_position();
        Ok(())
    }

    async fn set_repeat_mode(&self, mode: EngineRepeatMode) -> Result<(), EngineError> {
        let mut state = self.accept(TransportCommand::SetRepeatMode(mode))?;
        state.repeat = mode;
        Ok(())
    }

    async fn set_shuffle_mode(&self, mode: ShuffleMode) -> Result<(), EngineError> {
        let mut state = self.accept(TransportCommand::SetShuffleMode(mode))?;
        state.shuffle = mode;
        Ok(())
    }

    async fn play_queue(&self, items: Vec<EngineItem>) -> Result<(), EngineError> {
        let events = {
            let mut state = self.lock();
            if !state.reachable {
                return Err(EngineError::Unreachable("queue not delivered".to_string()));
            }

            state.queue = items;
            state.index = if state.queue.is_empty() { None } else { Some(0) };
            state.position = 0.0;

            let mut events = vec![EngineEvent::NowPlayingItemChanged(state.current_item())];
            if state.index.is_some() {
                state.playing_since = Some(Instant::now());
                state.playback_state = Some(PlaybackState::Playing);
            } else {
                state.playing_since = None;
                state.playback_state = Some(PlaybackState::Stopped);
            }
            events.push(EngineEvent::PlaybackStateChanged(state.playback_state));
            events
        };

        debug!("Queue replaced");
        self.broadcast(events);
        Ok(())
    }

    async fn current_item(&self) -> Result<Option<EngineItem>, EngineError> {
        let state = self.lock();
        if !state.reachable {
            return Err(EngineError::Unreachable("current item".to_string()));
        }
        Ok(state.current_item())
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>, EngineError> {
        let state = self.lock();
        if !state.reachable {
            return Err(EngineError::Unreachable("playback state".to_string()));
        }
        Ok(state.playback_state)
    }

    async fn current_position(&self) -> Result<f64, EngineError> {
        let state = self.lock();
        if !state.reachable {
            return Err(EngineError::Unreachable("position".to_string()));
        }
        Ok(state.position())
    }

    async fn shuffle_mode(&self) -> Result<ShuffleMode, EngineError> {
        let state = self.lock();
        if !state.reachable {
            return Err(EngineError::Unreachable("shuffle mode".to_string()));
        }
        Ok(state.shuffle)
    }

    async fn repeat_mode(&self) -> Result<EngineRepeatMode, EngineError> {
        let state = self.lock();
        if !state.reachable {
            return Err(EngineError::Unreachable("repeat mode".to_string()));
        }
        Ok(state.repeat)
    }

    async fn subscribe(&self) -> Result<EngineEvents, EngineError> {
        let events = BroadcastStream::new(self.events.subscribe())
            .filter_map(|event| async move { event.ok() })
            .boxed();
        Ok(events)
    }
}

/// A media library backed by a map of album title to songs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLibrary {
    albums: HashMap<String, (Album, Vec<EngineItem>)>,
}

impl InMemoryLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an album and its songs.
    pub fn add_album(&mut self, album: Album, songs: Vec<EngineItem>) {
        self.albums.insert(album.title.clone(), (album, songs));
    }

    /// All albums, sorted by title.
    pub fn albums(&self) -> Vec<Album> {
        let mut albums: Vec<Album> = self
            .albums
            .values()
            .map(|(album, _)| album.clone())
            .collect();
        albums.sort_by(|a, b| a.title.cmp(&b.title));
        albums
    }
}

#[async_trait]
impl MediaLibrary for InMemoryLibrary {
    async fn songs_in_album(&self, album_title: &str) -> Result<Vec<EngineItem>, EngineError> {
        Ok(self
            .albums
            .get(album_title)
            .map(|(_, songs)| songs.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn items(titles: &[&str]) -> Vec<EngineItem> {
        titles
            .iter()
            .map(|title| EngineItem {
                id: Some(crate::services::playback::TrackId::new(*title)),
                title: Some(title.to_string()),
                ..EngineItem::default()
            })
            .collect()
    }

    async fn current_title(engine: &MemoryEngine) -> Option<String> {
        engine.current_item().await.unwrap().and_then(|item| item.title)
    }

    #[tokio::test]
    async fn skip_walks_the_queue() {
        let engine = MemoryEngine::with_queue(items(&["a", "b"]));

        engine.skip_to_next().await.unwrap();
        assert_eq!(current_title(&engine).await.as_deref(), Some("b"));

        engine.skip_to_previous().await.unwrap();
        assert_eq!(current_title(&engine).await.as_deref(), Some("a"));

        engine.skip_to_previous().await.unwrap();
        assert_eq!(current_title(&engine).await.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn skip_past_end_stops_unless_repeating() {
        let engine = MemoryEngine::with_queue(items(&["a", "b"]));
        engine.skip_to_next().await.unwrap();
        engine.skip_to_next().await.unwrap();

        assert_eq!(current_title(&engine).await, None);
        assert_eq!(
            engine.playback_state().await.unwrap(),
            Some(PlaybackState::Stopped)
        );

        let engine = MemoryEngine::with_queue(items(&["a", "b"]));
        engine.set_repeat_mode(EngineRepeatMode::All).await.unwrap();
        engine.skip_to_next().await.unwrap();
        engine.skip_to_next().await.unwrap();
        assert_eq!(current_title(&engine).await.as_deref(), Some("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn position_runs_only_while_playing() {
        let engine = MemoryEngine::with_queue(items(&["a"]));

        engine.play().await.unwrap();
        tokio::time::advance(Duration::from_secs(4)).await;
        engine.pause().await.unwrap();
        tokio::time::advance(Duration::from_secs(10)).await;

        let position = engine.current_position().await.unwrap();
        assert!((position - 4.0).abs() < 0.01, "position {position}");

        engine.seek_to_start().await.unwrap();
        assert_eq!(engine.current_position().await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let engine = MemoryEngine::with_queue(items(&["a", "b"]));
        let mut events = engine.subscribe().await.unwrap();

        engine.play().await.unwrap();

        assert_eq!(
            events.next().await,
            Some(EngineEvent::PlaybackStateChanged(Some(
                PlaybackState::Playing
            )))
        );

        engine.skip_to_next().await.unwrap();
        let Some(EngineEvent::NowPlayingItemChanged(Some(item))) = events.next().await else {
            panic!("expected an item change");
        };
        assert_eq!(item.title.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn unreachable_engine_rejects_everything() {
        let engine = MemoryEngine::with_queue(items(&["a"]));
        engine.set_reachable(false);

        assert!(engine.play().await.is_err());
        assert!(engine.current_item().await.is_err());
        assert!(engine.play_queue(items(&["b"])).await.is_err());
        assert!(engine.commands().is_empty());

        engine.set_reachable(true);
        engine.play().await.unwrap();
        assert_eq!(engine.commands(), vec![TransportCommand::Play]);
    }

    #[tokio::test]
    async fn library_lists_albums_sorted() {
        let mut library = InMemoryLibrary::new();
        for title in ["Mingus", "Blue"] {
            library.add_album(
                Album {
                    title: title.to_string(),
                    artist: "Joni".to_string(),
                },
                items(&["x"]),
            );
        }

        let titles: Vec<String> = library.albums().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Blue", "Mingus"]);
        assert_eq!(library.songs_in_album("Blue").await.unwrap().len(), 1);
        assert!(library.songs_in_album("Hejira").await.unwrap().is_empty());
    }
}
