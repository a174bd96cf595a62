//! Integration tests for a player session over the in-memory engine.
//!
//! Time is paused so position polling advances deterministically.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::{sync::Arc, time::Duration};

use futures::{FutureExt, StreamExt};
use nowplaying::services::playback::{
    Album, AlbumDetail, EngineEvent, EngineItem, InMemoryLibrary, MemoryEngine, PlaybackEngine,
    PlaybackPosition, PlaybackState, PlayerSession, RepeatMode, TrackId, TransportCommand,
    UNKNOWN_DURATION_SECS,
};

const POLL: Duration = Duration::from_secs(1);

fn song(id: &str, title: &str, duration: f64) -> EngineItem {
    EngineItem {
        id: Some(TrackId::new(id)),
        title: Some(title.to_string()),
        album_title: Some("Foo".to_string()),
        artist: Some("Bar".to_string()),
        artwork: None,
        duration: Some(duration),
    }
}

async fn setup() -> (Arc<MemoryEngine>, Arc<dyn PlaybackEngine>, PlayerSession) {
    let memory = Arc::new(MemoryEngine::new());
    let engine: Arc<dyn PlaybackEngine> = memory.clone();
    let session = PlayerSession::with_poll_interval(engine.clone(), POLL).await;
    (memory, engine, session)
}

/// Let spawned tasks drain pending events without reaching the next poll.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[tokio::test(start_paused = true)]
async fn session_starts_from_engine_snapshot() {
    let memory = Arc::new(MemoryEngine::with_queue(vec![song("a", "Song A", 200.0)]));
    let engine: Arc<dyn PlaybackEngine> = memory.clone();

    let session = PlayerSession::with_poll_interval(engine, POLL).await;
    let mirror = session.mirror();

    assert_eq!(mirror.current().title, "Song A");
    assert_eq!(mirror.current_state(), Some(PlaybackState::Paused));
    assert_eq!(mirror.repeat_mode.get(), RepeatMode::NoRepeat);
    assert!(!mirror.shuffle.get());
    assert!(session.is_active());
}

#[tokio::test(start_paused = true)]
async fn mirror_follows_item_state_and_position() {
    let (memory, _engine, session) = setup().await;
    let mirror = session.mirror().clone();

    memory.load_item(song("a", "Song A", 200.0));
    memory.set_playback_state(Some(PlaybackState::Playing));
    settle().await;

    let current = mirror.current();
    assert_eq!(current.title, "Song A");
    assert_eq!(current.album_title, "Foo");
    assert_eq!(current.artist, "Bar");
    assert_eq!(current.duration, 200.0);
    assert_eq!(mirror.current_state(), Some(PlaybackState::Playing));

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    let position = mirror.position().as_secs_f64();
    assert!((position - 3.0).abs() < 0.5, "position was {position}");

    memory.load_item(song("b", "Song B", 120.0));
    settle().await;

    assert_eq!(mirror.current().title, "Song B");
    assert_eq!(mirror.position(), PlaybackPosition::ZERO);
    assert_eq!(mirror.track_id(), Some(TrackId::new("b")));
}

#[tokio::test(start_paused = true)]
async fn item_change_never_shows_old_position() {
    let (memory, _engine, session) = setup().await;
    let mirror = session.mirror().clone();
    let mut frames = Box::pin(mirror.now_playing.watch());

    memory.load_item(song("a", "Song A", 200.0));
    memory.set_playback_state(Some(PlaybackState::Playing));
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    while let Some(Some(_)) = frames.next().now_or_never() {}
    assert!(mirror.position().as_secs_f64() > 2.0);

    memory.load_item(song("b", "Song B", 120.0));
    settle().await;

    let mut seen = Vec::new();
    while let Some(Some(frame)) = frames.next().now_or_never() {
        seen.push(frame);
    }

    assert!(!seen.is_empty());
    for frame in seen {
        assert_eq!(frame.song.title, "Song B");
        assert_eq!(frame.track, Some(TrackId::new("b")));
        assert_eq!(frame.position, PlaybackPosition::ZERO);
    }
}

#[tokio::test(start_paused = true)]
async fn missing_item_shows_defaults() {
    let (memory, _engine, session) = setup().await;
    let mirror = session.mirror();

    memory.load_item(song("a", "Song A", 200.0));
    settle().await;
    memory.emit(EngineEvent::NowPlayingItemChanged(None));
    settle().await;

    let current = mirror.current();
    assert_eq!(current.title, "");
    assert_eq!(current.artist, "");
    assert!(current.artwork.is_blank());
    assert_eq!(current.duration, UNKNOWN_DURATION_SECS);
}

#[tokio::test(start_paused = true)]
async fn unknown_state_is_recorded_as_none() {
    let (memory, _engine, session) = setup().await;

    memory.set_playback_state(Some(PlaybackState::Playing));
    settle().await;
    memory.emit(EngineEvent::PlaybackStateChanged(None));
    settle().await;

    assert_eq!(session.mirror().current_state(), None);
}

#[tokio::test(start_paused = true)]
async fn repeated_state_does_not_notify_twice() {
    let (memory, _engine, session) = setup().await;
    let mut states = session.mirror().playback_state.watch();

    assert_eq!(states.next().await, Some(Some(PlaybackState::Stopped)));

    memory.emit(EngineEvent::PlaybackStateChanged(Some(PlaybackState::Playing)));
    memory.emit(EngineEvent::PlaybackStateChanged(Some(PlaybackState::Playing)));
    settle().await;

    assert_eq!(states.next().await, Some(Some(PlaybackState::Playing)));
    let second = tokio::time::timeout(Duration::from_secs(5), states.next()).await;
    assert!(second.is_err(), "duplicate state produced a notification");
}

#[tokio::test(start_paused = true)]
async fn negative_position_is_reported_as_seeking() {
    let (memory, _engine, session) = setup().await;

    memory.load_item(song("a", "Song A", 200.0));
    settle().await;
    memory.set_position(-1.5);
    tokio::time::sleep(POLL).await;

    let position = session.mirror().position();
    assert!(position.is_seeking());
    assert_eq!(position.as_secs_f64(), -1.5);
    assert_eq!(position.elapsed(), None);
}

#[tokio::test(start_paused = true)]
async fn teardown_stops_all_writes() {
    let (memory, _engine, mut session) = setup().await;
    let mirror = session.mirror().clone();

    memory.load_item(song("a", "Song A", 200.0));
    memory.set_playback_state(Some(PlaybackState::Playing));
    settle().await;
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let frozen = mirror.position();

    session.teardown();
    session.teardown();
    assert!(!session.is_active());

    memory.load_item(song("b", "Song B", 120.0));
    memory.set_playback_state(Some(PlaybackState::Paused));
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(mirror.current().title, "Song A");
    assert_eq!(mirror.current_state(), Some(PlaybackState::Playing));
    assert_eq!(mirror.position(), frozen);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn teardown_is_final_across_threads() {
    let memory = Arc::new(MemoryEngine::new());
    let engine: Arc<dyn PlaybackEngine> = memory.clone();
    let mut session = PlayerSession::with_poll_interval(engine, Duration::from_millis(1)).await;
    let mirror = session.mirror().clone();

    let feeder = {
        let memory = memory.clone();
        tokio::spawn(async move {
            for n in 0..2_000u32 {
                let state = if n % 2 == 0 {
                    PlaybackState::Playing
                } else {
                    PlaybackState::Paused
                };
                memory.emit(EngineEvent::PlaybackStateChanged(Some(state)));
                memory.set_position(f64::from(n));
                tokio::task::yield_now().await;
            }
        })
    };

    tokio::time::sleep(Duration::from_millis(5)).await;
    session.teardown();
    let state = mirror.current_state();
    let position = mirror.position();

    feeder.await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(mirror.current_state(), state);
    assert_eq!(mirror.position(), position);
}

#[tokio::test(start_paused = true)]
async fn dropping_session_closes_mirror() {
    let (memory, _engine, session) = setup().await;
    let mirror = session.mirror().clone();

    drop(session);
    memory.load_item(song("a", "Song A", 200.0));
    settle().await;

    assert!(mirror.is_closed());
    assert_eq!(mirror.current().title, "");
}

#[tokio::test(start_paused = true)]
async fn skip_backward_restarts_after_threshold() {
    let memory = Arc::new(MemoryEngine::with_queue(vec![
        song("a", "Song A", 200.0),
        song("b", "Song B", 200.0),
    ]));
    let engine: Arc<dyn PlaybackEngine> = memory.clone();
    let session = PlayerSession::with_poll_interval(engine, POLL).await;
    let transport = session.transport();

    assert_eq!(transport.skip_forward().await, TransportCommand::SkipToNext);
    assert_eq!(transport.toggle_play_pause().await, TransportCommand::Play);
    settle().await;
    tokio::time::sleep(Duration::from_secs(6)).await;

    assert_eq!(transport.skip_backward().await, TransportCommand::SeekToStart);
    assert_eq!(
        transport.skip_backward().await,
        TransportCommand::SkipToPrevious
    );
    settle().await;

    assert_eq!(session.mirror().current().title, "Song A");
    assert_eq!(
        memory.commands(),
        vec![
            TransportCommand::SkipToNext,
            TransportCommand::Play,
            TransportCommand::SeekToStart,
            TransportCommand::SkipToPrevious,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn play_pause_follows_mirrored_state() {
    let memory = Arc::new(MemoryEngine::with_queue(vec![song("a", "Song A", 200.0)]));
    let engine: Arc<dyn PlaybackEngine> = memory.clone();
    let session = PlayerSession::with_poll_interval(engine, POLL).await;
    let transport = session.transport();

    assert_eq!(transport.toggle_play_pause().await, TransportCommand::Play);
    settle().await;
    assert_eq!(session.mirror().current_state(), Some(PlaybackState::Playing));

    assert_eq!(transport.toggle_play_pause().await, TransportCommand::Pause);
    settle().await;
    assert_eq!(session.mirror().current_state(), Some(PlaybackState::Paused));
}

#[tokio::test(start_paused = true)]
async fn unreachable_engine_is_absorbed() {
    let (memory, engine, session) = setup().await;
    memory.set_reachable(false);

    let transport = session.transport();
    assert_eq!(transport.toggle_play_pause().await, TransportCommand::Play);
    assert_eq!(transport.skip_forward().await, TransportCommand::SkipToNext);
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert!(memory.commands().is_empty());
    assert!(engine.current_position().await.is_err());
    assert_eq!(session.mirror().current_state(), Some(PlaybackState::Stopped));
    assert!(session.is_active());
}

#[tokio::test(start_paused = true)]
async fn repeat_cycles_and_reaches_engine() {
    let (memory, engine, session) = setup().await;
    let transport = session.transport();

    transport.cycle_repeat_mode().await;
    assert_eq!(session.mirror().repeat_mode.get(), RepeatMode::AlbumRepeat);
    transport.cycle_repeat_mode().await;
    assert_eq!(session.mirror().repeat_mode.get(), RepeatMode::OneSongRepeat);
    transport.cycle_repeat_mode().await;
    assert_eq!(session.mirror().repeat_mode.get(), RepeatMode::NoRepeat);

    assert_eq!(memory.commands().len(), 3);
    assert_eq!(
        RepeatMode::from(engine.repeat_mode().await.unwrap()),
        RepeatMode::NoRepeat
    );
}

#[tokio::test(start_paused = true)]
async fn shuffle_toggles_from_engine_state() {
    let (_memory, engine, session) = setup().await;
    let transport = session.transport();

    assert!(transport.toggle_shuffle().await);
    assert!(session.mirror().shuffle.get());
    assert!(engine.shuffle_mode().await.unwrap().is_on());

    assert!(!transport.toggle_shuffle().await);
    assert!(!session.mirror().shuffle.get());
}

#[tokio::test(start_paused = true)]
async fn album_play_all_drives_the_mirror() {
    let mut library = InMemoryLibrary::new();
    let album = Album {
        title: "Foo".to_string(),
        artist: "Bar".to_string(),
    };
    library.add_album(
        album.clone(),
        vec![song("1", "First", 100.0), song("2", "Second", 100.0)],
    );

    let (memory, engine, session) = setup().await;
    let detail = AlbumDetail::load(&library, album).await;
    assert_eq!(detail.song_count(), 2);

    let queued = detail.play_all(&engine).await;
    settle().await;

    assert_eq!(queued.len(), 2);
    assert_eq!(memory.queue().len(), 2);
    assert_eq!(session.mirror().current().title, "First");
    assert_eq!(session.mirror().current_state(), Some(PlaybackState::Playing));
}
