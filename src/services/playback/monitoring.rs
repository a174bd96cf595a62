use std::sync::{Arc, Weak};
use std::time::Duration;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument, warn};

use super::{
    core::NowPlayingMirror,
    engine::{EngineEvent, EngineEvents, PlaybackEngine},
    types::{PositionTick, RepeatMode},
};

/// Handle to the background tasks feeding a mirror.
///
/// Cancelling (or dropping) the handle stops the position poller and
/// unsubscribes from the engine's event feed.
#[derive(Debug, Default)]
pub struct Subscription {
    tasks: Vec<JoinHandle<()>>,
}

impl Subscription {
    /// Stop all tasks. Safe to call more than once.
    pub fn cancel(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Whether any task is still attached.
    pub fn is_active(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Keeps a [`NowPlayingMirror`] in step with a playback engine.
pub(crate) struct MirrorMonitor;

impl MirrorMonitor {
    /// Seed the mirror from the engine and start the event and position tasks.
    ///
    /// Monitoring also stops by itself when the mirror is dropped.
    #[instrument(skip_all, fields(poll_interval = ?poll_interval))]
    pub async fn start(
        engine: Arc<dyn PlaybackEngine>,
        mirror: &Arc<NowPlayingMirror>,
        poll_interval: Duration,
    ) -> Subscription {
        let events = match engine.subscribe().await {
            Ok(events) => Some(events),
            Err(e) => {
                warn!(error = %e, "Engine event feed unavailable, relying on polling");
                None
            }
        };

        Self::refresh(engine.as_ref(), mirror).await;

        let weak = Arc::downgrade(mirror);
        let mut tasks = Vec::with_capacity(2);

        if let Some(events) = events {
            let weak = weak.clone();
            tasks.push(tokio::spawn(async move {
                Self::monitor_events(weak, events).await;
            }));
        }

        tasks.push(tokio::spawn(async move {
            Self::poll_position(engine, weak, poll_interval).await;
        }));

        Subscription { tasks }
    }

    /// Read the engine's current snapshot into the mirror.
    async fn refresh(engine: &dyn PlaybackEngine, mirror: &NowPlayingMirror) {
        match engine.current_item().await {
            Ok(item) => mirror.on_now_playing_item_changed(item),
            Err(e) => debug!(error = %e, "Failed to read current item"),
        }

        match engine.playback_state().await {
            Ok(state) => mirror.on_playback_state_changed(state),
            Err(e) => debug!(error = %e, "Failed to read playback state"),
        }

        if let Ok(shuffle) = engine.shuffle_mode().await {
            mirror.set_shuffle(shuffle.is_on());
        }

        if let Ok(repeat) = engine.repeat_mode().await {
            mirror.set_repeat_mode(RepeatMode::from(repeat));
        }
    }

    async fn monitor_events(mirror: Weak<NowPlayingMirror>, mut events: EngineEvents) {
        while let Some(event) = events.next().await {
            let Some(mirror) = mirror.upgrade() else {
                debug!("Mirror dropped, stopping event monitor");
                return;
            };

            match event {
                EngineEvent::PlaybackStateChanged(state) => {
                    mirror.on_playback_state_changed(state);
                }
                EngineEvent::NowPlayingItemChanged(item) => {
                    mirror.on_now_playing_item_changed(item);
                }
            }
        }

        debug!("Engine event feed ended");
    }

    async fn poll_position(
        engine: Arc<dyn PlaybackEngine>,
        mirror: Weak<NowPlayingMirror>,
        interval: Duration,
    ) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let Some(mirror) = mirror.upgrade() else {
                debug!("Mirror dropped, stopping position polling");
                return;
            };

            let track = mirror.track_id();
            match engine.current_position().await {
                Ok(seconds) => mirror.on_position_tick(PositionTick::new(track, seconds)),
                Err(e) => debug!(error = %e, "Position poll failed"),
            }
        }
    }
}
