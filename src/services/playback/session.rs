use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::{
    core::{NowPlayingMirror, TransportController},
    engine::PlaybackEngine,
    monitoring::{MirrorMonitor, Subscription},
};
use crate::config::PlayerConfig;

/// Period of the position poll when nothing else is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A live player view: a mirror kept in sync with an engine plus the
/// transport controls acting on it.
///
/// The session owns the background tasks feeding the mirror. Calling
/// [`teardown`](Self::teardown), or dropping the session, stops them and
/// closes the mirror so nothing writes to it afterwards.
pub struct PlayerSession {
    mirror: Arc<NowPlayingMirror>,
    transport: TransportController,
    subscription: Subscription,
}

impl PlayerSession {
    /// Start a session using the poll interval from `config`.
    pub async fn start(engine: Arc<dyn PlaybackEngine>, config: &PlayerConfig) -> Self {
        Self::with_poll_interval(engine, config.position_poll_interval()).await
    }

    /// Start a session polling the engine position every `poll_interval`.
    ///
    /// The mirror is seeded from the engine before this returns.
    #[instrument(skip(engine))]
    pub async fn with_poll_interval(
        engine: Arc<dyn PlaybackEngine>,
        poll_interval: Duration,
    ) -> Self {
        let mirror = Arc::new(NowPlayingMirror::new());
        let subscription = MirrorMonitor::start(engine.clone(), &mirror, poll_interval).await;
        let transport = TransportController::new(engine, mirror.clone());

        info!("Player session started");

        Self {
            mirror,
            transport,
            subscription,
        }
    }

    /// The observable now-playing state.
    pub fn mirror(&self) -> &Arc<NowPlayingMirror> {
        &self.mirror
    }

    /// The transport controls.
    pub fn transport(&self) -> &TransportController {
        &self.transport
    }

    /// Whether the session is still feeding its mirror.
    pub fn is_active(&self) -> bool {
        !self.mirror.is_closed()
    }

    /// Stop polling, unsubscribe from the engine and close the mirror.
    pub fn teardown(&mut self) {
        if self.mirror.is_closed() {
            return;
        }

        self.mirror.close();
        self.subscription.cancel();
        debug!("Player session torn down");
    }
}

impl Drop for PlayerSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
