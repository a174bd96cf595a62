mod conversion;
mod discovery;
mod proxy;

use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, instrument};
use zbus::{
    Connection,
    fdo::PropertiesProxy,
    names::{InterfaceName, MemberName},
    zvariant::ObjectPath,
};

pub use discovery::{PlayerId, PlayerSummary, list_players, select_player};
use proxy::{MediaPlayer2PlayerProxy, MediaPlayer2Proxy};

use crate::{
    config::PlayerConfig,
    services::playback::{
        EngineError,
        engine::{EngineEvent, EngineEvents, EngineItem, PlaybackEngine},
        types::{EngineRepeatMode, PlaybackState, ShuffleMode},
    },
};

const MPRIS_PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";
const NO_TRACK_PATH: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";

/// A playback engine backed by an MPRIS player on the session bus.
///
/// Position is not signalled by MPRIS, so it is read on demand through the
/// properties interface.
pub struct MprisEngine {
    id: PlayerId,
    identity: String,
    proxy: MediaPlayer2PlayerProxy<'static>,
    properties: PropertiesProxy<'static>,
}

impl MprisEngine {
    /// Connect to the session bus and attach to a player.
    ///
    /// `identifier` is resolved by [`select_player`]; without it the
    /// configured preferred player wins.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoPlayer` when no player is running,
    /// `EngineError::PlayerNotFound` when the identifier matches nothing,
    /// or `EngineError::DbusError` if the bus is unavailable.
    #[instrument(skip(config))]
    pub async fn connect(
        config: &PlayerConfig,
        identifier: Option<&str>,
    ) -> Result<Self, EngineError> {
        let connection = Connection::session().await?;
        let players = list_players(&connection, &config.ignored_players).await?;
        let selected = select_player(&players, identifier, config.preferred_player.as_deref())?;

        Self::for_player(&connection, selected.id.clone()).await
    }

    /// Attach to a specific player.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::PlayerNotFound` for an invalid bus name or
    /// `EngineError::DbusError` if the proxies cannot be built.
    pub async fn for_player(connection: &Connection, id: PlayerId) -> Result<Self, EngineError> {
        let bus_name = id.owned_bus_name()?;

        let base_proxy = MediaPlayer2Proxy::builder(connection)
            .destination(bus_name.clone())?
            .build()
            .await?;

        let proxy = MediaPlayer2PlayerProxy::builder(connection)
            .destination(bus_name.clone())?
            .build()
            .await?;

        let properties = PropertiesProxy::builder(connection)
            .destination(bus_name)?
            .path(proxy.inner().path().to_owned())?
            .build()
            .await?;

        let identity = base_proxy
            .identity()
            .await
            .unwrap_or_else(|_| id.bus_name().to_string());

        debug!(player = %id, identity = %identity, "Attached to MPRIS player");

        Ok(Self {
            id,
            identity,
            proxy,
            properties,
        })
    }

    /// Bus name of the attached player.
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Human-readable name of the attached player.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    fn control_failed(action: &str, e: zbus::Error) -> EngineError {
        EngineError::ControlFailed(format!("{action} failed: {e}"))
    }
}

#[async_trait]
impl PlaybackEngine for MprisEngine {
    async fn play(&self) -> Result<(), EngineError> {
        self.proxy
            .play()
            .await
            .map_err(|e| Self::control_failed("Play", e))
    }

    async fn pause(&self) -> Result<(), EngineError> {
        self.proxy
            .pause()
            .await
            .map_err(|e| Self::control_failed("Pause", e))
    }

    async fn skip_to_next(&self) -> Result<(), EngineError> {
        self.proxy
            .next()
            .await
            .map_err(|e| Self::control_failed("Next", e))
    }

    async fn skip_to_previous(&self) -> Result<(), EngineError> {
        self.proxy
            .previous()
            .await
            .map_err(|e| Self::control_failed("Previous", e))
    }

    async fn seek_to_start(&self) -> Result<(), EngineError> {
        let track_id = self
            .current_item()
            .await?
            .and_then(|item| item.id)
            .map(|id| id.as_str().to_string())
            .unwrap_or_else(|| NO_TRACK_PATH.to_string());
        let track_path = ObjectPath::try_from(track_id.as_str())
            .map_err(|e| EngineError::ControlFailed(format!("Invalid track ID: {e}")))?;

        self.proxy
            .set_position(&track_path, 0)
            .await
            .map_err(|e| Self::control_failed("Set position", e))
    }

    async fn set_repeat_mode(&self, mode: EngineRepeatMode) -> Result<(), EngineError> {
        self.proxy
            .set_loop_status(conversion::loop_status(mode))
            .await
            .map_err(|e| Self::control_failed("Set loop status", e))
    }

    async fn set_shuffle_mode(&self, mode: ShuffleMode) -> Result<(), EngineError> {
        self.proxy
            .set_shuffle(mode.is_on())
            .await
            .map_err(|e| Self::control_failed("Set shuffle", e))
    }

    async fn current_item(&self) -> Result<Option<EngineItem>, EngineError> {
        let metadata = self.proxy.metadata().await?;
        Ok(conversion::item_from_metadata(metadata))
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>, EngineError> {
        let status = self.proxy.playback_status().await?;
        Ok(Some(conversion::playback_state(&status)))
    }

    async fn current_position(&self) -> Result<f64, EngineError> {
        let interface = InterfaceName::try_from(MPRIS_PLAYER_INTERFACE)
            .map_err(|e| EngineError::ControlFailed(format!("Invalid interface name: {e}")))?;
        let property = MemberName::try_from("Position")
            .map_err(|e| EngineError::ControlFailed(format!("Invalid property name: {e}")))?;

        let value = self
            .properties
            .get(interface, &property)
            .await
            .map_err(|e| EngineError::ControlFailed(format!("Failed to get position: {e}")))?;

        let micros = i64::try_from(&value)
            .map_err(|e| EngineError::ControlFailed(format!("Failed to parse position: {e}")))?;

        Ok(conversion::micros_to_secs(micros))
    }

    async fn shuffle_mode(&self) -> Result<ShuffleMode, EngineError> {
        Ok(ShuffleMode::from(self.proxy.shuffle().await?))
    }

    async fn repeat_mode(&self) -> Result<EngineRepeatMode, EngineError> {
        let status = self.proxy.loop_status().await?;
        Ok(conversion::repeat_mode(&status))
    }

    async fn subscribe(&self) -> Result<EngineEvents, EngineError> {
        let mut status_changes = self.proxy.receive_playback_status_changed().await;
        let mut metadata_changes = self.proxy.receive_metadata_changed().await;

        let events = stream! {
            loop {
                tokio::select! {
                    Some(change) = status_changes.next() => {
                        let state = change
                            .get()
                            .await
                            .ok()
                            .map(|status| conversion::playback_state(&status));
                        yield EngineEvent::PlaybackStateChanged(state);
                    }

                    Some(change) = metadata_changes.next() => {
                        if let Ok(metadata) = change.get().await {
                            yield EngineEvent::NowPlayingItemChanged(
                                conversion::item_from_metadata(metadata),
                            );
                        }
                    }

                    else => break,
                }
            }
        };

        Ok(events.boxed())
    }
}
