use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Player session configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// How often the playback position is polled from the engine, in milliseconds.
    pub position_poll_interval_ms: u64,

    /// Substring of the MPRIS bus name to prefer when several players are running.
    pub preferred_player: Option<String>,

    /// List of player bus name patterns to ignore during discovery
    pub ignored_players: Vec<String>,
}

impl PlayerConfig {
    /// Position polling period as a [`Duration`].
    ///
    /// A zero interval would spin the poller, so it is raised to one millisecond.
    pub fn position_poll_interval(&self) -> Duration {
        Duration::from_millis(self.position_poll_interval_ms.max(1))
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            position_poll_interval_ms: 1000,
            preferred_player: None,
            ignored_players: Vec::new(),
        }
    }
}
