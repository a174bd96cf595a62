//! Configuration schema definitions and loading.
//!
//! Defines the configuration structure for nowplaying: general settings
//! and the player session settings. All configurations are serializable
//! to/from TOML format.

mod general;
mod loading;
mod paths;
mod player;

#[cfg(test)]
mod tests;

pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use player::PlayerConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for nowplaying.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Player session settings.
    #[serde(default)]
    pub player: PlayerConfig,
}
