mod file_creation;

use std::{fs, path::Path};

use file_creation::create_default_config_file;
use tracing::{debug, instrument};

use super::{Config, ConfigPaths};
use crate::{NowPlayingError, Result};

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// Writes a commented default file first when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be resolved, the file
    /// cannot be read or created, or the TOML content is invalid.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load_from(&path)
    }

    /// Loads a configuration file, creating a default one if it is missing.
    ///
    /// Fields that are absent from the file fall back to their defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file cannot be read or created
    /// - The TOML content is invalid
    #[instrument]
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            debug!("No configuration file, writing defaults");
            create_default_config_file(path)?;
        }

        let content = fs::read_to_string(path).map_err(|e| NowPlayingError::io_at(e, path))?;

        toml::from_str(&content).map_err(|e| NowPlayingError::toml_parse(e, Some(path)))
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `NowPlayingError::TomlParseError` if the content is invalid.
    pub fn from_toml_str(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| NowPlayingError::toml_parse(e, None))
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `NowPlayingError::TomlSerialize` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// JSON schema describing the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be rendered as JSON.
    pub fn json_schema() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema)
    }
}
