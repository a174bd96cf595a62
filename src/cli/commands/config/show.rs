use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::{Config, ConfigPaths},
};

/// Command for printing the effective configuration as TOML.
///
/// # Example Usage
///
/// ```bash
/// nowplaying config show
/// nowplaying config show player
/// ```
pub struct ShowCommand {
    /// Configuration loaded at startup.
    config: Arc<Config>,
}

impl ShowCommand {
    /// Creates a new ShowCommand over the loaded configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn section(&self, name: &str) -> Result<String, CliError> {
        let rendered = match name {
            "general" => toml::to_string_pretty(&self.config.general),
            "player" => toml::to_string_pretty(&self.config.player),
            _ => {
                return Err(CliError::InvalidArgument {
                    arg: "section".to_string(),
                    reason: format!("Unknown section '{name}'. Expected 'general' or 'player'"),
                });
            }
        };

        rendered.map_err(|e| CliError::ConfigError(e.to_string()))
    }
}

#[async_trait]
impl Command for ShowCommand {
    /// Prints the whole configuration, or one section of it.
    ///
    /// # Errors
    ///
    /// * `CliError::InvalidArgument` - If the section name is unknown
    /// * `CliError::ConfigError` - If serialization fails
    async fn execute(&self, args: &[String]) -> CommandResult {
        if let Some(section) = args.first() {
            return Ok(format!("[{section}]\n{}", self.section(section)?));
        }

        let body = self
            .config
            .to_toml_string()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let source = ConfigPaths::main_config()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|_| "<unresolved>".to_string());

        Ok(format!("# {source}\n{body}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "show".to_string(),
            description: "Print the effective configuration".to_string(),
            category: "config".to_string(),
            args: vec![CommandArg {
                name: "section".to_string(),
                description: "Only print this section (general, player)".to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec![
                "nowplaying config show".to_string(),
                "nowplaying config show player".to_string(),
            ],
        }
    }
}
