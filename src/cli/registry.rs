use std::{collections::HashMap, sync::Arc};

use super::{
    CliError, Command,
    commands::{config, demo, player},
    types::CommandMetadata,
};
use crate::config::Config;

/// Registry for CLI commands organized by category.
///
/// Commands are grouped by category so the entry point can dispatch on the
/// first two words of the command line.
///
/// ```text
/// registry
/// ├── config
/// │   ├── schema
/// │   └── show
/// ├── demo
/// │   └── run
/// └── player
///     ├── info
///     ├── list
///     ├── next
///     ├── play-pause
///     ├── previous
///     ├── repeat
///     ├── shuffle
///     └── watch
/// ```
pub struct CommandRegistry {
    /// category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
    config: Arc<Config>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    ///
    /// Commands are added with [`register_command`](Self::register_command)
    /// or all at once with [`register_all_commands`](Self::register_all_commands).
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            categories: HashMap::new(),
            config,
        }
    }

    /// Registers a command in the specified category.
    ///
    /// A command with the same name in the same category is replaced.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or the command
    /// doesn't exist and `CliError::InvalidArguments` if the argument count
    /// doesn't fit the command. Other errors come from the command itself.
    pub async fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!(
                "Failed to find command '{command_name}' in '{category}'"
            ))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args).await
    }

    /// Lists all registered commands organized by category.
    ///
    /// Categories and commands are sorted alphabetically.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        let mut categories: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut command_list: Vec<String> = commands.keys().cloned().collect();
                command_list.sort();

                (category.clone(), command_list)
            })
            .collect();

        categories.sort();

        categories
    }

    /// Metadata for every command in `category`, sorted by name.
    pub fn category_metadata(&self, category: &str) -> Option<Vec<CommandMetadata>> {
        let commands = self.categories.get(category)?;
        let mut metadata: Vec<CommandMetadata> =
            commands.values().map(|command| command.metadata()).collect();
        metadata.sort_by(|a, b| a.name.cmp(&b.name));

        Some(metadata)
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers all available CLI commands in their respective categories.
    pub fn register_all_commands(&mut self) {
        let config = self.config.clone();

        config::register_commands(self, config.clone());
        player::register_commands(self, config.clone());
        demo::register_commands(self, config);
    }
}
