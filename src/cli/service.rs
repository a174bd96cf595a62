use std::sync::Arc;

use super::{
    CliError, CommandRegistry,
    formatting::{
        format_category, format_command, format_description, format_header, format_subheader,
        format_usage,
    },
};
use crate::config::Config;

const BINARY_NAME: &str = "nowplaying";

/// High-level service for managing and executing CLI commands.
///
/// Owns the registry and renders help from command metadata.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    ///
    /// The configuration is shared by every command that needs it.
    pub fn new(config: Config) -> Self {
        let mut registry = CommandRegistry::new(Arc::new(config));
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// The `help` category renders help text instead of dispatching.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the command doesn't exist, or
    /// whatever the command itself returns.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        if category == "help" || category == "--help" || category == "-h" {
            let topic = Some(command_name).filter(|name| !name.is_empty());
            return self.help(topic);
        }

        if command_name.is_empty() || command_name == "help" {
            return self.help(Some(category));
        }

        self.registry.execute(category, command_name, args).await
    }

    /// Lists all available commands organized by category.
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Help for all categories, or the full reference of one category.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` for an unknown category.
    pub fn help(&self, category: Option<&str>) -> Result<String, CliError> {
        let Some(category) = category else {
            return Ok(self.overview());
        };

        let metadata = self.registry.category_metadata(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let mut output = format!("{}\n\n", format_header(&format!("{BINARY_NAME} {category}")));

        for command in metadata {
            let usage: Vec<String> = command
                .args
                .iter()
                .map(|arg| {
                    if arg.required {
                        format!("<{}>", arg.name)
                    } else {
                        format!("[{}]", arg.name)
                    }
                })
                .collect();

            output.push_str(&format!(
                "  {} {}\n      {}\n",
                format_command(&command.name),
                usage.join(" "),
                format_description(&command.description)
            ));

            for arg in &command.args {
                output.push_str(&format!(
                    "      {} ({}): {}\n",
                    arg.name,
                    arg.value_type.label(),
                    format_description(&arg.description)
                ));
            }

            for example in &command.examples {
                output.push_str(&format!("      {}\n", format_usage(example)));
            }

            output.push('\n');
        }

        Ok(output.trim_end().to_string())
    }

    fn overview(&self) -> String {
        let mut output = format!(
            "{}\n\n{}\n  {BINARY_NAME} <category> <command> [args...]\n\n{}\n",
            format_header("Now-playing mirror and transport controls"),
            format_subheader("Usage:"),
            format_subheader("Commands:")
        );

        for (category, commands) in self.list_all() {
            let names: Vec<String> = commands.iter().map(|name| format_command(name)).collect();
            output.push_str(&format!(
                "  {} {}\n",
                format_category(&format!("{category:<8}")),
                names.join(", ")
            ));
        }

        output.push_str(&format!(
            "\n{}",
            format_usage(&format!("Run '{BINARY_NAME} help <category>' for details."))
        ));

        output
    }
}
