use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
///
/// Each variant carries enough context for the user to see what went wrong
/// without a backtrace.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// The argument count did not match the command's metadata.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A single argument had an unusable value.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why it was rejected
        reason: String,
    },

    /// An error occurred in the configuration system.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A service the command depends on failed.
    #[error("{service} service error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// Underlying error message
        details: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for command execution results.
///
/// All CLI commands return this type: the text to print on success or a
/// [`CliError`] describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "player-id").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument for help display.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A numeric value.
    Number,
}

impl ArgType {
    /// Short label shown next to the argument in help text.
    pub fn label(self) -> &'static str {
        match self {
            ArgType::String => "string",
            ArgType::Number => "number",
        }
    }
}

/// Complete metadata for a CLI command.
///
/// The CLI uses this for help generation, argument count validation and
/// command discovery.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "list", "watch").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "player", "config").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against
    /// [`metadata`](Self::metadata); the command validates values.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values, service failures
    /// or I/O failures.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
