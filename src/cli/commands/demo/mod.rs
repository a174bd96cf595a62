/// Offline demonstration commands
mod run;

use std::sync::Arc;

pub use run::RunCommand;

use crate::{cli::CommandRegistry, config::Config};

/// Registers the demo commands in the "demo" category.
pub fn register_commands(registry: &mut CommandRegistry, config: Arc<Config>) {
    const CATEGORY_NAME: &str = "demo";

    registry.register_command(CATEGORY_NAME, Box::new(RunCommand::new(config)));
}
