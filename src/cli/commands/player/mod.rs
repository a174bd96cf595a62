/// Media player commands
mod info;
mod list;
mod next;
mod play_pause;
mod previous;
mod repeat;
mod shuffle;
mod utils;
mod watch;

use std::sync::Arc;

pub use info::InfoCommand;
pub use list::ListCommand;
pub use next::NextCommand;
pub use play_pause::PlayPauseCommand;
pub use previous::PreviousCommand;
pub use repeat::RepeatCommand;
pub use shuffle::ShuffleCommand;
pub use watch::WatchCommand;

use crate::{cli::CommandRegistry, config::Config};

/// Registers all player commands with the command registry
///
/// Registers commands in the "player" category for inspecting and
/// controlling MPRIS players.
pub fn register_commands(registry: &mut CommandRegistry, config: Arc<Config>) {
    const CATEGORY_NAME: &str = "player";

    registry.register_command(CATEGORY_NAME, Box::new(ListCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(InfoCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(PlayPauseCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(NextCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(PreviousCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(RepeatCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(ShuffleCommand::new(config.clone())));
    registry.register_command(CATEGORY_NAME, Box::new(WatchCommand::new(config)));
}
