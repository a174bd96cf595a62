use std::{fs, path::Path};

use crate::{NowPlayingError, Result};

const DEFAULT_CONFIG: &str = "\
# nowplaying configuration file

# [general]
# log_level = \"info\"

# [player]
# position_poll_interval_ms = 1000
# preferred_player = \"spotify\"
# ignored_players = [\"firefox\"]
";

/// Creates a default configuration file if it doesn't exist
pub fn create_default_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| NowPlayingError::io_at(e, parent))?;
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| NowPlayingError::io_at(e, path))?;

    Ok(())
}
