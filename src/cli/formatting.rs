//! Formatting utilities for CLI output.
//!
//! Styled help text plus the small renderers the player commands share
//! for times and progress.

use crate::services::playback::{NowPlayingSong, PlaybackPosition};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

const PROGRESS_WIDTH: usize = 20;

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats subheaders with styling
pub fn format_subheader(text: &str) -> String {
    format!(
        "{}{}{}{}",
        Colors::BOLD,
        Colors::YELLOW,
        text,
        Colors::RESET
    )
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats category names with styling
pub fn format_category(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::BLUE, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats usage examples with styling
pub fn format_usage(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Negative and non-finite values render as `0:00`.
///
/// ```
/// use nowplaying::cli::formatting::format_time;
///
/// assert_eq!(format_time(65.4), "1:05");
/// assert_eq!(format_time(3725.0), "1:02:05");
/// assert_eq!(format_time(-3.0), "0:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Renders `elapsed / duration` with a text progress bar.
///
/// A position reported during a seek shows as `seeking` instead of a time.
pub fn format_progress(song: &NowPlayingSong, position: PlaybackPosition) -> String {
    let Some(elapsed) = position.elapsed() else {
        return format!("[{}] seeking / {}", "-".repeat(PROGRESS_WIDTH), format_time(song.duration));
    };

    let elapsed = elapsed.as_secs_f64();
    let filled = (song.progress(elapsed) * PROGRESS_WIDTH as f64).round() as usize;
    let filled = filled.min(PROGRESS_WIDTH);

    format!(
        "[{}{}] {} / {}",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled),
        format_time(elapsed),
        format_time(song.duration)
    )
}
