use std::collections::HashMap;

use zbus::zvariant::{Array, ObjectPath, OwnedValue};

use crate::services::playback::{
    core::Artwork,
    engine::EngineItem,
    types::{EngineRepeatMode, PlaybackState, TrackId},
};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Map an MPRIS `PlaybackStatus` string.
pub(crate) fn playback_state(status: &str) -> PlaybackState {
    match status {
        "Playing" => PlaybackState::Playing,
        "Paused" => PlaybackState::Paused,
        "Stopped" => PlaybackState::Stopped,
        _ => PlaybackState::Unknown,
    }
}

/// Map an MPRIS `LoopStatus` string; unknown values read as no repeat.
pub(crate) fn repeat_mode(status: &str) -> EngineRepeatMode {
    match status {
        "Playlist" => EngineRepeatMode::All,
        "Track" => EngineRepeatMode::One,
        _ => EngineRepeatMode::None,
    }
}

/// The MPRIS `LoopStatus` string for a repeat mode.
pub(crate) fn loop_status(mode: EngineRepeatMode) -> &'static str {
    match mode {
        EngineRepeatMode::None => "None",
        EngineRepeatMode::All => "Playlist",
        EngineRepeatMode::One => "Track",
    }
}

/// Signed microseconds to signed seconds.
pub(crate) fn micros_to_secs(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_SECOND
}

/// Build an engine item from an MPRIS metadata map.
///
/// An empty map means no item is loaded.
pub(crate) fn item_from_metadata(metadata: HashMap<String, OwnedValue>) -> Option<EngineItem> {
    if metadata.is_empty() {
        return None;
    }

    Some(EngineItem {
        id: metadata
            .get("mpris:trackid")
            .and_then(extract_track_id)
            .map(TrackId::new),
        title: metadata.get("xesam:title").and_then(extract_string),
        album_title: metadata.get("xesam:album").and_then(extract_string),
        artist: metadata.get("xesam:artist").and_then(extract_string_array),
        artwork: metadata
            .get("mpris:artUrl")
            .and_then(extract_string)
            .filter(|url| !url.is_empty())
            .map(Artwork::Url),
        duration: metadata.get("mpris:length").and_then(extract_duration),
    })
}

fn extract_string(value: &OwnedValue) -> Option<String> {
    value.downcast_ref::<&str>().ok().map(str::to_string)
}

fn extract_track_id(value: &OwnedValue) -> Option<String> {
    if let Ok(path) = value.downcast_ref::<ObjectPath<'_>>() {
        return Some(path.as_str().to_string());
    }
    extract_string(value)
}

fn extract_string_array(value: &OwnedValue) -> Option<String> {
    if let Ok(array) = value.downcast_ref::<&Array<'_>>() {
        let strings: Vec<String> = array
            .iter()
            .filter_map(|item| item.downcast_ref::<&str>().ok().map(str::to_string))
            .collect();

        if !strings.is_empty() {
            return Some(strings.join(", "));
        }
    }

    extract_string(value)
}

fn extract_duration(value: &OwnedValue) -> Option<f64> {
    if let Ok(length) = value.downcast_ref::<i64>()
        && length > 0
    {
        return Some(micros_to_secs(length));
    }

    if let Ok(length) = value.downcast_ref::<u64>()
        && length > 0
    {
        return Some(length as f64 / MICROS_PER_SECOND);
    }

    None
}
