use std::fmt;

use tracing::{debug, instrument};
use zbus::{Connection, fdo::DBusProxy, names::OwnedBusName};

use super::proxy::MediaPlayer2Proxy;
use crate::services::playback::EngineError;

const MPRIS_BUS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Unique identifier for an MPRIS player: its D-Bus bus name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a PlayerId from a D-Bus bus name
    pub fn from_bus_name(bus_name: &str) -> Self {
        Self(bus_name.to_string())
    }

    /// Get the D-Bus bus name
    pub fn bus_name(&self) -> &str {
        &self.0
    }

    pub(crate) fn owned_bus_name(&self) -> Result<OwnedBusName, EngineError> {
        OwnedBusName::try_from(self.0.as_str())
            .map_err(|e| EngineError::PlayerNotFound(format!("{}: {e}", self.0)))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player found on the session bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    /// Bus name of the player
    pub id: PlayerId,

    /// Human-readable application name, the bus name when unavailable
    pub identity: String,
}

/// Lists the MPRIS players currently on the session bus.
///
/// Players whose bus name contains any of `ignored_patterns` are skipped.
/// Results are sorted by bus name so indices are stable between calls.
///
/// # Errors
///
/// Returns `EngineError::DbusError` if the bus cannot be queried.
#[instrument(skip(connection))]
pub async fn list_players(
    connection: &Connection,
    ignored_patterns: &[String],
) -> Result<Vec<PlayerSummary>, EngineError> {
    let dbus_proxy = DBusProxy::new(connection).await?;
    let names = dbus_proxy
        .list_names()
        .await
        .map_err(|e| EngineError::DbusError(e.into()))?;

    let mut ids: Vec<PlayerId> = names
        .iter()
        .map(|name| name.as_str())
        .filter(|name| name.starts_with(MPRIS_BUS_PREFIX))
        .filter(|name| !should_ignore(name, ignored_patterns))
        .map(PlayerId::from_bus_name)
        .collect();
    ids.sort_by(|a, b| a.bus_name().cmp(b.bus_name()));

    let mut players = Vec::with_capacity(ids.len());
    for id in ids {
        let identity = player_identity(connection, &id).await;
        players.push(PlayerSummary { id, identity });
    }

    debug!(count = players.len(), "Discovered MPRIS players");
    Ok(players)
}

async fn player_identity(connection: &Connection, id: &PlayerId) -> String {
    let fallback = || id.bus_name().to_string();

    let Ok(bus_name) = id.owned_bus_name() else {
        return fallback();
    };
    let Ok(builder) = MediaPlayer2Proxy::builder(connection).destination(bus_name) else {
        return fallback();
    };
    let Ok(proxy) = builder.build().await else {
        return fallback();
    };

    proxy.identity().await.unwrap_or_else(|_| fallback())
}

/// Picks a player from `players`.
///
/// An identifier that parses as a number is a 1-based index; anything else
/// is a case-insensitive substring of the identity or bus name and must match
/// exactly one player. Without an identifier, the first player matching
/// `preferred` wins, then the first player overall.
///
/// # Errors
///
/// Returns `EngineError::NoPlayer` when the list is empty and
/// `EngineError::PlayerNotFound` when the identifier matches nothing or
/// more than one player.
pub fn select_player<'a>(
    players: &'a [PlayerSummary],
    identifier: Option<&str>,
    preferred: Option<&str>,
) -> Result<&'a PlayerSummary, EngineError> {
    if players.is_empty() {
        return Err(EngineError::NoPlayer);
    }

    let Some(identifier) = identifier else {
        let preferred = preferred.and_then(|pattern| {
            players
                .iter()
                .find(|player| matches_identifier(player, &pattern.to_lowercase()))
        });
        return Ok(preferred.unwrap_or(&players[0]));
    };

    if let Ok(index) = identifier.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|index| players.get(index))
            .ok_or_else(|| {
                EngineError::PlayerNotFound(format!(
                    "index {identifier} (valid range: 1-{})",
                    players.len()
                ))
            });
    }

    let needle = identifier.to_lowercase();
    let matches: Vec<&PlayerSummary> = players
        .iter()
        .filter(|player| matches_identifier(player, &needle))
        .collect();

    match matches.as_slice() {
        [] => Err(EngineError::PlayerNotFound(identifier.to_string())),
        [single] => Ok(single),
        many => {
            let names: Vec<&str> = many.iter().map(|p| p.identity.as_str()).collect();
            Err(EngineError::PlayerNotFound(format!(
                "'{identifier}' is ambiguous: {}",
                names.join(", ")
            )))
        }
    }
}

fn matches_identifier(player: &PlayerSummary, needle: &str) -> bool {
    player.identity.to_lowercase().contains(needle)
        || player.id.bus_name().to_lowercase().contains(needle)
}

fn should_ignore(bus_name: &str, ignored_patterns: &[String]) -> bool {
    ignored_patterns
        .iter()
        .any(|pattern| bus_name.contains(pattern.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> Vec<PlayerSummary> {
        [
            ("org.mpris.MediaPlayer2.firefox.instance_1_42", "Mozilla Firefox"),
            ("org.mpris.MediaPlayer2.spotify", "Spotify"),
            ("org.mpris.MediaPlayer2.vlc", "VLC media player"),
        ]
        .into_iter()
        .map(|(bus, identity)| PlayerSummary {
            id: PlayerId::from_bus_name(bus),
            identity: identity.to_string(),
        })
        .collect()
    }

    #[test]
    fn selects_by_index() {
        let players = players();
        let selected = select_player(&players, Some("2"), None).unwrap();
        assert_eq!(selected.identity, "Spotify");
    }

    #[test]
    fn index_out_of_range_fails() {
        let players = players();
        assert!(select_player(&players, Some("0"), None).is_err());
        assert!(select_player(&players, Some("4"), None).is_err());
    }

    #[test]
    fn selects_by_partial_name() {
        let players = players();
        let selected = select_player(&players, Some("FIRE"), None).unwrap();
        assert_eq!(selected.identity, "Mozilla Firefox");
    }

    #[test]
    fn ambiguous_name_fails() {
        let players = players();
        let error = select_player(&players, Some("i"), None).unwrap_err();
        assert!(error.to_string().contains("ambiguous"));
    }

    #[test]
    fn preferred_player_wins_without_identifier() {
        let players = players();
        let selected = select_player(&players, None, Some("vlc")).unwrap();
        assert_eq!(selected.identity, "VLC media player");

        let selected = select_player(&players, None, Some("nothing")).unwrap();
        assert_eq!(selected.identity, "Mozilla Firefox");
    }

    #[test]
    fn empty_list_has_no_player() {
        assert!(matches!(
            select_player(&[], None, None),
            Err(EngineError::NoPlayer)
        ));
    }

    #[test]
    fn ignore_patterns_match_substrings() {
        let ignored = vec!["firefox".to_string()];
        assert!(should_ignore(
            "org.mpris.MediaPlayer2.firefox.instance_1_42",
            &ignored
        ));
        assert!(!should_ignore("org.mpris.MediaPlayer2.spotify", &ignored));
    }
}
