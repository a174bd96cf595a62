/// Errors a playback engine can report.
///
/// The mirror and transport controller absorb these; they only reach callers
/// that talk to an engine directly.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// No media player is available on the session bus
    #[error("No media player found")]
    NoPlayer,

    /// Player matching the given name was not found
    #[error("Player {0:?} not found")]
    PlayerNotFound(String),

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// The engine did not accept the request
    #[error("Engine unreachable: {0}")]
    Unreachable(String),

    /// The engine doesn't support the requested operation
    #[error("Operation not supported: {0}")]
    OperationNotSupported(String),

    /// Failed to control the player
    #[error("Failed to control player: {0}")]
    ControlFailed(String),
}
