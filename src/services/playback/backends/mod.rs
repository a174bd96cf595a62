/// In-process engine and library, used by the demo and tests.
pub mod memory;
/// MPRIS player on the D-Bus session bus.
pub mod mpris;

pub use memory::{InMemoryLibrary, MemoryEngine};
pub use mpris::{MprisEngine, PlayerId, PlayerSummary, list_players, select_player};
