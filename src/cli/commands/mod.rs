/// Configuration commands
pub mod config;
/// Offline demo commands
pub mod demo;
/// Media player commands
pub mod player;
