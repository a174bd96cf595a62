//! nowplaying - a live mirror of a media player's now-playing state.
//!
//! A [`NowPlayingMirror`](services::playback::NowPlayingMirror) caches what a
//! playback engine is doing (current song, transport state, position, repeat
//! and shuffle) and publishes every change as a stream. A
//! [`TransportController`](services::playback::TransportController) turns
//! user intents into engine commands. Engines are pluggable: MPRIS players on
//! the D-Bus session bus, or an in-memory engine for tests and demos.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use nowplaying::{
//!     config::Config,
//!     services::playback::{MprisEngine, PlaybackEngine, PlayerSession},
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let engine: Arc<dyn PlaybackEngine> =
//!     Arc::new(MprisEngine::connect(&config.player, None).await?);
//!
//! let session = PlayerSession::start(engine, &config.player).await;
//! println!("Now playing: {}", session.mirror().current().title);
//! # Ok(())
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Command-line interface for player inspection and control.
pub mod cli;

/// Reactive services for playback mirroring.
pub mod services;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{NowPlayingError, Result};
