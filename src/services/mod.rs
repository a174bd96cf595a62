/// Reactive primitives shared by services
pub mod common;
/// Now-playing mirror and transport control over a playback engine
pub mod playback;
