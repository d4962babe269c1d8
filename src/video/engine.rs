use std::path::Path;

/// The media engine the window drives. It owns decoding, rendering and its own playback
/// state; callers only forward requests and read back position and duration.
///
/// Failures stay inside the engine: none of these calls report errors to the caller.
pub trait PlaybackEngine {
    fn set_source(&mut self, path: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    /// Stops playback and rewinds to the start.
    fn stop(&mut self);
    fn is_playing(&self) -> bool;

    fn set_position(&mut self, position_ms: i64);
    /// Current position in milliseconds, 0 when unknown.
    fn position(&self) -> i64;
    /// Stream duration in milliseconds, 0 when unknown.
    fn duration(&self) -> i64;

    /// Linear volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f64);
}
