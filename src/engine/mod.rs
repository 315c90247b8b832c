pub mod gst_engine;
pub mod position;
#[cfg(test)]
pub mod testing;

use std::time::Duration;

use crate::error::Result;
use crate::types::audio_source::AudioSource;
use crate::types::playback_status::EngineStatus;

use self::position::PositionSink;

/// The media engine a session drives. Decoding, timing and audio output all
/// happen behind this trait.
pub trait PlaybackEngine {
    /// False when the engine accepted the source but found nothing playable.
    fn has_source(&self) -> bool;

    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;

    /// Valid in any state; does not start playback.
    fn seek(&mut self, offset: Duration) -> Result<()>;

    fn start_offset(&self) -> Duration {
        Duration::ZERO
    }

    fn position(&self) -> Option<Duration>;

    /// `None` until the engine has worked out the length of the source.
    fn duration(&self) -> Option<Duration>;

    /// Output gain in `0.0..=1.0`.
    fn set_volume(&mut self, gain: f64);

    fn status(&self) -> EngineStatus;

    /// Starts pushing position notifications into `sink` from the engine's
    /// own thread.
    fn watch_position(&mut self, sink: PositionSink);

    /// Frees the underlying pipeline. Further calls are no-ops.
    fn release(&mut self);
}

/// Builds one engine per opened file.
pub trait EngineFactory {
    fn load(&self, source: &AudioSource) -> Result<Box<dyn PlaybackEngine>>;
}
