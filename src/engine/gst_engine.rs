use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use gst::prelude::*;
use gstreamer as gst;
use tracing::{debug, error, info, trace, warn};

use crate::engine::position::PositionSink;
use crate::engine::{EngineFactory, PlaybackEngine};
use crate::error::Result;
use crate::types::audio_source::AudioSource;
use crate::types::playback_status::EngineStatus;

/// Creates a `playbin` pipeline per opened file.
#[derive(Debug, Clone)]
pub struct GstEngineFactory {
    position_interval: Duration,
}

impl GstEngineFactory {
    pub fn new(position_interval: Duration) -> Self {
        Self { position_interval }
    }
}

impl EngineFactory for GstEngineFactory {
    fn load(&self, source: &AudioSource) -> Result<Box<dyn PlaybackEngine>> {
        let engine = GstEngine::load(source, self.position_interval)?;
        Ok(Box::new(engine))
    }
}

type SinkSlot = Arc<Mutex<Option<PositionSink>>>;

pub struct GstEngine {
    playbin: gst::Element,
    uri: String,
    status: EngineStatus,
    /// Cleared on release; the pipeline watcher exits when it sees that.
    alive: Arc<AtomicBool>,
    /// Set when the pipeline refused to pre-roll or posted an error.
    failed: Arc<AtomicBool>,
    position_sink: SinkSlot,
}

impl GstEngine {
    /// Starts pre-rolling and returns without waiting for it. Duration stays
    /// unknown until the pipeline reaches PAUSED.
    pub fn load(source: &AudioSource, position_interval: Duration) -> Result<Self> {
        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", source.uri())
            .build()?;

        let failed = Arc::new(AtomicBool::new(false));
        match playbin.set_state(gst::State::Paused) {
            Ok(success) => debug!(uri = source.uri(), ?success, "pre-roll started"),
            Err(err) => {
                warn!(uri = source.uri(), error = %err, "pipeline refused to pause");
                failed.store(true, Ordering::Release);
            }
        }

        let engine = Self {
            playbin,
            uri: source.uri().to_string(),
            status: EngineStatus::Ready,
            alive: Arc::new(AtomicBool::new(true)),
            failed,
            position_sink: Arc::new(Mutex::new(None)),
        };
        engine.spawn_watcher(position_interval);
        Ok(engine)
    }

    /// One thread per pipeline: drains the bus and, once a sink is
    /// installed, reports the position while playing.
    fn spawn_watcher(&self, interval: Duration) {
        let playbin = self.playbin.clone();
        let uri = self.uri.clone();
        let alive = Arc::clone(&self.alive);
        let failed = Arc::clone(&self.failed);
        let slot = Arc::clone(&self.position_sink);

        let spawned = thread::Builder::new()
            .name("playbin-watch".to_string())
            .spawn(move || {
                let bus = playbin.bus();
                while alive.load(Ordering::Acquire) {
                    thread::sleep(interval);
                    if let Some(bus) = &bus {
                        drain_bus(bus, &uri, &failed);
                    }
                    if playbin.current_state() == gst::State::Playing {
                        report_position(&playbin, &slot);
                    }
                }
                trace!(uri, "pipeline watcher finished");
            });
        if let Err(err) = spawned {
            warn!(uri = %self.uri, error = %err, "could not start pipeline watcher");
        }
    }
}

/// Logs pending errors, warnings and end-of-stream. Other message types are
/// discarded so the bus does not grow for the life of the session.
fn drain_bus(bus: &gst::Bus, uri: &str, failed: &AtomicBool) {
    use gst::MessageView;

    let types = [
        gst::MessageType::Error,
        gst::MessageType::Warning,
        gst::MessageType::Eos,
    ];
    while let Some(msg) = bus.pop_filtered(&types) {
        let origin = msg.src().map(|s| s.path_string().to_string());
        match msg.view() {
            MessageView::Error(err) => {
                failed.store(true, Ordering::Release);
                error!(
                    uri,
                    ?origin,
                    error = %err.error(),
                    debug = ?err.debug(),
                    "playback error"
                );
            }
            MessageView::Warning(w) => {
                warn!(uri, ?origin, warning = %w.error(), debug = ?w.debug(), "playback warning");
            }
            MessageView::Eos(..) => info!(uri, "end of stream"),
            _ => (),
        }
    }
}

fn report_position(playbin: &gst::Element, slot: &SinkSlot) {
    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
    let Some(sink) = slot.as_ref() else {
        return;
    };
    let Some(position) = playbin.query_position::<gst::ClockTime>() else {
        return;
    };
    let duration = playbin.query_duration::<gst::ClockTime>().map(to_duration);
    if !sink.send(to_duration(position), duration) {
        *slot = None;
    }
}

impl PlaybackEngine for GstEngine {
    fn has_source(&self) -> bool {
        !self.uri.is_empty() && !self.failed.load(Ordering::Acquire)
    }

    fn play(&mut self) -> Result<()> {
        self.playbin.set_state(gst::State::Playing)?;
        self.status = EngineStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playbin.set_state(gst::State::Paused)?;
        self.status = EngineStatus::Paused;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // READY would drop the stream and make later seeks fail, so stop is
        // a pause rewound to the start.
        self.playbin.set_state(gst::State::Paused)?;
        self.seek(self.start_offset())?;
        self.status = EngineStatus::Stopped;
        Ok(())
    }

    fn seek(&mut self, offset: Duration) -> Result<()> {
        self.playbin.seek_simple(
            gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT,
            to_clock_time(offset),
        )?;
        Ok(())
    }

    fn position(&self) -> Option<Duration> {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(to_duration)
    }

    fn duration(&self) -> Option<Duration> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(to_duration)
    }

    fn set_volume(&mut self, gain: f64) {
        self.playbin.set_property("volume", gain.clamp(0.0, 1.0));
    }

    fn status(&self) -> EngineStatus {
        self.status
    }

    fn watch_position(&mut self, sink: PositionSink) {
        let mut slot = self
            .position_sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(sink);
    }

    fn release(&mut self) {
        if !self.alive.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Err(err) = self.playbin.set_state(gst::State::Null) {
            warn!(uri = %self.uri, error = %err, "pipeline did not shut down cleanly");
        }
        self.status = EngineStatus::Stopped;
        debug!(uri = %self.uri, "playbin released");
    }
}

impl Drop for GstEngine {
    fn drop(&mut self) {
        self.release();
    }
}

fn to_duration(time: gst::ClockTime) -> Duration {
    Duration::from_nanos(time.nseconds())
}

fn to_clock_time(offset: Duration) -> gst::ClockTime {
    gst::ClockTime::from_nseconds(offset.as_nanos().min(u64::MAX as u128) as u64)
}
