//! Scripted engine for exercising the transport without GStreamer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::engine::position::PositionSink;
use crate::engine::{EngineFactory, PlaybackEngine};
use crate::error::{PlayerError, Result};
use crate::types::audio_source::AudioSource;
use crate::types::playback_status::EngineStatus;

/// Every engine call, tagged with the engine it went to. Engines are
/// numbered from 1 in load order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(u32, String),
    Play(u32),
    Pause(u32),
    Stop(u32),
    Seek(u32, Duration),
    Volume(u32, f64),
    Watch(u32),
    Release(u32),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct ScriptedFactory {
    pub log: CallLog,
    pub has_source: bool,
    pub duration: Option<Duration>,
    pub fail_load: bool,
    /// Engines refuse `play` and `stop`, as a pipeline that cannot change
    /// state would.
    pub fail_play: bool,
    pub fail_stop: bool,
    pub sinks: Rc<RefCell<Vec<PositionSink>>>,
    next_id: Cell<u32>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            has_source: true,
            duration: Some(Duration::from_secs(200)),
            fail_load: false,
            fail_play: false,
            fail_stop: false,
            sinks: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(1),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }
}

impl EngineFactory for ScriptedFactory {
    fn load(&self, source: &AudioSource) -> Result<Box<dyn PlaybackEngine>> {
        if self.fail_load {
            return Err(PlayerError::Engine("no element \"playbin\"".to_string()));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.log
            .borrow_mut()
            .push(Call::Load(id, source.file_name().to_string()));
        Ok(Box::new(ScriptedEngine {
            id,
            log: Rc::clone(&self.log),
            sinks: Rc::clone(&self.sinks),
            has_source: self.has_source,
            fail_play: self.fail_play,
            fail_stop: self.fail_stop,
            duration: self.duration,
            position: Duration::ZERO,
            status: EngineStatus::Ready,
            released: false,
        }))
    }
}

pub struct ScriptedEngine {
    id: u32,
    log: CallLog,
    sinks: Rc<RefCell<Vec<PositionSink>>>,
    has_source: bool,
    fail_play: bool,
    fail_stop: bool,
    duration: Option<Duration>,
    position: Duration,
    status: EngineStatus,
    released: bool,
}

impl ScriptedEngine {
    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }
}

impl PlaybackEngine for ScriptedEngine {
    fn has_source(&self) -> bool {
        self.has_source
    }

    fn play(&mut self) -> Result<()> {
        self.record(Call::Play(self.id));
        if self.fail_play {
            return Err(PlayerError::Engine("state change to PLAYING failed".to_string()));
        }
        self.status = EngineStatus::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.record(Call::Pause(self.id));
        self.status = EngineStatus::Paused;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.record(Call::Stop(self.id));
        if self.fail_stop {
            return Err(PlayerError::Engine("state change to PAUSED failed".to_string()));
        }
        self.position = Duration::ZERO;
        self.status = EngineStatus::Stopped;
        Ok(())
    }

    fn seek(&mut self, offset: Duration) -> Result<()> {
        self.record(Call::Seek(self.id, offset));
        self.position = offset;
        Ok(())
    }

    fn position(&self) -> Option<Duration> {
        Some(self.position)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, gain: f64) {
        self.record(Call::Volume(self.id, gain));
    }

    fn status(&self) -> EngineStatus {
        self.status
    }

    fn watch_position(&mut self, sink: PositionSink) {
        self.record(Call::Watch(self.id));
        self.sinks.borrow_mut().push(sink);
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.record(Call::Release(self.id));
        }
    }
}

/// A real file with an accepted extension, kept alive by the returned handle.
pub fn audio_file(name: &str) -> tempfile::NamedTempFile {
    tempfile::Builder::new()
        .prefix(name)
        .suffix(".mp3")
        .tempfile()
        .unwrap()
}
