use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::position::PositionSink;
use crate::engine::{EngineFactory, PlaybackEngine};
use crate::error::Result;
use crate::types::audio_source::AudioSource;

/// An opened file together with the one engine playing it.
pub struct PlaybackSession {
    id: Uuid,
    source: AudioSource,
    engine: Box<dyn PlaybackEngine>,
    tracking: bool,
}

impl PlaybackSession {
    pub fn open(source: AudioSource, factory: &dyn EngineFactory) -> Result<Self> {
        let engine = factory.load(&source)?;
        let id = Uuid::new_v4();
        info!(session = %id, file = source.file_name(), "session opened");
        Ok(Self {
            id,
            source,
            engine,
            tracking: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &AudioSource {
        &self.source
    }

    pub fn engine(&self) -> &dyn PlaybackEngine {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> &mut dyn PlaybackEngine {
        self.engine.as_mut()
    }

    #[cfg(test)]
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Registers the position listener. Only the first call per session
    /// reaches the engine; returns whether this call did.
    pub fn track_position(&mut self, sink: PositionSink) -> bool {
        if self.tracking {
            return false;
        }
        self.engine.watch_position(sink);
        self.tracking = true;
        debug!(session = %self.id, "position tracking armed");
        true
    }

    /// Stops and releases the engine without waiting on it.
    pub fn close(mut self) {
        if let Err(err) = self.engine.stop() {
            warn!(session = %self.id, error = %err, "engine did not stop");
        }
        self.engine.release();
        info!(session = %self.id, file = self.source.file_name(), "session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::position::PositionChannel;
    use crate::engine::testing::{Call, ScriptedFactory, audio_file};

    #[test]
    fn test_listener_registered_once_per_session() {
        let factory = ScriptedFactory::new();
        let file = audio_file("loop");
        let source = AudioSource::from_path(file.path()).unwrap();
        let mut session = PlaybackSession::open(source, &factory).unwrap();
        let positions = PositionChannel::new(None);

        assert!(session.track_position(positions.sink_for(session.id())));
        assert!(!session.track_position(positions.sink_for(session.id())));
        assert!(session.is_tracking());

        let watches = factory
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Watch(_)))
            .count();
        assert_eq!(watches, 1);
        assert_eq!(factory.sinks.borrow().len(), 1);
    }

    #[test]
    fn test_close_stops_then_releases() {
        let factory = ScriptedFactory::new();
        let file = audio_file("close");
        let source = AudioSource::from_path(file.path()).unwrap();
        let session = PlaybackSession::open(source, &factory).unwrap();
        session.close();

        let calls = factory.calls();
        assert_eq!(calls[1..], [Call::Stop(1), Call::Release(1)]);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let factory = ScriptedFactory::new();
        let file = audio_file("ids");
        let a = PlaybackSession::open(AudioSource::from_path(file.path()).unwrap(), &factory)
            .unwrap();
        let b = PlaybackSession::open(AudioSource::from_path(file.path()).unwrap(), &factory)
            .unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.source(), b.source());
    }
}
