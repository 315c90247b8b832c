use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::engine::EngineFactory;
use crate::engine::position::{PositionChannel, PositionUpdate, Waker, offset_at, percent_of};
use crate::error::{PlayerError, Result};
use crate::types::audio_source::AudioSource;
use crate::types::command::{SliderInteraction, TransportCommand};
use crate::types::playback_status::{EngineStatus, PlaybackStatus};
use crate::types::session::PlaybackSession;
use crate::ui::view::TransportView;

/// Turns window commands into engine calls and keeps the view in step.
///
/// Lives on the UI thread. Engines report positions through a channel that
/// [`TransportController::pump`] drains, so no state here is shared. Status
/// only changes once the engine has accepted the matching call.
pub struct TransportController<V: TransportView> {
    status: PlaybackStatus,
    session: Option<PlaybackSession>,
    factory: Box<dyn EngineFactory>,
    positions: PositionChannel,
    view: V,
}

impl<V: TransportView> TransportController<V> {
    pub fn new(factory: Box<dyn EngineFactory>, view: V, waker: Option<Waker>) -> Self {
        Self {
            status: PlaybackStatus::default(),
            session: None,
            factory,
            positions: PositionChannel::new(waker),
            view,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn dispatch(&mut self, command: TransportCommand) {
        debug!(?command, status = ?self.status, "dispatch");
        match command {
            TransportCommand::Open(selection) => self.open(selection),
            TransportCommand::TogglePlayPause => self.toggle_play_pause(),
            TransportCommand::Restart => self.restart(),
            TransportCommand::Stop => self.stop(),
            TransportCommand::Seek {
                percent,
                interaction,
            } => self.seek_to(percent, interaction),
            TransportCommand::Volume { level, interaction } => {
                self.set_volume(level, interaction)
            }
        }
    }

    /// Replaces the current session with one for `selection`.
    pub fn open(&mut self, selection: Option<PathBuf>) {
        let Some(path) = selection else {
            warn!("file selection cancelled");
            self.view.warn(&PlayerError::SelectionCancelled.to_string());
            return;
        };

        // Resolve before touching the current session so a bad path leaves
        // it playing.
        let source = match AudioSource::from_path(&path) {
            Ok(source) => source,
            Err(err) => {
                error!(error = %err, "file error");
                return;
            }
        };

        if let Some(previous) = self.session.take() {
            previous.close();
        }

        self.status = PlaybackStatus::Paused;
        match PlaybackSession::open(source, self.factory.as_ref()) {
            Ok(mut session) => {
                session.engine_mut().set_volume(gain_for(self.view.volume()));
                if !session.engine().has_source() {
                    info!(session = %session.id(), "source is empty, not starting playback");
                } else if succeeded(session.engine_mut().play(), "play") {
                    info!(path = %session.source().path().display(), "now playing");
                    self.status = PlaybackStatus::Playing;
                }
                self.session = Some(session);
                if self.status.is_playing() {
                    self.track_position();
                }
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "could not create playback engine");
            }
        }
        self.view.show_status(self.status);
        self.view.show_position(0.0);
    }

    pub fn toggle_play_pause(&mut self) {
        let status = self.status;
        let Some(session) = active(&mut self.session, "toggle") else {
            return;
        };

        if status.is_playing() {
            if succeeded(session.engine_mut().pause(), "pause") {
                self.status = PlaybackStatus::Paused;
            }
        } else if status.is_resumable() || session.engine().status() == EngineStatus::Ready {
            if succeeded(session.engine_mut().play(), "play") {
                self.status = PlaybackStatus::Playing;
                self.track_position();
            }
        }
        self.view.show_status(self.status);
    }

    /// Rewinds to the start of the file. Playback state is left alone.
    pub fn restart(&mut self) {
        let Some(session) = active(&mut self.session, "restart") else {
            return;
        };
        let start = session.engine().start_offset();
        if succeeded(session.engine_mut().seek(start), "seek") {
            self.refresh_position();
        }
        self.view.show_status(self.status);
    }

    pub fn stop(&mut self) {
        if !self.status.is_playing() {
            return;
        }
        let Some(session) = active(&mut self.session, "stop") else {
            return;
        };
        if succeeded(session.engine_mut().stop(), "stop") {
            self.status = PlaybackStatus::Stopped;
            self.refresh_position();
        }
        self.view.show_status(self.status);
    }

    /// Seeks to `percent` of the file, for user drags only.
    pub fn seek_to(&mut self, percent: f64, interaction: SliderInteraction) {
        if !interaction.is_pressed() {
            return;
        }
        let Some(session) = active(&mut self.session, "seek") else {
            return;
        };
        let Some(duration) = session.engine().duration() else {
            debug!(session = %session.id(), "duration unknown, seek ignored");
            return;
        };
        let offset = offset_at(duration, percent);
        if succeeded(session.engine_mut().seek(offset), "seek") {
            self.refresh_position();
        }
    }

    /// Sets output gain from a 0..=100 slider level, for user drags only.
    pub fn set_volume(&mut self, level: f64, interaction: SliderInteraction) {
        if !interaction.is_pressed() {
            return;
        }
        let Some(session) = active(&mut self.session, "volume") else {
            return;
        };
        session.engine_mut().set_volume(gain_for(level));
    }

    /// Applies position notifications received since the last frame.
    pub fn pump(&mut self) {
        for update in self.positions.drain() {
            self.apply_position(update);
        }
    }

    fn apply_position(&mut self, update: PositionUpdate) {
        let Some(session) = &self.session else {
            return;
        };
        if session.id() != update.session {
            return;
        }
        if let Some(percent) = update.percent() {
            self.view.show_position(percent);
        }
    }

    /// Reads the engine position directly. The engine only reports while
    /// playing, so moves made while paused or stopped need this.
    fn refresh_position(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let engine = session.engine();
        let percent = engine
            .position()
            .zip(engine.duration())
            .and_then(|(position, duration)| percent_of(position, duration));
        if let Some(percent) = percent {
            self.view.show_position(percent);
        }
    }

    fn track_position(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let sink = self.positions.sink_for(session.id());
            session.track_position(sink);
        }
    }
}

/// The live session, or `None` after noting that there is nothing to act on.
fn active<'a>(
    session: &'a mut Option<PlaybackSession>,
    operation: &'static str,
) -> Option<&'a mut PlaybackSession> {
    if session.is_none() {
        debug!(operation, "{}", PlayerError::NoActiveSession);
    }
    session.as_mut()
}

/// Engine gain for a 0..=100 slider level.
fn gain_for(level: f64) -> f64 {
    level.clamp(0.0, 100.0) / 100.0
}

fn succeeded(result: Result<()>, operation: &'static str) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(operation, error = %err, "engine call failed");
            false
        }
    }
}
