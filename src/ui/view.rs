use crate::types::playback_status::PlaybackStatus;

/// What the transport needs from the window. Keeps the controller free of
/// any particular widget toolkit.
pub trait TransportView {
    /// Swap the play/pause icon to match `status`.
    fn show_status(&mut self, status: PlaybackStatus);

    /// Move the position slider without it counting as user input.
    fn show_position(&mut self, percent: f64);

    /// Non-blocking warning for the user.
    fn warn(&mut self, message: &str);

    /// Volume slider level, 0..=100. Newly opened files start at this level.
    fn volume(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        }
    }
}

impl From<PlaybackStatus> for PlayIcon {
    fn from(status: PlaybackStatus) -> Self {
        if status.is_playing() {
            PlayIcon::Pause
        } else {
            PlayIcon::Play
        }
    }
}

/// Widget state rendered by the egui window.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub icon: PlayIcon,
    /// Position slider value, 0..=100.
    pub position: f64,
    /// Volume slider value, 0..=100.
    pub volume: f64,
    warning: Option<String>,
}

impl PlayerView {
    pub fn new(volume: f64) -> Self {
        Self {
            icon: PlayIcon::from(PlaybackStatus::default()),
            position: 0.0,
            volume,
            warning: None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }
}

impl TransportView for PlayerView {
    fn show_status(&mut self, status: PlaybackStatus) {
        self.icon = PlayIcon::from(status);
    }

    fn show_position(&mut self, percent: f64) {
        self.position = percent.clamp(0.0, 100.0);
    }

    fn warn(&mut self, message: &str) {
        self.warning = Some(message.to_string());
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}
