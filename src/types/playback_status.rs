/// What the transport believes the player is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Stopped,
    /// Also the state before any file is opened.
    #[default]
    Paused,
    Playing,
}

impl PlaybackStatus {
    pub fn is_playing(self) -> bool {
        self == PlaybackStatus::Playing
    }

    /// Stopped is not terminal: a toggle resumes from either state.
    pub fn is_resumable(self) -> bool {
        matches!(self, PlaybackStatus::Paused | PlaybackStatus::Stopped)
    }
}

/// State reported by a playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Loaded but never started.
    Ready,
    Playing,
    Paused,
    Stopped,
}
