use std::time::Duration;

/// File extensions offered by the open dialog and accepted by the player.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// Built-in settings. The player reads no config file, flags or environment.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    /// Initial volume slider level, 0..=100.
    pub default_volume: f64,
    pub volume_slider_width: f32,
    /// How often the engine reports the playback position.
    pub position_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            window_title: "Simple mp3 player".to_string(),
            window_size: [420.0, 100.0],
            default_volume: 100.0,
            volume_slider_width: 100.0,
            position_interval: Duration::from_millis(200),
        }
    }
}
