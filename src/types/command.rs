use std::path::PathBuf;

/// Whether the user is holding a slider while its value changes.
///
/// Only `Pressed` changes reach the engine; position updates written by the
/// player itself arrive as `Idle` and must not loop back into a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderInteraction {
    Pressed,
    Idle,
}

impl SliderInteraction {
    pub fn is_pressed(self) -> bool {
        self == SliderInteraction::Pressed
    }
}

impl From<bool> for SliderInteraction {
    fn from(pressed: bool) -> Self {
        if pressed {
            SliderInteraction::Pressed
        } else {
            SliderInteraction::Idle
        }
    }
}

/// A user action on the player window.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCommand {
    /// Result of the open dialog; `None` when the user cancelled it.
    Open(Option<PathBuf>),
    TogglePlayPause,
    Restart,
    Stop,
    Seek {
        percent: f64,
        interaction: SliderInteraction,
    },
    Volume {
        level: f64,
        interaction: SliderInteraction,
    },
}
