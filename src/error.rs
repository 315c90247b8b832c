use std::path::PathBuf;

use gstreamer as gst;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The file dialog was dismissed without choosing a file.
    #[error("File selection failed!")]
    SelectionCancelled,

    /// The chosen path cannot be turned into something the engine plays.
    #[error("cannot load {}: {reason}", .path.display())]
    UnloadableSource { path: PathBuf, reason: String },

    /// A transport action arrived before any file was opened.
    #[error("no audio file is loaded")]
    NoActiveSession,

    #[error("playback engine error: {0}")]
    Engine(String),

    #[error("could not initialise GStreamer: {0}")]
    Init(#[from] gst::glib::Error),
}

impl PlayerError {
    pub fn unloadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PlayerError::UnloadableSource {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<gst::glib::BoolError> for PlayerError {
    fn from(err: gst::glib::BoolError) -> Self {
        PlayerError::Engine(err.to_string())
    }
}

impl From<gst::StateChangeError> for PlayerError {
    fn from(err: gst::StateChangeError) -> Self {
        PlayerError::Engine(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_message_is_user_facing() {
        assert_eq!(
            PlayerError::SelectionCancelled.to_string(),
            "File selection failed!"
        );
    }

    #[test]
    fn test_unloadable_names_the_path() {
        let err = PlayerError::unloadable("/music/broken.mp3", "not a regular file");
        assert_eq!(
            err.to_string(),
            "cannot load /music/broken.mp3: not a regular file"
        );
    }
}
