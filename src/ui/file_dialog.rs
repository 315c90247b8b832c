use std::path::PathBuf;

use crate::config::AUDIO_EXTENSIONS;

/// Native open dialog limited to supported audio files. `None` on cancel.
pub fn pick_audio_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open audio file")
        .add_filter("Audio files", AUDIO_EXTENSIONS)
        .pick_file()
}
