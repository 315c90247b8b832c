pub mod audio_source;
pub mod command;
pub mod playback_status;
pub mod session;
