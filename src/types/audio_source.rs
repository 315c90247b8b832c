use std::fs;
use std::path::{Path, PathBuf};

use gstreamer as gst;

use crate::config::AUDIO_EXTENSIONS;
use crate::error::{PlayerError, Result};

/// A local audio file resolved into the URI form the engine loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSource {
    path: PathBuf,
    uri: String,
    file_name: String,
}

impl AudioSource {
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_absolute() {
            return Err(PlayerError::unloadable(path, "path is not absolute"));
        }
        if !is_supported(path) {
            return Err(PlayerError::unloadable(path, "unsupported file type"));
        }
        let metadata =
            fs::metadata(path).map_err(|e| PlayerError::unloadable(path, e.to_string()))?;
        if !metadata.is_file() {
            return Err(PlayerError::unloadable(path, "not a regular file"));
        }
        let uri = gst::glib::filename_to_uri(path, None)
            .map_err(|e| PlayerError::unloadable(path, e.to_string()))?;

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            uri: uri.to_string(),
            file_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Case-insensitive match against the supported extensions.
pub fn is_supported(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    AUDIO_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio_file(suffix: &str) -> tempfile::NamedTempFile {
        tempfile::Builder::new()
            .prefix("track")
            .suffix(suffix)
            .tempfile()
            .unwrap()
    }

    #[test]
    fn test_resolves_existing_mp3_to_file_uri() {
        let file = audio_file(".mp3");
        let source = AudioSource::from_path(file.path()).unwrap();
        assert!(source.uri().starts_with("file://"));
        assert!(source.uri().ends_with(".mp3"));
        assert_eq!(source.path(), file.path());
        assert!(source.file_name().starts_with("track"));
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let file = audio_file(".WAV");
        assert!(AudioSource::from_path(file.path()).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let file = audio_file(".ogg");
        let err = AudioSource::from_path(file.path()).unwrap_err();
        assert!(matches!(err, PlayerError::UnloadableSource { .. }));
    }

    #[test]
    fn test_rejects_relative_path() {
        let err = AudioSource::from_path(Path::new("music/track.mp3")).unwrap_err();
        assert!(matches!(err, PlayerError::UnloadableSource { .. }));
    }

    #[test]
    fn test_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.mp3");
        assert!(AudioSource::from_path(&missing).is_err());
    }

    #[test]
    fn test_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("album.mp3");
        fs::create_dir(&folder).unwrap();
        let err = AudioSource::from_path(&folder).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }
}
