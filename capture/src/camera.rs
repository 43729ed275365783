//! Still-frame camera sources.

use facegate_types::ImageBytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Produces a single JPEG still frame on demand.
///
/// `None` means the device has not produced a frame yet (not initialised,
/// no permission, empty buffer). The flow treats it as a capture failure and
/// never issues a request for it.
pub trait CameraSource {
    fn capture_frame(&mut self) -> Option<ImageBytes>;
}

/// A camera backed by a JPEG file on disk.
///
/// Each capture re-reads the file, so an external grabber (e.g. `fswebcam`)
/// can keep overwriting it with fresh frames.
#[derive(Clone, Debug)]
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CameraSource for FileCamera {
    fn capture_frame(&mut self) -> Option<ImageBytes> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => {
                tracing::debug!(path = %self.path.display(), "frame file is empty");
                None
            }
            Ok(bytes) => Some(ImageBytes::new(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no frame produced yet");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "failed to read frame: {e}");
                None
            }
        }
    }
}
