//! Nullable camera: scripted frames.

use facegate_capture::CameraSource;
use facegate_types::ImageBytes;
use std::collections::VecDeque;

/// A camera that returns scripted frames, then a fallback frame.
pub struct NullCamera {
    scripted: VecDeque<Option<ImageBytes>>,
    fallback: Option<ImageBytes>,
    captures: usize,
}

impl NullCamera {
    /// A camera that always produces a small JPEG-looking frame.
    pub fn new() -> Self {
        Self::with_fallback(Some(ImageBytes::new(vec![0xFF, 0xD8, 0xFF, 0xD9])))
    }

    /// A camera whose device never produces a frame.
    pub fn unavailable() -> Self {
        Self::with_fallback(None)
    }

    pub fn with_fallback(fallback: Option<ImageBytes>) -> Self {
        Self {
            scripted: VecDeque::new(),
            fallback,
            captures: 0,
        }
    }

    /// Queue the result of the next capture.
    pub fn push(&mut self, frame: Option<ImageBytes>) {
        self.scripted.push_back(frame);
    }

    /// Number of times a frame was requested.
    pub fn captures(&self) -> usize {
        self.captures
    }
}

impl Default for NullCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for NullCamera {
    fn capture_frame(&mut self) -> Option<ImageBytes> {
        self.captures += 1;
        self.scripted
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
