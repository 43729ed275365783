//! Flow mode enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The exclusive operating state of the authentication flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowMode {
    /// Not yet mounted.
    #[default]
    Idle,
    /// Ready: the user may capture a frame or open the scanner.
    AwaitingCapture,
    /// The code scanner overlay is open; capture is suspended.
    Scanning,
    /// A frame was taken and the verification request is in flight.
    Verifying,
}

impl FlowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingCapture => "awaiting_capture",
            Self::Scanning => "scanning",
            Self::Verifying => "verifying",
        }
    }
}

impl fmt::Display for FlowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
