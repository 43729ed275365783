//! Evidence producers for the authentication flow.
//!
//! Two mutually exclusive sources feed the same verification pipeline:
//! - **Camera**: produces a single still frame on demand ([`CameraSource`]).
//! - **Code scanner**: while mounted, continuously emits decoded text or
//!   device errors ([`ScanSource`]). Mounting returns a [`ScanSubscription`];
//!   dropping it unmounts the source.

pub mod camera;
pub mod error;
pub mod line_scanner;
pub mod scan;

pub use camera::{CameraSource, FileCamera};
pub use error::CaptureError;
pub use line_scanner::LineScanner;
pub use scan::{parse_scanned_identifier, ScanEvent, ScanSource, ScanSubscription};
