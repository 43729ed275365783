//! The capture-and-verify authentication flow.
//!
//! ```text
//!   Idle ──mount──▶ AwaitingCapture ──capture──▶ Verifying
//!                    ▲   │    ▲                     │
//!                    │ open   └── complete / ───────┘
//!          decode /  │ scanner    capture failed
//!          cancel    ▼
//!                  Scanning
//! ```
//!
//! - [`FlowStateMachine`] owns the mode, identifier and status text and
//!   enforces the transition table. It performs no I/O.
//! - [`SessionController`] turns a verification outcome into a session
//!   write plus a destination, or a failure to display.
//! - [`AuthFlow`] drives both against real (or null) camera, scanner,
//!   verifier and navigator implementations.

pub mod driver;
pub mod error;
pub mod machine;
pub mod navigation;
pub mod status;

pub use driver::{AuthFlow, CaptureOutcome, ScanOutcome};
pub use error::FlowError;
pub use machine::{next_mode, DecodeDisposition, FlowAction, FlowStateMachine};
pub use navigation::{Navigator, Routing, SessionController};
pub use status::AuthFailure;
