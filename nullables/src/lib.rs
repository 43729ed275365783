//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the login flow (camera, code scanner,
//! recognition service, session storage, navigation) is abstracted behind a
//! trait. This crate provides test-friendly implementations that:
//! - Return scripted values
//! - Record what they were asked to do
//! - Never touch hardware, the filesystem or the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod camera;
pub mod navigator;
pub mod scanner;
pub mod session;
pub mod verifier;

pub use camera::NullCamera;
pub use navigator::NullNavigator;
pub use scanner::NullScanner;
pub use session::NullSessionStore;
pub use verifier::NullVerifier;
