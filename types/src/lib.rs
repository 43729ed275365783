//! Fundamental types for the facegate authentication flow.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! identifiers, captured evidence, verification outcomes, flow modes and navigation
//! destinations.

pub mod evidence;
pub mod identifier;
pub mod image;
pub mod navigation;
pub mod result;
pub mod state;

pub use evidence::Evidence;
pub use identifier::Identifier;
pub use image::ImageBytes;
pub use navigation::{Destination, NavigationContext};
pub use result::{TransportFailure, VerificationResult};
pub use state::FlowMode;
