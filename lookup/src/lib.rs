//! Stored-image lookup.
//!
//! The recognition service keeps one reference image per enrolled user and
//! serves it base64-encoded from `GET /users/{username}/images`.

pub mod client;
pub mod error;

pub use client::{StoredImage, StoredImageClient};
pub use error::LookupError;

/// Shown when a lookup fails for any transport or status reason.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch stored image. Please try again later.";
/// Shown when the user exists but has no stored image.
pub const NO_IMAGE_MESSAGE: &str = "No image found for this user.";
