//! Verification of captured evidence against the remote recognition service.
//!
//! Three stages, each isolated so the rest of the system never handles raw
//! HTTP or raw response strings:
//! 1. **Encoding**: evidence becomes a multipart payload ([`encode`]).
//! 2. **Transport**: one non-cancelable POST per capture attempt, no retries
//!    ([`VerificationClient`]).
//! 3. **Classification**: the response is reduced to exactly one
//!    [`VerificationResult`] ([`classify`]).

pub mod classify;
pub mod client;
pub mod encoder;
pub mod error;

pub use classify::{classify_body, classify_rejection, classify_transport_error};
pub use client::VerificationClient;
pub use encoder::{encode, EvidencePayload};
pub use error::{EncodeError, VerificationError};

use async_trait::async_trait;
use facegate_types::VerificationResult;

/// Submits evidence and derives a single outcome.
///
/// Implementations never fail: every transport problem is folded into
/// [`VerificationResult::TransportFailure`].
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, payload: EvidencePayload) -> VerificationResult;
}
