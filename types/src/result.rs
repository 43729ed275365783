//! Verification outcomes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Why a verification request could not produce an identity decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportFailure {
    /// The service answered with a non-success status.
    Server { status: u16, detail: String },
    /// No response reached the client (connect failure, reset, timeout).
    Network { detail: String },
    /// A success status whose body carried no usable `name`.
    MalformedResponse { detail: String },
}

impl TransportFailure {
    pub fn detail(&self) -> &str {
        match self {
            Self::Server { detail, .. }
            | Self::Network { detail }
            | Self::MalformedResponse { detail } => detail,
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server { status, detail } => write!(f, "server rejected request ({status}): {detail}"),
            Self::Network { detail } => write!(f, "network failure: {detail}"),
            Self::MalformedResponse { detail } => write!(f, "malformed response: {detail}"),
        }
    }
}

/// The single outcome derived from one verification attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum VerificationResult {
    /// The service matched the face to a subject.
    Recognized {
        subject_name: String,
        /// The full response body, forwarded to the user view.
        payload: Value,
    },
    /// A valid response whose `name` did not identify anyone.
    Unrecognized { name: String },
    /// The request failed before an identity decision was available.
    TransportFailure(TransportFailure),
}

impl VerificationResult {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized { .. })
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Recognized { .. } => "recognized",
            Self::Unrecognized { .. } => "unrecognized",
            Self::TransportFailure(_) => "transport_failure",
        }
    }
}

impl From<TransportFailure> for VerificationResult {
    fn from(failure: TransportFailure) -> Self {
        Self::TransportFailure(failure)
    }
}
