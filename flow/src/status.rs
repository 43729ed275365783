//! Recoverable authentication failures and the text shown for each.

use facegate_types::{TransportFailure, VerificationResult};
use std::fmt;

pub const CAPTURE_FAILED_MESSAGE: &str = "Failed to capture image. Please try again.";
pub const UNRECOGNIZED_MESSAGE: &str = "Face not recognized.";
pub const NETWORK_FAILURE_MESSAGE: &str = "Network error. Please check your connection.";
pub const SCAN_DEVICE_MESSAGE: &str = "Error accessing the camera or scanning QR code.";

/// Every way an attempt can fail without ending the flow.
///
/// Each maps to a status string and a return to an actionable mode; none
/// is retried automatically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthFailure {
    /// The camera produced no frame; no request was sent.
    CaptureUnavailable,
    /// The scanner device or decoder failed.
    ScanDeviceError { detail: String },
    /// The service rejected the request or answered with an unusable body.
    ServerRejection { status: Option<u16>, detail: String },
    /// No response reached the client.
    NetworkFailure { detail: String },
    /// A valid response that matched nobody.
    Unrecognized,
    /// The face was recognized but the session could not be persisted.
    SessionUnavailable { detail: String },
}

impl AuthFailure {
    /// The failure carried by a verification result, `None` when recognized.
    pub fn from_result(result: &VerificationResult) -> Option<Self> {
        match result {
            VerificationResult::Recognized { .. } => None,
            VerificationResult::Unrecognized { .. } => Some(Self::Unrecognized),
            VerificationResult::TransportFailure(failure) => Some(match failure {
                TransportFailure::Server { status, detail } => Self::ServerRejection {
                    status: Some(*status),
                    detail: detail.clone(),
                },
                TransportFailure::MalformedResponse { detail } => Self::ServerRejection {
                    status: None,
                    detail: detail.clone(),
                },
                TransportFailure::Network { detail } => Self::NetworkFailure {
                    detail: detail.clone(),
                },
            }),
        }
    }

    /// User-facing status text.
    pub fn status_message(&self) -> String {
        match self {
            Self::CaptureUnavailable => CAPTURE_FAILED_MESSAGE.to_string(),
            Self::ScanDeviceError { .. } => SCAN_DEVICE_MESSAGE.to_string(),
            Self::ServerRejection { detail, .. } => format!("Server error: {detail}"),
            Self::NetworkFailure { .. } => NETWORK_FAILURE_MESSAGE.to_string(),
            Self::Unrecognized => UNRECOGNIZED_MESSAGE.to_string(),
            Self::SessionUnavailable { detail } => format!("Could not save session: {detail}"),
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_message())
    }
}
