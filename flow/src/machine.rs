//! The flow state machine.
//!
//! Pure state: no camera, network or session access happens here. Every mode
//! change goes through [`next_mode`], so the allowed transitions live in one
//! table.

use facegate_capture::parse_scanned_identifier;
use facegate_types::{FlowMode, Identifier, NavigationContext};
use std::fmt;

use crate::{AuthFailure, FlowError};

/// Label of the capture button while idle.
pub const CAPTURE_LABEL: &str = "Capture and Verify";
/// Label of the capture button while a request is in flight.
pub const BUSY_LABEL: &str = "Processing...";

/// Inputs that can change the mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowAction {
    Mount,
    Capture,
    CaptureFailed,
    CompleteVerification,
    OpenScanner,
    AcceptDecode,
    CancelScan,
}

impl fmt::Display for FlowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mount => "mount",
            Self::Capture => "capture",
            Self::CaptureFailed => "fail capture",
            Self::CompleteVerification => "complete verification",
            Self::OpenScanner => "open scanner",
            Self::AcceptDecode => "accept decode",
            Self::CancelScan => "cancel scan",
        })
    }
}

/// The transition table. `None` means the action is not allowed in `from`.
pub fn next_mode(from: FlowMode, action: FlowAction) -> Option<FlowMode> {
    use FlowAction::*;
    use FlowMode::*;
    match (from, action) {
        (Idle, Mount) => Some(AwaitingCapture),
        (AwaitingCapture, Capture) => Some(Verifying),
        (AwaitingCapture, OpenScanner) => Some(Scanning),
        (Verifying, CaptureFailed) => Some(AwaitingCapture),
        (Verifying, CompleteVerification) => Some(AwaitingCapture),
        (Scanning, AcceptDecode) => Some(AwaitingCapture),
        (Scanning, CancelScan) => Some(AwaitingCapture),
        _ => None,
    }
}

/// What happened to a decode event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeDisposition {
    /// First decode of this scanning session; the identifier was replaced.
    Accepted(Identifier),
    /// Arrived while not scanning (including after an accepted decode).
    IgnoredNotScanning,
    /// Empty text; the scan session continues.
    IgnoredEmpty,
}

/// Mode, identifier and status text of one login flow.
#[derive(Clone, Debug, Default)]
pub struct FlowStateMachine {
    mode: FlowMode,
    identifier: Identifier,
    status: Option<String>,
    scan_error: Option<String>,
}

impl FlowStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Status line under the action buttons, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Error text shown inside the scanner overlay, if any.
    pub fn scan_error(&self) -> Option<&str> {
        self.scan_error.as_deref()
    }

    pub fn capture_enabled(&self) -> bool {
        next_mode(self.mode, FlowAction::Capture).is_some()
    }

    pub fn scan_enabled(&self) -> bool {
        next_mode(self.mode, FlowAction::OpenScanner).is_some()
    }

    pub fn capture_label(&self) -> &'static str {
        if self.mode == FlowMode::Verifying {
            BUSY_LABEL
        } else {
            CAPTURE_LABEL
        }
    }

    fn apply(&mut self, action: FlowAction) -> Result<FlowMode, FlowError> {
        let next = next_mode(self.mode, action).ok_or(FlowError::InvalidTransition {
            action,
            mode: self.mode,
        })?;
        tracing::debug!(from = %self.mode, to = %next, %action, "flow transition");
        self.mode = next;
        Ok(next)
    }

    /// Enter the flow, pre-filling the identifier from the inbound context.
    pub fn mount(&mut self, context: &NavigationContext) -> Result<(), FlowError> {
        self.apply(FlowAction::Mount)?;
        if let Some(identifier) = context.prefill() {
            self.identifier = identifier;
        }
        Ok(())
    }

    /// Edit the identifier. Not possible while the scanner overlay is open.
    pub fn set_identifier(&mut self, identifier: impl Into<Identifier>) -> Result<(), FlowError> {
        if self.mode == FlowMode::Scanning {
            return Err(FlowError::IdentifierLocked(self.mode));
        }
        self.identifier = identifier.into();
        Ok(())
    }

    /// Start a capture attempt. Clears the previous status and returns the
    /// identifier to submit with the frame.
    pub fn begin_capture(&mut self) -> Result<Identifier, FlowError> {
        self.apply(FlowAction::Capture)?;
        self.status = None;
        Ok(self.identifier.clone())
    }

    /// The camera produced no frame; re-enable capture without a request.
    pub fn capture_failed(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        self.apply(FlowAction::CaptureFailed)?;
        self.status = Some(message.into());
        Ok(())
    }

    /// The verification request finished. `message` is `None` on success.
    pub fn complete_verification(&mut self, message: Option<String>) -> Result<(), FlowError> {
        self.apply(FlowAction::CompleteVerification)?;
        self.status = message;
        Ok(())
    }

    /// Open the scanner overlay.
    pub fn open_scanner(&mut self) -> Result<(), FlowError> {
        self.apply(FlowAction::OpenScanner)?;
        self.scan_error = None;
        Ok(())
    }

    /// Close the overlay without a decode.
    pub fn cancel_scan(&mut self) -> Result<(), FlowError> {
        self.apply(FlowAction::CancelScan)?;
        Ok(())
    }

    /// Feed a decode event. Only the first non-empty decode per scanning
    /// session is honored; it closes the overlay.
    pub fn on_decoded(&mut self, text: &str) -> DecodeDisposition {
        if self.mode != FlowMode::Scanning {
            tracing::debug!(mode = %self.mode, "ignoring decode outside scanning");
            return DecodeDisposition::IgnoredNotScanning;
        }
        let Some(identifier) = parse_scanned_identifier(text) else {
            return DecodeDisposition::IgnoredEmpty;
        };
        if self.apply(FlowAction::AcceptDecode).is_err() {
            return DecodeDisposition::IgnoredNotScanning;
        }
        self.identifier = identifier.clone();
        self.scan_error = None;
        DecodeDisposition::Accepted(identifier)
    }

    /// Feed a scanner error. The overlay stays open so the user can retry or
    /// cancel. Returns `false` if the event was ignored (not scanning).
    pub fn on_scan_error(&mut self, detail: &str) -> bool {
        if self.mode != FlowMode::Scanning {
            return false;
        }
        tracing::warn!("scanner error: {detail}");
        let failure = AuthFailure::ScanDeviceError {
            detail: detail.to_string(),
        };
        self.scan_error = Some(failure.status_message());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::SCAN_DEVICE_MESSAGE;

    fn ready() -> FlowStateMachine {
        let mut machine = FlowStateMachine::new();
        machine.mount(&NavigationContext::default()).unwrap();
        machine
    }

    // ── Transition table ────────────────────────────────────────────────

    #[test]
    fn starts_idle_and_mounts_to_awaiting_capture() {
        let mut machine = FlowStateMachine::new();
        assert_eq!(machine.mode(), FlowMode::Idle);
        assert!(!machine.capture_enabled());
        machine.mount(&NavigationContext::default()).unwrap();
        assert_eq!(machine.mode(), FlowMode::AwaitingCapture);
        assert!(machine.capture_enabled());
        assert!(machine.scan_enabled());
    }

    #[test]
    fn mount_prefills_identifier() {
        let mut machine = FlowStateMachine::new();
        machine
            .mount(&NavigationContext::with_identifier("45CSE001"))
            .unwrap();
        assert_eq!(machine.identifier(), &Identifier::from("45CSE001"));
    }

    #[test]
    fn cannot_mount_twice() {
        let mut machine = ready();
        assert_eq!(
            machine.mount(&NavigationContext::default()),
            Err(FlowError::InvalidTransition {
                action: FlowAction::Mount,
                mode: FlowMode::AwaitingCapture
            })
        );
    }

    #[test]
    fn capture_disables_actions_and_clears_status() {
        let mut machine = ready();
        machine.begin_capture().unwrap();
        machine
            .complete_verification(Some("Face not recognized.".into()))
            .unwrap();
        assert_eq!(machine.status_message(), Some("Face not recognized."));

        machine.begin_capture().unwrap();
        assert_eq!(machine.mode(), FlowMode::Verifying);
        assert_eq!(machine.status_message(), None);
        assert!(!machine.capture_enabled());
        assert!(!machine.scan_enabled());
        assert_eq!(machine.capture_label(), BUSY_LABEL);
    }

    #[test]
    fn second_capture_while_verifying_is_rejected() {
        let mut machine = ready();
        machine.begin_capture().unwrap();
        assert!(matches!(
            machine.begin_capture(),
            Err(FlowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn capture_failure_returns_to_awaiting_capture() {
        let mut machine = ready();
        machine.begin_capture().unwrap();
        machine.capture_failed("retry").unwrap();
        assert_eq!(machine.mode(), FlowMode::AwaitingCapture);
        assert_eq!(machine.capture_label(), CAPTURE_LABEL);
        assert_eq!(machine.status_message(), Some("retry"));
    }

    #[test]
    fn cannot_capture_while_scanning() {
        let mut machine = ready();
        machine.open_scanner().unwrap();
        assert!(!machine.capture_enabled());
        assert!(machine.begin_capture().is_err());
        assert!(machine.open_scanner().is_err());
    }

    #[test]
    fn completion_outside_verifying_is_rejected() {
        let mut machine = ready();
        assert!(machine.complete_verification(None).is_err());
    }

    // ── Scanning ────────────────────────────────────────────────────────

    #[test]
    fn first_decode_wins() {
        let mut machine = ready();
        machine.open_scanner().unwrap();
        assert_eq!(
            machine.on_decoded("45CSE001,extra,data"),
            DecodeDisposition::Accepted(Identifier::from("45CSE001"))
        );
        assert_eq!(machine.mode(), FlowMode::AwaitingCapture);
        assert_eq!(
            machine.on_decoded("99OTHER,x"),
            DecodeDisposition::IgnoredNotScanning
        );
        assert_eq!(machine.identifier(), &Identifier::from("45CSE001"));
    }

    #[test]
    fn empty_decode_keeps_scanning() {
        let mut machine = ready();
        machine.open_scanner().unwrap();
        assert_eq!(machine.on_decoded(""), DecodeDisposition::IgnoredEmpty);
        assert_eq!(machine.mode(), FlowMode::Scanning);
    }

    #[test]
    fn whitespace_decode_is_accepted() {
        let mut machine = ready();
        machine.open_scanner().unwrap();
        assert_eq!(
            machine.on_decoded("  "),
            DecodeDisposition::Accepted(Identifier::from("  "))
        );
        assert_eq!(machine.mode(), FlowMode::AwaitingCapture);
        assert_eq!(machine.identifier(), &Identifier::from("  "));
    }

    #[test]
    fn decode_outside_scanning_does_not_touch_identifier() {
        let mut machine = ready();
        machine.set_identifier("typed").unwrap();
        assert_eq!(
            machine.on_decoded("scanned"),
            DecodeDisposition::IgnoredNotScanning
        );
        assert_eq!(machine.identifier(), &Identifier::from("typed"));
    }

    #[test]
    fn scan_error_keeps_overlay_open() {
        let mut machine = ready();
        machine.open_scanner().unwrap();
        assert!(machine.on_scan_error("permission denied"));
        assert_eq!(machine.mode(), FlowMode::Scanning);
        assert_eq!(machine.scan_error(), Some(SCAN_DEVICE_MESSAGE));
    }

    #[test]
    fn scan_error_outside_scanning_is_ignored() {
        let mut machine = ready();
        assert!(!machine.on_scan_error("late"));
        assert_eq!(machine.scan_error(), None);
    }

    #[test]
    fn reopening_scanner_clears_previous_error() {
        let mut machine = ready();
        machine.open_scanner().unwrap();
        machine.on_scan_error("x");
        machine.cancel_scan().unwrap();
        machine.open_scanner().unwrap();
        assert_eq!(machine.scan_error(), None);
    }

    #[test]
    fn identifier_is_locked_while_scanning() {
        let mut machine = ready();
        machine.open_scanner().unwrap();
        assert_eq!(
            machine.set_identifier("x"),
            Err(FlowError::IdentifierLocked(FlowMode::Scanning))
        );
        machine.cancel_scan().unwrap();
        assert!(machine.set_identifier("x").is_ok());
    }

    #[test]
    fn transition_table_never_allows_two_capture_modes() {
        for action in [FlowAction::Capture, FlowAction::OpenScanner] {
            assert_eq!(next_mode(FlowMode::Scanning, action), None);
            assert_eq!(next_mode(FlowMode::Verifying, action), None);
        }
    }
}
