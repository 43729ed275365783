//! Drives the state machine against the capture sources, verifier and
//! navigator.
//!
//! `AuthFlow` methods take `&mut self` across the single await point, so a
//! flow instance can never have two verification requests in flight.

use facegate_capture::{CameraSource, ScanEvent, ScanSource, ScanSubscription};
use facegate_session::SessionStore;
use facegate_types::{Destination, Evidence, Identifier, NavigationContext};
use facegate_verification::{EncodeError, EvidencePayload, Verifier};
use std::future::Future;

use crate::navigation::{Navigator, Routing, SessionController};
use crate::status::CAPTURE_FAILED_MESSAGE;
use crate::{AuthFailure, DecodeDisposition, FlowError, FlowStateMachine};

/// Result of one capture-and-verify attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureOutcome {
    /// Recognized; the navigator has been sent here.
    Navigated(Destination),
    /// Back in `AwaitingCapture` with this failure displayed.
    Failed(AuthFailure),
}

/// How a scanning session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A code was decoded and the identifier replaced.
    Identified(Identifier),
    /// The user closed the overlay.
    Cancelled,
    /// The source stopped producing events; treated as closing the overlay.
    SourceClosed,
}

enum ScanStep {
    Cancelled,
    Event(Option<ScanEvent>),
}

async fn next_event(subscription: Option<&mut ScanSubscription>) -> Option<ScanEvent> {
    match subscription {
        Some(subscription) => subscription.next().await,
        // Device never mounted: only a cancel can end the session.
        None => std::future::pending().await,
    }
}

/// One login flow instance.
pub struct AuthFlow<C, Sc, V, S, N> {
    machine: FlowStateMachine,
    camera: C,
    scanner: Sc,
    verifier: V,
    controller: SessionController<S>,
    navigator: N,
}

impl<C, Sc, V, S, N> AuthFlow<C, Sc, V, S, N>
where
    C: CameraSource,
    Sc: ScanSource,
    V: Verifier,
    S: SessionStore,
    N: Navigator,
{
    pub fn new(
        camera: C,
        scanner: Sc,
        verifier: V,
        controller: SessionController<S>,
        navigator: N,
    ) -> Self {
        Self {
            machine: FlowStateMachine::new(),
            camera,
            scanner,
            verifier,
            controller,
            navigator,
        }
    }

    pub fn machine(&self) -> &FlowStateMachine {
        &self.machine
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn scanner(&self) -> &Sc {
        &self.scanner
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn controller(&self) -> &SessionController<S> {
        &self.controller
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Enter the flow from the previous view.
    pub fn mount(&mut self, context: &NavigationContext) -> Result<(), FlowError> {
        self.machine.mount(context)?;
        tracing::info!(identifier = %self.machine.identifier(), "login flow mounted");
        Ok(())
    }

    pub fn set_identifier(&mut self, identifier: impl Into<Identifier>) -> Result<(), FlowError> {
        self.machine.set_identifier(identifier)
    }

    /// Take a frame, submit it with the current identifier and route the result.
    ///
    /// Whatever the outcome, the machine is back in `AwaitingCapture` when
    /// this returns `Ok`. Errs only when capture is not currently allowed.
    pub async fn capture_and_verify(&mut self) -> Result<CaptureOutcome, FlowError> {
        let identifier = self.machine.begin_capture()?;

        let evidence = self.camera.capture_frame().map(|image| Evidence::Frame {
            identifier: identifier.clone(),
            image,
        });
        let payload = match evidence
            .ok_or(EncodeError::MissingImage)
            .and_then(EvidencePayload::try_from)
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(identifier = %identifier, "capture failed: {e}");
                self.machine.capture_failed(CAPTURE_FAILED_MESSAGE)?;
                return Ok(CaptureOutcome::Failed(AuthFailure::CaptureUnavailable));
            }
        };

        let result = self.verifier.verify(payload).await;

        match self.controller.route(&result) {
            Routing::Navigate(destination) => {
                self.machine.complete_verification(None)?;
                self.navigator.navigate(&destination);
                Ok(CaptureOutcome::Navigated(destination))
            }
            Routing::Stay(failure) => {
                self.machine
                    .complete_verification(Some(failure.status_message()))?;
                Ok(CaptureOutcome::Failed(failure))
            }
        }
    }

    /// Open the scanner overlay and run it until a decode is accepted, the
    /// `cancel` future completes, or the source stops.
    ///
    /// The scan source is mounted on entry and released before returning.
    /// Device errors are shown in the overlay and do not end the session.
    pub async fn scan<F>(&mut self, cancel: F) -> Result<ScanOutcome, FlowError>
    where
        F: Future<Output = ()>,
    {
        self.machine.open_scanner()?;

        let mut subscription = match self.scanner.mount() {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                self.machine.on_scan_error(&e.to_string());
                None
            }
        };

        tokio::pin!(cancel);
        let outcome = loop {
            let step = tokio::select! {
                _ = &mut cancel => ScanStep::Cancelled,
                event = next_event(subscription.as_mut()) => ScanStep::Event(event),
            };

            match step {
                ScanStep::Cancelled => break ScanOutcome::Cancelled,
                ScanStep::Event(None) => break ScanOutcome::SourceClosed,
                ScanStep::Event(Some(ScanEvent::Error(detail))) => {
                    self.machine.on_scan_error(&detail);
                }
                ScanStep::Event(Some(ScanEvent::Decoded(text))) => {
                    match self.machine.on_decoded(&text) {
                        DecodeDisposition::Accepted(identifier) => {
                            break ScanOutcome::Identified(identifier)
                        }
                        DecodeDisposition::IgnoredEmpty | DecodeDisposition::IgnoredNotScanning => {}
                    }
                }
            }
        };

        // Unmount before leaving the scanning state.
        drop(subscription);

        match &outcome {
            ScanOutcome::Identified(identifier) => {
                tracing::info!(identifier = %identifier, "identifier scanned");
            }
            ScanOutcome::Cancelled | ScanOutcome::SourceClosed => {
                self.machine.cancel_scan()?;
                tracing::info!(outcome = ?outcome, "scanner closed without a decode");
            }
        }
        Ok(outcome)
    }
}
