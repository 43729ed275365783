//! Continuous code scanning as a scoped event subscription.
//!
//! A [`ScanSource`] only produces events while mounted. Mounting hands back a
//! [`ScanSubscription`]; the subscription owns the device for its lifetime and
//! runs its release hook exactly once when dropped, so leaving the scanning
//! state always stops the producer.

use facegate_types::{Evidence, Identifier};
use tokio::sync::mpsc;

use crate::CaptureError;

/// Default capacity of the event channel between producer and flow.
pub const DEFAULT_EVENT_BUFFER: usize = 16;

/// One event emitted by a mounted scan source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// A code was detected and decoded to this text.
    Decoded(String),
    /// The camera or decoder failed; the source may keep running.
    Error(String),
}

/// A producer of decode events that runs only while mounted.
pub trait ScanSource {
    /// Acquire the device and start emitting events.
    ///
    /// Fails with [`CaptureError::ScanDevice`] when the device is inaccessible.
    fn mount(&mut self) -> Result<ScanSubscription, CaptureError>;
}

type ReleaseHook = Box<dyn FnOnce() + Send>;

/// Receiving end of a mounted scan source.
pub struct ScanSubscription {
    events: mpsc::Receiver<ScanEvent>,
    release: Option<ReleaseHook>,
}

impl ScanSubscription {
    pub fn new(events: mpsc::Receiver<ScanEvent>) -> Self {
        Self {
            events,
            release: None,
        }
    }

    /// Create a subscription together with the sender a producer feeds.
    pub fn channel(capacity: usize) -> (mpsc::Sender<ScanEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::new(rx))
    }

    /// Attach a hook that runs when the subscription is dropped (unmount).
    pub fn on_release(mut self, release: impl FnOnce() + Send + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    /// Wait for the next event. `None` once the source has stopped on its own.
    pub async fn next(&mut self) -> Option<ScanEvent> {
        self.events.recv().await
    }
}

impl Drop for ScanSubscription {
    fn drop(&mut self) {
        self.events.close();
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for ScanSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSubscription")
            .field("has_release_hook", &self.release.is_some())
            .finish()
    }
}

/// Extract the identifier from decoded code text.
///
/// Returns `None` for empty text (nothing was decoded). Any other text,
/// whitespace included, is a decode; its first comma-delimited segment is
/// the identifier.
pub fn parse_scanned_identifier(text: &str) -> Option<Identifier> {
    if text.is_empty() {
        return None;
    }
    Some(
        Evidence::Code {
            raw: text.to_string(),
        }
        .identifier(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn parse_takes_first_segment() {
        assert_eq!(
            parse_scanned_identifier("45CSE001,extra,data"),
            Some(Identifier::from("45CSE001"))
        );
    }

    #[test]
    fn parse_rejects_empty_text() {
        assert_eq!(parse_scanned_identifier(""), None);
    }

    #[test]
    fn parse_keeps_whitespace_only_text() {
        assert_eq!(parse_scanned_identifier("   "), Some(Identifier::from("   ")));
        assert_eq!(parse_scanned_identifier(" ,x"), Some(Identifier::from(" ")));
    }

    #[test]
    fn parse_leading_comma_gives_empty_identifier() {
        assert_eq!(parse_scanned_identifier(",tail"), Some(Identifier::from("")));
    }

    #[tokio::test]
    async fn subscription_delivers_then_ends() {
        let (tx, mut sub) = ScanSubscription::channel(4);
        tx.send(ScanEvent::Decoded("A".into())).await.unwrap();
        drop(tx);
        assert_eq!(sub.next().await, Some(ScanEvent::Decoded("A".into())));
        assert_eq!(sub.next().await, None);
    }

    #[tokio::test]
    async fn release_runs_once_on_drop() {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = released.clone();
        let (tx, sub) = ScanSubscription::channel(1);
        let sub = sub.on_release(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        drop(sub);
        assert_eq!(released.load(Ordering::SeqCst), 1);
        // Producer observes the unmount as a closed channel.
        assert!(tx.send(ScanEvent::Decoded("late".into())).await.is_err());
    }
}
