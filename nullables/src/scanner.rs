//! Nullable scanner: scripted decode/error events per mount.

use facegate_capture::{CaptureError, ScanEvent, ScanSource, ScanSubscription};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A scan source that replays scripted events.
///
/// Each mount delivers the next scripted batch. With `keep_open`, the source
/// stays mounted after its batch until released (like a live camera that
/// sees nothing); otherwise it ends once the batch is drained.
pub struct NullScanner {
    batches: VecDeque<Vec<ScanEvent>>,
    keep_open: bool,
    fail_mount: bool,
    mounts: Arc<AtomicUsize>,
    releases: Arc<AtomicUsize>,
}

impl NullScanner {
    pub fn new() -> Self {
        Self {
            batches: VecDeque::new(),
            keep_open: false,
            fail_mount: false,
            mounts: Arc::new(AtomicUsize::new(0)),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A scanner whose device cannot be opened.
    pub fn inaccessible() -> Self {
        Self {
            fail_mount: true,
            ..Self::new()
        }
    }

    pub fn keep_open(mut self) -> Self {
        self.keep_open = true;
        self
    }

    /// Queue the events delivered by the next mount.
    pub fn push_batch(&mut self, events: Vec<ScanEvent>) {
        self.batches.push_back(events);
    }

    pub fn with_batch(mut self, events: Vec<ScanEvent>) -> Self {
        self.push_batch(events);
        self
    }

    pub fn mounts(&self) -> usize {
        self.mounts.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Whether a subscription is currently outstanding.
    pub fn is_mounted(&self) -> bool {
        self.mounts() > self.releases()
    }
}

impl Default for NullScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSource for NullScanner {
    fn mount(&mut self) -> Result<ScanSubscription, CaptureError> {
        if self.fail_mount {
            return Err(CaptureError::ScanDevice("null scanner is inaccessible".into()));
        }
        let events = self.batches.pop_front().unwrap_or_default();
        let (tx, subscription) = ScanSubscription::channel(events.len() + 1);
        for event in events {
            // Capacity covers the whole batch.
            let _ = tx.try_send(event);
        }
        self.mounts.fetch_add(1, Ordering::SeqCst);

        let releases = self.releases.clone();
        let held = self.keep_open.then_some(tx);
        Ok(subscription.on_release(move || {
            drop(held);
            releases.fetch_add(1, Ordering::SeqCst);
        }))
    }
}
