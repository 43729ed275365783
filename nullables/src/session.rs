//! Nullable session store: in-memory flags with write accounting.

use facegate_session::{SessionError, SessionRecord, SessionStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// An in-memory session store for testing.
/// Thread-safe so it can be shared through an `Arc`.
pub struct NullSessionStore {
    record: Mutex<SessionRecord>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl NullSessionStore {
    pub fn new() -> Self {
        Self {
            record: Mutex::new(SessionRecord::default()),
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// A store that already holds a session.
    pub fn authenticated(subject_name: &str) -> Self {
        let store = Self::new();
        *store.record.lock().unwrap() = SessionRecord::authenticated(subject_name);
        store
    }

    /// Make subsequent `set` calls fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for NullSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for NullSessionStore {
    fn set(&self, subject_name: &str) -> Result<(), SessionError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SessionError::Io("null store rejects writes".into()));
        }
        *self.record.lock().unwrap() = SessionRecord::authenticated(subject_name);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.record.lock().unwrap() = SessionRecord::default();
        Ok(())
    }

    fn record(&self) -> SessionRecord {
        self.record.lock().unwrap().clone()
    }
}
