//! Authenticated-session storage.
//!
//! The session is two durable flags: whether someone is authenticated and
//! who. It is written only when a face is recognized and cleared only by an
//! explicit logout. Callers depend on the [`SessionStore`] trait so tests can
//! substitute an in-memory store.

pub mod error;
pub mod file;

pub use error::SessionError;
pub use file::FileSessionStore;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The persisted session flags.
///
/// Field names on disk match the keys the web client kept in local storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "userLoggedIn", default)]
    pub authenticated: bool,
    #[serde(rename = "username", default)]
    pub subject_name: Option<String>,
}

impl SessionRecord {
    pub fn authenticated(subject_name: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            subject_name: Some(subject_name.into()),
        }
    }
}

/// Process-wide session state.
pub trait SessionStore: Send + Sync {
    /// Mark `subject_name` as authenticated.
    fn set(&self, subject_name: &str) -> Result<(), SessionError>;

    /// Remove the session (logout).
    fn clear(&self) -> Result<(), SessionError>;

    /// Snapshot of the current flags.
    fn record(&self) -> SessionRecord;

    fn is_authenticated(&self) -> bool {
        self.record().authenticated
    }

    fn subject_name(&self) -> Option<String> {
        self.record().subject_name
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn set(&self, subject_name: &str) -> Result<(), SessionError> {
        (**self).set(subject_name)
    }

    fn clear(&self) -> Result<(), SessionError> {
        (**self).clear()
    }

    fn record(&self) -> SessionRecord {
        (**self).record()
    }
}
