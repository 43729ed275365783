//! JSON-file session store that survives restarts.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::{SessionError, SessionRecord, SessionStore};

/// A session store persisted as a small JSON document.
///
/// The current record is cached in memory; every write replaces the file
/// atomically (write to a sibling temp file, then rename).
pub struct FileSessionStore {
    path: PathBuf,
    current: Mutex<SessionRecord>,
}

impl FileSessionStore {
    /// Open the store at `path`, loading an existing session if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let current = match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => SessionRecord::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| SessionError::Corruption(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionRecord::default(),
            Err(e) => return Err(SessionError::Io(format!("{}: {e}", path.display()))),
        };
        tracing::debug!(path = %path.display(), authenticated = current.authenticated, "opened session store");
        Ok(Self {
            path,
            current: Mutex::new(current),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, SessionRecord> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, record: &SessionRecord) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Io(e.to_string()))?;
        }
        let bytes =
            serde_json::to_vec_pretty(record).map_err(|e| SessionError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, bytes).map_err(|e| SessionError::Io(format!("{}: {e}", tmp.display())))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| SessionError::Io(format!("{}: {e}", self.path.display())))
    }
}

impl SessionStore for FileSessionStore {
    fn set(&self, subject_name: &str) -> Result<(), SessionError> {
        let record = SessionRecord::authenticated(subject_name);
        let mut current = self.lock();
        self.persist(&record)?;
        *current = record;
        tracing::info!(subject = subject_name, "session established");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut current = self.lock();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(SessionError::Io(format!("{}: {e}", self.path.display()))),
        }
        *current = SessionRecord::default();
        tracing::info!("session cleared");
        Ok(())
    }

    fn record(&self) -> SessionRecord {
        self.lock().clone()
    }
}
