//! Session storage
//!
//! Provides in-memory and file-based stores for the session record.

use super::types::{SessionContext, SessionRecord};
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Backing storage for the session record
pub trait SessionStore {
    /// Load the stored record, `None` when signed out
    fn load(&self) -> Result<Option<SessionRecord>>;

    /// Persist a record, replacing any existing one
    fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Remove the stored record; succeeds when nothing is stored
    fn clear(&self) -> Result<()>;
}

impl SessionContext {
    /// Derive the session context from what a store currently holds
    pub fn from_store(store: &dyn SessionStore) -> Result<Self> {
        Ok(Self::from_record(store.load()?.as_ref()))
    }
}

/// Store a new session record for `user` and return its context
pub fn sign_in(store: &dyn SessionStore, user: impl Into<String>) -> Result<SessionContext> {
    let record = SessionRecord::new(user);
    store.save(&record)?;
    info!(user = record.user.as_deref().unwrap_or_default(), "Signed in");
    Ok(SessionContext::signed_in(&record))
}

/// Remove the stored session record
pub fn sign_out(store: &dyn SessionStore) -> Result<()> {
    store.clear()?;
    info!("Signed out");
    Ok(())
}

// ============================================================================
// Memory Store
// ============================================================================

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: RwLock<Option<SessionRecord>>,
}

impl MemorySessionStore {
    /// Create an empty (signed-out) store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `record`
    pub fn with_record(record: SessionRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::session("Session store lock poisoned")
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.record.read().map_err(poisoned)?.clone())
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        *self.record.write().map_err(poisoned)? = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.record.write().map_err(poisoned)? = None;
        Ok(())
    }
}

// ============================================================================
// File Store
// ============================================================================

/// Session store persisted as a JSON file
///
/// A missing file means signed out.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path to the session file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file");
                return Ok(None);
            }
            Err(e) => {
                return Err(Error::session(format!(
                    "Failed to read session file '{}': {e}",
                    self.path.display()
                )))
            }
        };

        let record = serde_json::from_str(&contents).map_err(|e| {
            Error::session(format!(
                "Failed to parse session file '{}': {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(record))
    }

    fn save(&self, record: &SessionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::session(format!(
                    "Failed to create session directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let contents = serde_json::to_string_pretty(record)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, contents)
            .map_err(|e| Error::session(format!("Failed to write session file: {e}")))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| Error::session(format!("Failed to rename session file: {e}")))?;

        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::session(format!(
                "Failed to remove session file '{}': {e}",
                self.path.display()
            ))),
        }
    }
}
