//! Durable session storage backends.
//!
//! Readers must treat a missing or malformed record identically to "no
//! session": `load` returns `Ok(None)` for missing and `Err(Malformed)` for
//! corrupt, and the store recovers from both by starting logged out.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::session::SessionRecord;

/// Fixed storage key for the session record.
pub const SESSION_STORAGE_KEY: &str = "opsdesk.session";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed persisted session: {0}")]
    Malformed(String),

    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for the single session record.
pub trait SessionStorage {
    /// Overwrite the persisted record.
    fn save(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Read the persisted record. Missing is `Ok(None)`; corrupt is
    /// `Err(Malformed)`.
    fn load(&self) -> Result<Option<SessionRecord>, StorageError>;

    /// Remove the persisted record, if any.
    fn clear(&self) -> Result<(), StorageError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON file backend
// ─────────────────────────────────────────────────────────────────────────────

/// File-backed storage: one JSON document under the fixed storage key.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Store the record as `<dir>/opsdesk.session.json`.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for JsonFileStorage {
    fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, record)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let record = serde_json::from_reader(reader)
            .map_err(|e| StorageError::Malformed(e.to_string()))?;
        Ok(Some(record))
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory storage holding the serialized record.
///
/// Intended for tests/dev. Stores JSON text rather than the typed record so
/// tests can inject corrupt blobs and exercise the rehydration path. Clones
/// share the same slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    slot: Arc<RwLock<Option<String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored blob with arbitrary text, bypassing serialization.
    pub fn inject_raw(&self, blob: impl Into<String>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(blob.into());
        }
    }

    /// Raw stored text, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}

impl SessionStorage for InMemoryStorage {
    fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        let mut slot = self
            .slot
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        *slot = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<SessionRecord>, StorageError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        match slot.as_deref() {
            None => Ok(None),
            Some(json) => serde_json::from_str(json)
                .map(Some)
                .map_err(|e| StorageError::Malformed(e.to_string())),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))?;
        *slot = None;
        Ok(())
    }
}
