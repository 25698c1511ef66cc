use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use tutorial_core::model::ProgressTable;

/// Errors surfaced by blob-store adapters.
///
/// Callers in the service layer treat every one of these as "no progress":
/// persistence failures degrade to an empty table rather than propagating.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A single named blob, the persistence seam for the progress table.
///
/// Mirrors a web-local-storage key: reads return the whole blob or nothing,
/// writes overwrite the whole blob. The table is small, so there is no
/// append log and no partial update.
pub trait ProgressBlobStore: Send + Sync {
    /// Read the blob, `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the blob contents.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn write(&self, blob: &str) -> Result<(), StorageError>;

    /// Delete the blob, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn remove(&self) -> Result<(), StorageError>;
}

//
// ─── BLOB CODEC ────────────────────────────────────────────────────────────────
//

/// Serialize the table to its persisted JSON form.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_table(table: &ProgressTable) -> Result<String, StorageError> {
    serde_json::to_string(table).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Parse a persisted blob back into a table.
///
/// Corruption is "no progress": a blob that fails to parse yields an empty
/// table, never an error.
#[must_use]
pub fn decode_table(blob: &str) -> ProgressTable {
    serde_json::from_str(blob).unwrap_or_default()
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// Blob store backed by process memory, for tests and prototyping.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    blob: Arc<Mutex<Option<String>>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with blob contents.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(Some(blob.into()))),
        }
    }

    /// Snapshot of the current blob, for assertions.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.blob
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProgressBlobStore for MemoryBlobStore {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .blob
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, blob: &str) -> Result<(), StorageError> {
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob.to_owned());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        *self.blob.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
