//! Record stores backed by whole JSON documents
//!
//! Each store follows the same cycle for every write:
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌───────────────┐    ┌──────────────┐
//! │ lock     │───►│ load whole   │───►│ mutate +      │───►│ rewrite whole│
//! │ store    │    │ document     │    │ reorder       │    │ document     │
//! └──────────┘    └──────────────┘    └───────────────┘    └──────────────┘
//! ```
//!
//! - `EventStore`: tour dates kept sorted by calendar date
//! - `ReleaseStore`: two manually ranked release categories
//!
//! Storage is injected through [`DocumentStorage`] so tests can run against
//! memory and the server against files.

mod defaults;
mod events;
mod ordering;
mod releases;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::atomic::atomic_write;

pub use defaults::{default_catalog, default_events};
pub use events::EventStore;
pub use releases::ReleaseStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store mutations
#[derive(Debug)]
pub enum StoreError {
    /// No record with this id
    NotFound(String),
    /// The backing document could not be written
    Storage(String),
    /// No rank left above the highest one in this category
    RankExhausted(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Record not found: {}", id),
            StoreError::Storage(msg) => write!(f, "Storage failure: {}", msg),
            StoreError::RankExhausted(category) => {
                write!(f, "No rank left in {}", category)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Storage(e.to_string())
    }
}

/// I/O boundary for a single JSON document
pub trait DocumentStorage: Send + Sync {
    /// Current document contents; `None` when nothing has been stored yet
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the whole document
    fn write(&self, contents: &str) -> io::Result<()>;

    /// Short label for log messages
    fn describe(&self) -> String;
}

/// Document stored in a file, replaced atomically on every write
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStorage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        atomic_write(&self.path, contents)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory document, used by tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    /// Empty storage; the first read reports no backing data
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a raw document
    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: Mutex::new(Some(contents.to_string())),
            fail_writes: Mutex::new(false),
        }
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock() = fail;
    }

    /// Raw document as last written
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl DocumentStorage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents.lock().clone())
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        if *self.fail_writes.lock() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "memory storage is read-only",
            ));
        }
        *self.contents.lock() = Some(contents.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl<S: DocumentStorage + ?Sized> DocumentStorage for std::sync::Arc<S> {
    fn read(&self) -> io::Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        (**self).write(contents)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Outcome of reading a document
pub(crate) enum Loaded<T> {
    Found(T),
    /// Nothing stored yet
    Missing,
    /// Read failed or the JSON did not parse
    Unreadable,
}

/// Read and decode a document
///
/// # Returns
///
/// * `Loaded::Found` - the document parsed as `T`
/// * `Loaded::Missing` - nothing stored yet; the caller seeds defaults
/// * `Loaded::Unreadable` - I/O or parse failure, already logged
pub(crate) fn read_json<T: DeserializeOwned>(storage: &dyn DocumentStorage) -> Loaded<T> {
    match storage.read() {
        Ok(Some(contents)) => match serde_json::from_str(&contents) {
            Ok(value) => Loaded::Found(value),
            Err(e) => {
                tracing::warn!(
                    document = %storage.describe(),
                    error = %e,
                    "Malformed document, treating as empty"
                );
                Loaded::Unreadable
            }
        },
        Ok(None) => Loaded::Missing,
        Err(e) => {
            tracing::warn!(
                document = %storage.describe(),
                error = %e,
                "Failed to read document, treating as empty"
            );
            Loaded::Unreadable
        }
    }
}

/// Encode a document as pretty-printed JSON and replace the stored one
pub(crate) fn write_json<T: Serialize + ?Sized>(
    storage: &dyn DocumentStorage,
    value: &T,
) -> StoreResult<()> {
    let contents = serde_json::to_string_pretty(value)?;
    storage.write(&contents).map_err(|e| {
        tracing::error!(document = %storage.describe(), error = %e, "Failed to write document");
        StoreError::from(e)
    })
}
