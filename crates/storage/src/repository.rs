use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use study_core::model::StudyState;
use thiserror::Error;

use crate::json::JsonFileRepository;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the whole study state.
///
/// The state is always read and written as one unit; there are no partial
/// writes.
#[async_trait]
pub trait StudyRepository: Send + Sync {
    /// Load the last saved state.
    ///
    /// Returns an empty state when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if stored data exists but cannot be read.
    async fn load(&self) -> Result<StudyState, StorageError>;

    /// Replace the stored state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be written.
    async fn save(&self, state: &StudyState) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<Option<StudyState>>>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already saved state.
    #[must_use]
    pub fn with_state(state: StudyState) -> Self {
        Self {
            state: Arc::new(Mutex::new(Some(state))),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of successful `save` calls so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StudyRepository for InMemoryRepository {
    async fn load(&self) -> Result<StudyState, StorageError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone().unwrap_or_default())
    }

    async fn save(&self, state: &StudyState) -> Result<(), StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Holds the repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub study: Arc<dyn StudyRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            study: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Build a `Storage` backed by a JSON document at `path`.
    ///
    /// The file is not touched until the first load or save.
    #[must_use]
    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        Self {
            study: Arc::new(JsonFileRepository::new(path)),
        }
    }
}
