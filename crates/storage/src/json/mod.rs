use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use study_core::model::StudyState;

use crate::repository::{StorageError, StudyRepository};

pub mod mapping;

/// Stores the whole state as one JSON document on disk.
///
/// Every save rewrites the file. The new contents are written to a sibling
/// `.tmp` file first and then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("study"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, action: &str, err: &std::io::Error) -> StorageError {
        StorageError::Io(format!("{action} {}: {err}", self.path.display()))
    }
}

#[async_trait]
impl StudyRepository for JsonFileRepository {
    async fn load(&self) -> Result<StudyState, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no study data yet, starting empty");
                return Ok(StudyState::new());
            }
            Err(err) => return Err(self.io_error("failed to read", &err)),
        };

        if contents.trim().is_empty() {
            tracing::debug!(path = %self.path.display(), "study data file is empty");
            return Ok(StudyState::new());
        }

        let state = mapping::decode(&contents)?;
        tracing::debug!(
            path = %self.path.display(),
            subjects = state.subjects().len(),
            "loaded study data"
        );
        Ok(state)
    }

    async fn save(&self, state: &StudyState) -> Result<(), StorageError> {
        let contents = mapping::encode(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| self.io_error("failed to create directory for", &err))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, contents)
            .await
            .map_err(|err| self.io_error("failed to write", &err))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|err| self.io_error("failed to replace", &err))?;

        tracing::debug!(path = %self.path.display(), "saved study data");
        Ok(())
    }
}
