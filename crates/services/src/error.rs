//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use study_core::PlanError;

/// Errors emitted by `PlannerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlannerError {
    /// The command was refused; the state is unchanged and nothing was saved.
    #[error(transparent)]
    Rejected(#[from] PlanError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PlannerError {
    /// True for user mistakes (empty or duplicate names, unknown entries).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, PlannerError::Rejected(_))
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
