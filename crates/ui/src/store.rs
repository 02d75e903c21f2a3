//! The single owner of the live study state.
//!
//! Handlers never mutate the signal in place. `dispatch` runs the command on
//! a copy, persists it through `PlannerService`, and only then sets the
//! signal, which triggers exactly one re-render with the new state.

use std::sync::Arc;

use dioxus::prelude::*;
use services::{PlannerCommand, PlannerError, PlannerService};
use study_core::model::StudyState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Warning,
    Error,
}

/// One-line feedback shown after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    /// Rejections become warnings; storage failures become errors.
    #[must_use]
    pub fn from_error(err: &PlannerError) -> Self {
        if err.is_rejection() {
            Self {
                kind: FlashKind::Warning,
                message: capitalize(&err.to_string()),
            }
        } else {
            Self {
                kind: FlashKind::Error,
                message: format!("Could not save: {err}"),
            }
        }
    }

    #[must_use]
    pub fn class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash flash--success",
            FlashKind::Warning => "flash flash--warning",
            FlashKind::Error => "flash flash--error",
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Copy)]
pub struct PlannerStore {
    pub state: Signal<StudyState>,
    pub flash: Signal<Option<Flash>>,
    planner: Signal<Arc<PlannerService>>,
}

impl PlannerStore {
    /// Run `command` and publish the result.
    ///
    /// On failure the live state is left as it was.
    pub fn dispatch(self, command: PlannerCommand) {
        let mut state = self.state;
        let mut flash = self.flash;
        let planner = Arc::clone(&self.planner.peek());

        spawn(async move {
            let mut next = StudyState::clone(&state.peek());
            match planner.apply(&mut next, command).await {
                Ok(outcome) => {
                    if outcome.changed {
                        state.set(next);
                    }
                    flash.set(Some(Flash::success(outcome.message)));
                }
                Err(err) => {
                    if !err.is_rejection() {
                        tracing::error!(error = %err, "failed to persist study state");
                    }
                    flash.set(Some(Flash::from_error(&err)));
                }
            }
        });
    }

    pub fn dismiss_flash(self) {
        let mut flash = self.flash;
        flash.set(None);
    }
}

/// Create the store for this component tree and provide it as context.
pub fn use_planner_store_provider(
    planner: Arc<PlannerService>,
    initial: impl FnOnce() -> StudyState,
) -> PlannerStore {
    let state = use_signal(initial);
    let flash = use_signal(|| None::<Flash>);
    let planner = use_signal(move || planner);
    use_context_provider(|| PlannerStore {
        state,
        flash,
        planner,
    })
}

#[must_use]
pub fn use_planner_store() -> PlannerStore {
    use_context::<PlannerStore>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::StorageError;
    use study_core::{EntityKind, PlanError};

    #[test]
    fn rejection_becomes_capitalized_warning() {
        let err = PlannerError::Rejected(PlanError::Duplicate {
            kind: EntityKind::Topic,
            name: "Standards".into(),
        });
        let flash = Flash::from_error(&err);
        assert_eq!(flash.kind, FlashKind::Warning);
        assert_eq!(flash.message, "Topic 'Standards' already exists");
    }

    #[test]
    fn storage_failure_becomes_error() {
        let err = PlannerError::Storage(StorageError::Io("disk full".into()));
        let flash = Flash::from_error(&err);
        assert_eq!(flash.kind, FlashKind::Error);
        assert!(flash.message.starts_with("Could not save"));
        assert_eq!(flash.class(), "flash flash--error");
    }
}
