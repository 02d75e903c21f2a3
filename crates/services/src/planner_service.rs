use std::sync::Arc;

use storage::repository::StudyRepository;
use study_core::model::StudyState;

use crate::commands::{CommandOutcome, PlannerCommand};
use crate::error::PlannerError;

/// Applies commands to the study state and persists the result.
///
/// The service holds no state of its own. The caller owns the `StudyState`
/// and passes it in for every command.
#[derive(Clone)]
pub struct PlannerService {
    repo: Arc<dyn StudyRepository>,
}

impl PlannerService {
    #[must_use]
    pub fn new(repo: Arc<dyn StudyRepository>) -> Self {
        Self { repo }
    }

    /// Load the saved state, recomputing every subject's progress.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Storage` if the repository cannot be read.
    pub async fn load(&self) -> Result<StudyState, PlannerError> {
        let mut state = self.repo.load().await?;
        state.recompute_all();
        Ok(state)
    }

    /// Load the saved state and seed `default_subjects` when it has none.
    ///
    /// Returns the state and whether seeding happened. A seeded state is
    /// saved right away.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Storage` if loading or saving fails.
    pub async fn bootstrap<S: AsRef<str>>(
        &self,
        default_subjects: &[S],
    ) -> Result<(StudyState, bool), PlannerError> {
        let mut state = self.load().await?;
        let seeded = state.seed_subjects(default_subjects);
        if seeded {
            tracing::info!(
                subjects = state.subjects().len(),
                "seeded default subjects"
            );
            self.repo.save(&state).await?;
        }
        Ok((state, seeded))
    }

    /// Apply one command to `state`, then save the whole state.
    ///
    /// Nothing is saved when the command is rejected or leaves the state as
    /// it was.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Rejected` with the user-facing warning when the
    /// command is refused; `state` is untouched in that case.
    /// Returns `PlannerError::Storage` if saving fails; `state` already holds
    /// the change then.
    pub async fn apply(
        &self,
        state: &mut StudyState,
        command: PlannerCommand,
    ) -> Result<CommandOutcome, PlannerError> {
        let label = command.label();
        let outcome = match command.execute(state) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(command = label, error = %err, "command rejected");
                return Err(err.into());
            }
        };

        if outcome.changed {
            self.repo.save(state).await?;
        }
        tracing::debug!(command = label, changed = outcome.changed, "command applied");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::InMemoryRepository;
    use study_core::{EntityKind, PlanError};

    fn service() -> (PlannerService, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        (PlannerService::new(Arc::new(repo.clone())), repo)
    }

    fn add_subtopic(subject: &str, topic: &str, name: &str) -> PlannerCommand {
        PlannerCommand::AddSubtopic {
            subject: subject.into(),
            topic: topic.into(),
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn apply_saves_after_each_change() {
        let (service, repo) = service();
        let mut state = StudyState::new();

        service
            .apply(&mut state, PlannerCommand::AddSubject { name: "FR".into() })
            .await
            .unwrap();
        service
            .apply(
                &mut state,
                PlannerCommand::AddTopic {
                    subject: "FR".into(),
                    name: "Standards".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(repo.save_count(), 2);
        assert_eq!(repo.load().await.unwrap(), state);
    }

    #[tokio::test]
    async fn duplicate_subtopic_is_rejected_without_saving() {
        let (service, repo) = service();
        let mut state = StudyState::new();
        state.add_subject("FR").unwrap();
        state.add_topic("FR", "Standards").unwrap();
        service
            .apply(&mut state, add_subtopic("FR", "Standards", "X"))
            .await
            .unwrap();
        let before = state.clone();

        let err = service
            .apply(&mut state, add_subtopic("FR", "Standards", "X"))
            .await
            .unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "subtopic 'X' already exists");
        assert!(matches!(
            err,
            PlannerError::Rejected(PlanError::Duplicate {
                kind: EntityKind::Subtopic,
                ..
            })
        ));
        assert_eq!(state, before);
        assert_eq!(repo.save_count(), 1);
    }

    #[tokio::test]
    async fn unchanged_command_skips_save() {
        let (service, repo) = service();
        let mut state = StudyState::new();
        let outcome = service
            .apply(
                &mut state,
                PlannerCommand::ClearScheduleDay {
                    date: study_core::time::fixed_today(),
                },
            )
            .await
            .unwrap();
        assert!(!outcome.changed);
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn bootstrap_seeds_once() {
        let (service, repo) = service();
        let defaults = ["Financial Reporting", "Indirect Tax & Laws"];

        let (state, seeded) = service.bootstrap(&defaults).await.unwrap();
        assert!(seeded);
        assert_eq!(state.subjects().len(), 2);
        assert_eq!(repo.save_count(), 1);

        let (again, seeded) = service.bootstrap(&defaults).await.unwrap();
        assert!(!seeded);
        assert_eq!(again, state);
        assert_eq!(repo.save_count(), 1);
    }
}
