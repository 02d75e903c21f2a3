use chrono::NaiveDate;
use study_core::PlanError;
use study_core::model::{StudyHours, StudyState};

/// Every operation the presentation layer can issue against the state.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PlannerCommand {
    AddSubject {
        name: String,
    },
    DeleteSubject {
        subject: String,
    },
    AddTopic {
        subject: String,
        name: String,
    },
    DeleteTopic {
        subject: String,
        topic: String,
    },
    AddSubtopic {
        subject: String,
        topic: String,
        name: String,
    },
    DeleteSubtopic {
        subject: String,
        topic: String,
        subtopic: String,
    },
    SetSubtopicCompleted {
        subject: String,
        topic: String,
        subtopic: String,
        completed: bool,
    },
    ToggleSubtopic {
        subject: String,
        topic: String,
        subtopic: String,
    },
    AddSubtopicResource {
        subject: String,
        topic: String,
        subtopic: String,
        link: String,
    },
    AddSubjectResource {
        subject: String,
        link: String,
    },
    SetDueDate {
        subject: String,
        due_date: Option<NaiveDate>,
    },
    SetHours {
        date: NaiveDate,
        subject: String,
        hours: f64,
    },
    ClearScheduleDay {
        date: NaiveDate,
    },
}

/// Result of a successfully applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// User-facing confirmation.
    pub message: String,
    /// False when the command left the state as it was; nothing is saved then.
    pub changed: bool,
}

impl CommandOutcome {
    fn changed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: true,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: false,
        }
    }
}

impl PlannerCommand {
    /// Short stable name used in log events.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddSubject { .. } => "add_subject",
            Self::DeleteSubject { .. } => "delete_subject",
            Self::AddTopic { .. } => "add_topic",
            Self::DeleteTopic { .. } => "delete_topic",
            Self::AddSubtopic { .. } => "add_subtopic",
            Self::DeleteSubtopic { .. } => "delete_subtopic",
            Self::SetSubtopicCompleted { .. } => "set_subtopic_completed",
            Self::ToggleSubtopic { .. } => "toggle_subtopic",
            Self::AddSubtopicResource { .. } => "add_subtopic_resource",
            Self::AddSubjectResource { .. } => "add_subject_resource",
            Self::SetDueDate { .. } => "set_due_date",
            Self::SetHours { .. } => "set_hours",
            Self::ClearScheduleDay { .. } => "clear_schedule_day",
        }
    }

    /// Run the command against the state. Progress is recomputed by the
    /// state operations themselves.
    pub(crate) fn execute(self, state: &mut StudyState) -> Result<CommandOutcome, PlanError> {
        let outcome = match self {
            Self::AddSubject { name } => {
                let name = state.add_subject(&name)?;
                CommandOutcome::changed(format!("Subject '{name}' added!"))
            }
            Self::DeleteSubject { subject } => {
                state.delete_subject(&subject)?;
                CommandOutcome::changed(format!("Subject '{subject}' deleted"))
            }
            Self::AddTopic { subject, name } => {
                let name = state.add_topic(&subject, &name)?;
                CommandOutcome::changed(format!("Topic '{name}' added!"))
            }
            Self::DeleteTopic { subject, topic } => {
                state.delete_topic(&subject, &topic)?;
                CommandOutcome::changed(format!("Topic '{topic}' deleted"))
            }
            Self::AddSubtopic {
                subject,
                topic,
                name,
            } => {
                let name = state.add_subtopic(&subject, &topic, &name)?;
                CommandOutcome::changed(format!("Subtopic '{name}' added!"))
            }
            Self::DeleteSubtopic {
                subject,
                topic,
                subtopic,
            } => {
                state.delete_subtopic(&subject, &topic, &subtopic)?;
                CommandOutcome::changed(format!("Subtopic '{subtopic}' deleted"))
            }
            Self::SetSubtopicCompleted {
                subject,
                topic,
                subtopic,
                completed,
            } => {
                let previous = state.set_subtopic_completed(&subject, &topic, &subtopic, completed)?;
                let message = completion_message(&subtopic, completed);
                if previous == completed {
                    CommandOutcome::unchanged(message)
                } else {
                    CommandOutcome::changed(message)
                }
            }
            Self::ToggleSubtopic {
                subject,
                topic,
                subtopic,
            } => {
                let completed = state.toggle_subtopic(&subject, &topic, &subtopic)?;
                CommandOutcome::changed(completion_message(&subtopic, completed))
            }
            Self::AddSubtopicResource {
                subject,
                topic,
                subtopic,
                link,
            } => {
                state.add_subtopic_resource(&subject, &topic, &subtopic, &link)?;
                CommandOutcome::changed("Resource link added/updated!")
            }
            Self::AddSubjectResource { subject, link } => {
                state.add_subject_resource(&subject, &link)?;
                CommandOutcome::changed("Resource link added/updated!")
            }
            Self::SetDueDate { subject, due_date } => {
                let unchanged = state
                    .subject(&subject)
                    .is_some_and(|s| s.due_date() == due_date);
                state.set_due_date(&subject, due_date)?;
                let message = match due_date {
                    Some(date) => format!("Due date for '{subject}' set to {date}"),
                    None => format!("Due date for '{subject}' cleared"),
                };
                if unchanged {
                    CommandOutcome::unchanged(message)
                } else {
                    CommandOutcome::changed(message)
                }
            }
            Self::SetHours {
                date,
                subject,
                hours,
            } => {
                let hours = StudyHours::clamped(hours);
                let changed = state.set_hours(date, &subject, hours)?;
                let message = format!("{subject}: {} hours on {date}", hours.value());
                if changed {
                    CommandOutcome::changed(message)
                } else {
                    CommandOutcome::unchanged(message)
                }
            }
            Self::ClearScheduleDay { date } => {
                if state.clear_schedule_day(date) {
                    CommandOutcome::changed(format!("Schedule for {date} cleared"))
                } else {
                    CommandOutcome::unchanged(format!("No schedule for {date} yet."))
                }
            }
        };
        Ok(outcome)
    }
}

fn completion_message(subtopic: &str, completed: bool) -> String {
    if completed {
        format!("Subtopic '{subtopic}' marked complete")
    } else {
        format!("Subtopic '{subtopic}' marked incomplete")
    }
}
