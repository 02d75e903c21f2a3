//! Persisted document shape and the translation to and from domain types.
//!
//! Calendar dates are written as ISO-8601 strings (`YYYY-MM-DD`) through
//! chrono's serde support, both as schedule keys and as due dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use study_core::model::{Schedule, StudyHours, StudyState, Subject, Subtopic, Topic};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Top-level JSON document.
///
/// Unknown top-level keys are rejected, so a file in some other layout is
/// reported instead of being read as empty and overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyRecord {
    #[serde(default)]
    pub subjects: BTreeMap<String, SubjectRecord>,
    #[serde(default)]
    pub schedule: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Written for readers of the file; ignored on load and recomputed.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub topics: BTreeMap<String, BTreeMap<String, SubtopicRecord>>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtopicRecord {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub resources: Vec<String>,
}

impl StudyRecord {
    #[must_use]
    pub fn from_state(state: &StudyState) -> Self {
        let subjects = state
            .subjects()
            .iter()
            .map(|(name, subject)| (name.clone(), SubjectRecord::from_subject(subject)))
            .collect();

        let schedule = state
            .schedule()
            .days()
            .iter()
            .map(|(date, day)| {
                let hours = day
                    .iter()
                    .map(|(subject, hours)| (subject.clone(), hours.value()))
                    .collect();
                (*date, hours)
            })
            .collect();

        Self { subjects, schedule }
    }

    /// Convert the record back into domain state. Hours are clamped on the
    /// way in.
    #[must_use]
    pub fn into_state(self) -> StudyState {
        let subjects = self
            .subjects
            .into_iter()
            .map(|(name, record)| (name, record.into_subject()))
            .collect();

        let days = self
            .schedule
            .into_iter()
            .map(|(date, day)| {
                let hours = day
                    .into_iter()
                    .map(|(subject, hours)| (subject, StudyHours::clamped(hours)))
                    .collect();
                (date, hours)
            })
            .collect();

        StudyState::from_persisted(subjects, Schedule::from_persisted(days))
    }
}

impl SubjectRecord {
    #[must_use]
    pub fn from_subject(subject: &Subject) -> Self {
        let topics = subject
            .topics()
            .iter()
            .map(|(name, topic)| {
                let subtopics = topic
                    .subtopics()
                    .iter()
                    .map(|(name, subtopic)| (name.clone(), SubtopicRecord::from_subtopic(subtopic)))
                    .collect();
                (name.clone(), subtopics)
            })
            .collect();

        Self {
            progress: subject.progress(),
            topics,
            due_date: subject.due_date(),
            resources: subject.resources().to_vec(),
        }
    }

    fn into_subject(self) -> Subject {
        let topics = self
            .topics
            .into_iter()
            .map(|(name, subtopics)| {
                let subtopics = subtopics
                    .into_iter()
                    .map(|(name, record)| (name, record.into_subtopic()))
                    .collect();
                (name, Topic::from_persisted(subtopics))
            })
            .collect();

        Subject::from_persisted(topics, self.due_date, self.resources)
    }
}

impl SubtopicRecord {
    #[must_use]
    pub fn from_subtopic(subtopic: &Subtopic) -> Self {
        Self {
            completed: subtopic.completed(),
            resources: subtopic.resources().to_vec(),
        }
    }

    fn into_subtopic(self) -> Subtopic {
        Subtopic::from_persisted(self.completed, self.resources)
    }
}

/// Parse a JSON document into domain state.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON, dates that are
/// not `YYYY-MM-DD`, or unknown top-level keys.
pub fn decode(contents: &str) -> Result<StudyState, StorageError> {
    let record: StudyRecord = serde_json::from_str(contents).map_err(ser)?;
    Ok(record.into_state())
}

/// Render domain state as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode(state: &StudyState) -> Result<String, StorageError> {
    serde_json::to_string_pretty(&StudyRecord::from_state(state)).map_err(ser)
}
