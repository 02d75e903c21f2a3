use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{EntityKind, PlanError, normalize_name};

//
// ─── SUBTOPIC ──────────────────────────────────────────────────────────────────
//

/// Smallest tracked unit of study. Carries the completion flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subtopic {
    completed: bool,
    resources: Vec<String>,
}

impl Subtopic {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a subtopic from stored parts.
    #[must_use]
    pub fn from_persisted(completed: bool, resources: Vec<String>) -> Self {
        Self {
            completed,
            resources,
        }
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub(crate) fn push_resource(&mut self, link: String) {
        self.resources.push(link);
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A subdivision of a subject, keyed by subtopic name.
///
/// Topics store no progress of their own; completion is derived from the
/// subtopic flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topic {
    subtopics: BTreeMap<String, Subtopic>,
}

impl Topic {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_persisted(subtopics: BTreeMap<String, Subtopic>) -> Self {
        Self { subtopics }
    }

    #[must_use]
    pub fn subtopics(&self) -> &BTreeMap<String, Subtopic> {
        &self.subtopics
    }

    #[must_use]
    pub fn subtopic(&self, name: &str) -> Option<&Subtopic> {
        self.subtopics.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subtopics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subtopics.is_empty()
    }

    pub(crate) fn subtopic_mut(&mut self, name: &str) -> Result<&mut Subtopic, PlanError> {
        self.subtopics
            .get_mut(name)
            .ok_or_else(|| PlanError::not_found(EntityKind::Subtopic, name))
    }

    pub(crate) fn insert_subtopic(&mut self, raw: &str) -> Result<String, PlanError> {
        let name = normalize_name(EntityKind::Subtopic, raw)?;
        if self.subtopics.contains_key(&name) {
            return Err(PlanError::Duplicate {
                kind: EntityKind::Subtopic,
                name,
            });
        }
        self.subtopics.insert(name.clone(), Subtopic::new());
        Ok(name)
    }

    pub(crate) fn remove_subtopic(&mut self, name: &str) -> Result<Subtopic, PlanError> {
        self.subtopics
            .remove(name)
            .ok_or_else(|| PlanError::not_found(EntityKind::Subtopic, name))
    }
}

//
// ─── SUBJECT ───────────────────────────────────────────────────────────────────
//

/// Top-level exam area. Its name is the key it is stored under.
///
/// `progress` is a cached percentage in `0.0..=100.0`. It is refreshed by
/// [`crate::progress::recompute`] after every structural edit and is never
/// trusted across edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subject {
    progress: f64,
    topics: BTreeMap<String, Topic>,
    due_date: Option<NaiveDate>,
    resources: Vec<String>,
}

impl Subject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a subject from stored parts. Progress is recomputed from the
    /// topics rather than taken from storage.
    #[must_use]
    pub fn from_persisted(
        topics: BTreeMap<String, Topic>,
        due_date: Option<NaiveDate>,
        resources: Vec<String>,
    ) -> Self {
        let mut subject = Self {
            progress: 0.0,
            topics,
            due_date,
            resources,
        };
        crate::progress::recompute(&mut subject);
        subject
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn topics(&self) -> &BTreeMap<String, Topic> {
        &self.topics
    }

    #[must_use]
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.get(name)
    }

    #[must_use]
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    #[must_use]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub(crate) fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    pub(crate) fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    pub(crate) fn push_resource(&mut self, link: String) {
        self.resources.push(link);
    }

    pub(crate) fn topic_mut(&mut self, name: &str) -> Result<&mut Topic, PlanError> {
        self.topics
            .get_mut(name)
            .ok_or_else(|| PlanError::not_found(EntityKind::Topic, name))
    }

    pub(crate) fn insert_topic(&mut self, raw: &str) -> Result<String, PlanError> {
        let name = normalize_name(EntityKind::Topic, raw)?;
        if self.topics.contains_key(&name) {
            return Err(PlanError::Duplicate {
                kind: EntityKind::Topic,
                name,
            });
        }
        self.topics.insert(name.clone(), Topic::new());
        Ok(name)
    }

    pub(crate) fn remove_topic(&mut self, name: &str) -> Result<Topic, PlanError> {
        self.topics
            .remove(name)
            .ok_or_else(|| PlanError::not_found(EntityKind::Topic, name))
    }
}
