use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{EntityKind, PlanError, normalize_name};
use crate::model::schedule::{Schedule, StudyHours};
use crate::model::subject::{Subject, Topic};
use crate::progress;

/// The whole application state: the subject tree plus the study schedule.
///
/// Owned by the top-level application loop and handed by reference to each
/// operation. Every mutation either succeeds and leaves progress recomputed,
/// or fails with a `PlanError` and leaves the state untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyState {
    subjects: BTreeMap<String, Subject>,
    schedule: Schedule,
}

/// One resource link and where it is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRef<'a> {
    pub subject: &'a str,
    pub topic: Option<&'a str>,
    pub subtopic: Option<&'a str>,
    pub link: &'a str,
}

impl ResourceRef<'_> {
    fn matches(&self, needle: &str) -> bool {
        [
            Some(self.subject),
            self.topic,
            self.subtopic,
            Some(self.link),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl StudyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_persisted(subjects: BTreeMap<String, Subject>, schedule: Schedule) -> Self {
        Self { subjects, schedule }
    }

    #[must_use]
    pub fn subjects(&self) -> &BTreeMap<String, Subject> {
        &self.subjects
    }

    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.get(name)
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty() && self.schedule.is_empty()
    }

    /// Create each named subject when the state holds no subjects yet.
    ///
    /// Returns true if anything was created. Blank and repeated names are
    /// skipped.
    pub fn seed_subjects<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.subjects.is_empty() {
            return false;
        }
        for name in names {
            let _ = self.add_subject(name.as_ref());
        }
        !self.subjects.is_empty()
    }

    /// Recompute every subject's cached progress.
    pub fn recompute_all(&mut self) {
        self.subjects.values_mut().for_each(progress::recompute);
    }

    // ─── subjects ──────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `PlanError::EmptyName` or `PlanError::Duplicate`.
    pub fn add_subject(&mut self, raw: &str) -> Result<String, PlanError> {
        let name = normalize_name(EntityKind::Subject, raw)?;
        if self.subjects.contains_key(&name) {
            return Err(PlanError::Duplicate {
                kind: EntityKind::Subject,
                name,
            });
        }
        self.subjects.insert(name.clone(), Subject::new());
        Ok(name)
    }

    /// Removes the subject and its whole tree. Schedule allocations that
    /// mention it are kept.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if the subject does not exist.
    pub fn delete_subject(&mut self, name: &str) -> Result<Subject, PlanError> {
        self.subjects
            .remove(name)
            .ok_or_else(|| PlanError::not_found(EntityKind::Subject, name))
    }

    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if the subject does not exist.
    pub fn set_due_date(
        &mut self,
        subject: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<(), PlanError> {
        self.subject_mut(subject)?.set_due_date(due_date);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `PlanError::EmptyLink` or `PlanError::NotFound`.
    pub fn add_subject_resource(&mut self, subject: &str, link: &str) -> Result<(), PlanError> {
        let link = normalize_link(link)?;
        self.subject_mut(subject)?.push_resource(link);
        Ok(())
    }

    // ─── topics ────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `PlanError::NotFound` for a missing subject, or
    /// `PlanError::EmptyName` / `PlanError::Duplicate` for the topic name.
    pub fn add_topic(&mut self, subject: &str, raw: &str) -> Result<String, PlanError> {
        self.edit_subject(subject, |s| s.insert_topic(raw))
    }

    /// Removes exactly one topic; siblings are untouched.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if the subject or topic does not exist.
    pub fn delete_topic(&mut self, subject: &str, topic: &str) -> Result<Topic, PlanError> {
        self.edit_subject(subject, |s| s.remove_topic(topic))
    }

    // ─── subtopics ─────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `PlanError::NotFound` for a missing parent, or
    /// `PlanError::EmptyName` / `PlanError::Duplicate` for the subtopic name.
    pub fn add_subtopic(
        &mut self,
        subject: &str,
        topic: &str,
        raw: &str,
    ) -> Result<String, PlanError> {
        self.edit_subject(subject, |s| s.topic_mut(topic)?.insert_subtopic(raw))
    }

    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if any part of the path does not exist.
    pub fn delete_subtopic(
        &mut self,
        subject: &str,
        topic: &str,
        subtopic: &str,
    ) -> Result<(), PlanError> {
        self.edit_subject(subject, |s| {
            s.topic_mut(topic)?.remove_subtopic(subtopic).map(|_| ())
        })
    }

    /// Returns the previous flag.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if any part of the path does not exist.
    pub fn set_subtopic_completed(
        &mut self,
        subject: &str,
        topic: &str,
        subtopic: &str,
        completed: bool,
    ) -> Result<bool, PlanError> {
        self.edit_subject(subject, |s| {
            let entry = s.topic_mut(topic)?.subtopic_mut(subtopic)?;
            let previous = entry.completed();
            entry.set_completed(completed);
            Ok(previous)
        })
    }

    /// Flip the completion flag and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if any part of the path does not exist.
    pub fn toggle_subtopic(
        &mut self,
        subject: &str,
        topic: &str,
        subtopic: &str,
    ) -> Result<bool, PlanError> {
        self.edit_subject(subject, |s| {
            let entry = s.topic_mut(topic)?.subtopic_mut(subtopic)?;
            let next = !entry.completed();
            entry.set_completed(next);
            Ok(next)
        })
    }

    /// # Errors
    ///
    /// Returns `PlanError::EmptyLink` or `PlanError::NotFound`.
    pub fn add_subtopic_resource(
        &mut self,
        subject: &str,
        topic: &str,
        subtopic: &str,
        link: &str,
    ) -> Result<(), PlanError> {
        let link = normalize_link(link)?;
        self.subject_mut(subject)?
            .topic_mut(topic)?
            .subtopic_mut(subtopic)?
            .push_resource(link);
        Ok(())
    }

    // ─── schedule ──────────────────────────────────────────────────────────

    /// Set the hours planned for a subject on a date. The date entry is
    /// created on demand. Returns true when the stored value changed.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if the subject does not exist.
    pub fn set_hours(
        &mut self,
        date: NaiveDate,
        subject: &str,
        hours: StudyHours,
    ) -> Result<bool, PlanError> {
        if !self.subjects.contains_key(subject) {
            return Err(PlanError::not_found(EntityKind::Subject, subject));
        }
        Ok(self.schedule.set(date, subject.to_owned(), hours))
    }

    /// Drop every allocation for a date. Returns true if the date had an entry.
    pub fn clear_schedule_day(&mut self, date: NaiveDate) -> bool {
        self.schedule.clear_day(date)
    }

    #[must_use]
    pub fn hours_for(&self, date: NaiveDate) -> Option<&BTreeMap<String, StudyHours>> {
        self.schedule.day(date)
    }

    // ─── resources ─────────────────────────────────────────────────────────

    /// Every resource link in the tree, subject-level links first within
    /// each subject. `filter` is a case-insensitive substring matched
    /// against the link and its location names.
    #[must_use]
    pub fn resource_index(&self, filter: Option<&str>) -> Vec<ResourceRef<'_>> {
        let needle = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());

        let mut refs = Vec::new();
        for (subject_name, subject) in &self.subjects {
            for link in subject.resources() {
                refs.push(ResourceRef {
                    subject: subject_name,
                    topic: None,
                    subtopic: None,
                    link,
                });
            }
            for (topic_name, topic) in subject.topics() {
                for (subtopic_name, subtopic) in topic.subtopics() {
                    for link in subtopic.resources() {
                        refs.push(ResourceRef {
                            subject: subject_name,
                            topic: Some(topic_name.as_str()),
                            subtopic: Some(subtopic_name.as_str()),
                            link,
                        });
                    }
                }
            }
        }

        match needle {
            Some(needle) => refs.into_iter().filter(|r| r.matches(&needle)).collect(),
            None => refs,
        }
    }

    fn subject_mut(&mut self, name: &str) -> Result<&mut Subject, PlanError> {
        self.subjects
            .get_mut(name)
            .ok_or_else(|| PlanError::not_found(EntityKind::Subject, name))
    }

    /// Run a structural edit on one subject and recompute its progress if
    /// the edit succeeded.
    fn edit_subject<T>(
        &mut self,
        name: &str,
        edit: impl FnOnce(&mut Subject) -> Result<T, PlanError>,
    ) -> Result<T, PlanError> {
        let subject = self.subject_mut(name)?;
        let out = edit(&mut *subject)?;
        progress::recompute(subject);
        Ok(out)
    }
}

fn normalize_link(raw: &str) -> Result<String, PlanError> {
    let link = raw.trim();
    if link.is_empty() {
        return Err(PlanError::EmptyLink);
    }
    Ok(link.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_today;

    fn fr_state() -> StudyState {
        let mut state = StudyState::new();
        state.add_subject("Financial Reporting").unwrap();
        state.add_topic("Financial Reporting", "Standards").unwrap();
        state
            .add_subtopic("Financial Reporting", "Standards", "A")
            .unwrap();
        state
            .add_subtopic("Financial Reporting", "Standards", "B")
            .unwrap();
        state
    }

    #[test]
    fn duplicate_subtopic_leaves_state_unchanged() {
        let mut state = fr_state();
        state
            .set_subtopic_completed("Financial Reporting", "Standards", "A", true)
            .unwrap();
        let before = state.clone();

        let err = state
            .add_subtopic("Financial Reporting", "Standards", "A")
            .unwrap_err();

        assert_eq!(
            err,
            PlanError::Duplicate {
                kind: EntityKind::Subtopic,
                name: "A".into()
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut state = fr_state();
        let before = state.clone();
        assert_eq!(
            state.add_subject(" ").unwrap_err(),
            PlanError::EmptyName(EntityKind::Subject)
        );
        assert_eq!(
            state.add_topic("Financial Reporting", "").unwrap_err(),
            PlanError::EmptyName(EntityKind::Topic)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn missing_parent_is_not_found() {
        let mut state = StudyState::new();
        let err = state.add_topic("Audit", "Ethics").unwrap_err();
        assert_eq!(err, PlanError::not_found(EntityKind::Subject, "Audit"));
    }

    #[test]
    fn delete_topic_keeps_siblings_and_recomputes() {
        let mut state = fr_state();
        state.add_topic("Financial Reporting", "Consolidation").unwrap();
        state
            .add_subtopic("Financial Reporting", "Consolidation", "Goodwill")
            .unwrap();
        state
            .toggle_subtopic("Financial Reporting", "Consolidation", "Goodwill")
            .unwrap();
        state
            .add_subtopic_resource(
                "Financial Reporting",
                "Consolidation",
                "Goodwill",
                "https://example.org/goodwill",
            )
            .unwrap();
        let sibling = state
            .subject("Financial Reporting")
            .unwrap()
            .topic("Consolidation")
            .unwrap()
            .clone();
        assert!((state.subject("Financial Reporting").unwrap().progress() - 50.0).abs() < 1e-9);

        state
            .delete_topic("Financial Reporting", "Standards")
            .unwrap();

        let subject = state.subject("Financial Reporting").unwrap();
        assert_eq!(subject.topics().len(), 1);
        assert_eq!(subject.topic("Consolidation"), Some(&sibling));
        assert!((subject.progress() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn delete_subtopic_recomputes_progress() {
        let mut state = fr_state();
        state
            .set_subtopic_completed("Financial Reporting", "Standards", "A", true)
            .unwrap();
        assert_eq!(state.subject("Financial Reporting").unwrap().progress(), 0.0);

        state
            .delete_subtopic("Financial Reporting", "Standards", "B")
            .unwrap();
        assert_eq!(state.subject("Financial Reporting").unwrap().progress(), 100.0);
    }

    #[test]
    fn toggle_returns_new_flag() {
        let mut state = fr_state();
        assert!(state.toggle_subtopic("Financial Reporting", "Standards", "A").unwrap());
        assert!(!state.toggle_subtopic("Financial Reporting", "Standards", "A").unwrap());
    }

    #[test]
    fn set_hours_requires_known_subject() {
        let mut state = fr_state();
        let day = fixed_today();
        let err = state
            .set_hours(day, "Direct Tax Law", StudyHours::clamped(2.5))
            .unwrap_err();
        assert_eq!(err, PlanError::not_found(EntityKind::Subject, "Direct Tax Law"));

        state.add_subject("Direct Tax Law").unwrap();
        assert!(state.set_hours(day, "Direct Tax Law", StudyHours::clamped(2.5)).unwrap());
        assert_eq!(
            state.hours_for(day).unwrap().get("Direct Tax Law"),
            Some(&StudyHours::clamped(2.5))
        );

        assert!(state.clear_schedule_day(day));
        assert!(state.hours_for(day).is_none());
    }

    #[test]
    fn seed_only_fills_empty_state() {
        let mut state = StudyState::new();
        assert!(state.seed_subjects(["Financial Reporting", "Audit", " ", "Audit"]));
        assert_eq!(state.subjects().len(), 2);
        assert!(!state.seed_subjects(["Indirect Tax"]));
        assert_eq!(state.subjects().len(), 2);
    }

    #[test]
    fn resource_index_lists_and_filters() {
        let mut state = fr_state();
        state
            .add_subject_resource("Financial Reporting", "https://icai.org/fr")
            .unwrap();
        state
            .add_subtopic_resource("Financial Reporting", "Standards", "B", "notes.pdf")
            .unwrap();
        assert_eq!(
            state.add_subject_resource("Financial Reporting", "  "),
            Err(PlanError::EmptyLink)
        );

        let all = state.resource_index(None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].topic, None);
        assert_eq!(all[1].subtopic, Some("B"));

        let filtered = state.resource_index(Some("PDF"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].link, "notes.pdf");

        let by_location = state.resource_index(Some("standards"));
        assert_eq!(by_location.len(), 1);
    }

    #[test]
    fn due_date_is_stored() {
        let mut state = fr_state();
        state
            .set_due_date("Financial Reporting", Some(fixed_today()))
            .unwrap();
        assert_eq!(
            state.subject("Financial Reporting").unwrap().due_date(),
            Some(fixed_today())
        );
    }
}
