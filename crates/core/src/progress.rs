//! Progress aggregation over the subject → topic → subtopic tree.
//!
//! Subject progress is topic-level and all-or-nothing: a topic counts only
//! once every one of its subtopics is completed. The dashboard aggregate is
//! weighted by subtopic instead.

use crate::model::{StudyState, Subject, Topic};

/// Completed and total subtopic counts for one topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
}

impl Completion {
    /// Percentage in `0.0..=100.0`; zero when there is nothing to complete.
    #[must_use]
    pub fn percent(self) -> f64 {
        percent(self.completed, self.total)
    }

    fn add(self, other: Completion) -> Completion {
        Completion {
            completed: self.completed + other.completed,
            total: self.total + other.total,
        }
    }
}

#[must_use]
pub fn topic_completion(topic: &Topic) -> Completion {
    let completed = topic
        .subtopics()
        .values()
        .filter(|subtopic| subtopic.completed())
        .count();
    Completion {
        completed,
        total: topic.len(),
    }
}

/// A topic is complete when it has at least one subtopic and all of them
/// are completed.
#[must_use]
pub fn topic_is_complete(topic: &Topic) -> bool {
    let completion = topic_completion(topic);
    completion.total > 0 && completion.completed == completion.total
}

/// `100 * complete topics / topics`, or 0 when the subject has no topics.
#[must_use]
pub fn subject_progress(subject: &Subject) -> f64 {
    let total = subject.topics().len();
    let complete = subject
        .topics()
        .values()
        .filter(|topic| topic_is_complete(topic))
        .count();
    percent(complete, total)
}

/// Refresh the cached progress value on a subject.
pub fn recompute(subject: &mut Subject) {
    let progress = subject_progress(subject);
    subject.set_progress(progress);
}

/// Subtopic-weighted completion across every subject.
#[must_use]
pub fn overall_completion(state: &StudyState) -> Completion {
    state
        .subjects()
        .values()
        .flat_map(|subject| subject.topics().values())
        .map(topic_completion)
        .fold(Completion::default(), Completion::add)
}

/// Overall percentage for the dashboard, `None` while no subtopic exists.
#[must_use]
pub fn overall_progress(state: &StudyState) -> Option<f64> {
    let completion = overall_completion(state);
    (completion.total > 0).then(|| completion.percent())
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}
