use study_core::model::{Subject, Topic};
use study_core::progress::{topic_completion, topic_is_complete};

use super::format::format_percent;
use super::schedule_vm::date_value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtopicVm {
    pub name: String,
    pub completed: bool,
    pub resources: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopicVm {
    pub name: String,
    pub complete: bool,
    pub completion_label: String,
    pub subtopics: Vec<SubtopicVm>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubjectVm {
    pub name: String,
    pub percent: f64,
    pub progress_label: String,
    /// `YYYY-MM-DD`, or empty when no due date is set. Matches the value
    /// format of a date input.
    pub due_date_value: String,
    pub resources: Vec<String>,
    pub topics: Vec<TopicVm>,
}

#[must_use]
pub fn map_subject(name: &str, subject: &Subject) -> SubjectVm {
    SubjectVm {
        name: name.to_owned(),
        percent: subject.progress(),
        progress_label: format!("Progress: {}", format_percent(subject.progress())),
        due_date_value: subject.due_date().map(date_value).unwrap_or_default(),
        resources: subject.resources().to_vec(),
        topics: subject
            .topics()
            .iter()
            .map(|(name, topic)| map_topic(name, topic))
            .collect(),
    }
}

fn map_topic(name: &str, topic: &Topic) -> TopicVm {
    let completion = topic_completion(topic);
    TopicVm {
        name: name.to_owned(),
        complete: topic_is_complete(topic),
        completion_label: format!("{}/{} subtopics", completion.completed, completion.total),
        subtopics: topic
            .subtopics()
            .iter()
            .map(|(name, subtopic)| SubtopicVm {
                name: name.clone(),
                completed: subtopic.completed(),
                resources: subtopic.resources().to_vec(),
            })
            .collect(),
    }
}
