mod schedule;
mod state;
mod subject;

pub use schedule::{MAX_HOURS_PER_DAY, Schedule, StudyHours};
pub use state::{ResourceRef, StudyState};
pub use subject::{Subject, Subtopic, Topic};
