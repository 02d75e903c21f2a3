use chrono::NaiveDate;
use serde::Serialize;
use study_core::Clock;
use study_core::model::StudyState;
use study_core::progress::{self, Completion};
use study_core::time::days_until;

/// Progress line for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectProgressRow {
    pub name: String,
    pub progress: f64,
    pub topics: usize,
    pub complete_topics: usize,
    pub due_date: Option<NaiveDate>,
    pub days_to_due: Option<i64>,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub exam_date: NaiveDate,
    pub days_left: i64,
    /// Subtopic-weighted percentage, `None` before any subtopic exists.
    pub overall_progress: Option<f64>,
    pub completed_subtopics: usize,
    pub total_subtopics: usize,
    pub subjects: Vec<SubjectProgressRow>,
}

/// Planned hours for one date, limited to non-zero allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub allocations: Vec<(String, f64)>,
    pub total_hours: f64,
}

impl DayPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}

/// Read-only aggregation over the study state.
#[derive(Debug, Clone, Copy)]
pub struct DashboardService {
    clock: Clock,
    exam_date: NaiveDate,
}

impl DashboardService {
    #[must_use]
    pub fn new(clock: Clock, exam_date: NaiveDate) -> Self {
        Self { clock, exam_date }
    }

    #[must_use]
    pub fn exam_date(&self) -> NaiveDate {
        self.exam_date
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Days from today until the exam; negative once it has passed.
    #[must_use]
    pub fn days_left(&self) -> i64 {
        days_until(self.exam_date, self.clock.today())
    }

    #[must_use]
    pub fn summary(&self, state: &StudyState) -> DashboardSummary {
        let today = self.clock.today();
        let Completion { completed, total } = progress::overall_completion(state);

        let subjects = state
            .subjects()
            .iter()
            .map(|(name, subject)| SubjectProgressRow {
                name: name.clone(),
                progress: subject.progress(),
                topics: subject.topics().len(),
                complete_topics: subject
                    .topics()
                    .values()
                    .filter(|topic| progress::topic_is_complete(topic))
                    .count(),
                due_date: subject.due_date(),
                days_to_due: subject.due_date().map(|due| days_until(due, today)),
            })
            .collect();

        DashboardSummary {
            today,
            exam_date: self.exam_date,
            days_left: days_until(self.exam_date, today),
            overall_progress: progress::overall_progress(state),
            completed_subtopics: completed,
            total_subtopics: total,
            subjects,
        }
    }

    /// Hours planned on `date`, skipping zero allocations.
    #[must_use]
    pub fn day_plan(&self, state: &StudyState, date: NaiveDate) -> DayPlan {
        let allocations: Vec<(String, f64)> = state
            .hours_for(date)
            .map(|day| {
                day.iter()
                    .filter(|(_, hours)| !hours.is_zero())
                    .map(|(subject, hours)| (subject.clone(), hours.value()))
                    .collect()
            })
            .unwrap_or_default();
        let total_hours = allocations.iter().map(|(_, hours)| hours).sum();
        DayPlan {
            date,
            allocations,
            total_hours,
        }
    }
}
