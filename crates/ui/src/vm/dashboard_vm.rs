use services::DashboardSummary;

use super::format::format_percent;

#[derive(Clone, Debug, PartialEq)]
pub struct SubjectBarVm {
    pub name: String,
    pub percent: f64,
    pub label: String,
    pub topics_label: String,
    pub due_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardVm {
    /// `None` until at least one subtopic exists.
    pub overall_percent: Option<f64>,
    pub overall_label: String,
    pub time_left_label: String,
    pub subjects: Vec<SubjectBarVm>,
}

#[must_use]
pub fn map_dashboard(summary: &DashboardSummary) -> DashboardVm {
    let overall_label = match summary.overall_progress {
        Some(percent) => format!("Overall Progress: {}", format_percent(percent)),
        None => "No topics added yet.".to_owned(),
    };

    let subjects = summary
        .subjects
        .iter()
        .map(|row| SubjectBarVm {
            name: row.name.clone(),
            percent: row.progress,
            label: format_percent(row.progress),
            topics_label: format!("{}/{} topics complete", row.complete_topics, row.topics),
            due_label: row
                .due_date
                .zip(row.days_to_due)
                .map(|(due, days)| format!("Due {due} ({})", days_label(days))),
        })
        .collect();

    DashboardVm {
        overall_percent: summary.overall_progress,
        overall_label,
        time_left_label: format!("Time Left Until Exams: {} days", summary.days_left),
        subjects,
    }
}

fn days_label(days: i64) -> String {
    match days {
        0 => "today".to_owned(),
        1 => "in 1 day".to_owned(),
        d if d > 1 => format!("in {d} days"),
        -1 => "1 day ago".to_owned(),
        d => format!("{} days ago", -d),
    }
}
