use chrono::NaiveDate;
use services::DayPlan;
use study_core::model::{MAX_HOURS_PER_DAY, StudyState};

use super::format::format_hours;

/// Step used by the hours input.
pub const HOURS_STEP: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct HoursInputVm {
    pub subject: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleVm {
    pub date_value: String,
    pub heading: String,
    pub inputs: Vec<HoursInputVm>,
    /// Lines like `"Direct Tax Law: 2.5 hours"`; empty when nothing is planned.
    pub allocated: Vec<String>,
    pub total_label: Option<String>,
    pub max_hours: String,
    pub step: String,
}

/// One hours input per subject, plus the non-zero allocations for `date`.
#[must_use]
pub fn map_schedule(state: &StudyState, plan: &DayPlan) -> ScheduleVm {
    let date = plan.date;
    let inputs = state
        .subjects()
        .keys()
        .map(|subject| HoursInputVm {
            subject: subject.clone(),
            value: format_hours(state.schedule().hours(date, subject).value()),
        })
        .collect();

    let allocated = plan
        .allocations
        .iter()
        .map(|(subject, hours)| format!("{subject}: {} hours", format_hours(*hours)))
        .collect();

    let total_label =
        (!plan.is_empty()).then(|| format!("Total: {} hours", format_hours(plan.total_hours)));

    ScheduleVm {
        date_value: date_value(date),
        heading: format!("Schedule for {}:", date_value(date)),
        inputs,
        allocated,
        total_label,
        max_hours: format_hours(MAX_HOURS_PER_DAY),
        step: format_hours(HOURS_STEP),
    }
}

#[must_use]
pub fn date_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse the value of a date input.
#[must_use]
pub fn parse_date_value(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Parse the value of an hours input; blank means zero.
#[must_use]
pub fn parse_hours_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::DashboardService;
    use study_core::model::StudyHours;
    use study_core::time::{fixed_clock, fixed_today};

    #[test]
    fn maps_inputs_and_allocations() {
        let mut state = StudyState::new();
        state.add_subject("Direct Tax Law").unwrap();
        state.add_subject("Audit").unwrap();
        state
            .set_hours(fixed_today(), "Direct Tax Law", StudyHours::clamped(2.5))
            .unwrap();

        let dashboard = DashboardService::new(fixed_clock(), fixed_today());
        let plan = dashboard.day_plan(&state, fixed_today());
        let vm = map_schedule(&state, &plan);

        assert_eq!(vm.heading, "Schedule for 2025-03-10:");
        assert_eq!(
            vm.inputs,
            vec![
                HoursInputVm {
                    subject: "Audit".into(),
                    value: "0".into()
                },
                HoursInputVm {
                    subject: "Direct Tax Law".into(),
                    value: "2.5".into()
                },
            ]
        );
        assert_eq!(vm.allocated, vec!["Direct Tax Law: 2.5 hours".to_string()]);
        assert_eq!(vm.total_label.as_deref(), Some("Total: 2.5 hours"));
        assert_eq!(vm.max_hours, "24");
        assert_eq!(vm.step, "0.5");
    }

    #[test]
    fn parses_inputs() {
        assert_eq!(parse_date_value("2025-03-10"), Some(fixed_today()));
        assert_eq!(parse_date_value("10/03/2025"), None);
        assert_eq!(parse_hours_value(""), Some(0.0));
        assert_eq!(parse_hours_value("1.5"), Some(1.5));
        assert_eq!(parse_hours_value("abc"), None);
        assert_eq!(parse_hours_value("inf"), None);
    }
}
