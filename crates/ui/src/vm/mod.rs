mod dashboard_vm;
mod format;
mod resource_vm;
mod schedule_vm;
mod subject_vm;

pub use dashboard_vm::{DashboardVm, SubjectBarVm, map_dashboard};
pub use format::{bar_width, format_hours, format_percent};
pub use resource_vm::{ResourceRowVm, map_resources};
pub use schedule_vm::{
    HOURS_STEP, HoursInputVm, ScheduleVm, date_value, map_schedule, parse_date_value,
    parse_hours_value,
};
pub use subject_vm::{SubjectVm, SubtopicVm, TopicVm, map_subject};
