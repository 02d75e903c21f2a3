mod components;
mod dashboard;
mod resources;
mod schedule;
mod subject;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
#[cfg(test)]
mod dispatch_smoke;

pub use components::{AddForm, FlashBanner, LinkList, ProgressBar};
pub use dashboard::DashboardView;
pub use resources::ResourcesView;
pub use schedule::ScheduleView;
pub use subject::SubjectView;
