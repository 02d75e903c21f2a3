#![forbid(unsafe_code)]

pub mod app_services;
pub mod commands;
pub mod dashboard_service;
pub mod error;
pub mod planner_service;

pub use study_core::Clock;

pub use app_services::{AppServices, PlannerConfig};
pub use commands::{CommandOutcome, PlannerCommand};
pub use dashboard_service::{DashboardService, DashboardSummary, DayPlan, SubjectProgressRow};
pub use error::{AppServicesError, PlannerError};
pub use planner_service::PlannerService;
