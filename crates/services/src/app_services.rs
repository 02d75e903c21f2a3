use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use storage::repository::Storage;
use study_core::model::StudyState;

use crate::Clock;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::planner_service::PlannerService;

/// Startup settings shared by every entry point.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub data_path: PathBuf,
    pub exam_date: NaiveDate,
    pub default_subjects: Vec<String>,
}

/// Assembles app-facing services and the initial state.
#[derive(Clone)]
pub struct AppServices {
    planner: Arc<PlannerService>,
    dashboard: DashboardService,
    initial_state: StudyState,
    seeded: bool,
}

impl AppServices {
    /// Build services backed by the JSON data file named in `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the data file cannot be loaded or the
    /// seeded state cannot be saved.
    pub async fn new_json_file(
        config: &PlannerConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::json_file(config.data_path.clone());
        Self::from_storage(&storage, clock, config).await
    }

    /// Build services on top of an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if loading or seeding fails.
    pub async fn from_storage(
        storage: &Storage,
        clock: Clock,
        config: &PlannerConfig,
    ) -> Result<Self, AppServicesError> {
        let planner = Arc::new(PlannerService::new(Arc::clone(&storage.study)));
        let (initial_state, seeded) = planner.bootstrap(&config.default_subjects).await?;
        let dashboard = DashboardService::new(clock, config.exam_date);

        Ok(Self {
            planner,
            dashboard,
            initial_state,
            seeded,
        })
    }

    #[must_use]
    pub fn planner(&self) -> Arc<PlannerService> {
        Arc::clone(&self.planner)
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardService {
        self.dashboard
    }

    /// State as loaded (and possibly seeded) at startup.
    #[must_use]
    pub fn initial_state(&self) -> &StudyState {
        &self.initial_state
    }

    #[must_use]
    pub fn seeded(&self) -> bool {
        self.seeded
    }
}
