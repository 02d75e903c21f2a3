use std::sync::Arc;

use services::{DashboardService, PlannerService};
use study_core::model::StudyState;

pub trait UiApp: Send + Sync {
    fn planner(&self) -> Arc<PlannerService>;
    fn dashboard(&self) -> DashboardService;
    fn initial_state(&self) -> StudyState;
}

#[derive(Clone)]
pub struct AppContext {
    planner: Arc<PlannerService>,
    dashboard: DashboardService,
    initial_state: StudyState,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            planner: app.planner(),
            dashboard: app.dashboard(),
            initial_state: app.initial_state(),
        }
    }

    #[must_use]
    pub fn planner(&self) -> Arc<PlannerService> {
        Arc::clone(&self.planner)
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardService {
        self.dashboard
    }

    /// The state loaded at startup. The live state is held by `PlannerStore`.
    #[must_use]
    pub fn initial_state(&self) -> StudyState {
        self.initial_state.clone()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
