use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{DashboardService, PlannerService};
use storage::repository::{InMemoryRepository, StudyRepository};
use study_core::model::StudyState;
use study_core::time::{fixed_clock, fixed_today};

use crate::context::{UiApp, build_app_context};
use crate::store::use_planner_store_provider;
use crate::views::{DashboardView, ResourcesView, ScheduleView, SubjectView};

struct TestApp {
    planner: Arc<PlannerService>,
    state: StudyState,
}

impl UiApp for TestApp {
    fn planner(&self) -> Arc<PlannerService> {
        Arc::clone(&self.planner)
    }

    fn dashboard(&self) -> DashboardService {
        let exam = fixed_today() + chrono::Duration::days(52);
        DashboardService::new(fixed_clock(), exam)
    }

    fn initial_state(&self) -> StudyState {
        self.state.clone()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Subject(String),
    Schedule,
    Resources,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_planner_store_provider(ctx.planner(), move || ctx.initial_state());
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Subject(name) => rsx! { SubjectView { name } },
        ViewKind::Schedule => rsx! { ScheduleView {} },
        ViewKind::Resources => rsx! { ResourcesView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: Arc<InMemoryRepository>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        self.dom.process_events();
        self.dom.render_immediate(&mut NoOpMutations);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub async fn setup_view_harness(view: ViewKind, state: StudyState) -> ViewHarness {
    let repo = Arc::new(InMemoryRepository::with_state(state.clone()));
    let dyn_repo: Arc<dyn StudyRepository> = repo.clone();
    let planner = Arc::new(PlannerService::new(dyn_repo));
    let loaded = planner.load().await.expect("load state");

    let app = Arc::new(TestApp {
        planner,
        state: loaded,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, repo }
}
