use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::store::use_planner_store;
use crate::views::components::ProgressBar;
use crate::vm::{date_value, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = use_planner_store();
    let dashboard = ctx.dashboard();
    let exam_date = date_value(dashboard.exam_date());
    let summary = dashboard.summary(&store.state.read());
    let vm = map_dashboard(&summary);

    rsx! {
        div { class: "page",
            h2 { "Dashboard" }
            p { class: "time-left", "{vm.time_left_label}" }
            p { class: "muted", "Exam date: {exam_date}" }
            if let Some(percent) = vm.overall_percent {
                ProgressBar { percent, label: vm.overall_label.clone() }
            } else {
                p { class: "empty", "{vm.overall_label}" }
            }

            h3 { "Subject Progress" }
            if vm.subjects.is_empty() {
                p { class: "empty", "No subjects yet. Add one from the sidebar." }
            }
            ul { class: "subject-progress",
                for row in vm.subjects.iter() {
                    li { key: "{row.name}",
                        Link {
                            to: Route::Subject { name: row.name.clone() },
                            "{row.name}"
                        }
                        ProgressBar { percent: row.percent, label: row.label.clone() }
                        span { class: "muted", "{row.topics_label}" }
                        if let Some(due) = row.due_label.as_ref() {
                            span { class: "due", "{due}" }
                        }
                    }
                }
            }
        }
    }
}
