use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use services::PlannerCommand;

use crate::store::use_planner_store;
use crate::views::{
    AddForm, DashboardView, FlashBanner, ResourcesView, ScheduleView, SubjectView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/subject/:name", SubjectView)] Subject { name: String },
        #[route("/schedule", ScheduleView)] Schedule {},
        #[route("/resources", ResourcesView)] Resources {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                FlashBanner {}
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let store = use_planner_store();
    let subjects: Vec<String> = store.state.read().subjects().keys().cloned().collect();

    rsx! {
        nav { class: "sidebar",
            h1 { "Study Planner" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Schedule {}, "Study Schedule" } }
                li { Link { to: Route::Resources {}, "Resources" } }
            }
            h2 { "Subjects" }
            ul { class: "sidebar-subjects",
                for name in subjects {
                    li { key: "{name}",
                        Link { to: Route::Subject { name: name.clone() }, "{name}" }
                    }
                }
            }
            AddForm {
                placeholder: "New subject",
                button_label: "Add Subject",
                on_submit: move |name: String| store.dispatch(PlannerCommand::AddSubject { name }),
            }
        }
    }
}
