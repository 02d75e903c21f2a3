use dioxus::prelude::*;
use services::PlannerCommand;

use crate::context::AppContext;
use crate::store::use_planner_store;
use crate::vm::{map_schedule, parse_date_value, parse_hours_value};

#[component]
pub fn ScheduleView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = use_planner_store();
    let dashboard = ctx.dashboard();
    let mut selected = use_signal(|| dashboard.today());

    let date = selected();
    let vm = {
        let state = store.state.read();
        let plan = dashboard.day_plan(&state, date);
        map_schedule(&state, &plan)
    };

    rsx! {
        div { class: "page",
            h2 { "Study Schedule" }
            div { class: "field",
                label { "Date" }
                input {
                    r#type: "date",
                    value: "{vm.date_value}",
                    onchange: move |evt| {
                        if let Some(date) = parse_date_value(&evt.value()) {
                            selected.set(date);
                        }
                    },
                }
            }

            if vm.inputs.is_empty() {
                p { class: "empty", "Add a subject to plan study hours." }
            }
            div { class: "hours-grid",
                for input in vm.inputs.iter() {
                    div { key: "{input.subject}", class: "field",
                        label { "Hours for {input.subject}" }
                        input {
                            r#type: "number",
                            min: "0",
                            max: "{vm.max_hours}",
                            step: "{vm.step}",
                            value: "{input.value}",
                            onchange: {
                                let subject = input.subject.clone();
                                move |evt: Event<FormData>| {
                                    if let Some(hours) = parse_hours_value(&evt.value()) {
                                        store.dispatch(PlannerCommand::SetHours {
                                            date,
                                            subject: subject.clone(),
                                            hours,
                                        });
                                    }
                                }
                            },
                        }
                    }
                }
            }

            h3 { "{vm.heading}" }
            if vm.allocated.is_empty() {
                p { class: "empty", "No schedule for this date yet." }
            } else {
                ul { class: "allocations",
                    for (index, line) in vm.allocated.iter().enumerate() {
                        li { key: "{index}", "{line}" }
                    }
                }
                if let Some(total) = vm.total_label.as_ref() {
                    p { class: "muted", "{total}" }
                }
                button {
                    class: "danger",
                    r#type: "button",
                    onclick: move |_| store.dispatch(PlannerCommand::ClearScheduleDay { date }),
                    "Clear Day"
                }
            }
        }
    }
}
