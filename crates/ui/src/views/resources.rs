use dioxus::prelude::*;

use crate::store::use_planner_store;
use crate::vm::map_resources;

#[component]
pub fn ResourcesView() -> Element {
    let store = use_planner_store();
    let mut filter = use_signal(String::new);

    let rows = {
        let state = store.state.read();
        let needle = filter.read().trim().to_owned();
        let needle = (!needle.is_empty()).then_some(needle.as_str());
        map_resources(&state.resource_index(needle))
    };

    rsx! {
        div { class: "page",
            h2 { "Resources" }
            input {
                class: "resource-filter",
                r#type: "text",
                placeholder: "Filter by subject, topic or link",
                value: "{filter}",
                oninput: move |evt| filter.set(evt.value()),
            }
            if rows.is_empty() {
                p { class: "empty", "No resources found." }
            }
            table { class: "resources",
                tbody {
                    for (index, row) in rows.iter().enumerate() {
                        tr { key: "{index}",
                            td { "{row.location}" }
                            td {
                                if row.is_url {
                                    a { href: "{row.link}", target: "_blank", "{row.link}" }
                                } else {
                                    "{row.link}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
