use dioxus::prelude::*;

use crate::store::use_planner_store;
use crate::vm::bar_width;

#[component]
pub fn ProgressBar(percent: f64, label: String) -> Element {
    rsx! {
        div { class: "progress",
            div { class: "progress-track",
                div { class: "progress-fill", style: "{bar_width(percent)}" }
            }
            span { class: "progress-label", "{label}" }
        }
    }
}

/// Feedback from the last command, with a dismiss button.
#[component]
pub fn FlashBanner() -> Element {
    let store = use_planner_store();
    let flash = store.flash.cloned();

    match flash {
        Some(flash) => rsx! {
            div { class: flash.class(), role: "status",
                span { "{flash.message}" }
                button {
                    class: "flash-dismiss",
                    r#type: "button",
                    aria_label: "Dismiss",
                    onclick: move |_| store.dismiss_flash(),
                    "×"
                }
            }
        },
        None => rsx! {},
    }
}

/// Single text input with an add button. Enter submits too.
#[component]
pub fn AddForm(
    placeholder: String,
    button_label: String,
    on_submit: EventHandler<String>,
) -> Element {
    let mut value = use_signal(String::new);
    let mut submit = move || {
        let text = value.peek().to_string();
        on_submit.call(text);
        value.set(String::new());
    };

    rsx! {
        div { class: "add-form",
            input {
                r#type: "text",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
                onkeydown: move |evt| {
                    if matches!(evt.data.key(), Key::Enter) {
                        evt.prevent_default();
                        submit();
                    }
                },
            }
            button {
                r#type: "button",
                onclick: move |_| submit(),
                "{button_label}"
            }
        }
    }
}

#[component]
pub fn LinkList(links: Vec<String>) -> Element {
    if links.is_empty() {
        return rsx! {};
    }
    rsx! {
        ul { class: "link-list",
            for (index, link) in links.iter().enumerate() {
                li { key: "{index}", "{link}" }
            }
        }
    }
}
