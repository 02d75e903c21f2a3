use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::PlannerCommand;

use crate::routes::Route;
use crate::store::use_planner_store;
use crate::views::components::{AddForm, LinkList, ProgressBar};
use crate::vm::{SubtopicVm, TopicVm, map_subject, parse_date_value};

#[component]
pub fn SubjectView(name: String) -> Element {
    let store = use_planner_store();
    let navigator = use_navigator();

    let vm = {
        let state = store.state.read();
        state.subject(&name).map(|subject| map_subject(&name, subject))
    };
    let Some(vm) = vm else {
        return rsx! {
            div { class: "page",
                h2 { "{name}" }
                p { class: "empty", "Subject '{name}' not found." }
            }
        };
    };

    let subject_for_due = vm.name.clone();
    let subject_for_topic = vm.name.clone();
    let subject_for_link = vm.name.clone();
    let subject_for_delete = vm.name.clone();

    rsx! {
        div { class: "page",
            h2 { "{vm.name}" }
            ProgressBar { percent: vm.percent, label: vm.progress_label.clone() }

            div { class: "field",
                label { "Due date" }
                input {
                    r#type: "date",
                    value: "{vm.due_date_value}",
                    onchange: move |evt| {
                        store.dispatch(PlannerCommand::SetDueDate {
                            subject: subject_for_due.clone(),
                            due_date: parse_date_value(&evt.value()),
                        });
                    },
                }
            }

            h3 { "Topics" }
            if vm.topics.is_empty() {
                p { class: "empty", "No topics yet." }
            }
            for topic in vm.topics.iter() {
                TopicCard { key: "{topic.name}", subject: vm.name.clone(), topic: topic.clone() }
            }
            AddForm {
                placeholder: "New topic",
                button_label: "Add Topic",
                on_submit: move |text: String| {
                    store.dispatch(PlannerCommand::AddTopic {
                        subject: subject_for_topic.clone(),
                        name: text,
                    });
                },
            }

            h3 { "Subject Resources" }
            LinkList { links: vm.resources.clone() }
            AddForm {
                placeholder: "Resource link",
                button_label: "Add Resource",
                on_submit: move |link: String| {
                    store.dispatch(PlannerCommand::AddSubjectResource {
                        subject: subject_for_link.clone(),
                        link,
                    });
                },
            }

            div { class: "danger-zone",
                button {
                    class: "danger",
                    r#type: "button",
                    onclick: move |_| {
                        store.dispatch(PlannerCommand::DeleteSubject {
                            subject: subject_for_delete.clone(),
                        });
                        navigator.push(Route::Dashboard {});
                    },
                    "Delete Subject"
                }
            }
        }
    }
}

#[component]
fn TopicCard(subject: String, topic: TopicVm) -> Element {
    let store = use_planner_store();
    let for_delete = (subject.clone(), topic.name.clone());
    let for_add = (subject.clone(), topic.name.clone());
    let class = if topic.complete { "topic topic--complete" } else { "topic" };

    rsx! {
        section { class,
            header { class: "topic-header",
                h4 { "{topic.name}" }
                span { class: "muted", "{topic.completion_label}" }
                button {
                    class: "danger small",
                    r#type: "button",
                    onclick: move |_| {
                        store.dispatch(PlannerCommand::DeleteTopic {
                            subject: for_delete.0.clone(),
                            topic: for_delete.1.clone(),
                        });
                    },
                    "Delete Topic"
                }
            }
            ul { class: "subtopics",
                for subtopic in topic.subtopics.iter() {
                    SubtopicRow {
                        key: "{subtopic.name}",
                        subject: subject.clone(),
                        topic: topic.name.clone(),
                        subtopic: subtopic.clone(),
                    }
                }
            }
            AddForm {
                placeholder: "New subtopic",
                button_label: "Add Subtopic",
                on_submit: move |text: String| {
                    store.dispatch(PlannerCommand::AddSubtopic {
                        subject: for_add.0.clone(),
                        topic: for_add.1.clone(),
                        name: text,
                    });
                },
            }
        }
    }
}

#[component]
fn SubtopicRow(subject: String, topic: String, subtopic: SubtopicVm) -> Element {
    let store = use_planner_store();
    let for_check = (subject.clone(), topic.clone(), subtopic.name.clone());
    let for_delete = for_check.clone();
    let for_link = for_check.clone();

    rsx! {
        li { class: "subtopic",
            label {
                input {
                    r#type: "checkbox",
                    checked: subtopic.completed,
                    onchange: move |evt| {
                        store.dispatch(PlannerCommand::SetSubtopicCompleted {
                            subject: for_check.0.clone(),
                            topic: for_check.1.clone(),
                            subtopic: for_check.2.clone(),
                            completed: evt.checked(),
                        });
                    },
                }
                "{subtopic.name}"
            }
            button {
                class: "danger small",
                r#type: "button",
                onclick: move |_| {
                    store.dispatch(PlannerCommand::DeleteSubtopic {
                        subject: for_delete.0.clone(),
                        topic: for_delete.1.clone(),
                        subtopic: for_delete.2.clone(),
                    });
                },
                "Delete"
            }
            LinkList { links: subtopic.resources.clone() }
            AddForm {
                placeholder: "Resource link",
                button_label: "Add Link",
                on_submit: move |link: String| {
                    store.dispatch(PlannerCommand::AddSubtopicResource {
                        subject: for_link.0.clone(),
                        topic: for_link.1.clone(),
                        subtopic: for_link.2.clone(),
                        link,
                    });
                },
            }
        }
    }
}
