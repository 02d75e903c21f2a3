use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{PlannerCommand, PlannerService};
use storage::repository::{InMemoryRepository, StudyRepository};
use study_core::model::StudyState;

use crate::store::{Flash, FlashKind, PlannerStore, use_planner_store, use_planner_store_provider};

const FR: &str = "Financial Reporting";

#[derive(Clone, Default)]
struct StoreHandles {
    store: Rc<RefCell<Option<PlannerStore>>>,
    topic_renders: Rc<Cell<usize>>,
}

impl StoreHandles {
    fn store(&self) -> PlannerStore {
        (*self.store.borrow()).expect("store registered")
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    planner: Arc<PlannerService>,
    initial: StudyState,
    handles: StoreHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn StoreHarness(props: HarnessProps) -> Element {
    let initial = props.initial.clone();
    let store = use_planner_store_provider(Arc::clone(&props.planner), move || initial);
    use_hook(|| {
        *props.handles.store.borrow_mut() = Some(store);
    });
    rsx! {
        TopicCount { renders: Rc::clone(&props.handles.topic_renders) }
    }
}

/// Reads only the state signal, so it renders once per published state.
#[component]
fn TopicCount(renders: Rc<Cell<usize>>) -> Element {
    let store = use_planner_store();
    renders.set(renders.get() + 1);
    let topics = store
        .state
        .read()
        .subject(FR)
        .map_or(0, |subject| subject.topics().len());
    rsx! { p { "topics={topics}" } }
}

/// Dispatch from inside the root scope, where the store spawns its task.
fn dispatch(dom: &VirtualDom, store: PlannerStore, command: PlannerCommand) {
    dom.in_scope(ScopeId::ROOT, || store.dispatch(command));
}

async fn settle(dom: &mut VirtualDom) {
    let _ = tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work()).await;
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn add_topic(name: &str) -> PlannerCommand {
    PlannerCommand::AddTopic {
        subject: FR.into(),
        name: name.into(),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dispatch_publishes_saved_state_and_keeps_it_on_rejection() {
    let mut initial = StudyState::new();
    initial.add_subject(FR).unwrap();
    initial.add_topic(FR, "Standards").unwrap();

    let repo = Arc::new(InMemoryRepository::with_state(initial.clone()));
    let dyn_repo: Arc<dyn StudyRepository> = repo.clone();
    let planner = Arc::new(PlannerService::new(dyn_repo));
    let handles = StoreHandles::default();

    let mut dom = VirtualDom::new_with_props(
        StoreHarness,
        HarnessProps {
            planner,
            initial,
            handles: handles.clone(),
        },
    );
    dom.rebuild_in_place();
    settle(&mut dom).await;

    let store = handles.store();
    let renders_before = handles.topic_renders.get();

    dispatch(&dom, store, add_topic("Consolidation"));
    settle(&mut dom).await;

    assert_eq!(handles.topic_renders.get(), renders_before + 1);
    assert_eq!(repo.save_count(), 1);
    assert!(dioxus_ssr::render(&dom).contains("topics=2"));
    let flash = dom.in_runtime(|| store.flash.cloned());
    assert_eq!(flash, Some(Flash::success("Topic 'Consolidation' added!")));

    dispatch(&dom, store, add_topic("Standards"));
    settle(&mut dom).await;

    assert_eq!(handles.topic_renders.get(), renders_before + 1);
    assert_eq!(repo.save_count(), 1);
    let topics: Vec<String> = dom.in_runtime(|| {
        store
            .state
            .peek()
            .subject(FR)
            .map(|subject| subject.topics().keys().cloned().collect())
            .unwrap_or_default()
    });
    assert_eq!(topics, vec!["Consolidation".to_string(), "Standards".to_string()]);
    let flash = dom
        .in_runtime(|| store.flash.cloned())
        .expect("warning flash");
    assert_eq!(flash.kind, FlashKind::Warning);
    assert_eq!(flash.message, "Topic 'Standards' already exists");

    let saved = repo.load().await.expect("load saved state");
    assert_eq!(saved.subject(FR).map(|s| s.topics().len()), Some(2));
}
