use study_core::model::{StudyHours, StudyState};
use study_core::time::fixed_today;

use super::test_harness::{ViewKind, setup_view_harness};

fn standards_state() -> StudyState {
    let mut state = StudyState::new();
    state.add_subject("Financial Reporting").unwrap();
    state.add_subject("Direct Tax Law").unwrap();
    state.add_topic("Financial Reporting", "Standards").unwrap();
    state
        .add_subtopic("Financial Reporting", "Standards", "A")
        .unwrap();
    state
        .add_subtopic("Financial Reporting", "Standards", "B")
        .unwrap();
    state
        .set_subtopic_completed("Financial Reporting", "Standards", "A", true)
        .unwrap();
    state
        .add_subtopic_resource("Financial Reporting", "Standards", "A", "https://icai.org/ind-as")
        .unwrap();
    state
        .set_hours(fixed_today(), "Direct Tax Law", StudyHours::clamped(2.5))
        .unwrap();
    state
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_renders_overall_progress_and_days_left() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, standards_state()).await;
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "Overall Progress: 50.00%",
        "Time Left Until Exams: 52 days",
        "Exam date: 2025-05-01",
        "Financial Reporting",
        "0/1 topics complete",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_without_subtopics_says_so() {
    let mut state = StudyState::new();
    state.add_subject("Audit").unwrap();
    let mut harness = setup_view_harness(ViewKind::Dashboard, state).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No topics added yet."), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subject_view_lists_topics_and_subtopics() {
    let mut harness = setup_view_harness(
        ViewKind::Subject("Financial Reporting".into()),
        standards_state(),
    )
    .await;
    harness.rebuild();
    let html = harness.render();

    for expected in ["Standards", "1/2 subtopics", "Progress: 0.00%", "https://icai.org/ind-as"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_subject_renders_not_found() {
    let mut harness =
        setup_view_harness(ViewKind::Subject("Costing".into()), standards_state()).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Costing"), "{html}");
    assert!(html.contains("not found."), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn schedule_view_shows_today_allocations() {
    let mut harness = setup_view_harness(ViewKind::Schedule, standards_state()).await;
    harness.rebuild();
    let html = harness.render();

    for expected in ["Schedule for 2025-03-10:", "Direct Tax Law: 2.5 hours"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert_eq!(harness.repo.save_count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn resources_view_lists_links_with_location() {
    let mut harness = setup_view_harness(ViewKind::Resources, standards_state()).await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("https://icai.org/ind-as"), "{html}");
    assert!(html.contains("Standards"), "{html}");
}
