//! Trigger and deadline summaries.

use flowdesk::model::{describe_deadline, NodeData, Position, StartTriggerType};
use flowdesk::{create_node, describe_start_trigger, DisplayZone};

use crate::fixtures::onboarding_graph;

fn input_with(trigger: StartTriggerType) -> flowdesk::Node {
    let mut node = create_node("input", Position::default(), "input-1");
    if let NodeData::Input(input) = &mut node.data {
        input.start_trigger_type = trigger;
    }
    node
}

#[test]
fn test_process_trigger_category_only() {
    let mut node = input_with(StartTriggerType::Process);
    if let NodeData::Input(input) = &mut node.data {
        input.start_trigger_process_category = Some("Finance".to_string());
    }
    assert_eq!(
        describe_start_trigger(&node.data, DisplayZone::Utc).as_deref(),
        Some("Starts after a process in Finance completes")
    );
}

#[test]
fn test_service_desk_trigger_two_requests() {
    let mut node = input_with(StartTriggerType::ServiceDesk);
    if let NodeData::Input(input) = &mut node.data {
        input.start_trigger_service_desk_requests = vec!["A".to_string(), "B".to_string()];
    }
    assert_eq!(
        describe_start_trigger(&node.data, DisplayZone::Utc).as_deref(),
        Some("Starts from service desk requests: A, B")
    );
}

#[test]
fn test_schedule_trigger_invalid_date_falls_back() {
    let mut node = input_with(StartTriggerType::Schedule);
    if let NodeData::Input(input) = &mut node.data {
        input.start_trigger_scheduled_at = Some("yesterday-ish".to_string());
    }
    for zone in [DisplayZone::Utc, DisplayZone::Local] {
        assert_eq!(
            describe_start_trigger(&node.data, zone).as_deref(),
            Some("Starts on a scheduled date")
        );
    }
}

#[test]
fn test_schedule_trigger_missing_date_falls_back() {
    let mut node = input_with(StartTriggerType::Schedule);
    if let NodeData::Input(input) = &mut node.data {
        input.start_trigger_scheduled_at = None;
    }
    assert_eq!(
        describe_start_trigger(&node.data, DisplayZone::Utc).as_deref(),
        Some("Starts on a scheduled date")
    );
}

#[test]
fn test_freshly_created_input_describes_a_date() {
    let node = create_node("input", Position::default(), "input-1");
    let text = describe_start_trigger(&node.data, DisplayZone::Local).unwrap();
    assert!(text.starts_with("Starts on "));
    assert_ne!(text, "Starts on a scheduled date");
}

#[test]
fn test_graph_summaries() {
    let graph = onboarding_graph();
    let summaries = graph.trigger_summaries(DisplayZone::Utc);
    assert_eq!(
        summaries,
        vec![(
            "input-1".to_string(),
            "Starts from service desk requests: HR-101, HR-102".to_string()
        )]
    );

    let deadline = graph.deadline_for("process-2").unwrap();
    assert_eq!(
        deadline.describe(DisplayZone::Utc),
        "Due 2 days after \"New hire request\""
    );

    // Without the graph the anchor's label is unknown.
    let process = graph.node("process-2").unwrap();
    assert_eq!(
        describe_deadline(process, DisplayZone::Utc).as_deref(),
        Some("Due 2 days after \"input-1\"")
    );
}
