//! Node factory and id generation through the public API.

use flowdesk::model::{create_node_at, CounterIds, IdSource, NodeData, NodeKind, Position};

use crate::fixtures::{fixed_now, ALL_KINDS};

#[test]
fn test_id_suffix_increases_across_types() {
    let mut ids = CounterIds::new();
    let generated: Vec<String> = ["input", "process", "input", "code"]
        .iter()
        .map(|kind| ids.next_id(kind))
        .collect();

    let mut prev = 0u64;
    for (id, kind) in generated.iter().zip(["input", "process", "input", "code"]) {
        let (prefix, suffix) = id.rsplit_once('-').unwrap();
        assert_eq!(prefix, kind);
        let n: u64 = suffix.parse().unwrap();
        assert!(n > prev);
        prev = n;
    }
}

#[test]
fn test_every_known_kind_gets_its_variant() {
    for kind in ALL_KINDS {
        let node = create_node_at(kind, Position::default(), format!("{}-1", kind), fixed_now());
        assert_eq!(node.kind(), NodeKind::parse(kind));
        assert_eq!(node.kind().as_str(), kind);
        assert!(node.tasks().is_empty());
        assert!(!node.label().is_empty());
        assert_ne!(node.label(), "Node");
    }
}

#[test]
fn test_factory_wire_fields_per_kind() {
    let expected: [(&str, &[&str]); 5] = [
        (
            "input",
            &[
                "startTriggerType",
                "startTriggerScheduledAt",
                "startTriggerServiceDeskRequests",
            ],
        ),
        (
            "output",
            &[
                "outputCompletionType",
                "outputAlertChannels",
                "outputMarkTicketDone",
            ],
        ),
        (
            "process",
            &[
                "assignmentType",
                "assignee",
                "assigneeRole",
                "allowReassignment",
                "predecessors",
                "conditionalLogic",
                "deadlineType",
                "deadlineRelativeValue",
                "deadlineRelativeUnit",
                "reminderEnabled",
                "outputRequirement",
                "validationRequired",
            ],
        ),
        ("conditional", &["condition", "trueLabel", "falseLabel"]),
        ("code", &["language", "code"]),
    ];

    for (kind, fields) in expected {
        let node = create_node_at(kind, Position::default(), "n", fixed_now());
        let json = serde_json::to_value(&node).unwrap();
        for field in fields {
            assert!(
                json["data"].get(*field).is_some(),
                "{} node is missing {}",
                kind,
                field
            );
        }
        assert!(json["data"].get("label").is_some());
        assert!(json["data"].get("tasks").is_some());
    }
}

#[test]
fn test_input_scheduled_at_is_clock() {
    let node = create_node_at("input", Position::default(), "input-1", fixed_now());
    let NodeData::Input(input) = &node.data else {
        panic!("expected input data");
    };
    assert_eq!(
        input.start_trigger_scheduled_at.as_deref(),
        Some("2024-01-05T09:30:00.000Z")
    );
}

#[test]
fn test_unknown_kind_is_generic() {
    let node = create_node_at("", Position::default(), "blank-1", fixed_now());
    assert_eq!(node.label(), "Node");
    assert_eq!(
        node.data.common().description.as_deref(),
        Some("Workflow node")
    );
    assert!(matches!(node.data, NodeData::Other { .. }));
}
