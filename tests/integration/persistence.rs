//! JSON wire format and graph files.

use flowdesk::model::{create_node_at, CounterIds, IdScheme, Node, NodeData, Position};
use flowdesk::{Error, ProcessGraph};

use crate::fixtures::{fixed_now, onboarding_graph, TempGraphFile, ALL_KINDS};

#[test]
fn test_factory_nodes_roundtrip() {
    for kind in ALL_KINDS.iter().copied().chain(["custom-step"]) {
        let node = create_node_at(kind, Position::new(12.5, -3.0), format!("{}-1", kind), fixed_now());
        let json = serde_json::to_string(&node).unwrap();
        let parsed: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.data, node.data, "data mismatch for {}", kind);
        assert_eq!(parsed, node);
    }
}

#[test]
fn test_stored_editor_record_loads() {
    let json = r#"{
        "id": "process-12",
        "type": "process",
        "position": {"x": 320, "y": 80},
        "data": {
            "label": "Approve budget",
            "assignmentType": "role",
            "assigneeRole": "finance-lead",
            "approver": "cfo",
            "predecessors": ["input-1"],
            "deadlineType": "absolute",
            "deadlineAbsolute": "2024-03-01T17:00:00Z",
            "reminderEnabled": true,
            "reminderLeadTime": "1d",
            "outputRequirement": "file",
            "validationRequired": true,
            "validationNotes": "Attach signed PDF",
            "tasks": [
                {"id": "task-3", "text": "Upload quote", "dueDate": "", "completed": true,
                 "completedBy": "Sam", "completedAt": "2024-02-20T10:00:00Z", "nodeId": "process-12"}
            ],
            "startTriggerType": "schedule"
        }
    }"#;
    let node: Node = serde_json::from_str(json).unwrap();
    let NodeData::Process(process) = &node.data else {
        panic!("expected process data");
    };
    assert_eq!(process.common.label, "Approve budget");
    assert_eq!(process.assignee_role, "finance-lead");
    assert!(process.reminder_enabled);
    assert_eq!(process.common.tasks[0].completion().unwrap().by, Some("Sam"));

    let back = serde_json::to_value(&node).unwrap();
    assert_eq!(back["data"]["deadlineAbsolute"], "2024-03-01T17:00:00Z");
    assert_eq!(back["data"]["outputRequirement"], "file");
    assert!(back["data"].get("startTriggerType").is_none());
}

#[test]
fn test_graph_file_roundtrip() {
    let file = TempGraphFile::new("onboarding.json");
    let graph = onboarding_graph();
    graph.validate().unwrap();
    graph.save(&file.path).unwrap();

    let loaded = ProcessGraph::load(&file.path, IdScheme::Counter.source()).unwrap();
    assert_eq!(loaded.nodes(), graph.nodes());
    loaded.validate().unwrap();
}

#[test]
fn test_loaded_graph_continues_ids() {
    let file = TempGraphFile::new("graph.json");
    onboarding_graph().save(&file.path).unwrap();

    let mut loaded = ProcessGraph::load(&file.path, Box::new(CounterIds::new())).unwrap();
    let id = loaded.add_node("process", Position::default()).id.clone();
    assert_eq!(id, "process-6");
    let task_id = loaded.add_task(&id, "Order badge").unwrap().id.clone();
    assert_eq!(task_id, "task-7");
}

#[test]
fn test_invalid_file_is_json_error() {
    let file = TempGraphFile::new("broken.json");
    std::fs::write(&file.path, "{ not json").unwrap();
    let result = ProcessGraph::load(&file.path, Box::new(CounterIds::new()));
    assert!(matches!(result, Err(Error::Json(_))));
}

#[test]
fn test_cycle_detected_after_load() {
    let file = TempGraphFile::new("cycle.json");
    let mut graph = onboarding_graph();
    if let NodeData::Process(process) = &mut graph.node_mut("process-2").unwrap().data {
        process.predecessors.push("process-2".to_string());
    }
    graph.save(&file.path).unwrap();

    let loaded = ProcessGraph::load(&file.path, Box::new(CounterIds::new())).unwrap();
    assert!(matches!(loaded.validate(), Err(Error::Validation(_))));
}
