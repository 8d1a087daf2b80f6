//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - A fixed clock
//! - A small onboarding graph with every node type
//! - Temporary graph files

use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

use flowdesk::model::{NodeData, Position, StartTriggerType};
use flowdesk::ProcessGraph;

pub const ALL_KINDS: [&str; 5] = ["input", "output", "process", "conditional", "code"];

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap()
}

/// input-1 -> process-2 -> conditional-3 -> output-4, plus code-5.
pub fn onboarding_graph() -> ProcessGraph {
    let mut graph = ProcessGraph::new();
    graph.add_node("input", Position::new(0.0, 0.0));
    graph.add_node("process", Position::new(200.0, 0.0));
    graph.add_node("conditional", Position::new(400.0, 0.0));
    graph.add_node("output", Position::new(600.0, 0.0));
    graph.add_node("code", Position::new(400.0, 200.0));

    if let NodeData::Input(input) = &mut graph.node_mut("input-1").unwrap().data {
        input.common.label = "New hire request".to_string();
        input.start_trigger_type = StartTriggerType::ServiceDesk;
        input.start_trigger_service_desk_requests = vec!["HR-101".to_string(), "HR-102".to_string()];
    }
    if let NodeData::Process(process) = &mut graph.node_mut("process-2").unwrap().data {
        process.common.label = "Provision laptop".to_string();
        process.predecessors = vec!["input-1".to_string()];
        process.deadline_relative_value = "2".to_string();
        process.deadline_anchor_node_id = Some("input-1".to_string());
    }
    graph
}

/// A temporary directory with a graph file path inside it.
pub struct TempGraphFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempGraphFile {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join(name);
        Self { dir, path }
    }
}
