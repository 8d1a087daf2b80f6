//! The nodes of one process graph.
//!
//! `ProcessGraph` owns its nodes and its own id generator. It checks the
//! predecessor links process nodes declare, but never walks them to run
//! anything.

use chrono::{DateTime, Utc};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{
    create_node, describe_start_trigger, CounterIds, DisplayZone, IdSource, Node, NodeData,
    Position, ProcessDeadline, Task,
};
use crate::{flog_debug, flog_warn};

pub struct ProcessGraph {
    nodes: Vec<Node>,
    ids: Box<dyn IdSource>,
}

impl ProcessGraph {
    /// Create an empty graph using a fresh counter for ids.
    pub fn new() -> Self {
        Self::with_ids(Box::new(CounterIds::new()))
    }

    /// Create an empty graph drawing ids from `ids`.
    pub fn with_ids(ids: Box<dyn IdSource>) -> Self {
        Self {
            nodes: Vec::new(),
            ids,
        }
    }

    /// Build a graph from existing nodes.
    ///
    /// Every node and task id is reported to `ids` so new ids do not collide
    /// with loaded ones.
    ///
    /// # Errors
    /// Returns `DuplicateNode` if two nodes share an id.
    pub fn from_nodes(nodes: Vec<Node>, ids: Box<dyn IdSource>) -> Result<Self> {
        let mut graph = Self::with_ids(ids);
        for node in nodes {
            graph.insert(node)?;
        }
        Ok(graph)
    }

    /// Create a node of type `kind` with a generated id and add it.
    pub fn add_node(&mut self, kind: &str, position: Position) -> &mut Node {
        let id = self.ids.next_id(kind);
        let node = create_node(kind, position, id);
        self.nodes.push(node);
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    /// Add an existing node.
    ///
    /// # Errors
    /// Returns `DuplicateNode` if a node with the same id is already present.
    pub fn insert(&mut self, node: Node) -> Result<()> {
        if self.contains(&node.id) {
            return Err(Error::DuplicateNode(node.id));
        }
        self.ids.observe(&node.id);
        for task in node.tasks() {
            self.ids.observe(&task.id);
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove a node and every predecessor reference to it.
    ///
    /// Tasks keep their `nodeId`; deleting them is the caller's concern.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        let removed = self.nodes.remove(index);
        for node in &mut self.nodes {
            if let NodeData::Process(process) = &mut node.data {
                process.predecessors.retain(|p| p != id);
            }
        }
        flog_debug!("ProcessGraph::remove_node id={}", id);
        Some(removed)
    }

    fn node_or_err(&mut self, id: &str) -> Result<&mut Node> {
        self.node_mut(id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    /// Create a task on node `node_id` with a generated id.
    pub fn add_task(&mut self, node_id: &str, text: &str) -> Result<&mut Task> {
        let task_id = self.ids.next_id("task");
        let node = self.node_or_err(node_id)?;
        Ok(node.add_task(task_id, text))
    }

    /// Link a pooled task to node `node_id`.
    pub fn attach_task(&mut self, node_id: &str, task_id: &str) -> Result<()> {
        if self.node_or_err(node_id)?.attach_task(task_id) {
            Ok(())
        } else {
            Err(Error::TaskNotFound(task_id.to_string()))
        }
    }

    fn task_mut(&mut self, node_id: &str, task_id: &str) -> Result<&mut Task> {
        self.node_or_err(node_id)?
            .task_mut(task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }

    pub fn set_task_due_date(
        &mut self,
        node_id: &str,
        task_id: &str,
        due: Option<DateTime<Utc>>,
    ) -> Result<()> {
        self.task_mut(node_id, task_id)?.set_due_date(due);
        Ok(())
    }

    pub fn complete_task(
        &mut self,
        node_id: &str,
        task_id: &str,
        by: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        self.task_mut(node_id, task_id)?.mark_done(by, at);
        Ok(())
    }

    /// The deadline of process node `id`, labeled with its anchor's label.
    pub fn deadline_for(&self, id: &str) -> Option<ProcessDeadline> {
        let node = self.node(id)?;
        let NodeData::Process(process) = &node.data else {
            return None;
        };
        let anchor_label = self.node(process.anchor_id(id)).map(Node::label);
        process.deadline(id, anchor_label)
    }

    /// Trigger descriptions for every input node, in graph order.
    pub fn trigger_summaries(&self, zone: DisplayZone) -> Vec<(String, String)> {
        self.nodes
            .iter()
            .filter_map(|node| {
                describe_start_trigger(&node.data, zone).map(|text| (node.id.clone(), text))
            })
            .collect()
    }

    /// Check predecessor references.
    ///
    /// # Errors
    /// Returns `Validation` if a process node lists itself or a missing node
    /// as a predecessor, or if the predecessor links form a cycle.
    pub fn validate(&self) -> Result<()> {
        self.predecessor_order().map(|_| ())
    }

    /// Node ids ordered so each node follows all of its predecessors.
    pub fn predecessor_order(&self) -> Result<Vec<&str>> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let index: HashMap<&str, NodeIndex> = self
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), graph.add_node(n.id.as_str())))
            .collect();

        for node in &self.nodes {
            let NodeData::Process(process) = &node.data else {
                continue;
            };
            for pred in &process.predecessors {
                if pred == &node.id {
                    return Err(Error::Validation(format!(
                        "Node {} lists itself as a predecessor",
                        node.id
                    )));
                }
                let from = index.get(pred.as_str()).ok_or_else(|| {
                    Error::Validation(format!(
                        "Node {} references missing predecessor {}",
                        node.id, pred
                    ))
                })?;
                graph.add_edge(*from, index[node.id.as_str()], ());
            }
        }

        let sorted = toposort(&graph, None).map_err(|cycle| {
            let id = graph.node_weight(cycle.node_id()).copied().unwrap_or("unknown");
            flog_warn!("predecessor cycle detected at node {}", id);
            Error::Validation(format!("Predecessor cycle detected at node: {}", id))
        })?;

        Ok(sorted
            .into_iter()
            .filter_map(|i| graph.node_weight(i).copied())
            .collect())
    }
}

impl Default for ProcessGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessGraph")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}
