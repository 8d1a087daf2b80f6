//! Process-node model for the operations dashboard's process builder.
//!
//! Nodes are created by [`model::create_node`] with per-type defaults,
//! summarized with [`model::describe_start_trigger`] and compared with
//! [`model::deadlines_equal`]. [`graph::ProcessGraph`] holds the nodes of a
//! single graph together with its own id generator.

pub mod config;
pub mod error;
pub mod graph;
pub mod log;
pub mod model;

pub use error::{Error, Result};
pub use graph::ProcessGraph;
pub use model::{
    create_node, deadlines_equal, describe_start_trigger, DisplayZone, Node, NodeData, NodeKind,
    Position, ProcessDeadline, Task,
};
