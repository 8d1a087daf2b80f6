//! The process-node data model.
//!
//! Entity shapes for nodes, tasks and deadlines, the node factory, and the
//! derived summaries the editor shows. Nothing here performs I/O; the only
//! state is whatever [`IdSource`] the caller passes around.

pub mod deadline;
pub mod describe;
pub mod display;
pub mod factory;
pub mod ids;
pub mod node;
pub mod task;

pub use deadline::{deadlines_equal, DeadlineKind, DeadlineUnit, ProcessDeadline};
pub use describe::{describe_deadline, describe_start_trigger};
pub use display::{parse_timestamp, DisplayZone};
pub use factory::{create_node, create_node_at, default_label};
pub use ids::{CounterIds, IdScheme, IdSource, UuidIds};
pub use node::{
    AlertChannel, AssignmentType, CodeData, CodeLanguage, CommonData, CompletionType,
    ConditionalData, InputData, Node, NodeData, NodeKind, OutputData, OutputRequirement,
    Position, ProcessData, StartTriggerType,
};
pub use task::{Completion, Task};
