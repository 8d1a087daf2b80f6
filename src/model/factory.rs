//! Node construction with per-type defaults.

use chrono::{DateTime, Utc};

use super::display::to_iso_millis;
use super::node::{
    CodeData, CommonData, ConditionalData, InputData, Node, NodeData, NodeKind, OutputData,
    Position, ProcessData, StartTriggerType,
};
use crate::{flog_debug, flog_warn};

/// Default label and description for a node type.
pub fn default_label(kind: &NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::Input => ("Input", "Process input"),
        NodeKind::Output => ("Output", "Process output"),
        NodeKind::Process => ("Process", "Process step"),
        NodeKind::Conditional => ("Condition", "Conditional branch"),
        NodeKind::Code => ("Code", "Custom code step"),
        NodeKind::Other(_) => ("Node", "Workflow node"),
    }
}

/// Build a node of type `kind` with its default data.
///
/// The caller supplies the id; see [`super::ids`]. Unknown types get the
/// generic label and no type-specific fields.
pub fn create_node(kind: &str, position: Position, id: impl Into<String>) -> Node {
    create_node_at(kind, position, id, Utc::now())
}

/// Like [`create_node`], with the clock supplied by the caller.
pub fn create_node_at(
    kind: &str,
    position: Position,
    id: impl Into<String>,
    now: DateTime<Utc>,
) -> Node {
    let id = id.into();
    let kind = NodeKind::parse(kind);
    let (label, description) = default_label(&kind);
    let common = CommonData::new(label, description);
    flog_debug!("create_node type={} id={}", kind, id);

    let data = match kind {
        NodeKind::Input => NodeData::Input(InputData {
            common,
            start_trigger_type: StartTriggerType::Schedule,
            start_trigger_scheduled_at: Some(to_iso_millis(now)),
            start_trigger_service_desk_requests: Vec::new(),
            ..InputData::default()
        }),
        NodeKind::Output => NodeData::Output(OutputData {
            common,
            ..OutputData::default()
        }),
        NodeKind::Process => NodeData::Process(ProcessData {
            common,
            ..ProcessData::default()
        }),
        NodeKind::Conditional => NodeData::Conditional(ConditionalData {
            common,
            ..ConditionalData::default()
        }),
        NodeKind::Code => NodeData::Code(CodeData {
            common,
            ..CodeData::default()
        }),
        NodeKind::Other(type_name) => {
            flog_warn!("unknown node type {:?}, using generic defaults", type_name);
            NodeData::Other { type_name, common }
        }
    };

    Node { id, position, data }
}
