//! Summaries shown next to nodes in the editor.

use super::display::DisplayZone;
use super::node::{Node, NodeData};

/// Describe what starts an input node.
///
/// Returns `None` for every other node type. Input nodes always get a
/// sentence, falling back to generic text when fields are missing or dates
/// cannot be read.
pub fn describe_start_trigger(data: &NodeData, zone: DisplayZone) -> Option<String> {
    match data {
        NodeData::Input(input) => Some(input.describe_trigger(zone)),
        NodeData::Output(_)
        | NodeData::Process(_)
        | NodeData::Conditional(_)
        | NodeData::Code(_)
        | NodeData::Other { .. } => None,
    }
}

/// Describe a process node's own deadline, labeling the anchor with this
/// node's label when the deadline is anchored on itself.
pub fn describe_deadline(node: &Node, zone: DisplayZone) -> Option<String> {
    let NodeData::Process(process) = &node.data else {
        return None;
    };
    let anchor_label = (process.anchor_id(&node.id) == node.id).then(|| node.label());
    process
        .deadline(&node.id, anchor_label)
        .map(|deadline| deadline.describe(zone))
}
