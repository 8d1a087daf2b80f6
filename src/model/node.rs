//! Process graph nodes and their per-type data.
//!
//! On the wire a node is `{"id", "type", "position", "data"}` with `data`
//! keyed by camelCase field names. In memory `data` is a sum type with one
//! variant per node type, so a process node cannot carry trigger fields and
//! an input node cannot carry a deadline. Fields from other variants that
//! show up in stored JSON are dropped on read.

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::deadline::{string_or_number, DeadlineKind, DeadlineUnit, ProcessDeadline};
use super::display::{parse_timestamp, DisplayZone};
use super::task::Task;

/// Node type discriminant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input,
    Output,
    Process,
    Conditional,
    Code,
    /// A type this crate does not model; carries the common fields only.
    Other(String),
}

impl NodeKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "input" => NodeKind::Input,
            "output" => NodeKind::Output,
            "process" => NodeKind::Process,
            "conditional" => NodeKind::Conditional,
            "code" => NodeKind::Code,
            other => NodeKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Process => "process",
            NodeKind::Conditional => "conditional",
            NodeKind::Code => "code",
            NodeKind::Other(s) => s,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NodeKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Canvas position. Owned by the editor; carried here so nodes round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fields every node type carries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonData {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Pool of tasks that may be linked to this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_tasks: Option<Vec<Task>>,
}

impl CommonData {
    pub fn new(label: &str, description: &str) -> Self {
        Self {
            label: label.to_string(),
            description: Some(description.to_string()),
            ..Self::default()
        }
    }
}

/// What starts an input node.
///
/// Unrecognized stored values are kept verbatim and described like a
/// schedule. A stored `null` reads as a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum StartTriggerType {
    #[default]
    Schedule,
    Process,
    ServiceDesk,
    Other(String),
}

impl From<String> for StartTriggerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "schedule" => StartTriggerType::Schedule,
            "process" => StartTriggerType::Process,
            "serviceDesk" => StartTriggerType::ServiceDesk,
            _ => StartTriggerType::Other(s),
        }
    }
}

impl From<Option<String>> for StartTriggerType {
    fn from(s: Option<String>) -> Self {
        s.map(StartTriggerType::from).unwrap_or_default()
    }
}

impl From<StartTriggerType> for String {
    fn from(t: StartTriggerType) -> Self {
        match t {
            StartTriggerType::Schedule => "schedule".to_string(),
            StartTriggerType::Process => "process".to_string(),
            StartTriggerType::ServiceDesk => "serviceDesk".to_string(),
            StartTriggerType::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputData {
    #[serde(flatten)]
    pub common: CommonData,
    pub start_trigger_type: StartTriggerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_trigger_scheduled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_trigger_process_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_trigger_process_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_trigger_process_name: Option<String>,
    pub start_trigger_service_desk_requests: Vec<String>,
}

fn known(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl InputData {
    /// Human-readable sentence describing what starts this node.
    ///
    /// Never fails: missing or unreadable data yields a generic sentence.
    pub fn describe_trigger(&self, zone: DisplayZone) -> String {
        match &self.start_trigger_type {
            StartTriggerType::Process => {
                let category = known(&self.start_trigger_process_category);
                let name = known(&self.start_trigger_process_name)
                    .or_else(|| known(&self.start_trigger_process_id));
                match (name, category) {
                    (Some(name), Some(category)) => {
                        format!("Starts after \"{}\" ({}) completes", name, category)
                    }
                    (Some(name), None) => format!("Starts after \"{}\" completes", name),
                    (None, Some(category)) => {
                        format!("Starts after a process in {} completes", category)
                    }
                    (None, None) => "Starts after a selected process completes".to_string(),
                }
            }
            StartTriggerType::ServiceDesk => match self.start_trigger_service_desk_requests.as_slice() {
                [] => "Starts from a matching service desk request".to_string(),
                [only] => format!("Starts from service desk request: {}", only),
                many => format!("Starts from service desk requests: {}", many.join(", ")),
            },
            StartTriggerType::Schedule | StartTriggerType::Other(_) => {
                let at = self
                    .start_trigger_scheduled_at
                    .as_deref()
                    .and_then(|raw| parse_timestamp(raw, zone));
                match at {
                    Some(at) => format!("Starts on {}", zone.format_medium(at)),
                    None => "Starts on a scheduled date".to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionType {
    #[default]
    MarkDone,
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertChannel {
    Slack,
    Teams,
    Email,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputData {
    #[serde(flatten)]
    pub common: CommonData,
    pub output_completion_type: CompletionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_scheduled_at: Option<String>,
    pub output_alert_channels: Vec<AlertChannel>,
    /// Close the linked service-desk ticket when the process finishes.
    pub output_mark_ticket_done: bool,
}

impl OutputData {
    /// Add an alert channel unless it is already selected.
    pub fn enable_alert(&mut self, channel: AlertChannel) {
        if !self.output_alert_channels.contains(&channel) {
            self.output_alert_channels.push(channel);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    #[default]
    User,
    Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputRequirement {
    #[default]
    MarkDone,
    File,
    Link,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessData {
    #[serde(flatten)]
    pub common: CommonData,
    pub assignment_type: AssignmentType,
    pub assignee: String,
    pub assignee_role: String,
    pub allow_reassignment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver: Option<String>,
    /// Ids of nodes that must finish before this one.
    pub predecessors: Vec<String>,
    pub conditional_logic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_duration: Option<String>,
    pub deadline_type: DeadlineKind,
    #[serde(deserialize_with = "string_or_number")]
    pub deadline_relative_value: String,
    pub deadline_relative_unit: DeadlineUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_absolute: Option<String>,
    /// Node a relative deadline counts from; this node when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_anchor_node_id: Option<String>,
    pub reminder_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_lead_time: Option<String>,
    pub output_requirement: OutputRequirement,
    pub validation_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_notes: Option<String>,
}

impl Default for ProcessData {
    fn default() -> Self {
        Self {
            common: CommonData::default(),
            assignment_type: AssignmentType::User,
            assignee: String::new(),
            assignee_role: String::new(),
            allow_reassignment: true,
            approver: None,
            predecessors: Vec::new(),
            conditional_logic: String::new(),
            expected_duration: None,
            deadline_type: DeadlineKind::Relative,
            deadline_relative_value: String::new(),
            deadline_relative_unit: DeadlineUnit::Days,
            deadline_absolute: None,
            deadline_anchor_node_id: None,
            reminder_enabled: false,
            reminder_lead_time: None,
            output_requirement: OutputRequirement::MarkDone,
            validation_required: false,
            validation_notes: None,
        }
    }
}

impl ProcessData {
    /// Id of the node the deadline counts from, given this node's id.
    pub fn anchor_id<'a>(&'a self, node_id: &'a str) -> &'a str {
        known(&self.deadline_anchor_node_id).unwrap_or(node_id)
    }

    /// The deadline configured on this node, if any.
    ///
    /// `node_id` is this node's id; `anchor_label` is the label of the
    /// anchor node when known.
    pub fn deadline(&self, node_id: &str, anchor_label: Option<&str>) -> Option<ProcessDeadline> {
        let anchor = self.anchor_id(node_id);
        let node_label = anchor_label.map(str::to_string);
        match self.deadline_type {
            DeadlineKind::Relative => {
                let value = self.deadline_relative_value.trim();
                if value.is_empty() {
                    return None;
                }
                Some(ProcessDeadline::Relative {
                    value: value.to_string(),
                    unit: self.deadline_relative_unit,
                    node_id: anchor.to_string(),
                    node_label,
                })
            }
            DeadlineKind::Absolute => {
                let value = known(&self.deadline_absolute)?;
                Some(ProcessDeadline::Absolute {
                    value: value.to_string(),
                    node_id: anchor.to_string(),
                    node_label,
                })
            }
        }
    }

    /// Store `deadline` in the flat wire fields.
    pub fn set_deadline(&mut self, deadline: &ProcessDeadline) {
        self.deadline_type = deadline.kind();
        self.deadline_anchor_node_id = Some(deadline.node_id().to_string());
        match deadline {
            ProcessDeadline::Relative { value, unit, .. } => {
                self.deadline_relative_value = value.clone();
                self.deadline_relative_unit = *unit;
            }
            ProcessDeadline::Absolute { value, .. } => {
                self.deadline_absolute = Some(value.clone());
            }
        }
    }
}

pub const DEFAULT_CONDITION: &str = "data.value > 0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConditionalData {
    #[serde(flatten)]
    pub common: CommonData,
    pub condition: String,
    pub true_label: String,
    pub false_label: String,
}

impl Default for ConditionalData {
    fn default() -> Self {
        Self {
            common: CommonData::default(),
            condition: DEFAULT_CONDITION.to_string(),
            true_label: "Yes".to_string(),
            false_label: "No".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    #[default]
    Javascript,
    Typescript,
}

pub const DEFAULT_CODE: &str =
    "// Transform the incoming data and return the result\nfunction process(data) {\n  return data;\n}\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodeData {
    #[serde(flatten)]
    pub common: CommonData,
    pub language: CodeLanguage,
    pub code: String,
}

impl Default for CodeData {
    fn default() -> Self {
        Self {
            common: CommonData::default(),
            language: CodeLanguage::Javascript,
            code: DEFAULT_CODE.to_string(),
        }
    }
}

/// Per-type node payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Input(InputData),
    Output(OutputData),
    Process(ProcessData),
    Conditional(ConditionalData),
    Code(CodeData),
    Other { type_name: String, common: CommonData },
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Input(_) => NodeKind::Input,
            NodeData::Output(_) => NodeKind::Output,
            NodeData::Process(_) => NodeKind::Process,
            NodeData::Conditional(_) => NodeKind::Conditional,
            NodeData::Code(_) => NodeKind::Code,
            NodeData::Other { type_name, .. } => NodeKind::Other(type_name.clone()),
        }
    }

    pub fn common(&self) -> &CommonData {
        match self {
            NodeData::Input(d) => &d.common,
            NodeData::Output(d) => &d.common,
            NodeData::Process(d) => &d.common,
            NodeData::Conditional(d) => &d.common,
            NodeData::Code(d) => &d.common,
            NodeData::Other { common, .. } => common,
        }
    }

    pub fn common_mut(&mut self) -> &mut CommonData {
        match self {
            NodeData::Input(d) => &mut d.common,
            NodeData::Output(d) => &mut d.common,
            NodeData::Process(d) => &mut d.common,
            NodeData::Conditional(d) => &mut d.common,
            NodeData::Code(d) => &mut d.common,
            NodeData::Other { common, .. } => common,
        }
    }

    pub fn label(&self) -> &str {
        &self.common().label
    }

    /// Read a `data` record for a node of type `kind`.
    pub fn from_value(kind: &NodeKind, value: serde_json::Value) -> serde_json::Result<Self> {
        let value = match value {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            v => v,
        };
        Ok(match kind {
            NodeKind::Input => NodeData::Input(serde_json::from_value(value)?),
            NodeKind::Output => NodeData::Output(serde_json::from_value(value)?),
            NodeKind::Process => NodeData::Process(serde_json::from_value(value)?),
            NodeKind::Conditional => NodeData::Conditional(serde_json::from_value(value)?),
            NodeKind::Code => NodeData::Code(serde_json::from_value(value)?),
            NodeKind::Other(type_name) => NodeData::Other {
                type_name: type_name.clone(),
                common: serde_json::from_value(value)?,
            },
        })
    }
}

/// Serializes as the bare `data` record; the type lives on the node.
impl Serialize for NodeData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NodeData::Input(d) => d.serialize(serializer),
            NodeData::Output(d) => d.serialize(serializer),
            NodeData::Process(d) => d.serialize(serializer),
            NodeData::Conditional(d) => d.serialize(serializer),
            NodeData::Code(d) => d.serialize(serializer),
            NodeData::Other { common, .. } => common.serialize(serializer),
        }
    }
}

/// A step in a process graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn label(&self) -> &str {
        self.data.label()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.data.common().tasks
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.data
            .common_mut()
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
    }

    /// Create a new task owned by this node and return it.
    pub fn add_task(&mut self, task_id: String, text: &str) -> &mut Task {
        let mut task = Task::new(task_id, text);
        task.node_id = Some(self.id.clone());
        let tasks = &mut self.data.common_mut().tasks;
        tasks.push(task);
        let last = tasks.len() - 1;
        &mut tasks[last]
    }

    /// Link a task from the `availableTasks` pool to this node.
    ///
    /// Returns `false` when no pooled task has that id. Attaching a task that
    /// is already linked is a no-op.
    pub fn attach_task(&mut self, task_id: &str) -> bool {
        let node_id = self.id.clone();
        let common = self.data.common_mut();
        if common.tasks.iter().any(|t| t.id == task_id) {
            return true;
        }
        let pooled = common
            .available_tasks
            .as_ref()
            .and_then(|pool| pool.iter().find(|t| t.id == task_id))
            .cloned();
        match pooled {
            Some(mut task) => {
                task.node_id = Some(node_id);
                common.tasks.push(task);
                true
            }
            None => false,
        }
    }
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    position: Position,
    #[serde(default)]
    data: serde_json::Value,
}

impl TryFrom<RawNode> for Node {
    type Error = serde_json::Error;

    fn try_from(raw: RawNode) -> std::result::Result<Self, Self::Error> {
        let kind = NodeKind::parse(&raw.node_type);
        let data = NodeData::from_value(&kind, raw.data)
            .map_err(|e| serde_json::Error::custom(format!("node {}: {}", raw.id, e)))?;
        Ok(Node {
            id: raw.id,
            position: raw.position,
            data,
        })
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let kind = self.kind();
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", kind.as_str())?;
        state.serialize_field("position", &self.position)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}
