//! Process deadlines.

use serde::{Deserialize, Deserializer, Serialize};

use super::display::{parse_timestamp, DisplayZone};

/// Unit for relative deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineUnit {
    Hours,
    #[default]
    Days,
}

impl DeadlineUnit {
    fn noun(self, singular: bool) -> &'static str {
        match (self, singular) {
            (DeadlineUnit::Hours, true) => "hour",
            (DeadlineUnit::Hours, false) => "hours",
            (DeadlineUnit::Days, true) => "day",
            (DeadlineUnit::Days, false) => "days",
        }
    }
}

/// Discriminant shared by [`ProcessDeadline`] and the flat `deadlineType`
/// field on process nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineKind {
    #[default]
    Relative,
    Absolute,
}

/// A due time anchored on a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProcessDeadline {
    /// `value` `unit`s after the anchor node completes.
    #[serde(rename_all = "camelCase")]
    Relative {
        #[serde(deserialize_with = "string_or_number")]
        value: String,
        unit: DeadlineUnit,
        node_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_label: Option<String>,
    },
    /// A fixed ISO timestamp.
    #[serde(rename_all = "camelCase")]
    Absolute {
        value: String,
        node_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        node_label: Option<String>,
    },
}

impl ProcessDeadline {
    pub fn kind(&self) -> DeadlineKind {
        match self {
            ProcessDeadline::Relative { .. } => DeadlineKind::Relative,
            ProcessDeadline::Absolute { .. } => DeadlineKind::Absolute,
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            ProcessDeadline::Relative { node_id, .. } | ProcessDeadline::Absolute { node_id, .. } => {
                node_id
            }
        }
    }

    pub fn node_label(&self) -> Option<&str> {
        match self {
            ProcessDeadline::Relative { node_label, .. }
            | ProcessDeadline::Absolute { node_label, .. } => node_label.as_deref(),
        }
    }

    /// Human-readable summary, e.g. `Due 2 days after "Intake"`.
    pub fn describe(&self, zone: DisplayZone) -> String {
        match self {
            ProcessDeadline::Relative { value, unit, .. } => {
                let value = value.trim();
                if value.is_empty() {
                    return "No deadline set".to_string();
                }
                let anchor = match self.node_label() {
                    Some(label) if !label.trim().is_empty() => label,
                    _ => self.node_id(),
                };
                format!("Due {} {} after \"{}\"", value, unit.noun(value == "1"), anchor)
            }
            ProcessDeadline::Absolute { value, .. } => match parse_timestamp(value, zone) {
                Some(at) => format!("Due {}", zone.format_medium(at)),
                None => "No deadline set".to_string(),
            },
        }
    }
}

/// Compare two optional deadlines.
///
/// Both absent is equal, one absent is not. Otherwise the type, anchor node
/// and label (absent label == empty) must match before the variant values
/// are compared.
pub fn deadlines_equal(a: Option<&ProcessDeadline>, b: Option<&ProcessDeadline>) -> bool {
    let (a, b) = match (a, b) {
        (None, None) => return true,
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.kind() != b.kind() || a.node_id() != b.node_id() {
        return false;
    }
    if a.node_label().unwrap_or("") != b.node_label().unwrap_or("") {
        return false;
    }

    match (a, b) {
        (
            ProcessDeadline::Relative {
                value: av, unit: au, ..
            },
            ProcessDeadline::Relative {
                value: bv, unit: bu, ..
            },
        ) => av == bv && au == bu,
        (ProcessDeadline::Absolute { value: av, .. }, ProcessDeadline::Absolute { value: bv, .. }) => {
            av == bv
        }
        _ => false,
    }
}

impl PartialEq for ProcessDeadline {
    fn eq(&self, other: &Self) -> bool {
        deadlines_equal(Some(self), Some(other))
    }
}

impl Eq for ProcessDeadline {}

/// Accept a magnitude stored as `"2"`, `2` or `null` (read as empty).
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Magnitude {
        Text(String),
        Number(serde_json::Number),
        Null,
    }

    Ok(match Magnitude::deserialize(deserializer)? {
        Magnitude::Text(s) => s,
        Magnitude::Number(n) => n.to_string(),
        Magnitude::Null => String::new(),
    })
}
