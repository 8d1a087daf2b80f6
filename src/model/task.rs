//! Checklist tasks attached to process nodes.
//!
//! A task optionally references the node it belongs to through `nodeId`.
//! That is a plain foreign key: a task may sit in a node's
//! `availableTasks` pool, or be detached entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::display::{parse_timestamp, to_iso_millis, DisplayZone};

/// A single checklist item.
///
/// `completed_by` and `completed_at` only mean something while `completed`
/// is true. Use [`Task::mark_done`] and [`Task::completion`] rather than
/// touching the fields directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    /// ISO-8601 timestamp, or empty when no due date is set.
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
}

/// Who completed a task and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion<'a> {
    pub by: Option<&'a str>,
    pub at: Option<&'a str>,
}

impl Task {
    /// Create an open task with no due date and no owning node.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            due_date: String::new(),
            completed: false,
            completed_by: None,
            completed_at: None,
            node_id: None,
        }
    }

    /// Set or clear the due date.
    pub fn set_due_date(&mut self, due: Option<DateTime<Utc>>) {
        self.due_date = due.map(to_iso_millis).unwrap_or_default();
    }

    /// Mark the task done, recording the completer and time together.
    pub fn mark_done(&mut self, by: &str, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_by = Some(by.to_string());
        self.completed_at = Some(to_iso_millis(at));
    }

    /// Reopen the task, clearing the completion record.
    pub fn reopen(&mut self) {
        self.completed = false;
        self.completed_by = None;
        self.completed_at = None;
    }

    /// The completion record, or `None` while the task is open.
    ///
    /// Stale `completedBy`/`completedAt` values on an open task are ignored.
    pub fn completion(&self) -> Option<Completion<'_>> {
        if !self.completed {
            return None;
        }
        Some(Completion {
            by: self.completed_by.as_deref(),
            at: self.completed_at.as_deref(),
        })
    }

    /// Parsed due date, if one is set and readable.
    pub fn due(&self, zone: DisplayZone) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.due_date, zone)
    }

    /// Whether the task is still open past its due date.
    pub fn is_overdue(&self, now: DateTime<Utc>, zone: DisplayZone) -> bool {
        !self.completed && self.due(zone).is_some_and(|due| due < now)
    }
}
