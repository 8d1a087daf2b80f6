//! Node identifier generation.
//!
//! Identifiers are `"<type>-<suffix>"`. Generators are plain owned values
//! handed to whoever creates nodes, so two graphs never share a sequence.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A source of node and task identifiers.
pub trait IdSource {
    /// Produce the next identifier for an entity of type `kind`.
    fn next_id(&mut self, kind: &str) -> String;

    /// Record an identifier that already exists, e.g. one loaded from disk,
    /// so it is not handed out again.
    fn observe(&mut self, _id: &str) {}
}

/// Monotonic counter shared by every type tag.
///
/// The counter is bumped on every call regardless of the tag, so
/// `input`, `process`, `input` yields `input-1`, `process-2`, `input-3`.
/// Unique only for the lifetime of this value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterIds {
    counter: u64,
}

impl CounterIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a sequence whose last handed-out suffix was `last`.
    pub fn starting_after(last: u64) -> Self {
        Self { counter: last }
    }

    /// The suffix of the most recently generated id.
    pub fn current(&self) -> u64 {
        self.counter
    }
}

/// Length of a hyphenated uuid, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`.
const UUID_LEN: usize = 36;

fn has_uuid_suffix(id: &str) -> bool {
    id.len() > UUID_LEN
        && id
            .get(id.len() - UUID_LEN..)
            .is_some_and(|tail| Uuid::parse_str(tail).is_ok())
}

impl IdSource for CounterIds {
    /// Once the counter is exhausted, ids fall back to a uuid suffix.
    fn next_id(&mut self, kind: &str) -> String {
        match self.counter.checked_add(1) {
            Some(n) => {
                self.counter = n;
                format!("{}-{}", kind, n)
            }
            None => format!("{}-{}", kind, Uuid::new_v4()),
        }
    }

    /// Only `<type>-<digits>` ids move the counter; uuid-suffixed ids from
    /// [`UuidIds`] are ignored even when their last group is all digits.
    fn observe(&mut self, id: &str) {
        if has_uuid_suffix(id) {
            return;
        }
        let suffix = id
            .rsplit_once('-')
            .filter(|(_, n)| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|(_, n)| n.parse::<u64>().ok());
        if let Some(n) = suffix {
            self.counter = self.counter.max(n);
        }
    }
}

/// Random v4 UUID suffixes, for graphs persisted across sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self, kind: &str) -> String {
        format!("{}-{}", kind, Uuid::new_v4())
    }
}

/// Configured identifier scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Counter,
    Uuid,
}

impl IdScheme {
    /// Build a fresh generator for this scheme.
    pub fn source(self) -> Box<dyn IdSource> {
        match self {
            IdScheme::Counter => Box::new(CounterIds::new()),
            IdScheme::Uuid => Box::new(UuidIds),
        }
    }
}

impl std::fmt::Display for IdScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdScheme::Counter => write!(f, "counter"),
            IdScheme::Uuid => write!(f, "uuid"),
        }
    }
}

impl std::str::FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "counter" => Ok(IdScheme::Counter),
            "uuid" => Ok(IdScheme::Uuid),
            other => Err(format!("unknown id scheme {:?} (expected counter or uuid)", other)),
        }
    }
}
