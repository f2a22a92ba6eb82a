//! Event records as delivered by the schedule feed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One event of the input feed.
///
/// Shape is checked when the feed is parsed; presence of individual fields
/// is checked by the stage that consumes them. Events the filter drops
/// (online-only meetings, typically) often carry no postal address, so
/// requiring every field up front would reject valid feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Pre-formatted display time, e.g. `7:00 pm`.
    pub time_formatted: Option<String>,
    /// Event or group name.
    pub name: Option<String>,
    /// Category codes used to derive designation abbreviations.
    #[serde(default)]
    pub types: BTreeSet<String>,
    /// Attendance mode (`in_person`, `hybrid`, `online`, ...).
    pub attendance_option: Option<String>,
    /// Index into the configured section labels.
    pub day: Option<i64>,
    pub location: Option<String>,
    /// Full postal address.
    pub formatted_address: Option<String>,
    /// Locality expected to appear inside `formatted_address`.
    pub region: Option<String>,
    pub notes: Option<String>,
}

/// A named group of events sharing one `day`, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub events: Vec<EventRecord>,
}

impl Section {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            events: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
