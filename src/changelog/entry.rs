//! Change log entry data structure
//!
//! Defines a single recorded attribute transition and its plain-record
//! (`to_dict`) representation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::diff::format_value;

/// A single change log entry
///
/// Records one attribute transition with the value before and after the
/// write. Entries are immutable once pushed onto a [`ChangeLog`].
///
/// [`ChangeLog`]: super::ChangeLog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Name of the attribute that was written
    pub attr: String,

    /// Value before the write
    pub old: Value,

    /// Value after the write
    pub new: Value,

    /// When the write was recorded (UTC)
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry stamped with the current UTC instant
    pub(crate) fn new(attr: impl Into<String>, old: Value, new: Value) -> Self {
        Self {
            attr: attr.into(),
            old,
            new,
            timestamp: Utc::now(),
        }
    }

    /// Whether the old and new values differ structurally
    pub fn is_a_change(&self) -> bool {
        self.old != self.new
    }

    /// Plain record with the timestamp as an ISO-8601 string
    ///
    /// This is the shape every export format is built from.
    pub fn to_dict(&self) -> Value {
        json!({
            "attr": self.attr,
            "old": self.old,
            "new": self.new,
            "timestamp": self.timestamp_iso(),
        })
    }

    /// Timestamp rendered as RFC 3339 with full sub-second precision
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - Attribute '{}' : {} --> {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.6f UTC"),
            self.attr,
            format_value(&self.old),
            format_value(&self.new)
        )
    }
}
