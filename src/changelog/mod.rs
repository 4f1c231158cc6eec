//! Change log for tracked attribute writes
//!
//! Records attribute transitions in an append-only log and answers queries
//! over it.
//!
//! # Architecture
//!
//! The change log consists of three components:
//!
//! - `Entry`: a single recorded transition with attribute name, old and new
//!   values, and a UTC timestamp.
//! - `ChangeLog`: the ordered entry store plus a transient selection built
//!   by `filter`/`exclude` and consumed by terminal operations.
//! - `diff_objects` / `generate_diff`: attribute-level comparison of two
//!   serialized snapshots.
//!
//! # Example
//!
//! ```rust,ignore
//! use object_tracker::changelog::ChangeLog;
//! use serde_json::json;
//!
//! let mut log = ChangeLog::new();
//! log.push("name", &json!("A"), &json!("B"));
//! log.push("age", &json!(30), &json!(31));
//!
//! assert_eq!(log.filter(&["name"], false)?.count(), 1);
//! assert_eq!(log.count(), 2); // selection was consumed
//! assert!(log.has_changes("name"));
//! ```

mod diff;
mod entry;
mod log;

pub use diff::{attribute_value, diff_objects, format_value, generate_diff, AttributeChange};
pub use entry::Entry;
pub use log::ChangeLog;
