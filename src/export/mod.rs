//! Export module for object-tracker
//!
//! Writes change log entries in several formats, all derived from the
//! [`Entry::to_dict`](crate::changelog::Entry::to_dict) record shape:
//! - JSON: versioned document for machine consumption
//! - JSON Lines: one record per line, for streaming into other tools
//! - YAML: human-readable document
//! - CSV: spreadsheet-compatible rows
//!
//! Exporters take a slice of entries, so a filtered query can be exported
//! as easily as the whole log:
//!
//! ```rust,ignore
//! let names = tracker.log_mut().filter(&["name"], false)?.all();
//! export_csv(&names, &mut std::io::stdout())?;
//! ```

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_csv;
pub use json::{export_json, export_jsonl, ChangeLogExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;
