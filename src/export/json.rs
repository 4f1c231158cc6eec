//! JSON export functionality
//!
//! Exports change log entries as a versioned JSON document or as
//! line-delimited JSON (one record per line).

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::changelog::Entry;
use crate::error::{TrackerError, TrackerResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full change log export structure
#[derive(Debug, Clone, Serialize)]
pub struct ChangeLogExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Crate version that created the export
    pub app_version: String,

    /// Number of exported entries
    pub entry_count: usize,

    /// Entries as plain records, in log order
    pub entries: Vec<Value>,
}

impl ChangeLogExport {
    /// Build an export from entries
    pub fn from_entries(entries: &[Entry]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entry_count: entries.len(),
            entries: entries.iter().map(Entry::to_dict).collect(),
        }
    }
}

/// Export entries as a pretty-printed JSON document
pub fn export_json<W: Write>(entries: &[Entry], writer: &mut W) -> TrackerResult<()> {
    let export = ChangeLogExport::from_entries(entries);

    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TrackerError::Export(format!("Failed to serialize change log: {}", e)))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Export entries as line-delimited JSON
///
/// Each line is a complete record. The writer is flushed once at the end.
pub fn export_jsonl<W: Write>(entries: &[Entry], writer: &mut W) -> TrackerResult<()> {
    for entry in entries {
        let json = serde_json::to_string(&entry.to_dict())
            .map_err(|e| TrackerError::Export(format!("Failed to serialize entry: {}", e)))?;

        writeln!(writer, "{}", json)
            .map_err(|e| TrackerError::Export(format!("Failed to write entry: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| TrackerError::Export(format!("Failed to flush export: {}", e)))?;

    Ok(())
}
