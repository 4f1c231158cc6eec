//! CSV export functionality
//!
//! Exports change log entries to CSV. Old and new values are written as
//! compact JSON so nested values survive the round through a spreadsheet.

use std::io::Write;

use crate::changelog::Entry;
use crate::error::{TrackerError, TrackerResult};

/// Export entries to CSV with an `attr,old,new,timestamp` header
pub fn export_csv<W: Write>(entries: &[Entry], writer: &mut W) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["attr", "old", "new", "timestamp"])
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    for entry in entries {
        let old = serde_json::to_string(&entry.old)?;
        let new = serde_json::to_string(&entry.new)?;
        let timestamp = entry.timestamp_iso();

        csv_writer
            .write_record([
                entry.attr.as_str(),
                old.as_str(),
                new.as_str(),
                timestamp.as_str(),
            ])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}
