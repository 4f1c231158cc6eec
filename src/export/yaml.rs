//! YAML export functionality
//!
//! Exports change log entries to YAML for human-readable review.

use std::io::Write;

use crate::changelog::Entry;
use crate::error::{TrackerError, TrackerResult};
use crate::export::json::ChangeLogExport;

/// Export entries as a YAML document with a header comment
pub fn export_yaml<W: Write>(entries: &[Entry], writer: &mut W) -> TrackerResult<()> {
    let export = ChangeLogExport::from_entries(entries);

    writeln!(writer, "# Change Log Export").map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer, "# Entries: {}", export.entry_count)
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TrackerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::ChangeLog;
    use serde_json::json;

    #[test]
    fn test_yaml_export() {
        let mut log = ChangeLog::new();
        log.push("name", &json!("A"), &json!("B"));
        log.push("tags", &json!([]), &json!(["admin"]));

        let mut output = Vec::new();
        export_yaml(log.entries(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("# Change Log Export"));
        assert!(text.contains("# Entries: 2"));

        let parsed: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed["entry_count"].as_u64(), Some(2));
        assert_eq!(parsed["entries"][0]["attr"].as_str(), Some("name"));
        assert_eq!(parsed["entries"][1]["new"][0].as_str(), Some("admin"));
    }
}
