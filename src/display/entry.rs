//! Change log entry display formatting
//!
//! Formats entries as a terminal table and as a detail view.

use crate::changelog::{format_value, Entry};

/// Format a single entry as a table row
pub fn format_entry_row(entry: &Entry, attr_width: usize) -> String {
    format!(
        "{}  {:attr_width$}  {} -> {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        truncate(&entry.attr, attr_width),
        format_value(&entry.old),
        format_value(&entry.new),
        attr_width = attr_width,
    )
}

/// Format a list of entries as a table
pub fn format_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No changes recorded.\n".to_string();
    }

    let attr_width = entries
        .iter()
        .map(|e| e.attr.chars().count())
        .max()
        .unwrap_or(9)
        .clamp(9, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:19}  {:attr_width$}  {}\n",
        "Timestamp",
        "Attribute",
        "Change",
        attr_width = attr_width,
    ));
    output.push_str(&"-".repeat(19 + 2 + attr_width + 2 + 20));
    output.push('\n');

    for entry in entries {
        output.push_str(&format_entry_row(entry, attr_width));
        output.push('\n');
    }

    output
}

/// Format a single entry's details
pub fn format_entry_details(entry: &Entry) -> String {
    let mut output = String::new();

    output.push_str(&format!("Attribute: {}\n", entry.attr));
    output.push_str(&format!("  Recorded:  {}\n", entry.timestamp_iso()));
    output.push_str(&format!("  Old:       {}\n", entry.old));
    output.push_str(&format!("  New:       {}\n", entry.new));
    output.push_str(&format!(
        "  Changed:   {}\n",
        if entry.is_a_change() { "Yes" } else { "No" }
    ));

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
