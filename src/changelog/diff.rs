//! Attribute-level diffs between object snapshots
//!
//! Compares two serialized objects field by field. Used by the tracker's
//! snapshot mode and for rendering values in human-readable output.

use serde::Serialize;
use serde_json::Value;

/// How a single top-level attribute differs between two snapshots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeChange {
    /// Attribute name
    pub attr: String,

    /// Value in the earlier snapshot (`null` when the attribute was added)
    pub before: Value,

    /// Value in the later snapshot (`null` when the attribute was removed)
    pub after: Value,
}

/// Look up a top-level attribute, treating anything missing as `null`
pub fn attribute_value<'a>(object: &'a Value, attr: &str) -> &'a Value {
    object.get(attr).unwrap_or(&Value::Null)
}

/// List every top-level attribute whose value differs between two snapshots
///
/// Modified and removed attributes come first in `before` order, followed by
/// attributes only present in `after`. Non-object values compare as a whole
/// under the empty attribute name.
pub fn diff_objects(before: &Value, after: &Value) -> Vec<AttributeChange> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                let after_val = after_obj.get(key).unwrap_or(&Value::Null);
                if before_val != after_val {
                    changes.push(AttributeChange {
                        attr: key.clone(),
                        before: before_val.clone(),
                        after: after_val.clone(),
                    });
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !after_val.is_null() {
                    changes.push(AttributeChange {
                        attr: key.clone(),
                        before: Value::Null,
                        after: after_val.clone(),
                    });
                }
            }

            changes
        }
        _ if before != after => vec![AttributeChange {
            attr: String::new(),
            before: before.clone(),
            after: after.clone(),
        }],
        _ => Vec::new(),
    }
}

/// Generate a human-readable diff between two snapshots
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = diff_objects(before, after);
    if changes.is_empty() {
        return None;
    }

    let parts: Vec<String> = changes
        .iter()
        .map(|change| {
            let before = if change.before.is_null() && !has_key(before, &change.attr) {
                "(added)".to_string()
            } else {
                format_value(&change.before)
            };
            let after = if change.after.is_null() && !has_key(after, &change.attr) {
                "(removed)".to_string()
            } else {
                format_value(&change.after)
            };

            if change.attr.is_empty() {
                format!("{} -> {}", before, after)
            } else {
                format!("{}: {} -> {}", change.attr, before, after)
            }
        })
        .collect();

    Some(parts.join(", "))
}

fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|obj| obj.contains_key(key))
}

/// Format a JSON value for human-readable display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            // Truncate long strings
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
