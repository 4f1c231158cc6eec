//! Tracker settings
//!
//! Serializable defaults for building a [`Tracker`]: which attributes to
//! track, whether observers fire automatically, and which slot holds the
//! tracker itself.
//!
//! [`Tracker`]: crate::tracker::Tracker

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Settings used to construct a tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Attribute allow-list; `None` tracks every attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,

    /// Whether observers are notified as part of every recorded change
    #[serde(default = "default_auto_notify")]
    pub auto_notify: bool,

    /// Name of the field holding the tracker; writes to it are never tracked
    #[serde(default = "default_tracker_attr")]
    pub tracker_attr: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_auto_notify() -> bool {
    true
}

fn default_tracker_attr() -> String {
    "tracker".to_string()
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            attributes: None,
            auto_notify: default_auto_notify(),
            tracker_attr: default_tracker_attr(),
        }
    }
}

impl TrackerSettings {
    /// Parse settings from a JSON document
    pub fn from_json_str(contents: &str) -> Result<Self, TrackerError> {
        serde_json::from_str(contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, TrackerError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

        Self::from_json_str(&contents)
    }

    /// Save settings to disk as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), TrackerError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    TrackerError::Io(format!("Failed to create settings directory: {}", e))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = TrackerSettings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.attributes.is_none());
        assert!(settings.auto_notify);
        assert_eq!(settings.tracker_attr, "tracker");
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let settings = TrackerSettings::from_json_str(r#"{"attributes": ["name"]}"#).unwrap();
        assert_eq!(settings.attributes, Some(vec!["name".to_string()]));
        assert!(settings.auto_notify);
        assert_eq!(settings.tracker_attr, "tracker");
    }

    #[test]
    fn test_invalid_document() {
        let err = TrackerSettings::from_json_str("{\"auto_notify\": 3}").unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracker.json");

        let settings = TrackerSettings::load_or_default(&path).unwrap();
        assert_eq!(settings, TrackerSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config").join("tracker.json");

        let settings = TrackerSettings {
            attributes: Some(vec!["name".into(), "age".into()]),
            auto_notify: false,
            ..TrackerSettings::default()
        };
        settings.save(&path).unwrap();

        let loaded = TrackerSettings::load_or_default(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
