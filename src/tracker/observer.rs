//! Change observers
//!
//! Observers are called synchronously, in registration order, for every
//! recorded change they are registered for. Errors are not isolated: the
//! first failing observer stops dispatch and its error is returned from
//! the call that triggered the notification.

use serde_json::Value;
use tracing::info;

use crate::changelog::format_value;
use crate::error::TrackerResult;

/// Receives attribute change notifications from a tracker
pub trait Observer {
    /// Called once per recorded change
    fn notify(&mut self, attr: &str, old: &Value, new: &Value) -> TrackerResult<()>;
}

impl<F> Observer for F
where
    F: FnMut(&str, &Value, &Value) -> TrackerResult<()>,
{
    fn notify(&mut self, attr: &str, old: &Value, new: &Value) -> TrackerResult<()> {
        self(attr, old, new)
    }
}

/// Observer that emits a `tracing` event for every change
#[derive(Debug, Clone, Default)]
pub struct LoggingObserver {
    /// Label attached to every event, typically the tracked entity's name
    pub label: Option<String>,
}

impl LoggingObserver {
    /// Create a logging observer with no label
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging observer that tags events with `label`
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

impl Observer for LoggingObserver {
    fn notify(&mut self, attr: &str, old: &Value, new: &Value) -> TrackerResult<()> {
        info!(
            label = self.label.as_deref().unwrap_or(""),
            attr,
            old = %format_value(old),
            new = %format_value(new),
            "attribute changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use serde_json::json;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |attr: &str, old: &Value, new: &Value| -> TrackerResult<()> {
                seen.push((attr.to_string(), old.clone(), new.clone()));
                Ok(())
            };
            observer.notify("name", &json!("A"), &json!("B")).unwrap();
        }
        assert_eq!(seen, vec![("name".to_string(), json!("A"), json!("B"))]);
    }

    #[test]
    fn test_failing_observer() {
        let mut observer = |attr: &str, _old: &Value, _new: &Value| -> TrackerResult<()> {
            Err(TrackerError::Observer(format!("rejected {}", attr)))
        };
        let err = observer.notify("age", &json!(1), &json!(2)).unwrap_err();
        assert_eq!(err.to_string(), "Observer error: rejected age");
    }

    #[test]
    fn test_logging_observer() {
        let mut observer = LoggingObserver::with_label("user");
        assert_eq!(observer.label.as_deref(), Some("user"));
        assert!(observer.notify("name", &json!("A"), &json!("B")).is_ok());
    }
}
