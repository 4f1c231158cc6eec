//! Write hook for tracked entities
//!
//! A tracked struct owns a [`Tracker`] field and routes every field write
//! through [`assign`] from its setters:
//!
//! ```rust,ignore
//! pub struct User {
//!     name: String,
//!     tracker: Tracker,
//! }
//!
//! impl User {
//!     pub fn set_name(&mut self, name: impl Into<String>) -> TrackerResult<()> {
//!         assign(&mut self.tracker, "name", &mut self.name, name.into())
//!     }
//! }
//! ```

use serde::Serialize;
use tracing::trace;

use crate::error::TrackerResult;

use super::engine::Tracker;

/// Write `value` into `slot` and record the change on `tracker`
///
/// The old value is captured before the write is applied. Writes to the
/// tracker's own slot and to attributes outside the allow-list are applied
/// without being recorded. The write is always applied, even when an
/// observer returns an error.
pub fn assign<V: Serialize>(
    tracker: &mut Tracker,
    attr: &str,
    slot: &mut V,
    value: V,
) -> TrackerResult<()> {
    if attr == tracker.tracker_attr() || !tracker.should_track(attr) {
        trace!(attr, "untracked write");
        *slot = value;
        return Ok(());
    }

    let old = serde_json::to_value(&*slot)?;
    let new = serde_json::to_value(&value)?;
    *slot = value;

    tracker.track(attr, &old, &new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Serialize)]
    struct User {
        name: String,
        age: u32,
        tags: Vec<String>,
        #[serde(skip)]
        tracker: Tracker,
    }

    impl User {
        fn new(name: &str, age: u32) -> Self {
            Self {
                name: name.to_string(),
                age,
                tags: Vec::new(),
                tracker: Tracker::new(),
            }
        }

        fn set_name(&mut self, name: &str) -> TrackerResult<()> {
            assign(&mut self.tracker, "name", &mut self.name, name.to_string())
        }

        fn set_age(&mut self, age: u32) -> TrackerResult<()> {
            assign(&mut self.tracker, "age", &mut self.age, age)
        }

        fn set_tags(&mut self, tags: Vec<String>) -> TrackerResult<()> {
            assign(&mut self.tracker, "tags", &mut self.tags, tags)
        }
    }

    #[test]
    fn test_constructor_is_not_tracked() {
        let user = User::new("A", 100);
        assert!(!user.tracker.has_changed());
        assert!(!user.tracker.has_attribute_changed("name"));
        assert!(user.tracker.is_empty());
    }

    #[test]
    fn test_setter_records_change() {
        let mut user = User::new("A", 100);
        user.set_name("B").unwrap();

        assert_eq!(user.name, "B");
        assert!(user.tracker.has_attribute_changed("name"));
        assert!(user.tracker.has_changed());

        let entry = user.tracker.log_mut().last().unwrap();
        assert_eq!(entry.old, json!("A"));
        assert_eq!(entry.new, json!("B"));
    }

    #[test]
    fn test_same_value_not_recorded() {
        let mut user = User::new("A", 100);
        user.set_name("A").unwrap();
        user.set_age(100).unwrap();
        assert!(user.tracker.is_empty());
    }

    #[test]
    fn test_query_through_entity() {
        let mut user = User::new("A", 100);
        user.set_name("B").unwrap();
        user.set_age(20).unwrap();

        let log = user.tracker.log_mut();
        assert_eq!(log.count(), 2);
        assert_eq!(log.filter(&["name"], false).unwrap().count(), 1);
        assert_eq!(log.filter(&["name", "age"], false).unwrap().count(), 2);

        let remaining = log.exclude(&["name"], false).unwrap().all();
        assert_eq!(remaining[0].attr, "age");

        log.exclude(&["name"], false).unwrap().delete();
        assert_eq!(log.count(), 1);
        assert_eq!(log.entries()[0].attr, "name");

        log.delete();
        assert_eq!(log.count(), 0);
    }

    #[test]
    fn test_history_is_isolated_from_live_value() {
        let mut user = User::new("A", 100);
        user.set_tags(vec!["admin".to_string()]).unwrap();

        user.tags.push("owner".to_string());

        let entry = user.tracker.log_mut().last().unwrap();
        assert_eq!(entry.new, json!(["admin"]));
    }

    #[test]
    fn test_allow_list_respected() {
        let mut user = User::new("A", 100);
        user.tracker = Tracker::new().with_attributes(["name"]);

        user.set_age(20).unwrap();
        user.set_name("B").unwrap();

        assert_eq!(user.age, 20);
        assert_eq!(user.tracker.len(), 1);
        assert_eq!(
            user.tracker.log_mut().get_unique_attributes().into_iter().collect::<Vec<_>>(),
            vec!["name"]
        );
    }

    #[test]
    fn test_tracker_slot_is_skipped() {
        let mut tracker = Tracker::new();
        let mut slot = json!({"entries": 0});

        assign(&mut tracker, "tracker", &mut slot, json!({"entries": 1})).unwrap();

        assert_eq!(slot, json!({"entries": 1}));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_observer_sees_write() {
        let seen: Rc<RefCell<Vec<(String, Value, Value)>>> = Rc::default();
        let mut user = User::new("A", 100);
        {
            let seen = Rc::clone(&seen);
            user.tracker.add_observer(
                move |attr: &str, old: &Value, new: &Value| -> TrackerResult<()> {
                    seen.borrow_mut()
                        .push((attr.to_string(), old.clone(), new.clone()));
                    Ok(())
                },
            );
        }

        user.set_age(50).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![("age".to_string(), json!(100), json!(50))]
        );
    }

    #[test]
    fn test_failing_observer_keeps_write() {
        let mut user = User::new("A", 100);
        user.tracker.add_observer(
            |_attr: &str, _old: &Value, _new: &Value| -> TrackerResult<()> {
                Err(TrackerError::Observer("read-only".into()))
            },
        );

        let err = user.set_name("B").unwrap_err();
        assert!(matches!(err, TrackerError::Observer(_)));
        assert_eq!(user.name, "B");
        assert_eq!(user.tracker.len(), 1);
    }

    #[test]
    fn test_snapshot_mode_with_entity() {
        let mut user = User::new("A", 100);
        let snapshot = serde_json::to_value(&user).unwrap();
        user.tracker.set_initial_state(&snapshot).unwrap();

        assert!(!user.tracker.has_changed_since(&user).unwrap());

        user.set_name("B").unwrap();
        assert!(user.tracker.has_changed_since(&user).unwrap());
        assert!(user.tracker.has_attribute_changed_since("name", &user).unwrap());
        assert!(!user.tracker.has_attribute_changed_since("age", &user).unwrap());
    }
}
