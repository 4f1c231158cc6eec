//! The tracker: recording policy, observer dispatch and snapshot diffing

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::changelog::{attribute_value, diff_objects, generate_diff, AttributeChange, ChangeLog};
use crate::config::TrackerSettings;
use crate::error::{TrackerError, TrackerResult};

use super::observer::Observer;

/// Records attribute changes for one tracked entity
///
/// A tracker owns its [`ChangeLog`]. Writes where the old and new values are
/// structurally equal are never recorded. Observers fire after every
/// recorded change when `auto_notify` is on.
///
/// A tracker can also be used without a write hook: take a snapshot with
/// [`Tracker::set_initial_state`] and compare a live object against it later.
pub struct Tracker {
    log: ChangeLog,
    attributes: Option<BTreeSet<String>>,
    observers: Vec<Box<dyn Observer>>,
    attribute_observer_map: HashMap<String, Vec<Box<dyn Observer>>>,
    auto_notify: bool,
    initial_state: Option<Value>,
    tracker_attr: String,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::from_settings(&TrackerSettings::default())
    }
}

impl Tracker {
    /// Create a tracker that tracks every attribute and auto-notifies
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker from settings
    pub fn from_settings(settings: &TrackerSettings) -> Self {
        Self {
            log: ChangeLog::new(),
            attributes: settings
                .attributes
                .as_ref()
                .map(|attrs| attrs.iter().cloned().collect()),
            observers: Vec::new(),
            attribute_observer_map: HashMap::new(),
            auto_notify: settings.auto_notify,
            initial_state: None,
            tracker_attr: settings.tracker_attr.clone(),
        }
    }

    /// Restrict tracking to the given attributes
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Turn automatic observer notification on or off
    pub fn with_auto_notify(mut self, auto_notify: bool) -> Self {
        self.auto_notify = auto_notify;
        self
    }

    /// Rename the slot that holds the tracker on the tracked entity
    pub fn with_tracker_attr(mut self, tracker_attr: impl Into<String>) -> Self {
        self.tracker_attr = tracker_attr.into();
        self
    }

    /// Create the tracker with an initial-state snapshot of `obj`
    pub fn with_initial_state<T: Serialize>(mut self, obj: &T) -> TrackerResult<Self> {
        self.set_initial_state(obj)?;
        Ok(self)
    }

    /// Register an observer for every change
    pub fn add_observer(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Register an observer for changes to a single attribute
    pub fn add_attribute_observer(
        &mut self,
        attr: impl Into<String>,
        observer: impl Observer + 'static,
    ) {
        self.attribute_observer_map
            .entry(attr.into())
            .or_default()
            .push(Box::new(observer));
    }

    /// The change log
    pub fn log(&self) -> &ChangeLog {
        &self.log
    }

    /// The change log, for queries that build a selection
    pub fn log_mut(&mut self) -> &mut ChangeLog {
        &mut self.log
    }

    /// Attribute allow-list, if tracking is restricted
    pub fn attributes(&self) -> Option<&BTreeSet<String>> {
        self.attributes.as_ref()
    }

    pub fn auto_notify(&self) -> bool {
        self.auto_notify
    }

    pub fn tracker_attr(&self) -> &str {
        &self.tracker_attr
    }

    /// The stored initial-state snapshot
    pub fn initial_state(&self) -> Option<&Value> {
        self.initial_state.as_ref()
    }

    /// Number of globally registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Number of observers registered for `attr`
    pub fn attribute_observer_count(&self, attr: &str) -> usize {
        self.attribute_observer_map.get(attr).map_or(0, Vec::len)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Whether writes to `attr` should be routed to [`Tracker::track`]
    pub fn should_track(&self, attr: &str) -> bool {
        self.attributes
            .as_ref()
            .map_or(true, |attributes| attributes.contains(attr))
    }

    /// Record a write of `attr` from `old` to `new`
    ///
    /// Does nothing when the values are equal. Otherwise appends to the log
    /// and, with `auto_notify`, notifies observers. Observer errors are
    /// returned as is; the entry stays recorded.
    pub fn track(&mut self, attr: &str, old: &Value, new: &Value) -> TrackerResult<()> {
        if old == new {
            trace!(attr, "skipping write with unchanged value");
            return Ok(());
        }

        self.log.push(attr, old, new);
        debug!(attr, entries = self.log.len(), "recorded change");

        if self.auto_notify {
            self.notify_observers(attr, old, new)?;
        }

        Ok(())
    }

    /// Serialize typed values and [`track`](Tracker::track) the write
    pub fn record<T: Serialize + ?Sized>(
        &mut self,
        attr: &str,
        old: &T,
        new: &T,
    ) -> TrackerResult<()> {
        let old = serde_json::to_value(old)?;
        let new = serde_json::to_value(new)?;
        self.track(attr, &old, &new)
    }

    /// Notify observers of a change
    ///
    /// Observers registered for `attr` run first, then the global observers.
    /// Both sets fire for the same change. Call this by hand when
    /// `auto_notify` is off.
    pub fn notify_observers(&mut self, attr: &str, old: &Value, new: &Value) -> TrackerResult<()> {
        if !self.attribute_observer_map.is_empty() {
            if let Some(observers) = self.attribute_observer_map.get_mut(attr) {
                trace!(attr, count = observers.len(), "notifying attribute observers");
                for observer in observers.iter_mut() {
                    observer.notify(attr, old, new)?;
                }
            }
        }

        if !self.observers.is_empty() {
            trace!(attr, count = self.observers.len(), "notifying observers");
            for observer in self.observers.iter_mut() {
                observer.notify(attr, old, new)?;
            }
        }

        Ok(())
    }

    /// Store a deep snapshot of `obj`, replacing any previous one
    pub fn set_initial_state<T: Serialize + ?Sized>(&mut self, obj: &T) -> TrackerResult<()> {
        self.initial_state = Some(serde_json::to_value(obj)?);
        Ok(())
    }

    fn snapshot(&self) -> TrackerResult<&Value> {
        self.initial_state
            .as_ref()
            .ok_or(TrackerError::InitialStateMissing)
    }

    /// Whether `attr` has a net change according to the log
    pub fn has_attribute_changed(&self, attr: &str) -> bool {
        self.log.has_changes(attr)
    }

    /// Whether `attr` differs between the initial-state snapshot and `obj`
    ///
    /// An attribute missing on either side compares as `null`.
    pub fn has_attribute_changed_since<T: Serialize + ?Sized>(
        &self,
        attr: &str,
        obj: &T,
    ) -> TrackerResult<bool> {
        let snapshot = self.snapshot()?;
        let current = serde_json::to_value(obj)?;
        Ok(attribute_value(snapshot, attr) != attribute_value(&current, attr))
    }

    /// Whether any logged attribute has a net change
    pub fn has_changed(&self) -> bool {
        let mut seen = HashSet::new();
        self.log
            .iter()
            .filter(|entry| seen.insert(entry.attr.as_str()))
            .any(|entry| self.log.has_changes(&entry.attr))
    }

    /// Whether `obj` differs in any way from the initial-state snapshot
    pub fn has_changed_since<T: Serialize + ?Sized>(&self, obj: &T) -> TrackerResult<bool> {
        let snapshot = self.snapshot()?;
        Ok(*snapshot != serde_json::to_value(obj)?)
    }

    /// Attributes of `obj` that differ from the initial-state snapshot
    pub fn changed_attributes_since<T: Serialize + ?Sized>(
        &self,
        obj: &T,
    ) -> TrackerResult<Vec<AttributeChange>> {
        let snapshot = self.snapshot()?;
        Ok(diff_objects(snapshot, &serde_json::to_value(obj)?))
    }

    /// Human-readable summary of how `obj` differs from the snapshot
    pub fn diff_summary_since<T: Serialize + ?Sized>(
        &self,
        obj: &T,
    ) -> TrackerResult<Option<String>> {
        let snapshot = self.snapshot()?;
        Ok(generate_diff(snapshot, &serde_json::to_value(obj)?))
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("log", &self.log)
            .field("attributes", &self.attributes)
            .field("observers", &self.observers.len())
            .field(
                "attribute_observers",
                &self.attribute_observer_map.keys().collect::<BTreeSet<_>>(),
            )
            .field("auto_notify", &self.auto_notify)
            .field("initial_state", &self.initial_state)
            .field("tracker_attr", &self.tracker_attr)
            .finish()
    }
}

impl std::fmt::Display for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.log, f)
    }
}
