//! Append-only change log with a transient query buffer
//!
//! `filter`/`exclude` build a selection over the log; terminal operations
//! (`all`, `first`, `last`, `count`, `delete`, ...) read the selection and
//! clear it. Without an active selection, terminal operations act on the
//! whole log.
//!
//! The selection is plain mutable state on the log. Building a query and
//! consuming it are separate calls, so two callers sharing one log must
//! serialize their filter/terminal pairs themselves.

use std::collections::{BTreeSet, HashSet};

use serde_json::Value;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};

use super::entry::Entry;

/// Ordered store of [`Entry`] records plus the current query selection
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    /// Entries in insertion (chronological) order
    log: Vec<Entry>,

    /// Positions into `log` selected by the last filter/exclude, if any
    buffer: Option<Vec<usize>>,
}

impl ChangeLog {
    /// Create an empty change log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry built from copies of `old` and `new`
    ///
    /// The log owns its values, so later in-place mutation of the caller's
    /// data never rewrites history. The selection is left untouched.
    pub fn push(&mut self, attr: &str, old: &Value, new: &Value) {
        self.log.push(Entry::new(attr, old.clone(), new.clone()));
    }

    /// Select entries whose attribute is one of `attrs`
    ///
    /// With `changes_only`, entries whose old and new values are equal are
    /// dropped as well. Calling with no attributes is only valid together
    /// with `changes_only`, in which case the current selection (or the
    /// whole log) is narrowed to real changes.
    ///
    /// ```rust,ignore
    /// let count = log.filter(&["name", "age"], false)?.count();
    /// ```
    pub fn filter(&mut self, attrs: &[&str], changes_only: bool) -> TrackerResult<&mut Self> {
        self.apply_filters("filter", attrs, false, changes_only)
    }

    /// Select entries whose attribute is NOT one of `attrs`
    ///
    /// Same `changes_only` rules as [`ChangeLog::filter`].
    pub fn exclude(&mut self, attrs: &[&str], changes_only: bool) -> TrackerResult<&mut Self> {
        self.apply_filters("exclude", attrs, true, changes_only)
    }

    fn apply_filters(
        &mut self,
        operation: &str,
        attrs: &[&str],
        exclude: bool,
        changes_only: bool,
    ) -> TrackerResult<&mut Self> {
        if attrs.is_empty() {
            if !changes_only {
                return Err(TrackerError::missing_attributes(operation));
            }

            let candidates = self.buffer.take().unwrap_or_else(|| self.all_positions());
            let selected = candidates
                .into_iter()
                .filter(|&i| self.log[i].is_a_change())
                .collect();
            self.buffer = Some(selected);
            return Ok(self);
        }

        let wanted: HashSet<&str> = attrs.iter().copied().collect();
        let selected = self
            .log
            .iter()
            .enumerate()
            .filter(|(_, entry)| wanted.contains(entry.attr.as_str()) != exclude)
            .filter(|(_, entry)| !changes_only || entry.is_a_change())
            .map(|(i, _)| i)
            .collect();

        self.buffer = Some(selected);
        Ok(self)
    }

    fn all_positions(&self) -> Vec<usize> {
        (0..self.log.len()).collect()
    }

    /// Take the current selection, clearing it
    fn take_selected(&mut self) -> Vec<usize> {
        self.buffer.take().unwrap_or_else(|| self.all_positions())
    }

    /// Clear any active selection without reading it
    pub fn reset_buffer(&mut self) {
        self.buffer = None;
    }

    /// Whether a filter/exclude selection is waiting to be consumed
    pub fn has_selection(&self) -> bool {
        self.buffer.is_some()
    }

    /// First selected entry
    pub fn first(&mut self) -> Option<Entry> {
        let selected = self.take_selected();
        selected.first().map(|&i| self.log[i].clone())
    }

    /// Last selected entry
    pub fn last(&mut self) -> Option<Entry> {
        let selected = self.take_selected();
        selected.last().map(|&i| self.log[i].clone())
    }

    /// All selected entries in log order
    pub fn all(&mut self) -> Vec<Entry> {
        self.take_selected()
            .into_iter()
            .map(|i| self.log[i].clone())
            .collect()
    }

    /// Number of selected entries
    pub fn count(&mut self) -> usize {
        self.take_selected().len()
    }

    /// Remove the selected entries from the log
    ///
    /// Without an active selection the whole log is cleared. Surviving
    /// entries keep their relative order.
    pub fn delete(&mut self) {
        match self.buffer.take() {
            Some(selected) => {
                let doomed: HashSet<usize> = selected.into_iter().collect();
                let before = self.log.len();
                let mut position = 0;
                self.log.retain(|_| {
                    let keep = !doomed.contains(&position);
                    position += 1;
                    keep
                });
                debug!(removed = before - self.log.len(), "deleted selected log entries");
            }
            None => {
                debug!(removed = self.log.len(), "cleared change log");
                self.log.clear();
            }
        }
    }

    /// Distinct attribute names among the selected entries
    pub fn get_unique_attributes(&mut self) -> BTreeSet<String> {
        self.take_selected()
            .into_iter()
            .map(|i| self.log[i].attr.clone())
            .collect()
    }

    /// First selected entry for `attr` (any attribute when `None`)
    pub fn first_change(&mut self, attr: Option<&str>) -> Option<Entry> {
        let selected = self.take_selected();
        selected
            .into_iter()
            .map(|i| &self.log[i])
            .find(|entry| attr.map_or(true, |a| entry.attr == a))
            .cloned()
    }

    /// Last selected entry for `attr` (any attribute when `None`)
    pub fn last_change(&mut self, attr: Option<&str>) -> Option<Entry> {
        let selected = self.take_selected();
        selected
            .into_iter()
            .rev()
            .map(|i| &self.log[i])
            .find(|entry| attr.map_or(true, |a| entry.attr == a))
            .cloned()
    }

    /// Scan the full log for the first entry recorded for `attr`
    ///
    /// `reverse` scans from the newest entry; `only_changes` skips entries
    /// whose old and new values are equal. The selection is ignored and
    /// left as is.
    pub fn get_first_log_for_attribute(
        &self,
        attr: &str,
        reverse: bool,
        only_changes: bool,
    ) -> Option<&Entry> {
        let matches = |entry: &&Entry| entry.attr == attr && (!only_changes || entry.is_a_change());
        if reverse {
            self.log.iter().rev().find(matches)
        } else {
            self.log.iter().find(matches)
        }
    }

    /// Whether `attr` has a net change across the full log
    ///
    /// Compares the value before the first recorded write with the value
    /// after the most recent one; intermediate values are ignored. A single
    /// entry always counts as a change.
    pub fn has_changes(&self, attr: &str) -> bool {
        let first = self.log.iter().position(|entry| entry.attr == attr);
        let last = self.log.iter().rposition(|entry| entry.attr == attr);

        match (first, last) {
            (Some(first), Some(last)) if first == last => true,
            (Some(first), Some(last)) => self.log[first].old != self.log[last].new,
            _ => false,
        }
    }

    /// Number of entries in the log (the selection is not consulted)
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Whether the log holds no entries
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Iterate over every entry in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.log.iter()
    }

    /// The full log as a slice
    pub fn entries(&self) -> &[Entry] {
        &self.log
    }

    /// Plain records for every entry in the log
    pub fn to_dict(&self) -> Vec<Value> {
        self.log.iter().map(Entry::to_dict).collect()
    }
}

impl std::fmt::Display for ChangeLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChangeLog: {}", self.log.len())
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.log.iter()
    }
}
