//! object-tracker - attribute-level change tracking
//!
//! This library records attribute writes on an object over time, answers
//! "has this changed" queries, and notifies observers when values change.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `changelog`: Append-only change log, entries and snapshot diffs
//! - `tracker`: Tracking policy, observers and the field write hook
//! - `config`: Serializable tracker settings
//! - `export`: JSON, JSON Lines, YAML and CSV export of entries
//! - `display`: Terminal formatting of entries
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use object_tracker::{assign, Tracker, TrackerResult};
//!
//! struct User {
//!     name: String,
//!     tracker: Tracker,
//! }
//!
//! impl User {
//!     fn set_name(&mut self, name: &str) -> TrackerResult<()> {
//!         assign(&mut self.tracker, "name", &mut self.name, name.to_string())
//!     }
//! }
//!
//! let mut user = User { name: "A".into(), tracker: Tracker::new() };
//! user.set_name("B")?;
//! assert!(user.tracker.has_changed());
//! assert_eq!(user.tracker.log_mut().filter(&["name"], false)?.count(), 1);
//! ```

pub mod changelog;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod tracker;

pub use changelog::{ChangeLog, Entry};
pub use config::TrackerSettings;
pub use error::{TrackerError, TrackerResult};
pub use tracker::{assign, LoggingObserver, Observer, Tracker};
