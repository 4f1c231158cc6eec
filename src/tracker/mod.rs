//! Attribute change tracking
//!
//! A [`Tracker`] decides which writes get recorded, keeps them in a
//! [`ChangeLog`](crate::changelog::ChangeLog), notifies [`Observer`]s and
//! compares live objects against an initial-state snapshot.
//!
//! # Example
//!
//! ```rust,ignore
//! use object_tracker::tracker::{assign, LoggingObserver, Tracker};
//!
//! let mut tracker = Tracker::new().with_attributes(["name", "age"]);
//! tracker.add_observer(LoggingObserver::with_label("user"));
//!
//! let mut name = String::from("A");
//! assign(&mut tracker, "name", &mut name, "B".to_string())?;
//!
//! assert!(tracker.has_attribute_changed("name"));
//! ```

mod engine;
mod hook;
mod observer;

pub use engine::Tracker;
pub use hook::assign;
pub use observer::{LoggingObserver, Observer};
