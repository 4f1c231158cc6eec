//! Configuration module for object-tracker
//!
//! Provides serde-backed tracker settings that can be kept in a JSON file
//! and turned into a configured [`Tracker`](crate::tracker::Tracker).

pub mod settings;

pub use settings::TrackerSettings;
