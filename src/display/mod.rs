//! Display formatting for terminal output
//!
//! Provides utilities for rendering change log entries as text tables and
//! detail views.

pub mod entry;

pub use entry::{format_entry_details, format_entry_list, format_entry_row};
