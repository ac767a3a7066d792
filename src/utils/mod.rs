//! Utility functions for the hwmon-history crate.
//!
//! - `time`: formatting of elapsed seconds for chart axis labels

pub mod time;

pub use time::format_total_seconds;
