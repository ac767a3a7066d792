/// # Rolling Series
///
/// Timestamped samples for one sensor channel, bounded by a retention window
/// measured in elapsed seconds rather than a sample count.
///
/// ## Example
///
/// ```rust
/// use hwmon_history::core::metrics::RollingSeries;
///
/// let mut series = RollingSeries::new();
/// series.append(0.0, 41.5).unwrap();
/// series.append(1.0, 42.0).unwrap();
///
/// // Drop samples taken before 0.5s
/// series.evict_older_than(0.5);
/// assert_eq!(series.len(), 1);
/// ```
use std::collections::VecDeque;

use serde::Serialize;

use crate::config::constants::{DEFAULT_AXIS_MAX, DEFAULT_AXIS_MIN};
use crate::error::{Error, Result};

/// Channel registry keyed by channel name
pub mod registry;

pub use registry::{Channel, ChannelRegistry};

/// A single measurement at an elapsed time since the monitor started
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Elapsed seconds since start
    pub timestamp: f64,
    /// The measured value
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Current, lowest and highest value held by a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueSummary {
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

/// Samples ordered by ascending timestamp, evicted from the head
#[derive(Debug, Clone, Default)]
pub struct RollingSeries {
    samples: VecDeque<Sample>,
}

impl RollingSeries {
    /// Creates a new empty series
    pub fn new() -> Self {
        Self { samples: VecDeque::new() }
    }

    /// Appends a sample at the tail.
    ///
    /// Timestamps must not go backwards. An older timestamp is rejected and the
    /// series is left untouched, so the ascending order always holds.
    pub fn append(&mut self, timestamp: f64, value: f64) -> Result<()> {
        if let Some(last) = self.samples.back() {
            if timestamp < last.timestamp {
                return Err(Error::NonMonotonicSample { last: last.timestamp, attempted: timestamp });
            }
        }
        self.samples.push_back(Sample::new(timestamp, value));
        Ok(())
    }

    /// Removes samples from the front while their timestamp is before `horizon`.
    ///
    /// Returns the number of samples removed.
    pub fn evict_older_than(&mut self, horizon: f64) -> usize {
        let mut evicted = 0;
        while self.samples.front().is_some_and(|s| s.timestamp < horizon) {
            self.samples.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns the most recent sample in the series, if any
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Returns the oldest sample still retained, if any
    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Copies the samples out, oldest first
    pub fn samples(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Earliest retained timestamp, or the default axis start when empty
    pub fn min(&self) -> f64 {
        self.oldest().map_or(DEFAULT_AXIS_MIN, |s| s.timestamp)
    }

    /// Latest retained timestamp, or the default axis end when empty
    pub fn max(&self) -> f64 {
        self.latest().map_or(DEFAULT_AXIS_MAX, |s| s.timestamp)
    }

    /// Timestamp bounds used for chart axes
    pub fn time_range(&self) -> (f64, f64) {
        (self.min(), self.max())
    }

    /// Current, min and max of the retained values
    pub fn value_summary(&self) -> Option<ValueSummary> {
        let latest = self.latest()?;
        let (min, max) = self
            .samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| (lo.min(s.value), hi.max(s.value)));
        Some(ValueSummary { current: latest.value, min, max })
    }
}
