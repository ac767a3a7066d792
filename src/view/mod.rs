//! Presentation contract
//!
//! A [`SensorView`] is a finished snapshot of one tick. It owns copies of the
//! samples, so the presentation side can keep it as long as it likes while the
//! poller moves on.

use serde::Serialize;

use crate::core::metrics::{ChannelRegistry, RollingSeries, Sample, ValueSummary};
use crate::core::types::{Category, SensorItem};
use crate::error::Error;
use crate::utils::format_total_seconds;

/// Outcome of the latest tick for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CategoryStatus {
    /// Readings were collected this tick
    Ok,
    /// No hardware of this category was found
    HardwareNotDetected,
    /// The motherboard reported no spinning fan
    NoFanDetected,
    /// Any other failure, with its message
    Unavailable(String),
}

impl CategoryStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CategoryStatus::Ok)
    }
}

impl From<&Error> for CategoryStatus {
    fn from(err: &Error) -> Self {
        match err {
            Error::HardwareNotDetected { .. } => CategoryStatus::HardwareNotDetected,
            Error::NoFanDetected => CategoryStatus::NoFanDetected,
            other => CategoryStatus::Unavailable(other.to_string()),
        }
    }
}

/// Time bounds of a chart's x axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn of(series: &RollingSeries) -> Self {
        let (min, max) = series.time_range();
        Self { min, max }
    }

    /// Axis labels for both ends, such as `("1m40s", "2m40s")`
    pub fn labels(&self) -> (String, String) {
        (format_total_seconds(self.min), format_total_seconds(self.max))
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::of(&RollingSeries::new())
    }
}

/// One chart line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub key: String,
    pub samples: Vec<Sample>,
    pub summary: Option<ValueSummary>,
}

/// Everything the presentation layer shows for a category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub hardware_name: String,
    pub status: CategoryStatus,
    /// Rows for the sensor list; empty when the category failed this tick
    pub items: Vec<SensorItem>,
    pub representative: Option<f64>,
    /// Lines in channel discovery order
    pub series: Vec<SeriesView>,
    /// Axis bounds taken from the first discovered line
    pub axis: AxisRange,
}

impl CategoryView {
    pub(crate) fn build(
        category: Category,
        hardware_name: String,
        status: CategoryStatus,
        items: Vec<SensorItem>,
        representative: Option<f64>,
        registry: &ChannelRegistry,
    ) -> Self {
        let series = registry
            .iter()
            .map(|channel| SeriesView {
                key: channel.key().to_string(),
                samples: channel.series().samples(),
                summary: channel.series().value_summary(),
            })
            .collect();
        let axis = registry.first().map(|c| AxisRange::of(c.series())).unwrap_or_default();

        Self { category, hardware_name, status, items, representative, series, axis }
    }

    /// The line for a channel key
    pub fn series(&self, key: &str) -> Option<&SeriesView> {
        self.series.iter().find(|s| s.key == key)
    }
}

/// The published result of one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorView {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Elapsed seconds at which the tick ran
    pub elapsed: f64,
    pub cpu: CategoryView,
    pub gpu: CategoryView,
    pub fan: CategoryView,
}

impl SensorView {
    pub fn category(&self, category: Category) -> &CategoryView {
        match category {
            Category::Cpu => &self.cpu,
            Category::Gpu => &self.gpu,
            Category::Motherboard => &self.fan,
        }
    }

    /// Combined axis for the temperature chart, which draws CPU and GPU together.
    ///
    /// The CPU line drives it, falling back to GPU when the CPU has no samples.
    pub fn temperature_axis(&self) -> AxisRange {
        if self.cpu.series.iter().any(|s| !s.samples.is_empty()) {
            self.cpu.axis
        } else {
            self.gpu.axis
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
