use crate::core::types::{Category, SensorReading};
use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Source of raw sensor snapshots
///
/// Implementors wrap whatever library talks to the hardware. A fetch may block
/// on hardware I/O, so the monitor always calls it from a blocking worker.
///
/// # Examples
///
/// ```rust
/// use hwmon_history::core::types::{Category, SensorReading};
/// use hwmon_history::traits::SensorSource;
/// use hwmon_history::{Error, Result};
///
/// struct CpuOnly;
///
/// impl SensorSource for CpuOnly {
///     fn hardware_name(&self, category: Category) -> Option<String> {
///         (category == Category::Cpu).then(|| "Test CPU".to_string())
///     }
///
///     fn fetch(&self, category: Category) -> Result<Vec<SensorReading>> {
///         match category {
///             Category::Cpu => Ok(vec![SensorReading::temperature("CPU Package", 48.0, 30.0, 70.0)]),
///             other => Err(Error::hardware_not_detected(other)),
///         }
///     }
/// }
/// ```
#[cfg_attr(test, automock)]
pub trait SensorSource: Send + Sync {
    /// Display name of the hardware behind a category, if present
    fn hardware_name(&self, category: Category) -> Option<String>;

    /// Refresh the hardware and return its current readings.
    ///
    /// Fails with `Error::HardwareNotDetected` when no hardware of the category
    /// exists.
    fn fetch(&self, category: Category) -> Result<Vec<SensorReading>>;
}
