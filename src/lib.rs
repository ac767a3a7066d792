//! hwmon-history - rolling time series for polled hardware sensors
//!
//! This crate polls CPU and GPU temperatures and motherboard fan speeds at a
//! fixed cadence, keeps a bounded rolling history per sensor channel and
//! publishes display-ready views of current values and recent history.
//!
//! # Features
//!
//! - **Rolling series**: samples bounded by a retention window in elapsed seconds
//! - **Dynamic channels**: fans and sensors are tracked from the first tick that
//!   reports them, in discovery order
//! - **Normalization**: threshold sensors are filtered out, the unlabeled primary
//!   fan gets a stable key and a representative value is picked per category
//! - **Isolation**: a category without hardware never stops the others
//! - **Background polling**: a tokio loop hands finished views to the
//!   presentation side over a channel
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hwmon_history::prelude::*;
//!
//! let inventory = HardwareInventory::new(vec![
//!     Hardware::new("Test CPU", HardwareType::Cpu)
//!         .with_sensor(SensorReading::temperature("CPU Package", 50.0, 25.0, 75.0)),
//! ]);
//!
//! let mut poller = SensorPoller::new(Arc::new(inventory), MonitorConfig::default())?;
//! let view = poller.poll_once(0.0);
//!
//! assert_eq!(view.cpu.representative, Some(50.0));
//! assert_eq!(view.cpu.items[0].value, "50.0");
//! assert_eq!(view.gpu.status, CategoryStatus::HardwareNotDetected);
//! # Ok::<(), hwmon_history::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Missing hardware is reported per category in the view rather than returned
//! as an error:
//!
//! ```rust
//! use hwmon_history::core::types::Category;
//! use hwmon_history::{Error, Result};
//!
//! fn read_gpu() -> Result<f64> {
//!     Err(Error::hardware_not_detected(Category::Gpu))
//! }
//!
//! assert!(read_gpu().unwrap_err().is_category_absence());
//! ```
//!
//! # Thread Safety
//!
//! A poller's registries are only ever touched by the context that owns the
//! poller. Sensor sources must be `Send + Sync` because the monitor calls them
//! from a blocking worker thread.
#![doc(html_root_url = "https://docs.rs/hwmon-history/0.1.0")]

pub mod config;
pub mod core;
pub mod error;
pub mod hardware;
pub mod monitor;
pub mod normalize;
pub mod traits;
pub mod utils;
pub mod view;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::config::{CategoryRules, FanNaming, MonitorConfig, StaleChannelPolicy};
    pub use crate::core::prelude::*;
    pub use crate::hardware::{Hardware, HardwareInventory, HardwareType};
    pub use crate::monitor::{PollState, SensorMonitor, SensorMonitoring, SensorPoller};
    pub use crate::normalize::{NormalizedSnapshot, Normalizer};
    pub use crate::traits::SensorSource;
    pub use crate::view::{AxisRange, CategoryStatus, CategoryView, SensorView, SeriesView};
    pub use crate::{Error, Result};
}
