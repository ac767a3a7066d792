// Core modules
pub mod metrics;
pub mod types;

/// Core prelude module that re-exports commonly used types
pub mod prelude {
    pub use super::metrics::{Channel, ChannelRegistry, RollingSeries, Sample, ValueSummary};
    pub use super::types::{Category, Reading, SensorItem, SensorKind, SensorReading};
}
