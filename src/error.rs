use crate::core::types::Category;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot detect {category} hardware")]
    HardwareNotDetected { category: Category },

    #[error("No fan detected")]
    NoFanDetected,

    #[error("Sensor read error: {0}")]
    SensorRead(String),

    #[error("Sample at {attempted}s is older than the last sample at {last}s")]
    NonMonotonicSample { last: f64, attempted: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Monitor channel closed")]
    ChannelClosed,

    #[error("Timed out waiting for sensor view")]
    Timeout,

    #[error("System error: {0}")]
    System(String),
}

impl Error {
    pub fn hardware_not_detected(category: Category) -> Self {
        Error::HardwareNotDetected { category }
    }

    pub fn sensor_read<S: Into<String>>(msg: S) -> Self {
        Error::SensorRead(msg.into())
    }

    pub(crate) fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Error::InvalidConfig(msg.into())
    }

    pub(crate) fn system<S: Into<String>>(msg: S) -> Self {
        Error::System(msg.into())
    }

    /// Whether this error means the category produced nothing this tick, as
    /// opposed to a failure of the monitor itself.
    pub fn is_category_absence(&self) -> bool {
        matches!(
            self,
            Error::HardwareNotDetected { .. } | Error::NoFanDetected | Error::SensorRead(_)
        )
    }
}

/// Result type for hwmon-history operations
pub type Result<T> = std::result::Result<T, Error>;
