/// Default polling interval in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default retention window in seconds
pub const DEFAULT_RETENTION_WINDOW_SECS: f64 = 60.0;

/// Axis start used when a series holds no samples
pub const DEFAULT_AXIS_MIN: f64 = 0.0;

/// Axis end used when a series holds no samples
pub const DEFAULT_AXIS_MAX: f64 = 60.0;

/// How long `next_view` waits before giving up, in milliseconds
pub const DEFAULT_VIEW_TIMEOUT_MS: u64 = 10_000;

/// Buffered views between the poll loop and the presentation side
pub const VIEW_CHANNEL_CAPACITY: usize = 16;

/// Marker identifying the CPU package temperature
pub const CPU_PACKAGE_MARKER: &str = "CPU Package";

/// Marker identifying the GPU core temperature
pub const GPU_CORE_MARKER: &str = "GPU Core";

/// Name fragment of the configured junction limit, not a live reading
pub const TJMAX_MARKER: &str = "TjMax";

/// Channel key for the CPU temperature line
pub const CPU_TEMP_CHANNEL: &str = "CPU Temp";

/// Channel key for the GPU temperature line
pub const GPU_TEMP_CHANNEL: &str = "GPU Temp";

/// Raw name of the unlabeled primary fan header
pub const PRIMARY_FAN_RAW_NAME: &str = "Fan #1";

/// Canonical channel key for the CPU fan
pub const CPU_FAN_KEY: &str = "CPU";
