use serde::{Deserialize, Serialize};

/// Sensor category polled on every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// CPU temperatures
    Cpu,
    /// GPU temperatures
    Gpu,
    /// Motherboard fan speeds
    Motherboard,
}

impl Category {
    /// All categories in poll order
    pub const ALL: [Category; 3] = [Category::Cpu, Category::Gpu, Category::Motherboard];

    /// Name shown when the sensor source cannot name the hardware
    pub fn default_hardware_name(&self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Motherboard => "Motherboard",
        }
    }

    /// The sensor kind this category turns into channels
    pub fn sensor_kind(&self) -> SensorKind {
        match self {
            Category::Cpu | Category::Gpu => SensorKind::Temperature,
            Category::Motherboard => SensorKind::Fan,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Cpu => write!(f, "CPU"),
            Category::Gpu => write!(f, "GPU"),
            Category::Motherboard => write!(f, "Motherboard"),
        }
    }
}

/// Kind of quantity a raw sensor measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    Temperature,
    Fan,
    Voltage,
    Load,
    Clock,
    Power,
    Control,
}

/// A raw sensor entry as reported by a sensor source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub name: String,
    pub kind: SensorKind,
    /// Current value, `None` when the sensor reported nothing this tick
    pub value: Option<f64>,
    /// Lowest value the source has observed
    pub min: Option<f64>,
    /// Highest value the source has observed
    pub max: Option<f64>,
}

impl SensorReading {
    pub fn new(name: impl Into<String>, kind: SensorKind, value: Option<f64>) -> Self {
        Self { name: name.into(), kind, value, min: None, max: None }
    }

    pub fn temperature(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self { name: name.into(), kind: SensorKind::Temperature, value: Some(value), min: Some(min), max: Some(max) }
    }

    pub fn fan(name: impl Into<String>, rpm: f64, min: f64, max: f64) -> Self {
        Self { name: name.into(), kind: SensorKind::Fan, value: Some(rpm), min: Some(min), max: Some(max) }
    }
}

/// A qualifying reading after normalization, keyed by its channel name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub name: String,
    pub value: f64,
    pub observed_min: Option<f64>,
    pub observed_max: Option<f64>,
}

/// One row of a sensor list, formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorItem {
    pub name: String,
    pub value: String,
    pub min: String,
    pub max: String,
}

impl From<&Reading> for SensorItem {
    fn from(reading: &Reading) -> Self {
        Self {
            name: reading.name.clone(),
            value: format_one_decimal(Some(reading.value)),
            min: format_one_decimal(reading.observed_min),
            max: format_one_decimal(reading.observed_max),
        }
    }
}

/// Formats to one decimal place; a missing value renders empty.
///
/// Ties round away from zero, so a quarter-degree reading of 42.25 shows as
/// `42.3`. `{:.1}` alone would round it to even.
pub fn format_one_decimal(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", (v * 10.0).round() / 10.0)).unwrap_or_default()
}
