//! In-memory hardware tree
//!
//! `HardwareInventory` implements [`SensorSource`] over a tree of hardware
//! nodes held in memory. Tests and demos use it in place of a real sensor
//! library, and sensor values can be changed between ticks.
//!
//! # Examples
//!
//! ```rust
//! use hwmon_history::core::types::{Category, SensorReading};
//! use hwmon_history::hardware::{Hardware, HardwareInventory, HardwareType};
//! use hwmon_history::traits::SensorSource;
//!
//! let inventory = HardwareInventory::new(vec![
//!     Hardware::new("Ryzen 7 5800X", HardwareType::Cpu)
//!         .with_sensor(SensorReading::temperature("CPU Package", 51.0, 35.0, 80.0)),
//!     Hardware::new("B550 Board", HardwareType::Motherboard).with_sub_hardware(
//!         Hardware::new("Nuvoton NCT6798D", HardwareType::SuperIo)
//!             .with_sensor(SensorReading::fan("Fan #1", 1100.0, 900.0, 1500.0)),
//!     ),
//! ]);
//!
//! assert_eq!(inventory.hardware_name(Category::Cpu).as_deref(), Some("Ryzen 7 5800X"));
//! assert_eq!(inventory.fetch(Category::Motherboard).unwrap().len(), 1);
//! assert!(inventory.fetch(Category::Gpu).is_err());
//! ```

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::types::{Category, SensorReading};
use crate::error::{Error, Result};
use crate::traits::SensorSource;

/// Type of a hardware node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HardwareType {
    Cpu,
    GpuNvidia,
    GpuAmd,
    GpuIntel,
    Motherboard,
    SuperIo,
    Memory,
    Storage,
}

impl HardwareType {
    /// Hardware types that can serve a category
    pub fn for_category(category: Category) -> &'static [HardwareType] {
        match category {
            Category::Cpu => &[HardwareType::Cpu],
            Category::Gpu => &[HardwareType::GpuNvidia, HardwareType::GpuAmd, HardwareType::GpuIntel],
            Category::Motherboard => &[HardwareType::Motherboard],
        }
    }

    pub fn serves(&self, category: Category) -> bool {
        Self::for_category(category).contains(self)
    }
}

/// A hardware node with its own sensors and any child chips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hardware {
    pub name: String,
    pub kind: HardwareType,
    pub sensors: Vec<SensorReading>,
    pub sub_hardware: Vec<Hardware>,
}

impl Hardware {
    pub fn new(name: impl Into<String>, kind: HardwareType) -> Self {
        Self { name: name.into(), kind, sensors: Vec::new(), sub_hardware: Vec::new() }
    }

    pub fn with_sensor(mut self, sensor: SensorReading) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn with_sub_hardware(mut self, child: Hardware) -> Self {
        self.sub_hardware.push(child);
        self
    }

    /// Sensors of this node followed by those of its children, depth first
    pub fn all_sensors(&self) -> Vec<SensorReading> {
        let mut sensors = self.sensors.clone();
        for child in &self.sub_hardware {
            sensors.extend(child.all_sensors());
        }
        sensors
    }

    fn sensor_mut(&mut self, name: &str) -> Option<&mut SensorReading> {
        if let Some(sensor) = self.sensors.iter_mut().find(|s| s.name == name) {
            return Some(sensor);
        }
        self.sub_hardware.iter_mut().find_map(|child| child.sensor_mut(name))
    }
}

/// Sensor source over an in-memory hardware tree
#[derive(Debug, Default)]
pub struct HardwareInventory {
    hardware: RwLock<Vec<Hardware>>,
}

impl HardwareInventory {
    pub fn new(hardware: Vec<Hardware>) -> Self {
        Self { hardware: RwLock::new(hardware) }
    }

    /// Adds a top-level hardware node
    pub fn push(&self, hardware: Hardware) {
        self.hardware.write().push(hardware);
    }

    /// Removes every top-level node serving `category`
    pub fn remove(&self, category: Category) {
        self.hardware.write().retain(|h| !h.kind.serves(category));
    }

    /// Sets the current value of the first sensor named `name` under `category`.
    ///
    /// The observed min and max follow the new value the way a live sensor
    /// library tracks them. Returns false if no such sensor exists.
    pub fn set_value(&self, category: Category, name: &str, value: Option<f64>) -> bool {
        let mut hardware = self.hardware.write();
        let Some(sensor) = hardware
            .iter_mut()
            .filter(|h| h.kind.serves(category))
            .find_map(|h| h.sensor_mut(name))
        else {
            return false;
        };

        sensor.value = value;
        if let Some(v) = value {
            sensor.min = Some(sensor.min.map_or(v, |m| m.min(v)));
            sensor.max = Some(sensor.max.map_or(v, |m| m.max(v)));
        }
        true
    }

    /// Adds a sensor to the first node serving `category`, or to its first child
    /// chip when `on_sub_hardware` is set
    pub fn add_sensor(&self, category: Category, sensor: SensorReading, on_sub_hardware: bool) -> Result<()> {
        let mut hardware = self.hardware.write();
        let node = hardware
            .iter_mut()
            .find(|h| h.kind.serves(category))
            .ok_or(Error::hardware_not_detected(category))?;

        let target = if on_sub_hardware && !node.sub_hardware.is_empty() { &mut node.sub_hardware[0] } else { node };
        target.sensors.push(sensor);
        Ok(())
    }
}

impl SensorSource for HardwareInventory {
    fn hardware_name(&self, category: Category) -> Option<String> {
        self.hardware.read().iter().find(|h| h.kind.serves(category)).map(|h| h.name.clone())
    }

    fn fetch(&self, category: Category) -> Result<Vec<SensorReading>> {
        let hardware = self.hardware.read();
        let node = hardware
            .iter()
            .find(|h| h.kind.serves(category))
            .ok_or(Error::hardware_not_detected(category))?;

        let sensors = node.all_sensors();
        trace!(%category, hardware = %node.name, count = sensors.len(), "fetched sensors");
        Ok(sensors)
    }
}
