//! Sensor snapshot normalization
//!
//! Turns the raw readings of one category into display rows, a representative
//! value and the channel updates that feed the registry. Normalization is a
//! pure function of the snapshot and the configuration.

use std::collections::HashSet;

use tracing::debug;

use crate::config::{CategoryRules, FanNaming, MonitorConfig};
use crate::core::types::{Category, Reading, SensorItem, SensorKind, SensorReading};
use crate::error::{Error, Result};

/// The normalized form of one category's snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSnapshot {
    /// Display rows in source order. Temperature rows may repeat a name.
    pub items: Vec<SensorItem>,
    /// Qualifying readings at full precision, under their channel keys
    pub readings: Vec<Reading>,
    /// The value driving the category's primary line
    pub representative: Option<f64>,
    /// Channel updates in source order; keys are unique
    pub channels: Vec<(String, f64)>,
}

impl NormalizedSnapshot {
    /// Full-precision value recorded for a channel key
    pub fn channel_value(&self, key: &str) -> Option<f64> {
        self.channels.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

/// Applies a configuration's per-category rules to raw snapshots
#[derive(Debug, Clone)]
pub struct Normalizer {
    cpu: CategoryRules,
    gpu: CategoryRules,
    fan: CategoryRules,
    fan_naming: FanNaming,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&MonitorConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            cpu: config.cpu.clone(),
            gpu: config.gpu.clone(),
            fan: config.fan.clone(),
            fan_naming: config.fan_naming.clone(),
        }
    }

    fn rules(&self, category: Category) -> &CategoryRules {
        match category {
            Category::Cpu => &self.cpu,
            Category::Gpu => &self.gpu,
            Category::Motherboard => &self.fan,
        }
    }

    /// Normalizes one category's snapshot.
    ///
    /// Fails with `Error::NoFanDetected` when the motherboard snapshot has no
    /// spinning fan left after filtering.
    pub fn normalize(&self, raw: &[SensorReading], category: Category) -> Result<NormalizedSnapshot> {
        let rules = self.rules(category);
        let readings = self.qualifying_readings(raw, category, rules);

        match category {
            Category::Cpu | Category::Gpu => Ok(Self::temperature_snapshot(readings, rules)),
            Category::Motherboard => Self::fan_snapshot(readings, rules),
        }
    }

    /// Filters by kind, drops excluded names, applies the fan rename and
    /// removes duplicate fan keys keeping the first
    fn qualifying_readings(&self, raw: &[SensorReading], category: Category, rules: &CategoryRules) -> Vec<Reading> {
        let kind = category.sensor_kind();
        let mut seen = HashSet::new();
        let mut readings = Vec::new();

        for sensor in raw.iter().filter(|s| s.kind == kind) {
            let Some(value) = sensor.value else {
                continue;
            };
            if kind == SensorKind::Fan && value <= 0.0 {
                continue;
            }
            if rules.is_excluded(&sensor.name) {
                debug!(%category, sensor = %sensor.name, "skipping excluded sensor");
                continue;
            }

            // Fan names are channel keys, so a repeated key keeps the first fan.
            // Temperature rows are listed as reported.
            let name = match kind {
                SensorKind::Fan => {
                    let key = self.fan_naming.channel_key(&sensor.name).to_string();
                    if !seen.insert(key.clone()) {
                        debug!(%category, channel = %key, raw = %sensor.name, "duplicate channel key ignored");
                        continue;
                    }
                    key
                },
                _ => sensor.name.clone(),
            };

            readings.push(Reading { name, value, observed_min: sensor.min, observed_max: sensor.max });
        }
        readings
    }

    fn representative(readings: &[Reading], rules: &CategoryRules) -> Option<f64> {
        readings
            .iter()
            .find(|r| rules.is_representative(&r.name))
            .or_else(|| if rules.fallback_to_first { readings.first() } else { None })
            .map(|r| r.value)
    }

    fn temperature_snapshot(readings: Vec<Reading>, rules: &CategoryRules) -> NormalizedSnapshot {
        let representative = Self::representative(&readings, rules);
        let channels = match (&rules.primary_channel, representative) {
            (Some(key), Some(value)) => vec![(key.clone(), value)],
            (None, _) => {
                let mut seen = HashSet::new();
                readings.iter().filter(|r| seen.insert(r.name.as_str())).map(|r| (r.name.clone(), r.value)).collect()
            },
            (Some(_), None) => Vec::new(),
        };

        NormalizedSnapshot { items: readings.iter().map(SensorItem::from).collect(), readings, representative, channels }
    }

    fn fan_snapshot(readings: Vec<Reading>, rules: &CategoryRules) -> Result<NormalizedSnapshot> {
        if readings.is_empty() {
            return Err(Error::NoFanDetected);
        }

        let representative = Self::representative(&readings, rules);
        let channels = match (&rules.primary_channel, representative) {
            (Some(key), Some(value)) => vec![(key.clone(), value)],
            _ => readings.iter().map(|r| (r.name.clone(), r.value)).collect(),
        };

        Ok(NormalizedSnapshot { items: readings.iter().map(SensorItem::from).collect(), readings, representative, channels })
    }
}

/// Normalizes a snapshot with the default rules
pub fn normalize(raw: &[SensorReading], category: Category) -> Result<NormalizedSnapshot> {
    Normalizer::default().normalize(raw, category)
}
