//! Monitor configuration
//!
//! Every field has a default, so a JSON document only needs the values it
//! wants to change:
//!
//! ```rust
//! use hwmon_history::config::{MonitorConfig, StaleChannelPolicy};
//!
//! let config = MonitorConfig::from_json_str(r#"{
//!     "retention_window_secs": 120.0,
//!     "stale_channels": { "prune_after_empty_ticks": 5 }
//! }"#).unwrap();
//!
//! assert_eq!(config.retention_window_secs, 120.0);
//! assert_eq!(config.poll_interval_ms, 1000);
//! assert_eq!(config.stale_channels, StaleChannelPolicy::PruneAfterEmptyTicks(5));
//! ```

/// Configuration defaults and sensor name markers
pub mod constants;

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::types::Category;
use crate::error::{Error, Result};
use constants::*;

/// What happens to a channel whose sensor stopped reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleChannelPolicy {
    /// Keep the channel for the lifetime of the monitor
    #[default]
    RetainForever,
    /// Drop the channel once its series has been empty for this many ticks
    PruneAfterEmptyTicks(u32),
}

/// Selection and filtering rules for one category
///
/// In JSON a category object only lists the fields it overrides; the rest
/// keep that category's built-in values from [`CategoryRules::for_category`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRules {
    /// Case-sensitive name fragment picking the representative reading
    pub representative_marker: Option<String>,
    /// Use the first channel when no reading carries the marker
    pub fallback_to_first: bool,
    /// Readings whose name contains any of these never enter a series
    pub exclusion_markers: Vec<String>,
    /// Single channel fed by the representative value. When unset, every
    /// reading becomes its own channel.
    pub primary_channel: Option<String>,
}

/// Overrides read from a category object. An explicit `null` clears an
/// optional field, while a missing field keeps the built-in value.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryRulesOverride {
    #[serde(default, deserialize_with = "explicit_null")]
    representative_marker: Option<Option<String>>,
    fallback_to_first: Option<bool>,
    exclusion_markers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    primary_channel: Option<Option<String>>,
}

impl CategoryRulesOverride {
    fn apply(self, mut rules: CategoryRules) -> CategoryRules {
        if let Some(marker) = self.representative_marker {
            rules.representative_marker = marker;
        }
        if let Some(fallback) = self.fallback_to_first {
            rules.fallback_to_first = fallback;
        }
        if let Some(markers) = self.exclusion_markers {
            rules.exclusion_markers = markers;
        }
        if let Some(primary) = self.primary_channel {
            rules.primary_channel = primary;
        }
        rules
    }
}

fn explicit_null<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn rules_over<'de, D>(category: Category, deserializer: D) -> std::result::Result<CategoryRules, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = CategoryRulesOverride::deserialize(deserializer)?;
    Ok(overrides.apply(CategoryRules::for_category(category)))
}

fn cpu_rules<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<CategoryRules, D::Error> {
    rules_over(Category::Cpu, deserializer)
}

fn gpu_rules<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<CategoryRules, D::Error> {
    rules_over(Category::Gpu, deserializer)
}

fn fan_rules<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<CategoryRules, D::Error> {
    rules_over(Category::Motherboard, deserializer)
}

impl CategoryRules {
    /// Default rules for a category
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Cpu => Self {
                representative_marker: Some(CPU_PACKAGE_MARKER.to_string()),
                fallback_to_first: false,
                exclusion_markers: vec![TJMAX_MARKER.to_string()],
                primary_channel: Some(CPU_TEMP_CHANNEL.to_string()),
            },
            Category::Gpu => Self {
                representative_marker: Some(GPU_CORE_MARKER.to_string()),
                fallback_to_first: false,
                exclusion_markers: Vec::new(),
                primary_channel: Some(GPU_TEMP_CHANNEL.to_string()),
            },
            Category::Motherboard => Self {
                representative_marker: Some(CPU_FAN_KEY.to_string()),
                fallback_to_first: true,
                exclusion_markers: Vec::new(),
                primary_channel: None,
            },
        }
    }

    /// Whether `name` matches one of the exclusion markers
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclusion_markers.iter().any(|marker| name.contains(marker.as_str()))
    }

    /// Whether `name` carries the representative marker
    pub fn is_representative(&self, name: &str) -> bool {
        self.representative_marker.as_deref().is_some_and(|marker| name.contains(marker))
    }
}

/// Rename applied to fan names before they become channel keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanNaming {
    /// Raw name of the unlabeled primary fan header, compared ignoring case
    pub primary_raw_name: String,
    /// Key the primary fan is recorded under
    pub canonical_key: String,
}

impl Default for FanNaming {
    fn default() -> Self {
        Self { primary_raw_name: PRIMARY_FAN_RAW_NAME.to_string(), canonical_key: CPU_FAN_KEY.to_string() }
    }
}

impl FanNaming {
    /// Maps a raw fan name to its channel key
    pub fn channel_key<'a>(&'a self, raw_name: &'a str) -> &'a str {
        if raw_name.trim().eq_ignore_ascii_case(&self.primary_raw_name) {
            &self.canonical_key
        } else {
            raw_name
        }
    }
}

/// Configuration for the poll loop and the series it maintains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Time between ticks in milliseconds
    pub poll_interval_ms: u64,
    /// Maximum age of a sample in elapsed seconds
    pub retention_window_secs: f64,
    /// How long a presentation reader waits for the next view in milliseconds
    pub view_timeout_ms: u64,
    pub stale_channels: StaleChannelPolicy,
    #[serde(deserialize_with = "cpu_rules")]
    pub cpu: CategoryRules,
    #[serde(deserialize_with = "gpu_rules")]
    pub gpu: CategoryRules,
    #[serde(deserialize_with = "fan_rules")]
    pub fan: CategoryRules,
    pub fan_naming: FanNaming,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            retention_window_secs: DEFAULT_RETENTION_WINDOW_SECS,
            view_timeout_ms: DEFAULT_VIEW_TIMEOUT_MS,
            stale_channels: StaleChannelPolicy::default(),
            cpu: CategoryRules::for_category(Category::Cpu),
            gpu: CategoryRules::for_category(Category::Gpu),
            fan: CategoryRules::for_category(Category::Motherboard),
            fan_naming: FanNaming::default(),
        }
    }
}

impl MonitorConfig {
    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::invalid_config("poll_interval_ms must be greater than zero"));
        }
        if !self.retention_window_secs.is_finite() || self.retention_window_secs <= 0.0 {
            return Err(Error::invalid_config("retention_window_secs must be a positive number of seconds"));
        }
        if self.stale_channels == StaleChannelPolicy::PruneAfterEmptyTicks(0) {
            return Err(Error::invalid_config("prune_after_empty_ticks must be at least 1"));
        }
        for category in [Category::Cpu, Category::Gpu] {
            let primary = self.rules(category).primary_channel.as_deref();
            if primary.map_or(true, str::is_empty) {
                return Err(Error::invalid_config(format!("{} rules need a primary_channel", category)));
            }
        }
        if self.fan_naming.canonical_key.is_empty() {
            return Err(Error::invalid_config("fan_naming.canonical_key must not be empty"));
        }
        Ok(())
    }

    /// Rules for a category
    pub fn rules(&self, category: Category) -> &CategoryRules {
        match category {
            Category::Cpu => &self.cpu,
            Category::Gpu => &self.gpu,
            Category::Motherboard => &self.fan,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn view_timeout(&self) -> Duration {
        Duration::from_millis(self.view_timeout_ms)
    }
}
