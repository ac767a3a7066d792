//! Channel registry
//!
//! Channels are discovered while polling, so the registry is an arena of
//! channels addressed by their string key. Positions in a snapshot are never
//! used as identity because fan count and order differ between boards.

use std::collections::HashMap;

use tracing::debug;

use super::RollingSeries;
use crate::config::StaleChannelPolicy;
use crate::error::Result;

/// One named line of samples
#[derive(Debug, Clone)]
pub struct Channel {
    key: String,
    series: RollingSeries,
    empty_ticks: u32,
}

impl Channel {
    fn new(key: String) -> Self {
        Self { key, series: RollingSeries::new(), empty_ticks: 0 }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn series(&self) -> &RollingSeries {
        &self.series
    }

    /// Consecutive ticks this channel has ended with an empty series
    pub fn empty_ticks(&self) -> u32 {
        self.empty_ticks
    }
}

/// Maps channel keys to rolling series in first-discovery order
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
    index: HashMap<String, usize>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample to the channel for `key`, creating the channel on first use
    pub fn upsert(&mut self, key: &str, timestamp: f64, value: f64) -> Result<&RollingSeries> {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.channels.len();
                debug!(channel = key, "discovered new channel");
                self.channels.push(Channel::new(key.to_string()));
                self.index.insert(key.to_string(), slot);
                slot
            },
        };

        let channel = &mut self.channels[slot];
        channel.series.append(timestamp, value)?;
        channel.empty_ticks = 0;
        Ok(&channel.series)
    }

    pub fn get(&self, key: &str) -> Option<&RollingSeries> {
        self.index.get(key).map(|&slot| &self.channels[slot].series)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channels in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }

    /// Key and series pairs in discovery order
    pub fn all_series(&self) -> Vec<(&str, &RollingSeries)> {
        self.channels.iter().map(|c| (c.key.as_str(), &c.series)).collect()
    }

    /// The first discovered channel, which drives the category's chart axis
    pub fn first(&self) -> Option<&Channel> {
        self.channels.first()
    }

    /// Evicts stale samples from every channel, including ones that did not
    /// report this tick. Returns the total number of samples removed.
    pub fn evict_older_than(&mut self, horizon: f64) -> usize {
        let mut evicted = 0;
        for channel in &mut self.channels {
            evicted += channel.series.evict_older_than(horizon);
            if channel.series.is_empty() {
                channel.empty_ticks = channel.empty_ticks.saturating_add(1);
            }
        }
        evicted
    }

    /// Applies the stale channel policy and returns the removed keys
    pub fn prune_stale(&mut self, policy: StaleChannelPolicy) -> Vec<String> {
        let StaleChannelPolicy::PruneAfterEmptyTicks(limit) = policy else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        self.channels.retain(|channel| {
            if channel.series.is_empty() && channel.empty_ticks >= limit {
                removed.push(channel.key.clone());
                false
            } else {
                true
            }
        });

        if !removed.is_empty() {
            self.index = self.channels.iter().enumerate().map(|(slot, c)| (c.key.clone(), slot)).collect();
            debug!(?removed, "pruned stale channels");
        }
        removed
    }
}
