use std::sync::Arc;

use crate::common::TestHardwareBuilder;
use hwmon_history::prelude::*;

#[test]
fn test_constant_reading_stays_within_window() {
    let inventory = TestHardwareBuilder::new().with_cpu_temps(&[("CPU Package", 42.0)]).build();
    let mut poller = SensorPoller::new(inventory, MonitorConfig::default()).unwrap();

    for second in 0..=120 {
        let view = poller.poll_once(second as f64);
        let line = view.cpu.series("CPU Temp").unwrap();
        let latest = line.samples.last().unwrap();
        let oldest = line.samples.first().unwrap();

        assert!(line.samples.len() <= 61);
        assert!(oldest.timestamp >= latest.timestamp - 60.0);
        assert!(line.samples.iter().all(|s| s.value == 42.0));
    }

    let series = poller.registry(Category::Cpu).get("CPU Temp").unwrap();
    assert_eq!(series.len(), 61);
    assert_eq!(series.time_range(), (60.0, 120.0));
    assert_eq!(series.value_summary().unwrap(), ValueSummary { current: 42.0, min: 42.0, max: 42.0 });
}

#[test]
fn test_timestamps_strictly_increase_across_ticks() {
    let inventory = TestHardwareBuilder::new()
        .with_cpu_temps(&[("CPU Package", 40.0)])
        .with_fans(&[("Fan #1", 1000.0), ("Fan #2", 800.0)])
        .build();
    let mut poller = SensorPoller::new(inventory.clone(), MonitorConfig::default()).unwrap();

    for tick in 0..90 {
        inventory.set_value(Category::Cpu, "CPU Package", Some(40.0 + (tick % 7) as f64));
        poller.poll_once(tick as f64 * 0.75);
    }

    for category in Category::ALL {
        for channel in poller.registry(category).iter() {
            let samples = channel.series().samples();
            assert!(samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp), "{} out of order", channel.key());
        }
    }
}

#[test]
fn test_axis_follows_first_channel() {
    let inventory = TestHardwareBuilder::new().with_cpu_temps(&[("CPU Package", 40.0)]).build();
    let mut poller = SensorPoller::new(inventory, MonitorConfig::default()).unwrap();

    let mut view = poller.poll_once(0.0);
    for second in [30.0, 100.0, 160.0] {
        view = poller.poll_once(second);
    }

    assert_eq!(view.cpu.axis, AxisRange { min: 100.0, max: 160.0 });
    assert_eq!(view.cpu.axis.labels(), ("1m40s".to_string(), "2m40s".to_string()));
    assert_eq!(view.temperature_axis(), view.cpu.axis);
}

#[test]
fn test_registry_upsert_is_idempotent_per_key() {
    let mut registry = ChannelRegistry::new();
    registry.upsert("CPU", 0.0, 1200.0).unwrap();
    registry.upsert("Fan #2", 0.0, 800.0).unwrap();
    registry.upsert("CPU", 1.0, 1210.0).unwrap();

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get("CPU").unwrap().len(), 2);
    assert_eq!(registry.get("Fan #2").unwrap().len(), 1);
}

#[test]
fn test_custom_retention_window() {
    let inventory = TestHardwareBuilder::new().with_cpu_temps(&[("CPU Package", 42.0)]).build();
    let config = MonitorConfig { retention_window_secs: 10.0, ..MonitorConfig::default() };
    let mut poller = SensorPoller::new(Arc::clone(&inventory) as Arc<dyn SensorSource>, config).unwrap();

    for second in 0..30 {
        poller.poll_once(second as f64);
    }

    let series = poller.registry(Category::Cpu).get("CPU Temp").unwrap();
    assert_eq!(series.time_range(), (19.0, 29.0));
}
