use std::sync::Arc;

use crate::common::TestHardwareBuilder;
use hwmon_history::prelude::*;

fn poller(inventory: Arc<HardwareInventory>) -> SensorPoller {
    SensorPoller::new(inventory, MonitorConfig::default()).unwrap()
}

#[test]
fn test_cpu_package_becomes_cpu_temp() {
    let inventory = TestHardwareBuilder::new().with_cpu_temps(&[("CPU Package", 50.0)]).build();
    inventory.set_value(Category::Cpu, "CPU Package", Some(25.0));
    inventory.set_value(Category::Cpu, "CPU Package", Some(75.0));
    inventory.set_value(Category::Cpu, "CPU Package", Some(50.0));

    let mut poller = poller(inventory);
    let view = poller.poll_once(0.0);

    assert_eq!(view.tick, 1);
    assert_eq!(view.cpu.hardware_name, "Stub CPU");
    assert_eq!(view.cpu.representative, Some(50.0));
    let item = &view.cpu.items[0];
    assert_eq!((item.value.as_str(), item.min.as_str(), item.max.as_str()), ("50.0", "25.0", "75.0"));

    let line = view.cpu.series("CPU Temp").unwrap();
    assert_eq!(line.samples.len(), 1);
    assert_eq!(line.samples[0].value, 50.0);
}

#[test]
fn test_missing_gpu_leaves_other_categories_untouched() {
    let inventory = TestHardwareBuilder::new()
        .with_cpu_temps(&[("CPU Package", 48.0), ("CPU Core #1", 46.0)])
        .with_fans(&[("Fan #1", 1100.0)])
        .build();
    let mut poller = poller(inventory);

    let view = poller.poll_once(0.0);
    assert_eq!(view.gpu.status, CategoryStatus::HardwareNotDetected);
    assert_eq!(view.gpu.hardware_name, "GPU");
    assert!(view.gpu.items.is_empty());
    assert!(view.gpu.series.is_empty());

    assert!(view.cpu.status.is_ok());
    assert_eq!(view.cpu.items.len(), 2);
    assert!(view.fan.status.is_ok());
    assert_eq!(view.fan.representative, Some(1100.0));
}

#[test]
fn test_gpu_detected_later_starts_recording() {
    let inventory = TestHardwareBuilder::new().with_cpu_temps(&[("CPU Package", 48.0)]).build();
    let mut poller = SensorPoller::new(inventory.clone(), MonitorConfig::default()).unwrap();
    assert_eq!(poller.poll_once(0.0).gpu.status, CategoryStatus::HardwareNotDetected);

    inventory.push(
        Hardware::new("Stub GPU", HardwareType::GpuAmd)
            .with_sensor(SensorReading::temperature("GPU Core", 55.0, 40.0, 60.0)),
    );
    let view = poller.poll_once(1.0);

    assert!(view.gpu.status.is_ok());
    assert_eq!(view.gpu.series("GPU Temp").unwrap().samples.len(), 1);
    // Names are resolved once when the poller is built
    assert_eq!(view.gpu.hardware_name, "GPU");
}

#[test]
fn test_unlabeled_primary_fan_is_keyed_cpu() {
    let inventory = TestHardwareBuilder::new().with_fans(&[("FAN #1", 1200.0), ("FAN #2", 800.0)]).build();
    let mut poller = poller(inventory);
    let view = poller.poll_once(0.0);

    let keys: Vec<&str> = view.fan.series.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["CPU", "FAN #2"]);
    assert_eq!(view.fan.representative, Some(1200.0));
    assert_eq!(view.fan.hardware_name, "Stub Board");
}

#[test]
fn test_stopped_fan_reports_no_fan_detected() {
    let inventory = TestHardwareBuilder::new().with_fans(&[("Fan #1", 900.0)]).build();
    let mut poller = poller(inventory.clone());
    poller.poll_once(0.0);

    inventory.set_value(Category::Motherboard, "Fan #1", Some(0.0));
    let view = poller.poll_once(1.0);

    assert_eq!(view.fan.status, CategoryStatus::NoFanDetected);
    assert!(view.fan.items.is_empty());
    // The line keeps its history until the window passes it
    assert_eq!(view.fan.series("CPU").unwrap().samples.len(), 1);
}

#[test]
fn test_fan_discovered_mid_run_is_appended() {
    let inventory = TestHardwareBuilder::new().with_fans(&[("Fan #1", 1000.0)]).build();
    let mut poller = poller(inventory.clone());
    poller.poll_once(0.0);

    inventory.add_sensor(Category::Motherboard, SensorReading::fan("Fan #4", 650.0, 600.0, 700.0), true).unwrap();
    let view = poller.poll_once(1.0);

    let keys: Vec<&str> = view.fan.series.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["CPU", "Fan #4"]);
    assert_eq!(view.fan.series("Fan #4").unwrap().samples[0].timestamp, 1.0);
}

#[test]
fn test_view_serializes_to_json() {
    let inventory = TestHardwareBuilder::new()
        .with_gpu_temps(HardwareType::GpuNvidia, &[("GPU Core", 61.0)])
        .build();
    let mut poller = poller(inventory);
    let json = poller.poll_once(0.0).to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tick"], 1);
    assert_eq!(value["gpu"]["representative"], 61.0);
    assert_eq!(value["cpu"]["status"], "HardwareNotDetected");
}

#[test]
fn test_partial_category_config_keeps_cpu_line() {
    let config = MonitorConfig::from_json_str(r#"{ "cpu": { "exclusion_markers": ["TjMax", "Distance"] } }"#).unwrap();
    let inventory = TestHardwareBuilder::new()
        .with_cpu_temps(&[("CPU Package", 47.0), ("Core #1 Distance", 53.0)])
        .build();
    let mut poller = SensorPoller::new(inventory, config).unwrap();
    let view = poller.poll_once(0.0);

    assert_eq!(view.cpu.items.len(), 1);
    assert_eq!(view.cpu.representative, Some(47.0));
    assert_eq!(view.cpu.series("CPU Temp").unwrap().samples.len(), 1);
}
