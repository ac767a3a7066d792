use std::time::Duration;

use futures::StreamExt;
use hwmon_history::prelude::*;

use crate::common::TestHardwareBuilder;

fn fast_config() -> MonitorConfig {
    MonitorConfig { poll_interval_ms: 20, view_timeout_ms: 2000, ..MonitorConfig::default() }
}

#[tokio::test]
async fn test_monitor_follows_changing_readings() {
    let inventory = TestHardwareBuilder::new()
        .with_cpu_temps(&[("CPU Package", 45.0)])
        .with_fans(&[("Fan #1", 1000.0)])
        .build();
    let mut monitor = SensorMonitor::new(inventory.clone(), fast_config()).await.unwrap();

    let first = monitor.next_view().await.unwrap();
    assert_eq!(first.tick, 1);
    assert_eq!(first.cpu.representative, Some(45.0));

    inventory.set_value(Category::Cpu, "CPU Package", Some(70.0));
    let mut view = monitor.next_view().await.unwrap();
    while view.cpu.representative != Some(70.0) {
        view = monitor.next_view().await.unwrap();
    }

    let summary = view.cpu.series("CPU Temp").unwrap().summary.unwrap();
    assert_eq!(summary.max, 70.0);
    assert_eq!(summary.min, 45.0);

    monitor.stop().await.unwrap();
    assert_eq!(monitor.state(), PollState::Stopped);
}

#[tokio::test]
async fn test_view_stream_ends_after_stop() {
    let inventory = TestHardwareBuilder::new().with_cpu_temps(&[("CPU Package", 45.0)]).build();
    let mut monitor = SensorMonitor::new(inventory, fast_config()).await.unwrap();

    let ticks: Vec<u64> = monitor.views().take(3).map(|view| view.tick).collect().await;
    assert_eq!(ticks, vec![1, 2, 3]);

    monitor.stop().await.unwrap();
    let remaining: Vec<SensorView> = monitor.views().collect().await;
    assert!(remaining.windows(2).all(|w| w[0].tick < w[1].tick));
    assert!(matches!(monitor.next_view().await, Err(Error::ChannelClosed)));
}

#[tokio::test]
async fn test_monitor_through_trait_object() {
    let inventory = TestHardwareBuilder::new().with_fans(&[("Fan #1", 1300.0)]).build();
    let monitor = SensorMonitor::new(inventory, fast_config()).await.unwrap();
    let mut monitor: Box<dyn SensorMonitoring> = Box::new(monitor);

    let view = monitor.next_view().await.unwrap();
    assert_eq!(view.fan.representative, Some(1300.0));
    assert_eq!(view.gpu.status, CategoryStatus::HardwareNotDetected);

    monitor.stop().await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_fails_to_start() {
    let inventory = TestHardwareBuilder::new().build();
    let config = MonitorConfig { retention_window_secs: 0.0, ..MonitorConfig::default() };
    assert!(matches!(SensorMonitor::new(inventory, config).await, Err(Error::InvalidConfig(_))));
}

#[tokio::test]
async fn test_latest_view_advances_without_reader() {
    let inventory = TestHardwareBuilder::new().with_cpu_temps(&[("CPU Package", 45.0)]).build();
    let config = MonitorConfig { poll_interval_ms: 5, ..MonitorConfig::default() };
    let mut monitor = SensorMonitor::new(inventory.clone(), config).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    let early = monitor.latest_view().map_or(0, |view| view.tick);

    inventory.set_value(Category::Cpu, "CPU Package", Some(58.0));
    tokio::time::sleep(Duration::from_millis(300)).await;
    let later = monitor.latest_view().unwrap();

    assert!(later.tick > early, "polling stalled at tick {}", early);
    assert_eq!(later.cpu.representative, Some(58.0));

    monitor.stop().await.unwrap();
}
