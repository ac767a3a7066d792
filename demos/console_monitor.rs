use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use hwmon_history::prelude::*;
use tracing_subscriber::EnvFilter;

fn simulated_hardware() -> Arc<HardwareInventory> {
    Arc::new(HardwareInventory::new(vec![
        Hardware::new("Simulated 8-Core CPU", HardwareType::Cpu)
            .with_sensor(SensorReading::temperature("CPU Package", 45.0, 45.0, 45.0))
            .with_sensor(SensorReading::temperature("CPU Core #1", 43.0, 43.0, 43.0))
            .with_sensor(SensorReading::temperature("CPU Core #1 Distance to TjMax", 57.0, 57.0, 57.0)),
        Hardware::new("Simulated GPU", HardwareType::GpuNvidia)
            .with_sensor(SensorReading::temperature("GPU Core", 38.0, 38.0, 38.0)),
        Hardware::new("Simulated Board", HardwareType::Motherboard).with_sub_hardware(
            Hardware::new("Simulated Super I/O", HardwareType::SuperIo)
                .with_sensor(SensorReading::fan("Fan #1", 1100.0, 1100.0, 1100.0))
                .with_sensor(SensorReading::fan("Fan #2", 850.0, 850.0, 850.0)),
        ),
    ]))
}

fn print_category(view: &CategoryView) {
    println!("\n{} ({}): {:?}", view.category, view.hardware_name, view.status);
    for item in &view.items {
        println!("  {:<32} {:>8}  min {:>8}  max {:>8}", item.name, item.value, item.min, item.max);
    }
    let (from, to) = view.axis.labels();
    for line in &view.series {
        println!("  line {:<12} {:>3} samples  [{} .. {}]", line.key, line.samples.len(), from, to);
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let inventory = simulated_hardware();
    let config = MonitorConfig { poll_interval_ms: 500, ..MonitorConfig::default() };
    let mut monitor = SensorMonitor::new(inventory.clone(), config).await?;

    println!("Sensor History Example");
    println!("======================");

    for step in 0..10u32 {
        let wave = f64::from(step % 5);
        inventory.set_value(Category::Cpu, "CPU Package", Some(45.0 + wave * 3.0));
        inventory.set_value(Category::Gpu, "GPU Core", Some(38.0 + wave * 2.0));
        inventory.set_value(Category::Motherboard, "Fan #1", Some(1100.0 + wave * 60.0));
        // Fan #2 spins down halfway through and its line drains on its own
        if step == 5 {
            inventory.set_value(Category::Motherboard, "Fan #2", Some(0.0));
        }

        let view = monitor.next_view().await?;
        println!("\nTick {} at {:.1}s", view.tick, view.elapsed);
        println!("---------------");
        print_category(&view.cpu);
        print_category(&view.gpu);
        print_category(&view.fan);

        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    monitor.stop().await?;
    Ok(())
}
