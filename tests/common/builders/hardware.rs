use std::sync::Arc;

use hwmon_history::core::types::SensorReading;
use hwmon_history::hardware::{Hardware, HardwareInventory, HardwareType};

/// Builder for test hardware inventories
pub struct TestHardwareBuilder {
    cpu: Option<Hardware>,
    gpu: Option<Hardware>,
    board: Option<Hardware>,
}

impl TestHardwareBuilder {
    pub fn new() -> Self {
        Self { cpu: None, gpu: None, board: None }
    }

    pub fn with_cpu_temps(mut self, temps: &[(&str, f64)]) -> Self {
        let mut cpu = Hardware::new("Stub CPU", HardwareType::Cpu);
        for (name, value) in temps {
            cpu = cpu.with_sensor(SensorReading::temperature(*name, *value, *value, *value));
        }
        self.cpu = Some(cpu);
        self
    }

    pub fn with_gpu_temps(mut self, kind: HardwareType, temps: &[(&str, f64)]) -> Self {
        let mut gpu = Hardware::new("Stub GPU", kind);
        for (name, value) in temps {
            gpu = gpu.with_sensor(SensorReading::temperature(*name, *value, *value, *value));
        }
        self.gpu = Some(gpu);
        self
    }

    /// Fans are placed on a Super I/O chip below the board, as real boards report them
    pub fn with_fans(mut self, fans: &[(&str, f64)]) -> Self {
        let mut chip = Hardware::new("Stub Super I/O", HardwareType::SuperIo);
        for (name, rpm) in fans {
            chip = chip.with_sensor(SensorReading::fan(*name, *rpm, *rpm, *rpm));
        }
        self.board = Some(Hardware::new("Stub Board", HardwareType::Motherboard).with_sub_hardware(chip));
        self
    }

    pub fn build(self) -> Arc<HardwareInventory> {
        let hardware = [self.cpu, self.gpu, self.board].into_iter().flatten().collect();
        Arc::new(HardwareInventory::new(hardware))
    }
}

impl Default for TestHardwareBuilder {
    fn default() -> Self {
        Self::new()
    }
}
