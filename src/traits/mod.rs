// Traits module
//
// Seams between the poll loop and the hardware it reads from.

pub mod hardware;

pub use hardware::SensorSource;

#[cfg(test)]
pub use hardware::MockSensorSource;
