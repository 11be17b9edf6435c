//! Sensor trait definitions and the on-board temperature conversion

mod onboard;

use thiserror_no_std::Error;

pub use onboard::{TemperatureSample, raw_to_celsius};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SensorError {
    #[error("Failed to read {sensor}: {details}")]
    ReadFailed {
        sensor: &'static str,
        details: &'static str,
    },
}

/// Trait for sensors that produce a raw 16-bit ADC sample.
///
/// Calibration is applied by the caller, not the driver.
pub trait TemperatureSensor {
    /// Read one raw sample, scaled to the full `u16` range.
    fn read_raw(&mut self) -> impl Future<Output = Result<u16, SensorError>>;
}
