use embassy_time::Duration;
use log::debug;

use super::Yield;
use crate::app_state::DeviceState;
use crate::sensors::{SensorError, TemperatureSample, TemperatureSensor};

/// Reads the on-board sensor at a fixed interval into the sample buffer.
///
/// Never finishes. A failed read is returned to the caller untouched.
pub struct TemperatureSampler {
    interval: Duration,
}

impl TemperatureSampler {
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub async fn step<S: TemperatureSensor>(
        &mut self,
        sensor: &mut S,
        state: &DeviceState,
    ) -> Result<Yield, SensorError> {
        let raw = sensor.read_raw().await?;
        let sample = TemperatureSample::from_raw(raw);

        if state.samples.has_unread() {
            debug!("Unread sample replaced");
        }
        state.samples.push(sample);
        debug!("Sampled {}C (raw {})", sample.celsius(), raw);

        Ok(Yield::For(self.interval))
    }
}
