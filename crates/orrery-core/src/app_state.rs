//! Device-wide state shared by the scheduler's tasks, and the top-level error

use embassy_time::Instant;
use thiserror_no_std::Error;

use crate::clock::SimulatedClock;
use crate::config::{ConfigError, DeviceConfig};
use crate::mode::{Mode, ModeMachine};
use crate::sample_buffer::SampleBuffer;
use crate::sensors::{SensorError, TemperatureSample};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Sensor fault: {0}")]
    Sensor(SensorError),
    #[error("Configuration rejected: {0}")]
    Config(ConfigError),
}

impl From<SensorError> for AppError {
    fn from(error: SensorError) -> Self {
        Self::Sensor(error)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

/// Everything the tasks share, owned in one place.
///
/// Tasks run one at a time on a single executor, so plain `&mut` access
/// through the scheduler replaces any locking.
pub struct DeviceState {
    pub config: DeviceConfig,
    pub modes: ModeMachine,
    pub samples: SampleBuffer,
    /// Last temperature shown, kept while the buffer is empty.
    pub last_temperature: Option<TemperatureSample>,
    pub sim_clock: SimulatedClock,
    /// Wall time read at the start of the current render tick.
    pub wall_epoch: i64,
}

impl DeviceState {
    /// Validate `config` and build the boot state showing `initial`.
    pub fn new(
        config: DeviceConfig,
        initial: Mode,
        now: Instant,
        wall_epoch: i64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            modes: ModeMachine::new(initial, &config, now),
            samples: SampleBuffer::new(),
            last_temperature: None,
            sim_clock: SimulatedClock::new(wall_epoch),
            wall_epoch,
            config,
        })
    }

    /// Pull any unread sample into `last_temperature` and return the value to show.
    pub fn latest_temperature(&mut self) -> Option<TemperatureSample> {
        if let Some(sample) = self.samples.try_take() {
            self.last_temperature = Some(sample);
        }
        self.last_temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DeviceState {
        DeviceState::new(
            DeviceConfig::default(),
            Mode::Greeting,
            Instant::from_secs(0),
            1_700_000_000,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = DeviceConfig {
            dim_steps: 0,
            ..DeviceConfig::default()
        };
        let result = DeviceState::new(config, Mode::Greeting, Instant::from_secs(0), 0);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_simulated_clock_starts_at_boot_wall_time() {
        assert_eq!(state().sim_clock.epoch(), 1_700_000_000);
    }

    #[test]
    fn test_latest_temperature_keeps_stale_value() {
        let mut state = state();
        assert_eq!(state.latest_temperature(), None);

        state.samples.push(TemperatureSample::from_celsius(23.4));
        assert_eq!(state.latest_temperature().map(|s| s.celsius()), Some(23.4));

        // Buffer now empty: the previous reading stays on screen.
        assert!(!state.samples.has_unread());
        assert_eq!(state.latest_temperature().map(|s| s.celsius()), Some(23.4));
    }

    #[test]
    fn test_sensor_error_converts() {
        let error: AppError = SensorError::ReadFailed {
            sensor: "adc",
            details: "timeout",
        }
        .into();
        assert!(matches!(error, AppError::Sensor(_)));
    }
}
