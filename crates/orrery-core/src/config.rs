//! Device configuration
//!
//! Every timing constant and backlight level the tasks use lives here so a
//! provisioning image can override them. The defaults reproduce the shipped
//! device behaviour.

use alloc::vec::Vec;

use embassy_time::Duration;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::clock::SECS_PER_DAY;

/// Wall-clock epoch before which the clock is considered unsynchronized.
pub const DEFAULT_SYNC_THRESHOLD_EPOCH: i64 = 1_609_545_601;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("Failed to decode configuration blob: {0}")]
    Decode(postcard::Error),
    #[error("Failed to encode configuration blob: {0}")]
    Encode(postcard::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    /// Render loop period.
    pub tick_period_ms: u32,
    /// Pause between temperature samples.
    pub sample_interval_ms: u32,
    /// Inactivity after which dimming starts.
    pub idle_timeout_secs: u32,
    /// Backlight level while active, `0.0..=1.0`.
    pub full_backlight: f32,
    /// Number of dim steps between full backlight and off.
    pub dim_steps: u8,
    pub sync_threshold_epoch: i64,
    pub sync_pulse_ms: u32,
    pub sync_pulses: u8,
    pub sync_pause_ms: u32,
    pub sync_success_hold_ms: u32,
    /// Simulated days the solar system advances per rendered frame.
    pub sim_days_per_frame: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 100,
            sample_interval_ms: 5_000,
            idle_timeout_secs: 120,
            full_backlight: 0.5,
            dim_steps: 10,
            sync_threshold_epoch: DEFAULT_SYNC_THRESHOLD_EPOCH,
            sync_pulse_ms: 200,
            sync_pulses: 3,
            sync_pause_ms: 1_000,
            sync_success_hold_ms: 10_000,
            sim_days_per_frame: 1,
        }
    }
}

impl DeviceConfig {
    /// Decode and validate a postcard-encoded configuration blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode this configuration as a postcard blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(ConfigError::Encode)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.full_backlight > 0.0 && self.full_backlight <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "full_backlight",
                reason: "must be within (0.0, 1.0]",
            });
        }
        if self.dim_steps == 0 {
            return Err(ConfigError::Invalid {
                field: "dim_steps",
                reason: "must be at least 1",
            });
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_period_ms",
                reason: "must be non-zero",
            });
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sample_interval_ms",
                reason: "must be non-zero",
            });
        }
        if self.sync_pulse_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sync_pulse_ms",
                reason: "must be non-zero",
            });
        }
        if self.sync_pulses == 0 {
            return Err(ConfigError::Invalid {
                field: "sync_pulses",
                reason: "must be at least 1",
            });
        }
        if self.sync_pause_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sync_pause_ms",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms as u64)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms as u64)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs as u64)
    }

    pub fn sync_pulse(&self) -> Duration {
        Duration::from_millis(self.sync_pulse_ms as u64)
    }

    pub fn sync_pause(&self) -> Duration {
        Duration::from_millis(self.sync_pause_ms as u64)
    }

    pub fn sync_success_hold(&self) -> Duration {
        Duration::from_millis(self.sync_success_hold_ms as u64)
    }

    /// Simulated seconds added to the solar-system clock per frame.
    pub fn sim_step_secs(&self) -> i64 {
        self.sim_days_per_frame as i64 * SECS_PER_DAY
    }
}
