//! Single-slot hand-off of the freshest temperature sample
//!
//! The sampler task produces and the thermometer page consumes. A push never
//! blocks: an unread sample is replaced by the newer one.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;

use crate::sensors::TemperatureSample;

/// All tasks share one executor context, so no interrupt-safe mutex is needed.
pub struct SampleBuffer {
    slot: Signal<NoopRawMutex, TemperatureSample>,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleBuffer {
    pub const fn new() -> Self {
        Self {
            slot: Signal::new(),
        }
    }

    /// Store a sample, evicting any unread one.
    pub fn push(&self, sample: TemperatureSample) {
        self.slot.signal(sample);
    }

    /// Take the unread sample, if any, leaving the slot empty.
    pub fn try_take(&self) -> Option<TemperatureSample> {
        self.slot.try_take()
    }

    pub fn has_unread(&self) -> bool {
        self.slot.signaled()
    }
}
