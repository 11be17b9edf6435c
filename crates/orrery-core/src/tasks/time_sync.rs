use embassy_time::Duration;
use log::{debug, info};

use super::Yield;
use crate::config::DeviceConfig;
use crate::hardware::{IndicatorLed, WallClock};
use crate::palette::{LED_ALERT, LED_OFF, LED_OK};

/// Where the watchdog is in its blink pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// About to test the wall clock.
    Check,
    /// Alert pulse `n` (1-based) is lit.
    Lit(u8),
    /// Alert pulse `n` has just gone dark.
    Dark(u8),
    /// Clock synchronized, success colour showing.
    Holding,
    Finished,
}

/// Blinks the indicator until the wall clock looks plausible.
///
/// While the clock reads before the threshold, each burst is `pulses` alert
/// flashes followed by a pause. The clock is only tested between bursts. Once
/// it passes, the success colour is held for a while, the LED is switched
/// off, and the task finishes for good.
pub struct TimeSyncWatchdog {
    phase: SyncPhase,
    threshold: i64,
    pulses: u8,
    pulse: Duration,
    pause: Duration,
    hold: Duration,
}

impl TimeSyncWatchdog {
    pub fn new(config: &DeviceConfig) -> Self {
        Self {
            phase: SyncPhase::Check,
            threshold: config.sync_threshold_epoch,
            pulses: config.sync_pulses,
            pulse: config.sync_pulse(),
            pause: config.sync_pause(),
            hold: config.sync_success_hold(),
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn step<L: IndicatorLed, C: WallClock>(&mut self, led: &mut L, clock: &mut C) -> Yield {
        let (next, sleep) = match self.phase {
            SyncPhase::Check => {
                let epoch = clock.now_epoch();
                if epoch >= self.threshold {
                    info!("Wall clock synchronized at epoch {}", epoch);
                    led.set_color(LED_OK);
                    (SyncPhase::Holding, Yield::For(self.hold))
                } else if self.pulses == 0 {
                    (SyncPhase::Check, Yield::For(self.pause))
                } else {
                    debug!("Wall clock at {} not synchronized", epoch);
                    led.set_color(LED_ALERT);
                    (SyncPhase::Lit(1), Yield::For(self.pulse))
                }
            }
            SyncPhase::Lit(n) => {
                led.set_color(LED_OFF);
                (SyncPhase::Dark(n), Yield::For(self.pulse))
            }
            SyncPhase::Dark(n) if n < self.pulses => {
                led.set_color(LED_ALERT);
                (SyncPhase::Lit(n + 1), Yield::For(self.pulse))
            }
            SyncPhase::Dark(_) => (SyncPhase::Check, Yield::For(self.pause)),
            SyncPhase::Holding => {
                led.set_color(LED_OFF);
                info!("Time sync watchdog finished");
                (SyncPhase::Finished, Yield::Finished)
            }
            SyncPhase::Finished => (SyncPhase::Finished, Yield::Finished),
        };
        self.phase = next;
        sleep
    }
}
