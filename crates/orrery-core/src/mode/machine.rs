use embassy_time::{Duration, Instant};
use log::{debug, info};

use super::{Activity, DimSequence, IdleTimer, Mode};
use crate::config::DeviceConfig;
use crate::hardware::Button;

/// Outcome of one render-loop tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDecision {
    /// Mode to render this tick, `None` while asleep.
    pub render: Option<Mode>,
    /// Backlight level to apply, when it changes this tick.
    pub backlight: Option<f32>,
}

/// Owns the current mode and the Active → Dimming → Sleeping progression.
pub struct ModeMachine {
    mode: Mode,
    activity: Activity,
    idle: IdleTimer,
    dimmer: DimSequence,
    idle_timeout: Duration,
    full_backlight: f32,
}

impl ModeMachine {
    pub fn new(initial: Mode, config: &DeviceConfig, now: Instant) -> Self {
        Self {
            mode: initial,
            activity: Activity::Active,
            idle: IdleTimer::new(now),
            dimmer: DimSequence::new(config.full_backlight, config.dim_steps),
            idle_timeout: config.idle_timeout(),
            full_backlight: config.full_backlight,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn idle_timer(&self) -> &IdleTimer {
        &self.idle
    }

    pub fn dimmer(&self) -> &DimSequence {
        &self.dimmer
    }

    pub fn full_backlight(&self) -> f32 {
        self.full_backlight
    }

    /// Resolve the mode for this tick from the highest-priority pressed button.
    ///
    /// Returns the resolved mode and whether a press reset the idle timer. A
    /// press always wakes the device and discards any dimming progress, even
    /// when it selects the mode already showing.
    pub fn select_mode(&mut self, pressed: Option<Button>, now: Instant) -> (Mode, bool) {
        let Some(button) = pressed else {
            return (self.mode, false);
        };

        let target = Mode::for_button(button);
        if target != self.mode {
            info!("Button {:?}: {:?} -> {:?}", button, self.mode, target);
        }
        if self.activity != Activity::Active {
            info!("Button {:?} woke device from {:?}", button, self.activity);
        }

        self.mode = target;
        self.activity = Activity::Active;
        self.idle.reset(now);
        self.dimmer.reset();
        (target, true)
    }

    /// Advance one render-loop tick.
    pub fn tick(&mut self, pressed: Option<Button>, now: Instant) -> TickDecision {
        let (mode, reset) = self.select_mode(pressed, now);
        if reset {
            return TickDecision {
                render: Some(mode),
                backlight: Some(self.full_backlight),
            };
        }

        if self.activity == Activity::Sleeping {
            return TickDecision {
                render: None,
                backlight: None,
            };
        }

        let idle_for = self.idle.idle_for(now);
        if idle_for <= self.idle_timeout {
            return TickDecision {
                render: Some(self.mode),
                backlight: None,
            };
        }

        match self.dimmer.advance() {
            Some(level) => {
                if self.activity == Activity::Active {
                    info!("Idle for {}s, dimming backlight", idle_for.as_secs());
                    self.activity = Activity::Dimming;
                }
                debug!("Dim step {} -> {}", self.dimmer.position(), level);
                TickDecision {
                    render: Some(self.mode),
                    backlight: Some(level),
                }
            }
            None => {
                info!("Dim sequence exhausted, sleeping");
                self.activity = Activity::Sleeping;
                self.mode = Mode::Sleeping;
                TickDecision {
                    render: None,
                    backlight: None,
                }
            }
        }
    }
}
