use embassy_time::{Duration, Instant};

/// Time of the last recognized button press.
///
/// Never moves backwards, even if handed an earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTimer {
    last_interaction: Instant,
}

impl IdleTimer {
    pub const fn new(now: Instant) -> Self {
        Self {
            last_interaction: now,
        }
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_interaction = self.last_interaction.max(now);
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.checked_duration_since(self.last_interaction)
            .unwrap_or(Duration::from_ticks(0))
    }

    pub fn last_interaction(&self) -> Instant {
        self.last_interaction
    }
}
