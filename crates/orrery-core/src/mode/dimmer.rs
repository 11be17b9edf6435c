/// Stepwise backlight fade from full brightness to off.
///
/// Each [`advance`](Self::advance) yields the next, strictly lower level; the
/// final level is exactly `0.0`. After that the sequence is exhausted until
/// [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq)]
pub struct DimSequence {
    full: f32,
    steps: u8,
    taken: u8,
}

impl DimSequence {
    pub const fn new(full: f32, steps: u8) -> Self {
        Self {
            full,
            steps,
            taken: 0,
        }
    }

    /// Next backlight level, or `None` once the sequence is exhausted.
    pub fn advance(&mut self) -> Option<f32> {
        if self.is_exhausted() {
            return None;
        }
        self.taken += 1;
        let remaining = (self.steps - self.taken) as f32;
        Some(self.full * remaining / self.steps as f32)
    }

    pub fn is_exhausted(&self) -> bool {
        self.taken >= self.steps
    }

    /// Steps consumed since the last reset.
    pub fn position(&self) -> u8 {
        self.taken
    }

    pub fn reset(&mut self) {
        self.taken = 0;
    }
}
