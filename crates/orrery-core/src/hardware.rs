//! Traits for the board peripherals the core drives
//!
//! Concrete implementations live in the firmware and simulator crates. The
//! temperature sensor trait is in [`crate::sensors`].

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::DrawTarget;

/// The four front-panel buttons, in selection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    X,
    Y,
}

impl Button {
    /// All buttons, highest priority first.
    pub const PRIORITY: [Button; 4] = [Button::A, Button::B, Button::X, Button::Y];
}

/// LCD panel with a dimmable backlight.
///
/// Pages never draw to the panel directly; frames are composed in a
/// [`FrameBuffer`](crate::framebuffer::FrameBuffer) and flushed here.
pub trait Panel: DrawTarget<Color = Rgb565> {
    /// Set backlight intensity, `0.0` (off) to `1.0` (full).
    fn set_backlight(&mut self, level: f32);
}

/// Polled button inputs.
pub trait ButtonPad {
    fn is_pressed(&mut self, button: Button) -> bool;

    /// The highest-priority button currently held, if any.
    fn first_pressed(&mut self) -> Option<Button> {
        Button::PRIORITY
            .into_iter()
            .find(|button| self.is_pressed(*button))
    }
}

/// RGB status LED next to the panel.
pub trait IndicatorLed {
    fn set_color(&mut self, color: Rgb888);
}

/// Real-time clock source.
pub trait WallClock {
    /// Current wall time in seconds since the Unix epoch.
    fn now_epoch(&mut self) -> i64;
}
