//! Mode selection, idle dimming, and sleep/wake

mod dimmer;
mod idle;
mod machine;

pub use dimmer::DimSequence;
pub use idle::IdleTimer;
pub use machine::{ModeMachine, TickDecision};

use crate::hardware::Button;

/// What the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Greeting,
    Clock,
    Thermometer,
    SolarSystem,
    /// Backlight off, no rendering until a button is pressed.
    Sleeping,
}

impl Mode {
    /// The mode selected by a button.
    pub const fn for_button(button: Button) -> Self {
        match button {
            Button::A => Self::Greeting,
            Button::B => Self::Clock,
            Button::X => Self::Thermometer,
            Button::Y => Self::SolarSystem,
        }
    }
}

/// Idle sub-state, tracked alongside the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Active,
    Dimming,
    Sleeping,
}
