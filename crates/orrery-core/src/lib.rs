//! Hardware-independent core library for orrery
//!
//! This crate contains all platform-agnostic logic for the orrery display
//! device: the cooperative scheduler and its three tasks, the mode state
//! machine with idle dimming and sleep, the page set, and the solar-system
//! renderer.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app_state;
pub mod clock;
pub mod config;
pub mod framebuffer;
pub mod hardware;
pub mod mode;
pub mod orbital;
pub mod pages;
pub mod palette;
pub mod sample_buffer;
pub mod scheduler;
pub mod sensors;
pub mod tasks;

pub use app_state::{AppError, DeviceState};
pub use config::DeviceConfig;
pub use scheduler::{Peripherals, Scheduler};

/// Panel width in pixels.
pub const DISPLAY_WIDTH_PX: u16 = 240;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT_PX: u16 = 135;
