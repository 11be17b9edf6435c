//! Color definitions for the device's screens
//!
//! All colors are RGB565, converted from 8-bit RGB as R>>3, G>>2, B>>3.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};

/// Convert 8-bit RGB to RGB565 in a const context.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

// ============================================================================
// Screen Colors
// ============================================================================

pub const DARK_GREEN: Rgb565 = rgb(102, 140, 74);
pub const WHITE: Rgb565 = rgb(242, 240, 213);
pub const YELLOW: Rgb565 = rgb(242, 197, 71);
pub const GREY: Rgb565 = rgb(177, 177, 172);
pub const RED: Rgb565 = rgb(255, 102, 90);
pub const BLUE: Rgb565 = rgb(154, 207, 221);
pub const BLACK: Rgb565 = rgb(0, 0, 0);

/// Faint orbit rings
pub const ORBIT: Rgb565 = rgb(40, 40, 40);

pub const SUN: Rgb565 = rgb(255, 255, 0);

// ============================================================================
// Indicator LED Colors
// ============================================================================

/// Clock not yet synchronized
pub const LED_ALERT: Rgb888 = Rgb888::new(255, 102, 90);

/// Clock synchronized
pub const LED_OK: Rgb888 = Rgb888::new(166, 191, 75);

pub const LED_OFF: Rgb888 = Rgb888::new(0, 0, 0);
