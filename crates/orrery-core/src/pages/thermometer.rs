use core::fmt::Write;

use embedded_graphics::Drawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::app_state::DeviceState;
use crate::mode::Mode;
use crate::pages::Page;
use crate::palette;
use crate::sensors::TemperatureSample;

const CAPTION: &str = "On-board temp sensor";

/// `23.4C`, or `--.-C` before the first sample arrives.
pub fn format_reading(sample: Option<TemperatureSample>) -> String<16> {
    let mut out = String::new();
    match sample {
        Some(sample) => write!(out, "{:.1}C", sample.celsius()).ok(),
        None => out.push_str("--.-C").ok(),
    };
    out
}

/// Latest on-board temperature.
///
/// Consumes the sample buffer on every draw. When the buffer is empty the
/// previous reading stays up.
#[derive(Debug, Default)]
pub struct ThermometerPage {
    shown: String<16>,
}

impl ThermometerPage {
    /// Text of the last drawn reading.
    pub fn shown(&self) -> &str {
        &self.shown
    }
}

impl Page for ThermometerPage {
    fn mode(&self) -> Mode {
        Mode::Thermometer
    }

    fn title(&self) -> &str {
        "Thermometer"
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        state: &mut DeviceState,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.shown = format_reading(state.latest_temperature());

        display.clear(palette::WHITE)?;
        Text::with_baseline(
            CAPTION,
            Point::new(15, 110),
            MonoTextStyle::new(&FONT_6X10, palette::BLUE),
            Baseline::Top,
        )
        .draw(display)?;
        Text::with_baseline(
            &self.shown,
            Point::new(40, 30),
            MonoTextStyle::new(&FONT_10X20, palette::RED),
            Baseline::Top,
        )
        .draw(display)?;
        Ok(())
    }
}
