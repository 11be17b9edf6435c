use core::fmt::Write;

use embedded_graphics::Drawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_9X15, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::app_state::DeviceState;
use crate::clock::CalendarTime;
use crate::mode::Mode;
use crate::pages::Page;
use crate::palette;

/// `HH:MM`, or dashes when the wall time cannot be decomposed.
pub fn format_time(time: Option<&CalendarTime>) -> String<5> {
    let mut out = String::new();
    match time {
        Some(time) => write!(out, "{:02}:{:02}", time.hour, time.minute).ok(),
        None => out.push_str("--:--").ok(),
    };
    out
}

/// `DD/MM/YYYY`.
pub fn format_date(time: Option<&CalendarTime>) -> String<16> {
    let mut out = String::new();
    match time {
        Some(time) => write!(out, "{:02}/{:02}/{}", time.day, time.month, time.year).ok(),
        None => out.push_str("--/--/----").ok(),
    };
    out
}

/// Wall-clock time and date in UTC.
#[derive(Debug, Default)]
pub struct ClockPage;

impl Page for ClockPage {
    fn mode(&self) -> Mode {
        Mode::Clock
    }

    fn title(&self) -> &str {
        "Clock"
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        state: &mut DeviceState,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let now = CalendarTime::from_epoch(state.wall_epoch);

        display.clear(palette::GREY)?;
        Text::with_baseline(
            &format_time(now.as_ref()),
            Point::new(10, 10),
            MonoTextStyle::new(&FONT_10X20, palette::YELLOW),
            Baseline::Top,
        )
        .draw(display)?;
        Text::with_baseline(
            &format_date(now.as_ref()),
            Point::new(10, 80),
            MonoTextStyle::new(&FONT_9X15, palette::YELLOW),
            Baseline::Top,
        )
        .draw(display)?;
        Ok(())
    }
}
