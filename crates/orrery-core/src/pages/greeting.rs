use embedded_graphics::Drawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::app_state::DeviceState;
use crate::mode::Mode;
use crate::pages::Page;
use crate::palette;

const MESSAGE: &str = "Hello there";

/// Static welcome screen, shown at boot.
#[derive(Debug, Default)]
pub struct GreetingPage;

impl Page for GreetingPage {
    fn mode(&self) -> Mode {
        Mode::Greeting
    }

    fn title(&self) -> &str {
        "Greeting"
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        _state: &mut DeviceState,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.clear(palette::DARK_GREEN)?;
        Text::with_baseline(
            MESSAGE,
            Point::new(10, 10),
            MonoTextStyle::new(&FONT_10X20, palette::WHITE),
            Baseline::Top,
        )
        .draw(display)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::framebuffer::FrameBuffer;
    use embassy_time::Instant;

    #[test]
    fn test_draws_message_on_dark_green() {
        let mut state =
            DeviceState::new(DeviceConfig::default(), Mode::Greeting, Instant::from_secs(0), 0)
                .unwrap();
        let mut frame = FrameBuffer::new();

        GreetingPage.draw_page(&mut state, &mut frame).unwrap();

        assert_eq!(frame.pixel(Point::new(0, 0)), Some(palette::DARK_GREEN));
        assert_eq!(frame.pixel(Point::new(239, 134)), Some(palette::DARK_GREEN));
        let text_pixels = (10..120)
            .flat_map(|x| (10..30).map(move |y| Point::new(x, y)))
            .filter(|p| frame.pixel(*p) == Some(palette::WHITE))
            .count();
        assert!(text_pixels > 0);
    }
}
