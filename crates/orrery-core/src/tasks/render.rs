use core::fmt::Debug;

use embassy_time::{Duration, Instant};
use log::error;

use super::Yield;
use crate::app_state::DeviceState;
use crate::framebuffer::FrameBuffer;
use crate::hardware::{ButtonPad, Panel, WallClock};
use crate::orbital::Ephemeris;
use crate::pages::PageSet;

/// The primary task: one frame per tick.
///
/// Each tick polls the buttons, lets the mode machine decide what to show and
/// at what brightness, composes the frame in RAM, and flushes the changes.
/// Asleep, a tick only polls the buttons. Never finishes.
pub struct RenderLoop<E> {
    pages: PageSet<E>,
    frame: FrameBuffer,
    period: Duration,
}

impl<E: Ephemeris> RenderLoop<E> {
    pub fn new(ephemeris: E, period: Duration) -> Self {
        Self {
            pages: PageSet::new(ephemeris),
            frame: FrameBuffer::new(),
            period,
        }
    }

    pub fn pages(&self) -> &PageSet<E> {
        &self.pages
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn tick<P, B, C>(
        &mut self,
        state: &mut DeviceState,
        panel: &mut P,
        buttons: &mut B,
        clock: &mut C,
        now: Instant,
    ) -> Yield
    where
        P: Panel,
        P::Error: Debug,
        B: ButtonPad,
        C: WallClock,
    {
        let pressed = buttons.first_pressed();
        let decision = state.modes.tick(pressed, now);

        if let Some(level) = decision.backlight {
            panel.set_backlight(level);
        }

        if let Some(mode) = decision.render {
            state.wall_epoch = clock.now_epoch();
            self.pages
                .render(mode, state, &mut self.frame)
                .unwrap_or_else(|never| match never {});
            if let Err(e) = self.frame.flush(panel) {
                error!("Display flush failed: {:?}", e);
            }
        }

        Yield::For(self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::hardware::Button;
    use crate::mode::Mode;
    use crate::orbital::MeanLongitudeEphemeris;
    use crate::palette;
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    /// Panel whose writes can be made to fail.
    #[derive(Default)]
    struct FakePanel {
        backlight: std::vec::Vec<f32>,
        flushes: usize,
        failing: bool,
    }

    impl OriginDimensions for FakePanel {
        fn size(&self) -> Size {
            Size::new(240, 135)
        }
    }

    impl DrawTarget for FakePanel {
        type Color = Rgb565;
        type Error = &'static str;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }

        fn fill_contiguous<I>(&mut self, _area: &Rectangle, _colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            if self.failing {
                return Err("spi bus fault");
            }
            self.flushes += 1;
            Ok(())
        }
    }

    impl Panel for FakePanel {
        fn set_backlight(&mut self, level: f32) {
            self.backlight.push(level);
        }
    }

    struct Pad(Option<Button>);

    impl ButtonPad for Pad {
        fn is_pressed(&mut self, button: Button) -> bool {
            self.0 == Some(button)
        }
    }

    struct Clock(i64);

    impl WallClock for Clock {
        fn now_epoch(&mut self) -> i64 {
            self.0
        }
    }

    fn setup() -> (RenderLoop<MeanLongitudeEphemeris>, DeviceState) {
        let config = DeviceConfig::default();
        let state =
            DeviceState::new(config.clone(), Mode::Greeting, Instant::from_secs(0), 0).unwrap();
        (
            RenderLoop::new(MeanLongitudeEphemeris, config.tick_period()),
            state,
        )
    }

    #[test]
    fn test_tick_renders_and_flushes() {
        let (mut render, mut state) = setup();
        let mut panel = FakePanel::default();

        let sleep = render.tick(
            &mut state,
            &mut panel,
            &mut Pad(None),
            &mut Clock(1_609_545_601),
            Instant::from_secs(1),
        );

        assert_eq!(sleep, Yield::For(Duration::from_millis(100)));
        assert_eq!(panel.flushes, 1);
        assert_eq!(render.frame().pixel(Point::zero()), Some(palette::DARK_GREEN));
        assert_eq!(state.wall_epoch, 1_609_545_601);
        assert!(panel.backlight.is_empty());
    }

    #[test]
    fn test_press_switches_page_and_restores_backlight() {
        let (mut render, mut state) = setup();
        let mut panel = FakePanel::default();

        render.tick(
            &mut state,
            &mut panel,
            &mut Pad(Some(Button::B)),
            &mut Clock(0),
            Instant::from_secs(1),
        );

        assert_eq!(state.modes.mode(), Mode::Clock);
        assert_eq!(panel.backlight, [0.5]);
        assert_eq!(render.frame().pixel(Point::zero()), Some(palette::GREY));
    }

    #[test]
    fn test_flush_failure_is_not_fatal() {
        let (mut render, mut state) = setup();
        let mut panel = FakePanel {
            failing: true,
            ..FakePanel::default()
        };

        let sleep = render.tick(
            &mut state,
            &mut panel,
            &mut Pad(None),
            &mut Clock(0),
            Instant::from_secs(1),
        );
        assert_eq!(sleep, Yield::For(Duration::from_millis(100)));

        // The unflushed region is retried on the next tick.
        panel.failing = false;
        render.tick(
            &mut state,
            &mut panel,
            &mut Pad(None),
            &mut Clock(0),
            Instant::from_millis(1_100),
        );
        assert_eq!(panel.flushes, 1);
    }
}
