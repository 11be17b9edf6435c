use embedded_graphics::Drawable;
use embedded_graphics::mono_font::{MonoTextStyle, ascii::FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use log::warn;

use crate::app_state::DeviceState;
use crate::mode::Mode;
use crate::orbital::{Ephemeris, OrbitalRenderer};
use crate::pages::Page;
use crate::palette;

/// Top-left of the "Sol" caption.
pub const SOL_LABEL_ORIGIN: Point = Point::new(160, 105);

/// Animated orrery driven by the simulated clock.
///
/// Every completed frame moves the simulated clock forward, so the planets
/// advance even though wall time barely changes between ticks.
pub struct SolarSystemPage<E> {
    ephemeris: E,
    renderer: OrbitalRenderer,
}

impl<E: Ephemeris> SolarSystemPage<E> {
    pub fn new(ephemeris: E) -> Self {
        Self {
            ephemeris,
            renderer: OrbitalRenderer::default(),
        }
    }

    pub fn renderer(&self) -> &OrbitalRenderer {
        &self.renderer
    }
}

impl<E: Ephemeris> Page for SolarSystemPage<E> {
    fn mode(&self) -> Mode {
        Mode::SolarSystem
    }

    fn title(&self) -> &str {
        "Solar system"
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        state: &mut DeviceState,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.clear(palette::BLACK)?;

        match state.sim_clock.calendar() {
            Some(when) => self.renderer.draw(&self.ephemeris, &when, display)?,
            None => warn!(
                "Simulated epoch {} out of calendar range",
                state.sim_clock.epoch()
            ),
        }

        Text::with_baseline(
            "Sol",
            SOL_LABEL_ORIGIN,
            MonoTextStyle::new(&FONT_10X20, palette::YELLOW),
            Baseline::Top,
        )
        .draw(display)?;
        Ok(())
    }

    fn after_render(&mut self, state: &mut DeviceState) {
        state.sim_clock.advance(state.config.sim_step_secs());
        self.renderer.release_frame();
    }
}
