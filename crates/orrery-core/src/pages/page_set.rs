//! Mode-to-page dispatch.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;
use log::info;

use crate::app_state::DeviceState;
use crate::mode::Mode;
use crate::orbital::Ephemeris;
use crate::pages::{ClockPage, GreetingPage, Page, SolarSystemPage, ThermometerPage};

/// Owns one page per displayable mode and routes each render to the right one.
pub struct PageSet<E> {
    greeting: GreetingPage,
    clock: ClockPage,
    thermometer: ThermometerPage,
    solar_system: SolarSystemPage<E>,
    shown: Option<Mode>,
}

impl<E: Ephemeris> PageSet<E> {
    pub fn new(ephemeris: E) -> Self {
        Self {
            greeting: GreetingPage,
            clock: ClockPage,
            thermometer: ThermometerPage::default(),
            solar_system: SolarSystemPage::new(ephemeris),
            shown: None,
        }
    }

    pub fn thermometer(&self) -> &ThermometerPage {
        &self.thermometer
    }

    pub fn solar_system(&self) -> &SolarSystemPage<E> {
        &self.solar_system
    }

    /// Mode of the last page drawn, if any.
    pub fn shown(&self) -> Option<Mode> {
        self.shown
    }

    /// Draw `mode` once and run its post-render side effect.
    ///
    /// `Sleeping` has no page and draws nothing.
    pub fn render<D>(
        &mut self,
        mode: Mode,
        state: &mut DeviceState,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let shown = &mut self.shown;
        match mode {
            Mode::Greeting => render_page(&mut self.greeting, shown, state, display),
            Mode::Clock => render_page(&mut self.clock, shown, state, display),
            Mode::Thermometer => render_page(&mut self.thermometer, shown, state, display),
            Mode::SolarSystem => render_page(&mut self.solar_system, shown, state, display),
            Mode::Sleeping => Ok(()),
        }
    }
}

fn render_page<P, D>(
    page: &mut P,
    shown: &mut Option<Mode>,
    state: &mut DeviceState,
    display: &mut D,
) -> Result<(), D::Error>
where
    P: Page,
    D: DrawTarget<Color = Rgb565>,
{
    if *shown != Some(page.mode()) {
        info!("Showing {} page", page.title());
        *shown = Some(page.mode());
    }
    page.draw_page(state, display)?;
    page.after_render(state);
    Ok(())
}
