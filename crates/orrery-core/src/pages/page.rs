//! Page abstraction shared by every screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::DrawTarget;

use crate::app_state::DeviceState;
use crate::mode::Mode;

/// A full-screen view of one [`Mode`].
///
/// The render loop calls, once per tick and only for the current mode:
///
/// 1. **`draw_page`**: compose the whole frame into the target. Pages always
///    redraw everything; the frame buffer works out what actually changed.
/// 2. **`after_render`**: per-mode side effects that must follow a completed
///    frame.
pub trait Page {
    fn mode(&self) -> Mode;

    /// Human-readable name, used in logs.
    fn title(&self) -> &str;

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        state: &mut DeviceState,
        display: &mut D,
    ) -> Result<(), D::Error>;

    fn after_render(&mut self, _state: &mut DeviceState) {}
}
