use embedded_graphics::Drawable;
use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{DrawTarget, Point, Primitive};
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use heapless::Vec;

use super::circle::{MidpointCircle, OrbitRing};
use super::ephemeris::{Ephemeris, OrbitalPhase};
use crate::DISPLAY_HEIGHT_PX;
use crate::clock::CalendarTime;
use crate::palette;

/// Screen position of the Sun.
pub const SUN_CENTER: Point = Point::new(90, 67);

pub const SUN_RADIUS: u32 = 4;

/// Bodies beyond this rank are not drawn.
pub const MAX_BODIES: usize = 8;

/// Orbit ring radius for a body, innermost body at index 0.
pub const fn ring_radius(body: usize) -> i32 {
    8 * (body as i32 + 1) + 2
}

/// Unrounded screen position of a body's sprite origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    pub x: f32,
    pub y: f32,
}

/// Draws the Sun, one ring per body, and each body's sprite on its ring.
///
/// Body positions for the current frame are kept until
/// [`release_frame`](Self::release_frame) so callers can inspect them after
/// drawing.
pub struct OrbitalRenderer {
    center: Point,
    panel_height: i32,
    positions: Vec<BodyPosition, MAX_BODIES>,
}

impl Default for OrbitalRenderer {
    fn default() -> Self {
        Self::new(SUN_CENTER, DISPLAY_HEIGHT_PX as i32)
    }
}

impl OrbitalRenderer {
    pub fn new(center: Point, panel_height: i32) -> Self {
        Self {
            center,
            panel_height,
            positions: Vec::new(),
        }
    }

    /// Place a body on its ring.
    ///
    /// The phase direction is scaled to the ring radius and the vertical
    /// axis flipped, since the panel's origin is top-left.
    pub fn project(&self, phase: OrbitalPhase, radius: i32) -> BodyPosition {
        let angle = libm::atan2f(phase.x, phase.y);
        let radius = radius as f32;
        let dx = radius * libm::sinf(angle);
        let dy = radius * libm::cosf(angle);
        BodyPosition {
            x: dx + self.center.x as f32,
            y: self.panel_height as f32 - (dy + self.center.y as f32),
        }
    }

    pub fn draw<E, D>(
        &mut self,
        ephemeris: &E,
        when: &CalendarTime,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        E: Ephemeris,
        D: DrawTarget<Color = Rgb565>,
    {
        Circle::with_center(self.center, SUN_RADIUS * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(palette::SUN))
            .draw(target)?;

        let bodies = ephemeris.body_count().min(MAX_BODIES);
        for body in 0..bodies {
            let radius = ring_radius(body);
            OrbitRing {
                circle: MidpointCircle::new(self.center, radius),
                color: palette::ORBIT,
            }
            .draw(target)?;

            let position = self.project(ephemeris.phase(body, when), radius);
            self.positions.push(position).ok();

            // Negative coordinates are dropped here; the draw target drops
            // anything past the far edges.
            let sprite = ephemeris.sprite(body).iter().filter_map(|pixel| {
                let x = position.x + pixel.dx as f32;
                let y = position.y + pixel.dy as f32;
                (x >= 0.0 && y >= 0.0)
                    .then(|| Pixel(Point::new(x as i32, y as i32), pixel.color))
            });
            target.draw_iter(sprite)?;
        }

        Ok(())
    }

    /// Positions computed by the last [`draw`](Self::draw), innermost first.
    pub fn positions(&self) -> &[BodyPosition] {
        &self.positions
    }

    /// Drop the per-frame position buffer.
    pub fn release_frame(&mut self) {
        self.positions.clear();
    }
}
