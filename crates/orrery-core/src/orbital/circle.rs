use embedded_graphics::Drawable;
use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{DrawTarget, Point};

/// Integer midpoint circle outline.
///
/// Plots all eight octant reflections per step using only integer
/// arithmetic. The outline starts at `radius - 1` on the x axis, so every
/// point satisfies `(radius - 1)² <= x² + y² <= radius²` relative to the
/// center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidpointCircle {
    pub center: Point,
    pub radius: i32,
}

impl MidpointCircle {
    pub const fn new(center: Point, radius: i32) -> Self {
        Self { center, radius }
    }

    /// Outline points in plotting order. Points on the octant boundaries are
    /// yielded more than once.
    pub fn points(&self) -> MidpointPoints {
        MidpointPoints {
            center: self.center,
            diameter: self.radius << 1,
            x: self.radius - 1,
            y: 0,
            dx: 1,
            dy: 1,
            err: 1 - (self.radius << 1),
            octant: 0,
        }
    }
}

/// Iterator over a [`MidpointCircle`]'s outline.
#[derive(Debug, Clone)]
pub struct MidpointPoints {
    center: Point,
    diameter: i32,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    err: i32,
    octant: u8,
}

impl MidpointPoints {
    /// Move to the next point of the first octant.
    fn step(&mut self) {
        if self.err <= 0 {
            self.y += 1;
            self.err += self.dy;
            self.dy += 2;
        }
        if self.err > 0 {
            self.x -= 1;
            self.dx += 2;
            self.err += self.dx - self.diameter;
        }
    }
}

impl Iterator for MidpointPoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.x < self.y {
            return None;
        }

        let (x, y) = (self.x, self.y);
        let offset = match self.octant {
            0 => Point::new(x, y),
            1 => Point::new(y, x),
            2 => Point::new(-y, x),
            3 => Point::new(-x, y),
            4 => Point::new(-x, -y),
            5 => Point::new(-y, -x),
            6 => Point::new(y, -x),
            _ => Point::new(x, -y),
        };

        self.octant += 1;
        if self.octant == 8 {
            self.octant = 0;
            self.step();
        }

        Some(self.center + offset)
    }
}

/// A [`MidpointCircle`] drawn in a single color.
#[derive(Debug, Clone, Copy)]
pub struct OrbitRing {
    pub circle: MidpointCircle,
    pub color: Rgb565,
}

impl Drawable for OrbitRing {
    type Color = Rgb565;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        target.draw_iter(self.circle.points().map(|point| Pixel(point, self.color)))
    }
}
