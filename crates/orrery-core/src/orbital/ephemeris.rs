use core::f64::consts::PI;

use embedded_graphics::pixelcolor::Rgb565;

use crate::clock::CalendarTime;
use crate::palette::rgb;

/// Heliocentric direction of a body in the ecliptic plane.
///
/// Only the direction matters to the renderer; the magnitude is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalPhase {
    pub x: f32,
    pub y: f32,
}

/// One pixel of a body's sprite, relative to the body's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpritePixel {
    pub dx: i8,
    pub dy: i8,
    pub color: Rgb565,
}

impl SpritePixel {
    pub const fn new(dx: i8, dy: i8, r: u8, g: u8, b: u8) -> Self {
        Self {
            dx,
            dy,
            color: rgb(r, g, b),
        }
    }
}

/// Source of body positions and appearances.
///
/// Bodies are indexed by orbital rank, innermost first, Sun excluded.
/// Implementations must be pure: the same calendar time always yields the
/// same phase.
pub trait Ephemeris {
    fn body_count(&self) -> usize;

    fn phase(&self, body: usize, when: &CalendarTime) -> OrbitalPhase;

    fn sprite(&self, body: usize) -> &[SpritePixel];
}

/// Number of bodies the built-in ephemeris knows.
pub const PLANET_COUNT: usize = 8;

struct Planet {
    name: &'static str,
    /// Mean longitude at J2000.0, degrees.
    longitude_j2000: f64,
    /// Mean daily motion, degrees per day.
    motion: f64,
    sprite: &'static [SpritePixel],
}

const fn px(dx: i8, dy: i8, r: u8, g: u8, b: u8) -> SpritePixel {
    SpritePixel::new(dx, dy, r, g, b)
}

const MERCURY: &[SpritePixel] = &[
    px(0, 0, 177, 177, 172),
    px(1, 0, 150, 150, 146),
    px(0, 1, 150, 150, 146),
];

const VENUS: &[SpritePixel] = &[
    px(0, -1, 242, 197, 71),
    px(-1, 0, 242, 197, 71),
    px(0, 0, 250, 220, 120),
    px(1, 0, 242, 197, 71),
    px(0, 1, 242, 197, 71),
];

const EARTH: &[SpritePixel] = &[
    px(-1, -1, 154, 207, 221),
    px(0, -1, 154, 207, 221),
    px(1, -1, 154, 207, 221),
    px(-1, 0, 102, 140, 74),
    px(0, 0, 154, 207, 221),
    px(1, 0, 102, 140, 74),
    px(-1, 1, 154, 207, 221),
    px(0, 1, 102, 140, 74),
    px(1, 1, 154, 207, 221),
];

const MARS: &[SpritePixel] = &[
    px(0, -1, 255, 102, 90),
    px(-1, 0, 255, 102, 90),
    px(0, 0, 220, 80, 60),
    px(1, 0, 255, 102, 90),
    px(0, 1, 255, 102, 90),
];

const JUPITER: &[SpritePixel] = &[
    px(-1, -2, 242, 197, 71),
    px(0, -2, 242, 197, 71),
    px(1, -2, 242, 197, 71),
    px(-2, -1, 255, 140, 100),
    px(-1, -1, 255, 140, 100),
    px(0, -1, 255, 140, 100),
    px(1, -1, 255, 140, 100),
    px(2, -1, 255, 140, 100),
    px(-2, 0, 242, 240, 213),
    px(-1, 0, 242, 240, 213),
    px(0, 0, 242, 240, 213),
    px(1, 0, 242, 240, 213),
    px(2, 0, 242, 240, 213),
    px(-2, 1, 255, 140, 100),
    px(-1, 1, 255, 140, 100),
    px(0, 1, 255, 140, 100),
    px(1, 1, 255, 140, 100),
    px(2, 1, 255, 140, 100),
    px(-1, 2, 242, 197, 71),
    px(0, 2, 242, 197, 71),
    px(1, 2, 242, 197, 71),
];

const SATURN: &[SpritePixel] = &[
    px(-1, -1, 242, 240, 213),
    px(0, -1, 242, 240, 213),
    px(1, -1, 242, 240, 213),
    px(-3, 0, 177, 177, 172),
    px(-2, 0, 177, 177, 172),
    px(-1, 0, 242, 197, 71),
    px(0, 0, 242, 197, 71),
    px(1, 0, 242, 197, 71),
    px(2, 0, 177, 177, 172),
    px(3, 0, 177, 177, 172),
    px(-1, 1, 242, 240, 213),
    px(0, 1, 242, 240, 213),
    px(1, 1, 242, 240, 213),
];

const URANUS: &[SpritePixel] = &[
    px(0, -1, 154, 207, 221),
    px(-1, 0, 154, 207, 221),
    px(0, 0, 190, 230, 235),
    px(1, 0, 154, 207, 221),
    px(0, 1, 154, 207, 221),
];

const NEPTUNE: &[SpritePixel] = &[
    px(0, -1, 80, 110, 230),
    px(-1, 0, 80, 110, 230),
    px(0, 0, 120, 150, 240),
    px(1, 0, 80, 110, 230),
    px(0, 1, 80, 110, 230),
];

static PLANETS: [Planet; PLANET_COUNT] = [
    Planet {
        name: "Mercury",
        longitude_j2000: 252.250_84,
        motion: 4.092_334_45,
        sprite: MERCURY,
    },
    Planet {
        name: "Venus",
        longitude_j2000: 181.979_73,
        motion: 1.602_130_34,
        sprite: VENUS,
    },
    Planet {
        name: "Earth",
        longitude_j2000: 100.464_35,
        motion: 0.985_609_10,
        sprite: EARTH,
    },
    Planet {
        name: "Mars",
        longitude_j2000: 355.453_32,
        motion: 0.524_033_04,
        sprite: MARS,
    },
    Planet {
        name: "Jupiter",
        longitude_j2000: 34.404_38,
        motion: 0.083_086_76,
        sprite: JUPITER,
    },
    Planet {
        name: "Saturn",
        longitude_j2000: 49.944_32,
        motion: 0.033_460_63,
        sprite: SATURN,
    },
    Planet {
        name: "Uranus",
        longitude_j2000: 313.232_18,
        motion: 0.011_731_29,
        sprite: URANUS,
    },
    Planet {
        name: "Neptune",
        longitude_j2000: 304.880_03,
        motion: 0.005_981_06,
        sprite: NEPTUNE,
    },
];

/// Circular-orbit ephemeris for the eight planets.
///
/// Each planet moves at its mean daily motion from its J2000.0 mean
/// longitude, which is good to a few degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanLongitudeEphemeris;

impl MeanLongitudeEphemeris {
    pub fn name(&self, body: usize) -> Option<&'static str> {
        PLANETS.get(body).map(|planet| planet.name)
    }

    /// Mean longitude in degrees, unreduced.
    fn mean_longitude(planet: &Planet, when: &CalendarTime) -> Option<f64> {
        Some(planet.longitude_j2000 + planet.motion * when.days_since_j2000()?)
    }
}

impl Ephemeris for MeanLongitudeEphemeris {
    fn body_count(&self) -> usize {
        PLANET_COUNT
    }

    fn phase(&self, body: usize, when: &CalendarTime) -> OrbitalPhase {
        let Some(longitude) = PLANETS
            .get(body)
            .and_then(|planet| Self::mean_longitude(planet, when))
        else {
            return OrbitalPhase { x: 0.0, y: 0.0 };
        };
        let longitude = longitude * PI / 180.0;
        OrbitalPhase {
            x: libm::cos(longitude) as f32,
            y: libm::sin(longitude) as f32,
        }
    }

    fn sprite(&self, body: usize) -> &[SpritePixel] {
        match PLANETS.get(body) {
            Some(planet) => planet.sprite,
            None => &[],
        }
    }
}
