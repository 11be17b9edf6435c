//! Solar-system projection and rasterization

mod circle;
mod ephemeris;
mod renderer;

pub use circle::{MidpointCircle, MidpointPoints, OrbitRing};
pub use ephemeris::{
    Ephemeris, MeanLongitudeEphemeris, OrbitalPhase, PLANET_COUNT, SpritePixel,
};
pub use renderer::{
    BodyPosition, MAX_BODIES, OrbitalRenderer, SUN_CENTER, SUN_RADIUS, ring_radius,
};
