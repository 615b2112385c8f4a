// Re-export glam for convenience
pub use glam::*;

// Photon math types
mod camera;
mod color;
mod interval;
mod ray;

pub use camera::Observer;
pub use color::Color;
pub use interval::Interval;
pub use ray::Ray;

/// Offset used to push secondary ray origins off a surface and to reject
/// self-intersections at `t ≈ 0`.
pub const HIT_EPSILON: f64 = 0.001;
