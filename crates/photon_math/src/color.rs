//! 8-bit RGB color used by the shading engine and the frame buffer.

use crate::{DVec3, Interval};

/// RGB color with 0-255 channels.
///
/// Every constructor that takes floating point input clamps to [0, 255]
/// before truncating, so channel arithmetic can never wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Scene background.
    pub const VOID: Color = Color::new(10, 10, 25);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unbounded channel values, clamping each to [0, 255].
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: Interval::CHANNEL.clamp(r) as u8,
            g: Interval::CHANNEL.clamp(g) as u8,
            b: Interval::CHANNEL.clamp(b) as u8,
        }
    }

    /// Same as [`Color::from_f64`] with the channels packed in a vector.
    pub fn from_dvec3(v: DVec3) -> Self {
        Self::from_f64(v.x, v.y, v.z)
    }

    /// Channels as floating point values in [0, 255].
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.r as f64, self.g as f64, self.b as f64)
    }

    /// Linear blend: `self * (1 - ratio) + other * ratio`.
    pub fn blend(self, other: Color, ratio: f64) -> Color {
        Self::from_dvec3(self.to_dvec3() * (1.0 - ratio) + other.to_dvec3() * ratio)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f64_clamps() {
        assert_eq!(Color::from_f64(-20.0, 300.0, 12.7), Color::new(0, 255, 12));
        assert_eq!(Color::from_f64(f64::INFINITY, 0.0, 0.0), Color::new(255, 0, 0));
    }

    #[test]
    fn test_blend_endpoints() {
        let a = Color::new(200, 100, 0);
        let b = Color::new(0, 100, 200);

        assert_eq!(a.blend(b, 0.0), a);
        assert_eq!(a.blend(b, 1.0), b);
        assert_eq!(a.blend(b, 0.5), Color::new(100, 100, 100));
    }

    #[test]
    fn test_blend_out_of_range_ratio_stays_in_range() {
        let a = Color::new(250, 250, 250);
        let b = Color::new(0, 0, 0);

        // Extrapolating past the endpoints must still clamp
        assert_eq!(a.blend(b, -1.0), Color::WHITE);
        assert_eq!(a.blend(b, 2.0), Color::BLACK);
    }
}
