use crate::DVec3;

/// A ray in 3D space with an origin and a direction.
///
/// The direction is not required to be unit length; intersection routines
/// that care (spheres) account for it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray whose origin is nudged along `offset_dir` by `offset`.
    ///
    /// Secondary rays (reflection, refraction, shadow) start slightly off the
    /// surface they were spawned from.
    pub fn offset(origin: DVec3, offset_dir: DVec3, offset: f64, direction: DVec3) -> Self {
        Self::new(origin + offset_dir * offset, direction)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let direction = DVec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        assert_eq!(ray.at(0.0), DVec3::ZERO);
        assert_eq!(ray.at(1.0), DVec3::X);
        assert_eq!(ray.at(2.0), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_offset() {
        let ray = Ray::offset(DVec3::ZERO, DVec3::Y, 0.001, DVec3::X);

        assert_eq!(ray.origin, DVec3::new(0.0, 0.001, 0.0));
        assert_eq!(ray.direction, DVec3::X);
    }
}
