//! Finite (rectangular) plane primitive.

use photon_math::{DVec3, Interval, Ray};

/// Denominators below this are treated as a ray parallel to the plane.
const PARALLEL_EPSILON: f64 = 1e-6;

/// A rectangle lying in a plane.
///
/// The local basis is `(right, up, normal)` with `up = normal × right`;
/// the rectangle spans `±width/2` along `right` and `±height/2` along `up`
/// around the anchor position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinitePlane {
    pub position: DVec3,
    normal: DVec3,
    right: DVec3,
    up: DVec3,
    pub width: f64,
    pub height: f64,
}

impl FinitePlane {
    /// Create a plane. `normal` and `right` are normalized on construction.
    pub fn new(position: DVec3, normal: DVec3, right: DVec3, width: f64, height: f64) -> Self {
        let normal = normal.normalize_or_zero();
        let right = right.normalize_or_zero();
        let up = normal.cross(right);

        if up.length_squared() < PARALLEL_EPSILON {
            log::warn!(
                "Plane at {:?} has a degenerate basis (normal {:?}, right {:?})",
                position,
                normal,
                right
            );
        }

        Self {
            position,
            normal,
            right,
            up,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Horizontal floor-style plane facing +Y.
    pub fn horizontal(position: DVec3, width: f64, height: f64) -> Self {
        Self::new(position, DVec3::Y, DVec3::X, width, height)
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn right(&self) -> DVec3 {
        self.right
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    /// Distance along `ray` to the rectangle, if the hit lies inside its bounds.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = self.normal.dot(self.position - ray.origin) / denom;
        if t < Interval::HIT.min {
            return None;
        }

        let local = ray.at(t) - self.position;
        let right_coord = local.dot(self.right);
        let up_coord = local.dot(self.up);

        let inside = right_coord.abs() <= self.width / 2.0 && up_coord.abs() <= self.height / 2.0;
        inside.then_some(t)
    }

    /// The plane normal; constant over the surface.
    pub fn normal_at(&self, _point: DVec3) -> DVec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> FinitePlane {
        FinitePlane::horizontal(DVec3::new(0.0, -1.0, 5.0), 4.0, 2.0)
    }

    #[test]
    fn test_basis() {
        let plane = floor();
        assert_eq!(plane.normal(), DVec3::Y);
        assert_eq!(plane.right(), DVec3::X);
        // up = normal × right = Y × X = -Z
        assert_eq!(plane.up(), DVec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_hit_inside_rectangle() {
        let plane = floor();
        let ray = Ray::new(DVec3::new(1.5, 3.0, 5.5), DVec3::new(0.0, -1.0, 0.0));

        let t = plane.intersect(&ray).expect("should hit inside bounds");
        assert!((t - 4.0).abs() < 1e-9);
        assert_eq!(plane.normal_at(ray.at(t)), DVec3::Y);
    }

    #[test]
    fn test_miss_outside_rectangle() {
        let plane = floor();

        // Beyond width/2 = 2 along right
        let wide = Ray::new(DVec3::new(2.5, 3.0, 5.0), DVec3::new(0.0, -1.0, 0.0));
        assert!(plane.intersect(&wide).is_none());

        // Beyond height/2 = 1 along up
        let deep = Ray::new(DVec3::new(0.0, 3.0, 6.5), DVec3::new(0.0, -1.0, 0.0));
        assert!(plane.intersect(&deep).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let plane = floor();
        let ray = Ray::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Z);
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let plane = floor();
        let ray = Ray::new(DVec3::new(0.0, 3.0, 5.0), DVec3::Y);
        assert!(plane.intersect(&ray).is_none());
    }

    #[test]
    fn test_hit_from_below() {
        let plane = floor();
        let ray = Ray::new(DVec3::new(0.0, -3.0, 5.0), DVec3::Y);
        let t = plane.intersect(&ray).expect("two-sided plane");
        assert!((t - 2.0).abs() < 1e-9);
    }
}
