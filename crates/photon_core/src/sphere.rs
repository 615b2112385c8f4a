//! Sphere primitive.

use photon_math::{DVec3, Interval, Ray};

/// A sphere given by center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Distance along `ray` to the nearest surface point beyond the hit epsilon.
    ///
    /// The ray direction does not need to be normalized.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        if a < f64::EPSILON {
            return None;
        }
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let near = (-b - sqrtd) / (2.0 * a);
        if Interval::HIT.surrounds(near) {
            return Some(near);
        }
        let far = (-b + sqrtd) / (2.0 * a);
        Interval::HIT.surrounds(far).then_some(far)
    }

    /// Outward unit normal at a surface point.
    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_hit_front_surface() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, 3.0), 1.0);
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);

        let t = sphere.intersect(&ray).expect("ray should hit the sphere");
        assert!((t - 7.0).abs() < 1e-9);

        let normal = sphere.normal_at(ray.at(t));
        assert!((normal - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }

    #[test]
    fn test_sphere_unnormalized_direction() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, 3.0), 1.0);
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::new(0.0, 0.0, 2.0));

        // Twice the speed, half the parameter
        let t = sphere.intersect(&ray).expect("ray should hit the sphere");
        assert!((t - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_from_inside_returns_far_root() {
        let sphere = Sphere::new(DVec3::ZERO, 2.0);
        let ray = Ray::new(DVec3::ZERO, DVec3::X);

        let t = sphere.intersect(&ray).expect("ray from inside should exit");
        assert!((t - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(DVec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(DVec3::ZERO, DVec3::Y);
        assert!(sphere.intersect(&ray).is_none());

        // Sphere entirely behind the ray
        let behind = Ray::new(DVec3::ZERO, DVec3::Z);
        assert!(sphere.intersect(&behind).is_none());
    }

    #[test]
    fn test_sphere_surface_origin_is_not_self_hit() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0);
        // Starting on the surface, heading outward
        let ray = Ray::new(DVec3::X, DVec3::X);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn test_degenerate_inputs() {
        let sphere = Sphere::new(DVec3::ZERO, 1.0);
        let zero_dir = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::ZERO);
        assert!(sphere.intersect(&zero_dir).is_none());

        let point = Sphere::new(DVec3::ZERO, -1.0);
        assert_eq!(point.radius, 0.0);
        let ray = Ray::new(DVec3::new(0.0, 1.0, -5.0), DVec3::Z);
        assert!(point.intersect(&ray).is_none());
    }
}
