//! Regular N-sided pyramid built from precomputed triangular faces.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::f64::consts::PI;

use photon_math::{DVec3, Interval, Ray};

/// Determinants below this mean the ray is parallel to the face.
const DETERMINANT_EPSILON: f64 = 1e-8;

/// Fewest sides that still close a solid.
const MIN_SIDES: u32 = 3;

/// Weights of the nearest-face heuristic used by [`Pyramid::normal_at`].
const PLANE_DISTANCE_WEIGHT: f64 = 0.7;
const CENTROID_DISTANCE_WEIGHT: f64 = 0.3;

/// One triangular face of a pyramid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub v0: DVec3,
    pub v1: DVec3,
    pub v2: DVec3,
    /// Outward unit normal
    pub normal: DVec3,
    /// Centroid of the three vertices
    pub center: DVec3,
}

impl Face {
    fn new(v0: DVec3, v1: DVec3, v2: DVec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        Self {
            v0,
            v1,
            v2,
            normal,
            center: (v0 + v1 + v2) / 3.0,
        }
    }

    /// Möller-Trumbore ray-triangle intersection. Two-sided.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < DETERMINANT_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        Interval::HIT.surrounds(t).then_some(t)
    }
}

/// A pyramid with a regular polygon base in the horizontal plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Pyramid {
    pub base_center: DVec3,
    pub apex: DVec3,
    pub base_radius: f64,
    pub sides: u32,
    pub height: f64,
    faces: Vec<Face>,
}

impl Pyramid {
    /// Create a pyramid.
    ///
    /// The apex sits at `base_center + apex_direction`; its length is the
    /// height. The base polygon has `sides` vertices on a circle of
    /// `base_radius` in the XZ plane through `base_center`.
    pub fn new(base_center: DVec3, apex_direction: DVec3, base_radius: f64, sides: u32) -> Self {
        let sides = if sides < MIN_SIDES {
            log::warn!("Pyramid needs at least {} sides, got {}", MIN_SIDES, sides);
            MIN_SIDES
        } else {
            sides
        };

        let height = apex_direction.length();
        let apex = base_center + apex_direction.normalize_or_zero() * height;

        let mut pyramid = Self {
            base_center,
            apex,
            base_radius,
            sides,
            height,
            faces: Vec::with_capacity(2 * sides as usize),
        };
        pyramid.build_faces();
        pyramid
    }

    fn build_faces(&mut self) {
        let angle_step = 2.0 * PI / self.sides as f64;
        let base: Vec<DVec3> = (0..self.sides)
            .map(|i| {
                let angle = i as f64 * angle_step;
                self.base_center
                    + DVec3::new(
                        self.base_radius * angle.cos(),
                        0.0,
                        self.base_radius * angle.sin(),
                    )
            })
            .collect();

        let n = base.len();

        // Lateral faces, normals pointing away from the base center
        for i in 0..n {
            let mut face = Face::new(base[i], base[(i + 1) % n], self.apex);
            if face.normal.dot(self.base_center - face.center) > 0.0 {
                face.normal = -face.normal;
            }
            self.faces.push(face);
        }

        // Base fan, normals pointing down
        for i in 0..n {
            let mut face = Face::new(base[i], base[(i + 1) % n], self.base_center);
            if face.normal.y > 0.0 {
                face.normal = -face.normal;
            }
            self.faces.push(face);
        }
    }

    /// All `2 * sides` faces: lateral faces first, then the base fan.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Smallest valid hit distance over all faces.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.faces
            .iter()
            .filter_map(|face| face.intersect(ray))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Normal of the face nearest to `point`.
    ///
    /// Nearness blends the distance to the face plane with the distance to
    /// the face centroid; it picks a consistent face near seams instead of
    /// testing exact face membership.
    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        self.faces
            .iter()
            .map(|face| {
                let plane_distance = face.normal.dot(point - face.v0).abs();
                let centroid_distance = point.distance(face.center);
                let score = plane_distance * PLANE_DISTANCE_WEIGHT
                    + centroid_distance * CENTROID_DISTANCE_WEIGHT;
                (score, face.normal)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, normal)| normal)
            .unwrap_or(DVec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_pyramid() -> Pyramid {
        Pyramid::new(DVec3::ZERO, DVec3::new(0.0, 2.0, 0.0), 1.0, 4)
    }

    #[test]
    fn test_face_count_and_apex() {
        let pyramid = square_pyramid();
        assert_eq!(pyramid.faces().len(), 8);
        assert!((pyramid.apex - DVec3::new(0.0, 2.0, 0.0)).length() < 1e-12);
        assert!((pyramid.height - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sides_clamped() {
        let pyramid = Pyramid::new(DVec3::ZERO, DVec3::Y, 1.0, 1);
        assert_eq!(pyramid.sides, 3);
        assert_eq!(pyramid.faces().len(), 6);
    }

    #[test]
    fn test_face_normals_point_outward() {
        let pyramid = square_pyramid();
        let (lateral, base) = pyramid.faces().split_at(4);

        for face in lateral {
            assert!(face.normal.dot(face.center - pyramid.base_center) > 0.0);
            assert!((face.normal.length() - 1.0).abs() < 1e-9);
        }
        for face in base {
            assert!((face.normal - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-9);
        }
    }

    #[test]
    fn test_hit_from_above() {
        let pyramid = square_pyramid();
        let ray = Ray::new(DVec3::new(0.1, 5.0, 0.1), DVec3::new(0.0, -1.0, 0.0));

        // First lateral face lies on x + z + y/2 = 1, so the hit is at y = 1.6
        let t = pyramid.intersect(&ray).expect("ray should hit a lateral face");
        assert!((t - 3.4).abs() < 1e-6);
    }

    #[test]
    fn test_hit_from_below_hits_base() {
        let pyramid = square_pyramid();
        let ray = Ray::new(DVec3::new(0.1, -3.0, 0.1), DVec3::Y);

        let t = pyramid.intersect(&ray).expect("ray should hit the base");
        assert!((t - 3.0).abs() < 1e-6);

        let normal = pyramid.normal_at(ray.at(t));
        assert!((normal - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_side_hit_keeps_nearest_face() {
        let pyramid = square_pyramid();
        // Horizontal ray at mid height passes through two lateral faces
        let ray = Ray::new(DVec3::new(-5.0, 0.5, 0.05), DVec3::X);

        let t = pyramid.intersect(&ray).expect("ray should hit a side");
        let hit = ray.at(t);
        assert!(hit.x < 0.0, "nearest face is on the -X side, got {hit:?}");

        let normal = pyramid.normal_at(hit);
        assert!(normal.x < 0.0);
    }

    #[test]
    fn test_miss() {
        let pyramid = square_pyramid();
        let ray = Ray::new(DVec3::new(5.0, 5.0, 5.0), DVec3::Y);
        assert!(pyramid.intersect(&ray).is_none());
    }

    #[test]
    fn test_face_parallel_ray_misses() {
        let face = Face::new(DVec3::ZERO, DVec3::X, DVec3::Z);
        let ray = Ray::new(DVec3::new(0.2, 0.0, -1.0), DVec3::Z);
        assert!(face.intersect(&ray).is_none());
    }
}
