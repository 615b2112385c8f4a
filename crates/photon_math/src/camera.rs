use crate::{DVec3, Ray};

/// Observer pose used to generate primary rays.
///
/// Only a position and a viewing direction; the right/up basis is derived
/// from the world up axis on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub position: DVec3,
    pub direction: DVec3,
    /// Half-extent of the image plane at unit distance (vertical)
    pub fov: f64,
}

impl Default for Observer {
    fn default() -> Self {
        Self::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z)
    }
}

impl Observer {
    /// Create an observer. The direction is stored normalized.
    pub fn new(position: DVec3, direction: DVec3) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            fov: 1.0,
        }
    }

    /// Override the image plane half-extent.
    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Camera basis `(right, up)`.
    ///
    /// `right = normalize(Y × direction)`, `up = normalize(direction × right)`.
    /// Looking straight up or down yields a zero basis (rays collapse onto
    /// the view direction) rather than NaNs.
    pub fn basis(&self) -> (DVec3, DVec3) {
        let right = DVec3::Y.cross(self.direction).normalize_or_zero();
        let up = self.direction.cross(right).normalize_or_zero();
        (right, up)
    }

    /// Primary ray through the center of pixel `(x, y)` of a `width × height`
    /// image, with aspect ratio correction on the horizontal axis.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let (right, up) = self.basis();
        self.primary_ray_with_basis(x, y, width, height, right, up)
    }

    /// Same as [`Observer::primary_ray`] with a precomputed basis, for inner
    /// loops that generate many rays per frame.
    pub fn primary_ray_with_basis(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        right: DVec3,
        up: DVec3,
    ) -> Ray {
        let width_f = width as f64;
        let height_f = height as f64;
        let aspect = width_f / height_f;

        let ndc_x = ((x as f64 + 0.5) / width_f * 2.0 - 1.0) * aspect * self.fov;
        let ndc_y = (1.0 - (y as f64 + 0.5) / height_f * 2.0) * self.fov;

        let direction = (self.direction + right * ndc_x + up * ndc_y).normalize_or_zero();
        Ray::new(self.position, direction)
    }
}
