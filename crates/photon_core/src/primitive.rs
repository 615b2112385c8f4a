//! Scene objects: a closed set of shapes plus material and role.

use photon_math::{Color, DVec3, Ray};

use crate::material::{Material, ObjectKind};
use crate::plane::FinitePlane;
use crate::pyramid::Pyramid;
use crate::scene::ObjectCategory;
use crate::sphere::Sphere;

/// Radius of the visible sphere that represents a point light.
pub const LIGHT_RADIUS: f64 = 0.4;

/// Geometry of a primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(FinitePlane),
    Pyramid(Pyramid),
}

impl Shape {
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Pyramid(pyramid) => pyramid.intersect(ray),
        }
    }

    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        match self {
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Plane(plane) => plane.normal_at(point),
            Shape::Pyramid(pyramid) => pyramid.normal_at(point),
        }
    }

    /// Reference position: sphere center, plane anchor, pyramid base center.
    pub fn position(&self) -> DVec3 {
        match self {
            Shape::Sphere(sphere) => sphere.center,
            Shape::Plane(plane) => plane.position,
            Shape::Pyramid(pyramid) => pyramid.base_center,
        }
    }
}

/// A renderable object owned by the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
    pub kind: ObjectKind,
    /// Emission strength; only meaningful for light sources
    pub light_intensity: f64,
}

impl Primitive {
    /// Create a regular (non-emitting) primitive.
    pub fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material,
            kind: ObjectKind::Regular,
            light_intensity: 0.0,
        }
    }

    pub fn sphere(center: DVec3, radius: f64, material: Material) -> Self {
        Self::new(Shape::Sphere(Sphere::new(center, radius)), material)
    }

    pub fn plane(plane: FinitePlane, material: Material) -> Self {
        Self::new(Shape::Plane(plane), material)
    }

    pub fn pyramid(pyramid: Pyramid, material: Material) -> Self {
        Self::new(Shape::Pyramid(pyramid), material)
    }

    /// A point light, drawn as a small sphere of its own color.
    pub fn light(position: DVec3, color: Color, intensity: f64) -> Self {
        Self {
            shape: Shape::Sphere(Sphere::new(position, LIGHT_RADIUS)),
            material: Material::new(color).with_shininess(1.0),
            kind: ObjectKind::LightSource,
            light_intensity: intensity.max(0.0),
        }
    }

    pub fn is_light(&self) -> bool {
        self.kind == ObjectKind::LightSource
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.shape.intersect(ray)
    }

    pub fn normal_at(&self, point: DVec3) -> DVec3 {
        self.shape.normal_at(point)
    }

    pub fn position(&self) -> DVec3 {
        self.shape.position()
    }

    pub fn color(&self) -> Color {
        self.material.color
    }

    /// Listing bucket this object is reported under.
    pub fn category(&self) -> ObjectCategory {
        match (&self.shape, self.kind) {
            (Shape::Sphere(_), ObjectKind::LightSource) => ObjectCategory::LightSources,
            (Shape::Sphere(_), ObjectKind::Regular) => ObjectCategory::Spheres,
            (Shape::Plane(_), _) => ObjectCategory::Planes,
            (Shape::Pyramid(_), _) => ObjectCategory::Pyramids,
        }
    }
}
