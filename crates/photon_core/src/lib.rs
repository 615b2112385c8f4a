//! Photon Core - Scene model for the Photon ray tracer.
//!
//! This crate provides:
//!
//! - **Geometry primitives**: `Sphere`, `FinitePlane`, `Pyramid`
//! - **Object model**: `Material`, `ObjectKind`, `Primitive`
//! - **Scene store**: `Scene` with insertion-ordered add/remove and listing queries
//!
//! # Example
//!
//! ```
//! use photon_core::{Material, Primitive, Scene};
//! use photon_math::{Color, DVec3};
//!
//! let mut scene = Scene::new();
//! scene.add_object(Primitive::light(DVec3::new(2.0, 1.0, 0.0), Color::WHITE, 1.0));
//! scene.add_object(Primitive::sphere(
//!     DVec3::new(0.0, 0.0, 3.0),
//!     1.0,
//!     Material::new(Color::new(200, 100, 80)).with_reflectivity(0.3),
//! ));
//! assert_eq!(scene.light_count(), 1);
//! assert_eq!(scene.sphere_count(), 1);
//! ```

pub mod material;
pub mod plane;
pub mod primitive;
pub mod pyramid;
pub mod scene;
pub mod sphere;

// Re-export commonly used types
pub use material::{Material, ObjectKind};
pub use plane::FinitePlane;
pub use primitive::{Primitive, Shape, LIGHT_RADIUS};
pub use pyramid::{Face, Pyramid};
pub use scene::{ObjectCategory, Scene, SceneError};
pub use sphere::Sphere;
