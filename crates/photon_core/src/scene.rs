//! Scene store for Photon.
//!
//! The scene exclusively owns every primitive in insertion order and keeps
//! the observer pose. Object indices are positions at query time; removal
//! shifts them, so only "most recent" removals are offered.

use std::fmt;
use std::str::FromStr;

use photon_math::{DVec3, Observer};
use thiserror::Error;

use crate::primitive::{Primitive, Shape};

/// Transparency and shininess at or below this are omitted from object
/// descriptors.
const DESCRIPTOR_EPSILON: f64 = 0.01;

/// Errors from scene queries.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("Unknown object category: {0:?} (expected Pyramids, Spheres, LightSources or Planes)")]
    UnknownCategory(String),
}

/// Listing bucket used by inspection panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    Pyramids,
    Spheres,
    LightSources,
    Planes,
}

impl ObjectCategory {
    pub const ALL: [ObjectCategory; 4] = [
        ObjectCategory::Pyramids,
        ObjectCategory::Spheres,
        ObjectCategory::LightSources,
        ObjectCategory::Planes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ObjectCategory::Pyramids => "Pyramids",
            ObjectCategory::Spheres => "Spheres",
            ObjectCategory::LightSources => "LightSources",
            ObjectCategory::Planes => "Planes",
        }
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectCategory {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectCategory::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| SceneError::UnknownCategory(s.to_string()))
    }
}

/// Insertion-ordered collection of primitives plus the observer pose.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    objects: Vec<Primitive>,
    observer: Observer,
}

impl Scene {
    /// Create an empty scene with the default observer at `(0, 0, -5)`
    /// looking down +Z.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object.
    pub fn add_object(&mut self, object: Primitive) {
        log::debug!(
            "Adding {} #{} at {:?}",
            object.category(),
            self.objects.len() + 1,
            object.position()
        );
        self.objects.push(object);
    }

    /// Remove the most recently added object. No-op on an empty scene.
    pub fn remove_last_object(&mut self) -> Option<Primitive> {
        let removed = self.objects.pop();
        if let Some(object) = &removed {
            log::debug!("Removed last object ({})", object.category());
        }
        removed
    }

    /// Remove the most recently added light source, wherever it sits in the
    /// insertion order. No-op when there are no lights.
    pub fn remove_last_light_source(&mut self) -> Option<Primitive> {
        let index = self.objects.iter().rposition(Primitive::is_light)?;
        log::debug!("Removed light source at index {}", index);
        Some(self.objects.remove(index))
    }

    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    /// Iterate over light-emitting objects in insertion order.
    pub fn lights(&self) -> impl Iterator<Item = &Primitive> {
        self.objects.iter().filter(|object| object.is_light())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights().count()
    }

    /// Number of objects listed under `category`.
    pub fn count(&self, category: ObjectCategory) -> usize {
        self.objects
            .iter()
            .filter(|object| object.category() == category)
            .count()
    }

    pub fn pyramid_count(&self) -> usize {
        self.count(ObjectCategory::Pyramids)
    }

    /// Regular spheres only; lights are counted separately.
    pub fn sphere_count(&self) -> usize {
        self.count(ObjectCategory::Spheres)
    }

    pub fn light_source_count(&self) -> usize {
        self.count(ObjectCategory::LightSources)
    }

    pub fn plane_count(&self) -> usize {
        self.count(ObjectCategory::Planes)
    }

    /// Descriptor lines for every object of `category`, in insertion order.
    pub fn object_infos(&self, category: ObjectCategory) -> Vec<String> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, object)| object.category() == category)
            .map(|(index, object)| describe(index + 1, object))
            .collect()
    }

    /// String-keyed variant of [`Scene::object_infos`] for UI panels.
    ///
    /// Unknown names produce an empty list.
    pub fn object_infos_by_type(&self, type_name: &str) -> Vec<String> {
        match type_name.parse::<ObjectCategory>() {
            Ok(category) => self.object_infos(category),
            Err(err) => {
                log::debug!("{}", err);
                Vec::new()
            }
        }
    }

    pub fn observer(&self) -> Observer {
        self.observer
    }

    pub fn observer_position(&self) -> DVec3 {
        self.observer.position
    }

    pub fn observer_direction(&self) -> DVec3 {
        self.observer.direction
    }

    pub fn set_observer_position(&mut self, position: DVec3) {
        self.observer.position = position;
    }

    /// Stored normalized.
    pub fn set_observer_direction(&mut self, direction: DVec3) {
        self.observer.direction = direction.normalize_or_zero();
    }
}

/// Compact number formatting for descriptors: at most three decimals,
/// trailing zeros dropped.
fn num(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn pos(p: DVec3) -> String {
    format!("Pos({},{},{})", num(p.x), num(p.y), num(p.z))
}

fn describe(number: usize, object: &Primitive) -> String {
    let m = &object.material;
    let mut line = match &object.shape {
        Shape::Sphere(_) if object.is_light() => {
            let c = m.color;
            return format!(
                "Light #{} {} R:{} G:{} B:{} I:{}",
                number,
                pos(object.position()),
                c.r,
                c.g,
                c.b,
                num(object.light_intensity)
            );
        }
        Shape::Sphere(sphere) => format!(
            "Sphere #{} R:{} {} Refl:{}",
            number,
            num(sphere.radius),
            pos(sphere.center),
            num(m.reflectivity)
        ),
        Shape::Plane(plane) => format!(
            "Plane #{} {} Refl:{}",
            number,
            pos(plane.position),
            num(m.reflectivity)
        ),
        Shape::Pyramid(pyramid) => format!(
            "Pyramid #{} {} Refl:{}",
            number,
            pos(pyramid.base_center),
            num(m.reflectivity)
        ),
    };

    if m.transparency > DESCRIPTOR_EPSILON {
        line.push_str(&format!(" Trans:{}", num(m.transparency)));
    }
    if matches!(object.shape, Shape::Sphere(_)) && m.refractive_index != 1.0 {
        line.push_str(&format!(" Refr:{}", num(m.refractive_index)));
    }
    if m.shininess > DESCRIPTOR_EPSILON {
        line.push_str(&format!(" Shine:{}", m.shininess as i64));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::plane::FinitePlane;
    use crate::pyramid::Pyramid;
    use photon_math::Color;

    fn sphere_a() -> Primitive {
        Primitive::sphere(DVec3::new(0.0, 0.0, 3.0), 1.0, Material::default())
    }

    fn light_b() -> Primitive {
        Primitive::light(DVec3::new(2.0, 1.0, 0.0), Color::WHITE, 1.0)
    }

    #[test]
    fn test_remove_last_light_source_skips_regular_objects() {
        let mut scene = Scene::new();
        scene.add_object(sphere_a());
        scene.add_object(light_b());

        let removed = scene.remove_last_light_source().expect("a light was present");
        assert!(removed.is_light());
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.light_count(), 0);
        assert_eq!(scene.objects()[0], sphere_a());
    }

    #[test]
    fn test_remove_last_light_source_scans_from_end() {
        let mut scene = Scene::new();
        scene.add_object(light_b());
        scene.add_object(sphere_a());
        scene.add_object(Primitive::light(DVec3::ZERO, Color::new(255, 0, 0), 0.5));
        scene.add_object(sphere_a());

        scene.remove_last_light_source();

        assert_eq!(scene.object_count(), 3);
        assert_eq!(scene.light_count(), 1);
        // The earlier light survives
        assert_eq!(scene.lights().next().map(Primitive::position), Some(DVec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn test_removal_from_empty_is_noop() {
        let mut scene = Scene::new();
        assert!(scene.remove_last_object().is_none());
        assert!(scene.remove_last_light_source().is_none());

        scene.add_object(sphere_a());
        assert!(scene.remove_last_light_source().is_none());
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_remove_last_object_pops() {
        let mut scene = Scene::new();
        scene.add_object(sphere_a());
        scene.add_object(light_b());

        let removed = scene.remove_last_object().expect("non-empty");
        assert!(removed.is_light());
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_counts() {
        let mut scene = Scene::new();
        let m = Material::default();
        scene.add_object(sphere_a());
        scene.add_object(sphere_a());
        scene.add_object(light_b());
        scene.add_object(Primitive::plane(FinitePlane::horizontal(DVec3::ZERO, 2.0, 2.0), m));
        scene.add_object(Primitive::pyramid(Pyramid::new(DVec3::ZERO, DVec3::Y, 1.0, 5), m));

        assert_eq!(scene.object_count(), 5);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.sphere_count(), 2);
        assert_eq!(scene.light_source_count(), 1);
        assert_eq!(scene.plane_count(), 1);
        assert_eq!(scene.pyramid_count(), 1);
    }

    #[test]
    fn test_object_infos_by_type() {
        let mut scene = Scene::new();
        scene.add_object(light_b());
        scene.add_object(Primitive::sphere(
            DVec3::new(-2.0, 0.0, 4.5),
            1.5,
            Material::new(Color::new(100, 200, 100))
                .with_reflectivity(0.5)
                .with_transparency(0.25)
                .with_refractive_index(1.5),
        ));
        scene.add_object(Primitive::plane(
            FinitePlane::horizontal(DVec3::new(0.0, -1.0, 0.0), 2.0, 2.0),
            Material::default().with_shininess(0.0),
        ));

        assert_eq!(
            scene.object_infos_by_type("Spheres"),
            vec!["Sphere #2 R:1.5 Pos(-2,0,4.5) Refl:0.5 Trans:0.25 Refr:1.5 Shine:64"]
        );
        assert_eq!(
            scene.object_infos_by_type("LightSources"),
            vec!["Light #1 Pos(2,1,0) R:255 G:255 B:255 I:1"]
        );
        assert_eq!(
            scene.object_infos_by_type("Planes"),
            vec!["Plane #3 Pos(0,-1,0) Refl:0"]
        );
        assert!(scene.object_infos_by_type("Pyramids").is_empty());
        assert!(scene.object_infos_by_type("Teapots").is_empty());
    }

    #[test]
    fn test_descriptor_omits_negligible_transparency_and_shine() {
        let mut scene = Scene::new();
        scene.add_object(Primitive::sphere(
            DVec3::new(0.0, 0.0, 3.0),
            1.0,
            Material::default()
                .with_transparency(0.005)
                .with_shininess(0.01),
        ));
        scene.add_object(Primitive::sphere(
            DVec3::new(0.0, 0.0, 3.0),
            1.0,
            Material::default()
                .with_transparency(0.02)
                .with_shininess(0.02),
        ));

        assert_eq!(
            scene.object_infos(ObjectCategory::Spheres),
            vec![
                "Sphere #1 R:1 Pos(0,0,3) Refl:0",
                "Sphere #2 R:1 Pos(0,0,3) Refl:0 Trans:0.02 Shine:0",
            ]
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Planes".parse(), Ok(ObjectCategory::Planes));
        assert_eq!(
            "planes".parse::<ObjectCategory>(),
            Err(SceneError::UnknownCategory("planes".to_string()))
        );
        for category in ObjectCategory::ALL {
            assert_eq!(category.to_string().parse(), Ok(category));
        }
    }

    #[test]
    fn test_observer_direction_normalized() {
        let mut scene = Scene::new();
        scene.set_observer_position(DVec3::new(1.0, 2.0, 3.0));
        scene.set_observer_direction(DVec3::new(0.0, 0.0, -4.0));

        assert_eq!(scene.observer_position(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.observer_direction(), DVec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_num_format() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.30000000000000004), "0.3");
        assert_eq!(num(-2.5), "-2.5");
        assert_eq!(num(-0.0001), "0");
    }
}
