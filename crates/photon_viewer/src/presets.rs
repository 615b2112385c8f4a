//! Scene presets: the bootstrap scene and randomized objects.

use photon_core::{FinitePlane, Material, ObjectCategory, Primitive, Pyramid, Scene};
use photon_math::{Color, DVec3};
use rand::Rng;

/// Build the scene shown at startup.
pub fn default_scene() -> Scene {
    let mut scene = Scene::new();

    scene.add_object(Primitive::light(DVec3::new(2.0, 1.0, 0.0), Color::WHITE, 1.0));
    scene.add_object(Primitive::light(
        DVec3::new(-3.0, 4.0, 1.0),
        Color::new(255, 230, 200),
        0.6,
    ));

    scene.add_object(Primitive::sphere(
        DVec3::new(0.0, 0.0, 3.0),
        1.0,
        Material::new(Color::new(200, 100, 80)).with_reflectivity(0.3),
    ));
    scene.add_object(Primitive::sphere(
        DVec3::new(-2.0, 0.0, 4.0),
        1.0,
        Material::new(Color::new(100, 200, 100)).with_reflectivity(0.5),
    ));
    scene.add_object(Primitive::sphere(
        DVec3::new(2.0, 0.0, 4.0),
        1.0,
        Material::new(Color::new(100, 100, 200))
            .with_reflectivity(0.2)
            .with_transparency(0.6)
            .with_refractive_index(1.5),
    ));

    scene.add_object(Primitive::pyramid(
        Pyramid::new(DVec3::new(0.0, -1.0, 7.0), DVec3::new(0.0, 2.5, 0.0), 1.5, 4),
        Material::new(Color::new(220, 180, 60)).with_reflectivity(0.2),
    ));

    scene.add_object(Primitive::plane(
        FinitePlane::horizontal(DVec3::new(0.0, -1.0, 5.0), 14.0, 14.0),
        Material::new(Color::new(120, 120, 130))
            .with_reflectivity(0.25)
            .with_shininess(0.0),
    ));

    scene
}

/// One-line per-type summary of a scene.
pub fn scene_summary(scene: &Scene) -> String {
    let counts: Vec<String> = ObjectCategory::ALL
        .iter()
        .map(|&category| format!("{}: {}", category, scene.count(category)))
        .collect();
    format!("{} objects ({})", scene.object_count(), counts.join(", "))
}

/// Descriptor lines for every object, grouped the way the object list
/// panel shows them.
pub fn object_listing(scene: &Scene) -> Vec<String> {
    ObjectCategory::ALL
        .iter()
        .flat_map(|category| {
            scene
                .object_infos_by_type(category.name())
                .into_iter()
                .map(move |line| format!("[{}] {}", category, line))
        })
        .collect()
}

/// Remove the `objects` most recent objects, then the `lights` most recent
/// light sources. Stops early once nothing is left to remove.
pub fn trim_scene(scene: &mut Scene, objects: usize, lights: usize) -> usize {
    let mut removed = 0;
    for _ in 0..objects {
        if scene.remove_last_object().is_none() {
            break;
        }
        removed += 1;
    }
    for _ in 0..lights {
        if scene.remove_last_light_source().is_none() {
            break;
        }
        removed += 1;
    }
    removed
}

/// Value in `[0, modulus)` divided by `scale`, shifted by `offset`.
fn stepped<R: Rng + ?Sized>(rng: &mut R, modulus: u32, scale: f64, offset: f64) -> f64 {
    rng.gen_range(0..modulus) as f64 / scale + offset
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::new(rng.gen(), rng.gen(), rng.gen())
}

/// Sphere in front of the default observer.
pub fn random_sphere<R: Rng + ?Sized>(rng: &mut R) -> Primitive {
    let center = DVec3::new(
        stepped(rng, 100, 10.0, -5.0),
        stepped(rng, 100, 10.0, -5.0),
        stepped(rng, 100, 10.0, 3.0),
    );
    let radius = stepped(rng, 30, 10.0, 0.5);
    let material = Material::new(random_color(rng))
        .with_reflectivity(stepped(rng, 100, 100.0, 0.0))
        .with_transparency(stepped(rng, 50, 100.0, 0.0));

    Primitive::sphere(center, radius, material)
}

/// Pyramid with a random tilt, size and side count (3 to 7).
pub fn random_pyramid<R: Rng + ?Sized>(rng: &mut R) -> Primitive {
    let base_center = DVec3::new(
        stepped(rng, 100, 10.0, -5.0),
        stepped(rng, 100, 10.0, -3.0),
        stepped(rng, 100, 10.0, 5.0),
    );
    let apex_direction = DVec3::new(
        stepped(rng, 100, 100.0, -0.5),
        stepped(rng, 100, 100.0, 0.5),
        stepped(rng, 100, 100.0, -0.5),
    );
    let color = random_color(rng);
    let base_radius = stepped(rng, 30, 10.0, 0.8);
    let sides = rng.gen_range(3..8);
    let material = Material::new(color)
        .with_reflectivity(stepped(rng, 100, 100.0, 0.0))
        .with_transparency(stepped(rng, 30, 100.0, 0.0));

    Primitive::pyramid(
        Pyramid::new(base_center, apex_direction, base_radius, sides),
        material,
    )
}

/// Near-white point light above the scene.
pub fn random_light<R: Rng + ?Sized>(rng: &mut R) -> Primitive {
    let position = DVec3::new(
        stepped(rng, 100, 10.0, -5.0),
        stepped(rng, 100, 10.0, 1.0),
        stepped(rng, 100, 10.0, 2.0),
    );
    let color = Color::new(
        rng.gen_range(200..255),
        rng.gen_range(200..255),
        rng.gen_range(200..255),
    );
    let intensity = stepped(rng, 100, 100.0, 0.5);

    Primitive::light(position, color, intensity)
}

/// Horizontal rectangle facing +Y.
pub fn random_plane<R: Rng + ?Sized>(rng: &mut R) -> Primitive {
    let position = DVec3::new(
        stepped(rng, 100, 10.0, -5.0),
        stepped(rng, 100, 10.0, -3.0),
        stepped(rng, 100, 10.0, 5.0),
    );
    let color = random_color(rng);
    let width = stepped(rng, 50, 10.0, 2.0);
    let height = stepped(rng, 50, 10.0, 2.0);
    let material = Material::new(color)
        .with_reflectivity(stepped(rng, 100, 100.0, 0.0))
        .with_transparency(stepped(rng, 30, 100.0, 0.0));

    Primitive::plane(FinitePlane::horizontal(position, width, height), material)
}

/// A random object of any kind.
pub fn random_object<R: Rng + ?Sized>(rng: &mut R) -> Primitive {
    match rng.gen_range(0..4) {
        0 => random_sphere(rng),
        1 => random_pyramid(rng),
        2 => random_light(rng),
        _ => random_plane(rng),
    }
}
