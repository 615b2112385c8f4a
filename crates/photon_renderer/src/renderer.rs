//! Core recursive ray tracer.
//!
//! Implements Whitted-style ray tracing with:
//! - Ambient, Lambertian diffuse and Phong specular local illumination
//! - Hard shadows from point lights
//! - Mirror reflection and Snell refraction weighted by Schlick's Fresnel term

use photon_core::{Primitive, Scene};
use photon_math::{Color, DVec3, Observer, Ray, HIT_EPSILON};

/// Reflectivity/transparency at or below this skips the secondary ray.
const SECONDARY_EPSILON: f64 = 1e-3;

/// Specular highlights only for materials shinier than this.
const SPECULAR_THRESHOLD: f64 = 10.0;

/// Shininess is scaled by this before being used as the Phong exponent.
const SHININESS_SCALE: f64 = 0.1;

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Maximum recursion depth; deeper rays return the background
    pub max_depth: u32,
    /// Reflection and refraction rays are only spawned below this depth
    pub secondary_depth: u32,
    /// Color returned when a ray escapes the scene
    pub background: Color,
    /// Fraction of the object color added once as ambient light
    pub ambient: f64,
    /// Linear distance falloff: `1 / (1 + attenuation * distance)`
    pub attenuation: f64,
    /// Image plane half-extent at unit distance
    pub fov: f64,
    /// Linear supersampling factor per axis
    pub supersample: u32,
    /// Worker count for a frame pass; `None` uses every logical CPU
    pub thread_count: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            secondary_depth: 2,
            background: Color::VOID,
            ambient: 0.05,
            attenuation: 0.05,
            fov: 1.0,
            supersample: 2,
            thread_count: None,
        }
    }
}

impl RenderConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_secondary_depth(mut self, secondary_depth: u32) -> Self {
        self.secondary_depth = secondary_depth;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient.max(0.0);
        self
    }

    pub fn with_attenuation(mut self, attenuation: f64) -> Self {
        self.attenuation = attenuation.max(0.0);
        self
    }

    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Supersampling factor; at least 1.
    pub fn with_supersample(mut self, supersample: u32) -> Self {
        self.supersample = supersample.max(1);
        self
    }

    /// Fixed worker count (at least 1).
    pub fn with_thread_count(mut self, thread_count: usize) -> Self {
        self.thread_count = Some(thread_count.max(1));
        self
    }

    /// Number of workers a frame pass will use.
    pub fn resolved_thread_count(&self) -> usize {
        self.thread_count.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Direction and weight of a refracted ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    /// Unit transmitted direction
    pub direction: DVec3,
    /// Schlick reflectance at this incidence angle
    pub fresnel: f64,
}

/// Refract `direction` through a surface with outward `normal` and index
/// `refractive_index` (the other side is vacuum).
///
/// Entering vs exiting follows from the sign of `direction · normal`.
/// Returns `None` on total internal reflection.
pub fn refract(direction: DVec3, normal: DVec3, refractive_index: f64) -> Option<Refraction> {
    let d = direction.normalize_or_zero();
    let entering = d.dot(normal) < 0.0;
    let (n1, n2, n) = if entering {
        (1.0, refractive_index, normal)
    } else {
        (refractive_index, 1.0, -normal)
    };

    let ratio = n1 / n2;
    let cos_i = -n.dot(d);
    let sin2_t = ratio * ratio * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }

    let cos_t = (1.0 - sin2_t).sqrt();
    let transmitted = (d * ratio + n * (ratio * cos_i - cos_t)).normalize_or_zero();

    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    let fresnel = r0 + (1.0 - r0) * (1.0 - cos_i).powi(5);

    Some(Refraction {
        direction: transmitted,
        fresnel,
    })
}

/// Shading context for one scene snapshot.
///
/// Light sources are collected once at construction; build a new tracer
/// after the scene changes.
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
    lights: Vec<&'a Primitive>,
    observer: Observer,
    basis: (DVec3, DVec3),
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        let observer = scene.observer().with_fov(config.fov);
        Self {
            scene,
            config,
            lights: scene.lights().collect(),
            observer,
            basis: observer.basis(),
        }
    }

    /// Nearest object hit by `ray` and the hit distance.
    pub fn closest_hit(&self, ray: &Ray) -> Option<(&'a Primitive, f64)> {
        self.scene
            .objects()
            .iter()
            .filter_map(|object| object.intersect(ray).map(|t| (object, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Whether any regular object blocks the segment from `point` toward a
    /// light `light_distance` away along unit `light_dir`.
    pub fn is_in_shadow(&self, point: DVec3, light_dir: DVec3, light_distance: f64) -> bool {
        let shadow_ray = Ray::offset(point, light_dir, HIT_EPSILON, light_dir);
        self.scene
            .objects()
            .iter()
            .filter(|object| !object.is_light())
            .any(|object| {
                object
                    .intersect(&shadow_ray)
                    .is_some_and(|t| t > HIT_EPSILON && t < light_distance)
            })
    }

    /// Ambient plus unshadowed diffuse and specular contributions of every
    /// light at `point`.
    pub fn local_illumination(
        &self,
        object: &Primitive,
        point: DVec3,
        normal: DVec3,
        view_dir: DVec3,
    ) -> Color {
        let material = &object.material;
        let base = material.color.to_dvec3();
        let mut total = base * self.config.ambient;

        for light in &self.lights {
            let to_light = light.position() - point;
            let light_distance = to_light.length();
            let light_dir = to_light.normalize_or_zero();

            if self.is_in_shadow(point, light_dir, light_distance) {
                continue;
            }

            let n_dot_l = normal.dot(light_dir).max(0.0);
            if n_dot_l <= 0.0 {
                continue;
            }

            let falloff = 1.0 / (1.0 + self.config.attenuation * light_distance);
            let intensity = light.light_intensity * n_dot_l * falloff;
            let light_color = light.color().to_dvec3();

            total += base * light_color / 255.0 * intensity;

            if material.shininess > SPECULAR_THRESHOLD {
                let reflect_dir = (normal * (2.0 * n_dot_l) - light_dir).normalize_or_zero();
                let r_dot_v = reflect_dir.dot(view_dir).max(0.0);
                if r_dot_v > 0.0 {
                    let specular =
                        r_dot_v.powf(material.shininess * SHININESS_SCALE) * intensity;
                    total += light_color * specular / 255.0;
                }
            }
        }

        Color::from_dvec3(total)
    }

    /// Color seen along a ray.
    ///
    /// `depth` counts bounces so far; primary rays start at 0.
    pub fn trace_ray(&self, origin: DVec3, direction: DVec3, depth: u32) -> Color {
        let config = self.config;
        if depth > config.max_depth {
            return config.background;
        }

        let ray = Ray::new(origin, direction);
        let Some((object, t)) = self.closest_hit(&ray) else {
            return config.background;
        };

        // Lights are drawn as flat emitters
        if object.is_light() {
            return object.color();
        }

        let point = ray.at(t);
        let normal = object.normal_at(point);
        let view_dir = (origin - point).normalize_or_zero();

        let mut color = self.local_illumination(object, point, normal, view_dir);

        if depth >= config.secondary_depth {
            return color;
        }

        let material = &object.material;

        if material.reflectivity > SECONDARY_EPSILON {
            let reflect_dir = direction - normal * (2.0 * direction.dot(normal));
            let reflected = self.trace_ray(point + normal * HIT_EPSILON, reflect_dir, depth + 1);
            color = color.blend(reflected, material.reflectivity);
        }

        if material.transparency > SECONDARY_EPSILON {
            if let Some(refraction) = refract(direction, normal, material.refractive_index) {
                let start = point + refraction.direction * HIT_EPSILON;
                let refracted = self.trace_ray(start, refraction.direction, depth + 1);
                let weight = (1.0 - refraction.fresnel) * material.transparency;
                color = color.blend(refracted, weight);
            }
        }

        color
    }

    /// Color of pixel `(x, y)` in a `width × height` image seen from the
    /// scene's observer.
    pub fn render_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Color {
        let (right, up) = self.basis;
        let ray = self
            .observer
            .primary_ray_with_basis(x, y, width, height, right, up);
        self.trace_ray(ray.origin, ray.direction, 0)
    }
}

/// Trace a single ray through `scene` with the default configuration.
pub fn trace_ray(scene: &Scene, origin: DVec3, direction: DVec3, depth: u32) -> Color {
    let config = RenderConfig::default();
    Tracer::new(scene, &config).trace_ray(origin, direction, depth)
}
