//! Surface material and object role.

use photon_math::Color;

/// Smallest refractive index accepted; keeps Snell's ratio finite.
const MIN_REFRACTIVE_INDEX: f64 = 1e-3;

/// Optical properties shared by every primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Surface color (0-255 per channel)
    pub color: Color,

    /// Fraction of the reflected ray mixed into the result, in [0, 1]
    pub reflectivity: f64,

    /// Fraction of the refracted ray mixed into the result, in [0, 1]
    pub transparency: f64,

    /// Index of refraction (1.0 = no bending)
    pub refractive_index: f64,

    /// Specular exponent scale; highlights only above 10
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::new(128, 128, 128),
            reflectivity: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            shininess: 64.0,
        }
    }
}

impl Material {
    /// Create a new material with a color and default optics.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_reflectivity(mut self, reflectivity: f64) -> Self {
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
        self
    }

    pub fn with_transparency(mut self, transparency: f64) -> Self {
        self.transparency = transparency.clamp(0.0, 1.0);
        self
    }

    pub fn with_refractive_index(mut self, refractive_index: f64) -> Self {
        if refractive_index < MIN_REFRACTIVE_INDEX {
            log::warn!(
                "Refractive index {} is not positive, using {}",
                refractive_index,
                MIN_REFRACTIVE_INDEX
            );
        }
        self.refractive_index = refractive_index.max(MIN_REFRACTIVE_INDEX);
        self
    }

    pub fn with_shininess(mut self, shininess: f64) -> Self {
        self.shininess = shininess.max(0.0);
        self
    }
}

/// Role of an object during shading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    /// Ordinary surface: shaded, casts shadows
    #[default]
    Regular,
    /// Point light rendered as a bright sphere; emits, never shaded
    LightSource,
}
