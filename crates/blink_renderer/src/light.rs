//! Point light and Blinn-Phong shading.

use blink_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// An omnidirectional light with inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    /// Linear RGB gain
    pub color: Color,
    /// Negative power means the light is switched off
    pub power: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, power: f32) -> Self {
        Self {
            position,
            color,
            power,
        }
    }

    /// A light that contributes nothing.
    pub fn disabled() -> Self {
        Self {
            position: Vec3::ZERO,
            color: Color::ZERO,
            power: -1.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.power >= 0.0
    }
}

/// Diffuse and specular contributions of one light at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub diffuse: Color,
    pub specular: Color,
}

impl Lighting {
    pub const NONE: Lighting = Lighting {
        diffuse: Color::ZERO,
        specular: Color::ZERO,
    };

    /// Diffuse plus specular.
    pub fn total(&self) -> Color {
        self.diffuse + self.specular
    }
}

/// Blinn-Phong lighting from a single point light.
///
/// `surface_normal` must be unit length. `view_direction` is the unit
/// vector from the surface toward the viewer, i.e. the negated direction
/// of the ray that found the surface. The light must not sit exactly on
/// the surface, and the light and view directions must not cancel out;
/// both produce non-finite results.
pub fn blinn_phong(
    light: &PointLight,
    surface_position: Vec3,
    surface_normal: Vec3,
    view_direction: Vec3,
    specular_hardness: f32,
) -> Lighting {
    if !light.is_enabled() {
        return Lighting::NONE;
    }

    let to_light = light.position - surface_position;
    let distance_squared = to_light.length_squared();
    let distance = distance_squared.sqrt();
    let light_direction = to_light / distance;
    let falloff = light.power / distance_squared;

    // Diffuse
    let n_dot_l = surface_normal.dot(light_direction).clamp(0.0, 1.0);
    let diffuse = light.color * (n_dot_l * falloff);

    // Specular
    let half_vector = (light_direction + view_direction).normalize();
    let n_dot_h = surface_normal.dot(half_vector).clamp(0.0, 1.0);
    let specular = light.color * (n_dot_h.powf(specular_hardness) * falloff);

    Lighting { diffuse, specular }
}
