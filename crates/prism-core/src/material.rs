//! Surface material records.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A self-contained surface description.
///
/// Materials hold no references; the registry stores them by copy and
/// geometry refers to them through a [`MaterialHandle`](crate::MaterialHandle).
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Material {
    /// Base surface colour (linear RGB).
    pub color: Vec3,
    /// Emitted radiance (linear RGB). Non-zero for light sources.
    pub emission: Vec3,
    /// Diffuse reflection coefficient.
    pub diffuse: f32,
    /// Specular reflection coefficient.
    pub specular: f32,
    /// Phong exponent.
    pub shininess: f32,
    /// Mirror reflectivity in `[0, 1]`.
    pub reflectivity: f32,
    /// Transmission in `[0, 1]`.
    pub transparency: f32,
    /// Index of refraction for transmitted rays.
    pub ior: f32,
}

impl Material {
    /// A matte material of the given colour.
    pub fn diffuse(color: Vec3) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    /// Copy of `self` emitting `emission`.
    pub fn with_emission(mut self, emission: Vec3) -> Self {
        self.emission = emission;
        self
    }

    /// Whether any emission channel is positive.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.8),
            emission: Vec3::ZERO,
            diffuse: 1.0,
            specular: 0.0,
            shininess: 32.0,
            reflectivity: 0.0,
            transparency: 0.0,
            ior: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_48_bytes() {
        assert_eq!(std::mem::size_of::<Material>(), 48);
    }

    #[test]
    fn default_is_not_emissive() {
        assert!(!Material::default().is_emissive());
        assert!(Material::default()
            .with_emission(Vec3::new(0.0, 0.0, 2.0))
            .is_emissive());
    }
}
