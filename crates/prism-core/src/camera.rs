//! Camera and render configuration blobs.
//!
//! The scene moves these alongside the arena as opaque values; nothing in
//! the arena layer interprets them.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Pinhole/thin-lens camera.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Camera {
    /// Eye position.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Lens aperture; zero for a pinhole.
    pub aperture: f32,
    /// Focus distance for a non-zero aperture.
    pub focus_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0,
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }
}

/// Output and sampling parameters for one render invocation.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel.
    pub samples: u32,
    /// Maximum ray bounce depth.
    pub max_depth: u32,
    /// Colour returned by rays that escape the scene.
    pub background: Vec3,
    /// Linear exposure multiplier.
    pub exposure: f32,
}

impl RenderConfig {
    /// Number of pixels in the output image.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples: 1,
            max_depth: 5,
            background: Vec3::ZERO,
            exposure: 1.0,
        }
    }
}
