//! Small hand-built scenes with known contents.
//!
//! - [`mixed_scene`]: sphere, emitter, plane, then a material, in that order.
//! - [`sphere_grid`]: `n` spheres sharing one material.

use prism_arena::ArenaError;
use prism_core::{Camera, Material, MaterialHandle, ObjOffset, Plane, Sphere, Vec3};
use prism_scene::Scene;

/// Offsets and handles produced by [`mixed_scene`].
#[derive(Clone, Copy, Debug)]
pub struct MixedScene {
    pub sphere: ObjOffset,
    pub lamp: ObjOffset,
    pub floor: ObjOffset,
    pub matte: MaterialHandle,
    pub glow: MaterialHandle,
}

pub fn unit_sphere(material: MaterialHandle) -> Sphere {
    Sphere::new(Vec3::ZERO, 1.0, material)
}

pub fn floor_plane(material: MaterialHandle) -> Plane {
    Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, material)
}

pub fn glow_material() -> Material {
    Material::diffuse(Vec3::ONE).with_emission(Vec3::splat(8.0))
}

/// Interleave every kind of insertion.
///
/// The second material is registered last, after the geometry that
/// references it.
pub fn mixed_scene(scene: &mut Scene) -> Result<MixedScene, ArenaError> {
    let matte = scene.register_material(&Material::diffuse(Vec3::splat(0.8)))?;
    let sphere = scene.insert(&unit_sphere(matte))?;
    let glow = MaterialHandle(1);
    let lamp = scene.insert_emitter(&Sphere::new(Vec3::new(0.0, 4.0, 0.0), 0.5, glow))?;
    let floor = scene.insert(&floor_plane(matte))?;
    let registered = scene.register_material(&glow_material())?;
    debug_assert_eq!(registered, glow);
    scene.set_camera(Camera {
        position: Vec3::new(0.0, 1.0, 6.0),
        ..Camera::default()
    });
    Ok(MixedScene {
        sphere,
        lamp,
        floor,
        matte,
        glow,
    })
}

/// `n` unit spheres spaced along the x axis.
pub fn sphere_grid(scene: &mut Scene, n: usize) -> Result<Vec<ObjOffset>, ArenaError> {
    let material = scene.register_material(&Material::default())?;
    (0..n)
        .map(|i| scene.insert(&Sphere::new(Vec3::new(i as f32 * 2.5, 0.0, 0.0), 1.0, material)))
        .collect()
}
