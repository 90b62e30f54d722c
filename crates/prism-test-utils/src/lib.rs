//! Test fixtures and mock devices for Prism development.
//!
//! Provides a handful of canned scenes ([`fixtures`]), a seeded random
//! scene generator ([`random_scene`]), and [`DeviceMemory`] doubles that
//! fail on demand ([`FailingDevice`], [`TruncatingDevice`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod devices;
pub mod fixtures;

pub use devices::{FailingDevice, TruncatingDevice};

use prism_arena::ArenaError;
use prism_core::{Material, MaterialHandle, Plane, Sphere, Vec3};
use prism_scene::Scene;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Shape of a generated scene.
#[derive(Clone, Copy, Debug)]
pub struct RandomSceneSpec {
    pub objects: usize,
    pub materials: usize,
    /// Probability that an inserted object is also registered as a light.
    pub light_ratio: f64,
}

impl Default for RandomSceneSpec {
    fn default() -> Self {
        Self {
            objects: 256,
            materials: 8,
            light_ratio: 0.1,
        }
    }
}

/// Fill `scene` with a reproducible mix of spheres and planes.
///
/// The same `seed` always yields the same insertion sequence. Stops at the
/// first insertion the scene rejects.
pub fn random_scene(
    scene: &mut Scene,
    spec: RandomSceneSpec,
    seed: u64,
) -> Result<(), ArenaError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let materials = spec.materials.max(1);
    let light_ratio = spec.light_ratio.clamp(0.0, 1.0);
    for _ in 0..materials {
        let color = Vec3::new(
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
            rng.random_range(0.0..1.0),
        );
        let mut material = Material::diffuse(color);
        if rng.random_bool(0.25) {
            material = material.with_emission(color * 4.0);
        }
        scene.register_material(&material)?;
    }

    for _ in 0..spec.objects {
        let handle = MaterialHandle(rng.random_range(0..materials as u32));
        let emitter = rng.random_bool(light_ratio);
        let center = Vec3::new(
            rng.random_range(-50.0..50.0),
            rng.random_range(-50.0..50.0),
            rng.random_range(-50.0..50.0),
        );
        if rng.random_range(0..4u32) == 0 {
            let normal = Vec3::new(
                rng.random_range(-1.0..1.0),
                1.0,
                rng.random_range(-1.0..1.0),
            );
            let plane = Plane::new(center, normal, handle);
            if emitter {
                scene.insert_emitter(&plane)?;
            } else {
                scene.insert(&plane)?;
            }
        } else {
            let sphere = Sphere::new(center, rng.random_range(0.1..5.0), handle);
            if emitter {
                scene.insert_emitter(&sphere)?;
            } else {
                scene.insert(&sphere)?;
            }
        }
    }
    Ok(())
}
