//! Reference traversal kernel.
//!
//! [`CensusKernel`] walks every geometry entry and every light in the
//! device copy, dispatching on type tags exactly as a shading kernel
//! would, and tallies what it finds. It validates the whole substrate
//! (tags, offsets, light links, material handles) without tracing rays.

use std::ops::Add;

use prism_arena::ArenaError;
use prism_core::Object;

use crate::device::{DeviceBuffer, DeviceScene, DeviceView};
use crate::kernel::{launch, Kernel, LaunchConfig, ThreadIndex};

/// Tallies gathered by a census.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    /// Sphere entries.
    pub spheres: usize,
    /// Plane entries.
    pub planes: usize,
    /// Lights that resolved to a geometry entry.
    pub lights: usize,
    /// Geometry entries whose material emits.
    pub emissive_surfaces: usize,
    /// Arena bytes decoded.
    pub bytes_visited: usize,
}

impl Census {
    /// Total geometry entries.
    pub fn objects(&self) -> usize {
        self.spheres + self.planes
    }
}

impl Add for Census {
    type Output = Census;

    fn add(self, rhs: Census) -> Census {
        Census {
            spheres: self.spheres + rhs.spheres,
            planes: self.planes + rhs.planes,
            lights: self.lights + rhs.lights,
            emissive_surfaces: self.emissive_surfaces + rhs.emissive_surfaces,
            bytes_visited: self.bytes_visited + rhs.bytes_visited,
        }
    }
}

/// Counts geometry and lights, failing on the first inconsistency.
#[derive(Clone, Copy, Debug, Default)]
pub struct CensusKernel;

impl CensusKernel {
    /// Launch over `scene` and sum the per-thread tallies.
    pub fn run_all<B: DeviceBuffer>(
        scene: &DeviceScene<B>,
        config: &LaunchConfig,
    ) -> Result<Census, ArenaError> {
        launch(scene, &CensusKernel, config)?
            .into_iter()
            .try_fold(Census::default(), |acc, part| Ok(acc + part?))
    }

    fn visit_light(view: &DeviceView<'_>, ordinal: usize) -> Result<(), ArenaError> {
        let entry = view.lights()[ordinal];
        let arena = view.objects();
        // A light must point at the start of a geometry entry with the same tag.
        let record_ordinal = arena
            .ordinal_of(entry.offset())
            .ok_or(ArenaError::NoEntry {
                offset: entry.offset,
            })?;
        let record = arena.record(record_ordinal)?;
        if record.tag != entry.tag {
            let unknown = |tag| ArenaError::UnknownTag {
                tag,
                offset: entry.offset,
            };
            return Err(ArenaError::TypeMismatch {
                expected: entry.ty().ok_or_else(|| unknown(entry.tag))?,
                found: record.ty().ok_or_else(|| unknown(record.tag))?,
            });
        }
        view.light(ordinal).map(|_| ())
    }
}

impl Kernel for CensusKernel {
    type Output = Result<Census, ArenaError>;

    fn name(&self) -> &str {
        "census"
    }

    fn run(&self, view: &DeviceView<'_>, thread: ThreadIndex) -> Self::Output {
        let mut census = Census::default();
        let arena = view.objects();

        for ordinal in thread.stride(view.object_count()) {
            let object = arena.object(ordinal)?;
            match object {
                Object::Sphere(_) => census.spheres += 1,
                Object::Plane(_) => census.planes += 1,
            }
            if view.material(object.material())?.is_emissive() {
                census.emissive_surfaces += 1;
            }
            census.bytes_visited += object.as_bytes().len();
        }

        for ordinal in thread.stride(view.lights().len()) {
            Self::visit_light(view, ordinal)?;
            census.lights += 1;
        }

        Ok(census)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{upload_scene, HostDevice};
    use crate::Scene;
    use prism_core::{Material, ObjOffset, ObjType, Plane, Sphere, Vec3};

    fn census_of(scene: &Scene, threads: usize) -> Result<Census, ArenaError> {
        let mut device = HostDevice::new();
        let uploaded = upload_scene(&mut device, &scene.freeze()).unwrap();
        CensusKernel::run_all(&uploaded, &LaunchConfig::with_threads(threads))
    }

    fn lit_scene() -> Scene {
        let mut scene = Scene::default();
        let matte = scene
            .register_material(&Material::diffuse(Vec3::ONE))
            .unwrap();
        let lamp = scene
            .register_material(&Material::diffuse(Vec3::ONE).with_emission(Vec3::splat(4.0)))
            .unwrap();
        scene
            .insert(&Sphere::new(Vec3::ZERO, 1.0, matte))
            .unwrap();
        scene
            .insert_emitter(&Sphere::new(Vec3::Y * 5.0, 0.5, lamp))
            .unwrap();
        scene
            .insert(&Plane::new(Vec3::ZERO, Vec3::Y, matte))
            .unwrap();
        scene
    }

    #[test]
    fn counts_every_entry_once() {
        let scene = lit_scene();
        for threads in [1, 2, 7] {
            let census = census_of(&scene, threads).unwrap();
            assert_eq!(census.spheres, 2);
            assert_eq!(census.planes, 1);
            assert_eq!(census.lights, 1);
            assert_eq!(census.emissive_surfaces, 1);
            assert_eq!(census.bytes_visited, scene.objects().len_bytes());
        }
    }

    #[test]
    fn empty_scene_has_empty_census() {
        let census = census_of(&Scene::default(), 4).unwrap();
        assert_eq!(census, Census::default());
        assert_eq!(census.objects(), 0);
    }

    #[test]
    fn light_with_wrong_tag_is_rejected() {
        let mut scene = lit_scene();
        scene.register_light(ObjType::Plane, ObjOffset(0)).unwrap();
        assert_eq!(
            census_of(&scene, 1).unwrap_err(),
            ArenaError::TypeMismatch {
                expected: ObjType::Plane,
                found: ObjType::Sphere,
            }
        );
    }

    #[test]
    fn light_inside_an_entry_is_rejected() {
        let mut scene = lit_scene();
        scene.register_light(ObjType::Sphere, ObjOffset(4)).unwrap();
        assert_eq!(
            census_of(&scene, 1).unwrap_err(),
            ArenaError::NoEntry { offset: 4 }
        );
    }

    #[test]
    fn dangling_material_is_rejected() {
        let mut scene = Scene::default();
        let handle = prism_core::MaterialHandle(3);
        scene.insert(&Sphere::new(Vec3::ZERO, 1.0, handle)).unwrap();
        assert_eq!(
            census_of(&scene, 1).unwrap_err(),
            ArenaError::UnknownMaterial { handle, count: 0 }
        );
    }
}
