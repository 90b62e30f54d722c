//! Benchmark profiles for the Prism scene substrate.
//!
//! - [`reference_scene`]: 10K mixed objects, 10% lights, 16 materials
//! - [`stress_scene`]: 100K mixed objects

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use prism_arena::{ArenaConfig, ArenaError, GrowthPolicy};
use prism_scene::Scene;
use prism_test_utils::{random_scene, RandomSceneSpec};

/// Build a populated scene with `objects` entries under `growth`.
pub fn populated_scene(
    objects: usize,
    growth: GrowthPolicy,
    seed: u64,
) -> Result<Scene, ArenaError> {
    let mut scene = Scene::new(ArenaConfig::new(growth))?;
    let spec = RandomSceneSpec {
        objects,
        materials: 16,
        light_ratio: 0.1,
    };
    random_scene(&mut scene, spec, seed)?;
    Ok(scene)
}

/// 10K objects with doubling growth.
pub fn reference_scene(seed: u64) -> Result<Scene, ArenaError> {
    populated_scene(10_000, GrowthPolicy::Doubling, seed)
}

/// 100K objects with doubling growth.
pub fn stress_scene(seed: u64) -> Result<Scene, ArenaError> {
    populated_scene(100_000, GrowthPolicy::Doubling, seed)
}
