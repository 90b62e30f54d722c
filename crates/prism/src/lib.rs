//! Prism: scene storage and device transfer for a parallel ray tracer.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Prism sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use prism::prelude::*;
//!
//! let mut scene = Scene::default();
//! let white = scene.register_material(&Material::diffuse(Vec3::ONE)).unwrap();
//! scene.insert(&Sphere::new(Vec3::ZERO, 1.0, white)).unwrap();
//! scene.insert(&Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, white)).unwrap();
//!
//! let mut device = HostDevice::new();
//! let uploaded = upload_scene(&mut device, &scene.freeze()).unwrap();
//! let census = CensusKernel::run_all(&uploaded, &LaunchConfig::default()).unwrap();
//! assert_eq!((census.spheres, census.planes), (1, 1));
//!
//! scene.destroy();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `prism-core` | Geometry, materials, camera, handles, type tags |
//! | [`arena`] | `prism-arena` | Object arena, metadata index, light and material registries |
//! | [`scene`] | `prism-scene` | Scene lifecycle, transfer contract, device upload, kernels |
//! | [`script`] | `prism-script` | JSON scene scripts |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Plain-data scene types (`prism-core`).
pub use prism_core as types;

/// Arena storage and registries (`prism-arena`).
///
/// [`arena::ObjectArena`] stores heterogeneous geometry back to back;
/// [`arena::ArenaView`] is where type tags are dispatched.
pub use prism_arena as arena;

/// Scene lifecycle and device transfer (`prism-scene`).
pub use prism_scene as scene;

/// Scene script front end (`prism-script`).
pub use prism_script as script;

/// Common imports for typical Prism usage.
pub mod prelude {
    // Core types
    pub use prism_core::{
        Camera, Material, MaterialHandle, ObjOffset, ObjType, Object, Plane, RenderConfig,
        SceneObject, Sphere, Vec3,
    };

    // Arena
    pub use prism_arena::{ArenaConfig, ArenaError, ArenaView, GrowthPolicy};

    // Scene and device
    pub use prism_scene::{
        launch, upload_scene, Census, CensusKernel, DeviceMemory, DeviceScene, HostDevice,
        Kernel, LaunchConfig, Scene, TransferContract, TransferError,
    };

    // Scripts
    pub use prism_script::{run_file, run_str, ScriptError};
}
