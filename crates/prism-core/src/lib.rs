//! Core value types for Prism scenes.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! closed set of insertable object kinds, their type tags, the material
//! and camera records, and the handles used to refer to stored values.
//!
//! Every type that crosses the device boundary is `#[repr(C)]` and
//! [`bytemuck::Pod`], so a scene can be copied byte-for-byte into a
//! second memory space and reinterpreted there without fix-ups.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod camera;
pub mod geometry;
pub mod handle;
pub mod material;
pub mod object;
pub mod tag;

pub use camera::{Camera, RenderConfig};
pub use geometry::{Plane, Sphere};
pub use handle::{MaterialHandle, ObjOffset};
pub use material::Material;
pub use object::{Object, SceneObject};
pub use tag::ObjType;

pub use glam::Vec3;
