//! Geometry records stored in the object arena.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::handle::MaterialHandle;
use crate::object::SceneObject;
use crate::tag::ObjType;

/// A sphere given by centre and radius.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Sphere {
    /// Centre in world space.
    pub center: Vec3,
    /// Radius; scene scripts reject non-positive values.
    pub radius: f32,
    /// Surface material.
    pub material: MaterialHandle,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Vec3, radius: f32, material: MaterialHandle) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl SceneObject for Sphere {
    const TYPE: ObjType = ObjType::Sphere;

    fn material(&self) -> MaterialHandle {
        self.material
    }
}

/// An infinite plane through `point` with unit `normal`.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Plane {
    /// Any point on the plane.
    pub point: Vec3,
    /// Plane normal. Stored normalised when built through [`Plane::new`].
    pub normal: Vec3,
    /// Surface material.
    pub material: MaterialHandle,
}

impl Plane {
    /// Create a plane, normalising `normal`.
    ///
    /// A zero normal stays zero; callers validate before construction.
    pub fn new(point: Vec3, normal: Vec3, material: MaterialHandle) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            material,
        }
    }
}

impl SceneObject for Plane {
    const TYPE: ObjType = ObjType::Plane;

    fn material(&self) -> MaterialHandle {
        self.material
    }
}
