//! The insertable-value capability and the closed object union.

use bytemuck::Pod;

use crate::geometry::{Plane, Sphere};
use crate::handle::MaterialHandle;
use crate::tag::ObjType;

/// A fixed-size, pointer-free value with an associated type tag.
///
/// Implementors are stored in the object arena as their raw bytes and
/// reinterpreted later by looking up [`SceneObject::TYPE`] in the
/// metadata index. `Pod` guarantees any byte pattern of the right size is
/// a valid value, so reading back never needs `unsafe`.
pub trait SceneObject: Pod {
    /// Tag written alongside every value of this type.
    const TYPE: ObjType;

    /// Material the surface is shaded with.
    fn material(&self) -> MaterialHandle;
}

/// Any value of the closed set of insertable object kinds.
///
/// This is the decoded form of an arena entry: dispatching on the tag in
/// a metadata record yields one of these variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Object {
    /// A sphere.
    Sphere(Sphere),
    /// A plane.
    Plane(Plane),
}

impl Object {
    /// Tag of the contained value.
    pub fn tag(&self) -> ObjType {
        match self {
            Self::Sphere(_) => ObjType::Sphere,
            Self::Plane(_) => ObjType::Plane,
        }
    }

    /// Material of the contained value.
    pub fn material(&self) -> MaterialHandle {
        match self {
            Self::Sphere(s) => s.material(),
            Self::Plane(p) => p.material(),
        }
    }

    /// Raw bytes of the contained value.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sphere(s) => bytemuck::bytes_of(s),
            Self::Plane(p) => bytemuck::bytes_of(p),
        }
    }

    /// Decode a value of type `ty` from exactly `ty.value_size()` bytes.
    ///
    /// Returns `None` if `bytes` has the wrong length. The bytes need not
    /// be aligned.
    pub fn decode(ty: ObjType, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != ty.value_size() {
            return None;
        }
        Some(match ty {
            ObjType::Sphere => Self::Sphere(bytemuck::pod_read_unaligned(bytes)),
            ObjType::Plane => Self::Plane(bytemuck::pod_read_unaligned(bytes)),
        })
    }
}

impl From<Sphere> for Object {
    fn from(s: Sphere) -> Self {
        Self::Sphere(s)
    }
}

impl From<Plane> for Object {
    fn from(p: Plane) -> Self {
        Self::Plane(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn decode_reverses_as_bytes() {
        let obj = Object::from(Plane::new(Vec3::ONE, Vec3::Z, MaterialHandle(3)));
        let decoded = Object::decode(obj.tag(), obj.as_bytes()).unwrap();
        assert_eq!(decoded, obj);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let s = Sphere::new(Vec3::ZERO, 1.0, MaterialHandle(0));
        let bytes = bytemuck::bytes_of(&s);
        assert!(Object::decode(ObjType::Plane, bytes).is_none());
        assert!(Object::decode(ObjType::Sphere, &bytes[..19]).is_none());
    }

    #[test]
    fn decode_accepts_unaligned_input() {
        let s = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 4.0, MaterialHandle(5));
        let mut buf = vec![0u8; 1];
        buf.extend_from_slice(bytemuck::bytes_of(&s));
        let decoded = Object::decode(ObjType::Sphere, &buf[1..]).unwrap();
        assert_eq!(decoded, Object::Sphere(s));
    }
}
