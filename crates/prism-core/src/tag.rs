//! Type tags for arena entries.

use std::fmt;

/// Identifies the struct layout stored at an arena offset.
///
/// The set is closed: every tag written into a metadata record comes from
/// a [`SceneObject::TYPE`](crate::SceneObject::TYPE) constant, and raw tags
/// read back from memory must go through [`ObjType::from_tag`] before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum ObjType {
    /// A [`Sphere`](crate::Sphere).
    Sphere = 0,
    /// An infinite [`Plane`](crate::Plane).
    Plane = 1,
}

impl ObjType {
    /// Every tag in the enumeration, in discriminant order.
    pub const ALL: [ObjType; 2] = [ObjType::Sphere, ObjType::Plane];

    /// The raw tag value stored in metadata and light records.
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Decode a raw tag, rejecting anything outside the enumeration.
    pub const fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Self::Sphere),
            1 => Some(Self::Plane),
            _ => None,
        }
    }

    /// Size in bytes of the value layout this tag selects.
    pub const fn value_size(self) -> usize {
        match self {
            Self::Sphere => std::mem::size_of::<crate::Sphere>(),
            Self::Plane => std::mem::size_of::<crate::Plane>(),
        }
    }

    /// Lower-case name, as used by scene scripts and diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Plane => "plane",
        }
    }
}

impl fmt::Display for ObjType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for ty in ObjType::ALL {
            assert_eq!(ObjType::from_tag(ty.tag()), Some(ty));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(ObjType::from_tag(2), None);
        assert_eq!(ObjType::from_tag(u32::MAX), None);
    }

    #[test]
    fn value_sizes_differ() {
        assert_eq!(ObjType::Sphere.value_size(), 20);
        assert_eq!(ObjType::Plane.value_size(), 28);
    }
}
