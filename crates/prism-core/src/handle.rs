//! Handles to stored scene values.
//!
//! Neither handle is an address. An [`ObjOffset`] is a byte position into
//! the object arena and a [`MaterialHandle`] is an index into the material
//! registry; both stay valid when the backing buffers are reallocated and
//! when the scene is copied into device memory.

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// Byte offset of an object within the object arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct ObjOffset(pub u64);

impl fmt::Display for ObjOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

/// Index of a material in the material registry.
///
/// Stored inline in geometry records, so it is `Pod` and exactly 4 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct MaterialHandle(pub u32);

impl MaterialHandle {
    /// The handle as a slice index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MaterialHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_display_their_kind() {
        assert_eq!(ObjOffset(48).to_string(), "+48");
        assert_eq!(MaterialHandle(3).to_string(), "#3");
    }

    #[test]
    fn material_handle_is_a_plain_index() {
        assert_eq!(MaterialHandle(7).index(), 7);
        assert_eq!(bytemuck::bytes_of(&MaterialHandle(7)), &7u32.to_ne_bytes());
    }
}
