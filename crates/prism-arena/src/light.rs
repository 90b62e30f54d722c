//! Registry of light-emitting arena entries.
//!
//! A light is not a separate object kind: it is a `{tag, offset}` pair
//! pointing at geometry that already lives in the object arena. The same
//! entry is therefore visible both as plain geometry (through the metadata
//! index) and as an emitter (through this registry).

use bytemuck::{Pod, Zeroable};
use prism_core::{ObjOffset, ObjType};

use crate::config::ArenaConfig;
use crate::error::{ArenaError, StoreKind};

/// Type tag and arena offset of one emitter.
///
/// Same layout as [`MetaRecord`](crate::MetaRecord).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct LightEntry {
    /// Raw [`ObjType`] tag of the emitting geometry.
    pub tag: u32,
    _pad: u32,
    /// Arena offset of the emitting geometry.
    pub offset: u64,
}

impl LightEntry {
    /// Create an entry for geometry of type `ty` at `offset`.
    pub fn new(ty: ObjType, offset: ObjOffset) -> Self {
        Self {
            tag: ty.tag(),
            _pad: 0,
            offset: offset.0,
        }
    }

    /// Decode the tag.
    pub fn ty(&self) -> Option<ObjType> {
        ObjType::from_tag(self.tag)
    }

    /// The offset as a handle.
    pub fn offset(&self) -> ObjOffset {
        ObjOffset(self.offset)
    }
}

/// Append-only list of emitters.
///
/// Entries are neither deduplicated nor validated against the arena;
/// callers register a light right after inserting its geometry.
#[derive(Clone, Debug)]
pub struct LightRegistry {
    entries: Vec<LightEntry>,
    max_entries: usize,
}

impl LightRegistry {
    /// Create an empty registry.
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: config.max_lights,
        }
    }

    /// Append an emitter, returning its light ordinal.
    pub fn register(&mut self, ty: ObjType, offset: ObjOffset) -> Result<usize, ArenaError> {
        self.reserve_one()?;
        self.entries.push(LightEntry::new(ty, offset));
        Ok(self.entries.len() - 1)
    }

    /// Ensure the next [`register`](Self::register) cannot fail.
    pub fn reserve_one(&mut self) -> Result<(), ArenaError> {
        let out_of_memory = ArenaError::OutOfMemory {
            store: StoreKind::Lights,
            requested: 1,
            capacity: self.max_entries,
        };
        if self.entries.len() >= self.max_entries {
            return Err(out_of_memory);
        }
        self.entries.try_reserve(1).map_err(|_| out_of_memory)
    }

    /// The `ordinal`-th registered light.
    pub fn get(&self, ordinal: usize) -> Option<LightEntry> {
        self.entries.get(ordinal).copied()
    }

    /// Number of lights.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no lights are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &LightEntry> {
        self.entries.iter()
    }

    /// All entries as a slice.
    pub fn as_slice(&self) -> &[LightEntry] {
        &self.entries
    }

    /// All entries as raw bytes, for device transfer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }

    /// Bytes held by the backing allocation.
    pub fn memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<LightEntry>()
    }

    /// Release the allocation.
    pub fn release(&mut self) {
        self.entries = Vec::new();
    }
}
