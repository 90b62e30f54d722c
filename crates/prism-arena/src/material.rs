//! Registry of material values.

use prism_core::{Material, MaterialHandle};

use crate::config::ArenaConfig;
use crate::error::{ArenaError, StoreKind};

/// Flat array of materials addressed by [`MaterialHandle`].
///
/// Registration copies the value, so the caller's original can be changed
/// or dropped freely. Identical materials registered twice occupy two
/// slots and get two handles.
#[derive(Clone, Debug)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    max_entries: usize,
}

impl MaterialRegistry {
    /// Create an empty registry.
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            materials: Vec::new(),
            max_entries: config.max_materials,
        }
    }

    /// Store a copy of `material` and return its handle.
    pub fn register(&mut self, material: &Material) -> Result<MaterialHandle, ArenaError> {
        let out_of_memory = ArenaError::OutOfMemory {
            store: StoreKind::Materials,
            requested: 1,
            capacity: self.max_entries,
        };
        let index = self.materials.len();
        if index >= self.max_entries {
            return Err(out_of_memory);
        }
        let handle = u32::try_from(index)
            .map(MaterialHandle)
            .map_err(|_| out_of_memory.clone())?;
        self.materials.try_reserve(1).map_err(|_| out_of_memory)?;
        self.materials.push(*material);
        Ok(handle)
    }

    /// Resolve a handle.
    pub fn get(&self, handle: MaterialHandle) -> Result<&Material, ArenaError> {
        self.materials
            .get(handle.index())
            .ok_or(ArenaError::UnknownMaterial {
                handle,
                count: self.materials.len(),
            })
    }

    /// Number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no materials are registered.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    /// All materials as a slice.
    pub fn as_slice(&self) -> &[Material] {
        &self.materials
    }

    /// All materials as raw bytes, for device transfer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.materials)
    }

    /// Bytes held by the backing allocation.
    pub fn memory_bytes(&self) -> usize {
        self.materials.capacity() * std::mem::size_of::<Material>()
    }

    /// Release the allocation.
    pub fn release(&mut self) {
        self.materials = Vec::new();
    }
}
