//! The object arena: heterogeneous values packed back-to-back in one
//! growable byte buffer.
//!
//! Values carry no type information of their own. Each insertion appends
//! the value's bytes and a [`MetaRecord`] in the same call, and returns the
//! pre-growth buffer length as the value's [`ObjOffset`]. Offsets are the
//! only durable reference: growth may move the whole buffer, so every
//! access is computed from the current base.

use prism_core::{Object, ObjOffset, ObjType, SceneObject};

use crate::config::{ArenaConfig, GrowthPolicy};
use crate::error::{ArenaError, StoreKind};
use crate::meta::{MetaRecord, MetadataIndex};
use crate::view::ArenaView;

/// Growable byte arena with a lockstep metadata index.
///
/// Growth never reallocates in place: a replacement buffer is reserved
/// first, the old contents copied over, and only then is the old buffer
/// dropped. A failed reservation therefore leaves both the bytes and the
/// index exactly as they were.
pub struct ObjectArena {
    /// Value bytes. `data.len()` is the arena size.
    data: Vec<u8>,
    /// One record per stored value.
    index: MetadataIndex,
    growth: GrowthPolicy,
    initial_bytes: usize,
    max_bytes: usize,
    /// Number of times a non-empty allocation was replaced.
    relocations: u64,
}

impl ObjectArena {
    /// Create an empty arena. No memory is reserved until the first insert.
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            data: Vec::new(),
            index: MetadataIndex::new(),
            growth: config.growth,
            initial_bytes: config.initial_object_bytes,
            max_bytes: config.max_object_bytes,
            relocations: 0,
        }
    }

    /// Append `value` and its metadata record, returning its offset.
    ///
    /// On error neither the bytes nor the index change.
    pub fn insert<T: SceneObject>(&mut self, value: &T) -> Result<ObjOffset, ArenaError> {
        self.append(T::TYPE, bytemuck::bytes_of(value))
    }

    /// Append a value of whichever kind `object` holds.
    pub fn insert_object(&mut self, object: &Object) -> Result<ObjOffset, ArenaError> {
        self.append(object.tag(), object.as_bytes())
    }

    fn append(&mut self, ty: ObjType, bytes: &[u8]) -> Result<ObjOffset, ArenaError> {
        debug_assert_eq!(bytes.len(), ty.value_size());

        // Both reservations happen before either append.
        self.reserve(bytes.len())?;
        self.index.reserve_one()?;

        let offset = ObjOffset(self.data.len() as u64);
        self.data.extend_from_slice(bytes);
        self.index.push(MetaRecord::new(ty, offset));
        Ok(offset)
    }

    /// Make room for `additional` bytes, relocating if necessary.
    fn reserve(&mut self, additional: usize) -> Result<(), ArenaError> {
        let out_of_memory = ArenaError::OutOfMemory {
            store: StoreKind::Objects,
            requested: additional,
            capacity: self.max_bytes,
        };
        let required = match self.data.len().checked_add(additional) {
            Some(required) if required <= self.max_bytes => required,
            _ => return Err(out_of_memory),
        };
        if required <= self.data.capacity() {
            return Ok(());
        }

        let target = match self.growth {
            GrowthPolicy::Exact => required,
            GrowthPolicy::Doubling => required
                .max(self.data.capacity().saturating_mul(2))
                .max(self.initial_bytes)
                .min(self.max_bytes),
        };

        let mut next = Vec::new();
        next.try_reserve_exact(target).map_err(|_| out_of_memory)?;
        next.extend_from_slice(&self.data);

        if self.data.capacity() > 0 {
            self.relocations += 1;
            log::debug!(
                "object arena relocated: {} -> {} bytes ({} entries)",
                self.data.capacity(),
                next.capacity(),
                self.index.len(),
            );
        }
        self.data = next;
        Ok(())
    }

    /// Read back the value stored at `offset` as a `T`.
    ///
    /// Fails if no entry starts at `offset` or its tag is not `T::TYPE`.
    pub fn read<T: SceneObject>(&self, offset: ObjOffset) -> Result<T, ArenaError> {
        self.view().read_at::<T>(offset)
    }

    /// The `len` bytes starting at `offset`.
    pub fn bytes_at(&self, offset: ObjOffset, len: usize) -> Result<&[u8], ArenaError> {
        self.view().bytes_at(offset, len)
    }

    /// Metadata record for the `ordinal`-th insertion.
    pub fn lookup(&self, ordinal: usize) -> Option<MetaRecord> {
        self.index.lookup(ordinal)
    }

    /// Read-only tag-dispatching view over the current contents.
    pub fn view(&self) -> ArenaView<'_> {
        ArenaView::new(&self.data, self.index.as_slice())
    }

    /// The metadata index.
    pub fn index(&self) -> &MetadataIndex {
        &self.index
    }

    /// Stored bytes, in insertion order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Current base address of the byte buffer.
    ///
    /// Only meaningful until the next insertion; never derive a value
    /// address from it and keep that address across insertions.
    pub fn base_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Arena size in bytes.
    pub fn len_bytes(&self) -> usize {
        self.data.len()
    }

    /// Bytes held by the backing allocation.
    pub fn capacity_bytes(&self) -> usize {
        self.data.capacity()
    }

    /// Number of stored values.
    pub fn entry_count(&self) -> usize {
        self.index.len()
    }

    /// Whether nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// How many times growth has moved a non-empty buffer.
    pub fn relocations(&self) -> u64 {
        self.relocations
    }

    /// The growth policy in use.
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Total bytes allocated for values and metadata.
    pub fn memory_bytes(&self) -> usize {
        self.data.capacity() + self.index.capacity_bytes()
    }

    /// Release both allocations and return to the empty state.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.index = MetadataIndex::new();
        self.relocations = 0;
    }
}
