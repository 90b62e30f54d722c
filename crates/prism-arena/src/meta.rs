//! The metadata index: one `{tag, offset}` record per arena entry.
//!
//! The index is the only place type information lives. The arena itself
//! is untyped bytes; resolving ordinal `n` means reading record `n`,
//! decoding its tag, and reinterpreting the bytes at its offset.

use bytemuck::{Pod, Zeroable};
use prism_core::{ObjOffset, ObjType};

use crate::error::{ArenaError, StoreKind};

/// Type tag and arena offset of one stored value.
///
/// Fixed 16-byte stride with explicit padding so the index can be copied
/// to device memory and cast back without layout differences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct MetaRecord {
    /// Raw [`ObjType`] tag.
    pub tag: u32,
    _pad: u32,
    /// Byte offset of the value within the arena.
    pub offset: u64,
}

impl MetaRecord {
    /// Create a record for a value of type `ty` at `offset`.
    pub fn new(ty: ObjType, offset: ObjOffset) -> Self {
        Self {
            tag: ty.tag(),
            _pad: 0,
            offset: offset.0,
        }
    }

    /// Decode the tag, or `None` if it lies outside the enumeration.
    pub fn ty(&self) -> Option<ObjType> {
        ObjType::from_tag(self.tag)
    }

    /// The offset as a handle.
    pub fn offset(&self) -> ObjOffset {
        ObjOffset(self.offset)
    }
}

/// Insertion-ordered metadata records, parallel to the object arena.
///
/// Only [`ObjectArena`](crate::ObjectArena) appends to the index, and it
/// does so in the same call that appends the value bytes, so
/// `index.len() == arena.entry_count()` holds after every mutation.
#[derive(Clone, Debug, Default)]
pub struct MetadataIndex {
    records: Vec<MetaRecord>,
}

impl MetadataIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for the `ordinal`-th insertion.
    pub fn lookup(&self, ordinal: usize) -> Option<MetaRecord> {
        self.records.get(ordinal).copied()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MetaRecord> {
        self.records.iter()
    }

    /// All records as a contiguous slice.
    pub fn as_slice(&self) -> &[MetaRecord] {
        &self.records
    }

    /// All records as raw bytes, for device transfer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }

    /// Bytes held by the backing allocation.
    pub fn capacity_bytes(&self) -> usize {
        self.records.capacity() * std::mem::size_of::<MetaRecord>()
    }

    /// Ensure room for one more record without appending it.
    pub(crate) fn reserve_one(&mut self) -> Result<(), ArenaError> {
        self.records
            .try_reserve(1)
            .map_err(|_| ArenaError::OutOfMemory {
                store: StoreKind::Metadata,
                requested: 1,
                capacity: self.records.capacity(),
            })
    }

    /// Append a record. Callers must have reserved first.
    pub(crate) fn push(&mut self, record: MetaRecord) {
        debug_assert!(self.records.len() < self.records.capacity());
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_16_bytes() {
        assert_eq!(std::mem::size_of::<MetaRecord>(), 16);
        assert_eq!(std::mem::align_of::<MetaRecord>(), 8);
    }

    #[test]
    fn lookup_returns_records_in_order() {
        let mut index = MetadataIndex::new();
        for (i, ty) in [ObjType::Sphere, ObjType::Plane].into_iter().enumerate() {
            index.reserve_one().unwrap();
            index.push(MetaRecord::new(ty, ObjOffset(i as u64 * 20)));
        }
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup(1).unwrap().ty(), Some(ObjType::Plane));
        assert_eq!(index.lookup(1).unwrap().offset(), ObjOffset(20));
        assert!(index.lookup(2).is_none());
    }

    #[test]
    fn foreign_tag_does_not_decode() {
        let mut record = MetaRecord::new(ObjType::Sphere, ObjOffset(0));
        record.tag = 42;
        assert_eq!(record.ty(), None);
    }

    #[test]
    fn bytes_cover_every_record() {
        let mut index = MetadataIndex::new();
        index.reserve_one().unwrap();
        index.push(MetaRecord::new(ObjType::Plane, ObjOffset(8)));
        let bytes = index.as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &1u32.to_ne_bytes());
        assert_eq!(&bytes[8..16], &8u64.to_ne_bytes());
    }
}
