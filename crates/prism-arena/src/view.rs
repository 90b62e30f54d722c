//! Read-only, tag-dispatching view over arena bytes and metadata.
//!
//! [`ArenaView`] borrows a byte slice and a record slice. It works the same
//! whether those slices are the live host arena or a copy that was moved
//! into device memory: offsets are relative to the start of the bytes, so
//! no adjustment is needed after a bulk copy.

use prism_core::{ObjOffset, ObjType, Object, SceneObject};

use crate::error::ArenaError;
use crate::meta::MetaRecord;

/// Borrowed arena contents plus their metadata.
#[derive(Clone, Copy, Debug)]
pub struct ArenaView<'a> {
    bytes: &'a [u8],
    records: &'a [MetaRecord],
}

impl<'a> ArenaView<'a> {
    /// Create a view over already-typed records.
    pub fn new(bytes: &'a [u8], records: &'a [MetaRecord]) -> Self {
        Self { bytes, records }
    }

    /// Create a view from raw metadata bytes, as found in device memory.
    ///
    /// `metadata` must be 8-byte aligned and a whole number of records.
    pub fn from_raw(bytes: &'a [u8], metadata: &'a [u8]) -> Result<Self, ArenaError> {
        let records = bytemuck::try_cast_slice(metadata)
            .map_err(|_| ArenaError::MalformedMetadata { len: metadata.len() })?;
        Ok(Self { bytes, records })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The raw arena bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The metadata records.
    pub fn records(&self) -> &'a [MetaRecord] {
        self.records
    }

    /// Metadata record for `ordinal`.
    pub fn record(&self, ordinal: usize) -> Result<MetaRecord, ArenaError> {
        self.records
            .get(ordinal)
            .copied()
            .ok_or(ArenaError::OrdinalOutOfRange {
                ordinal,
                count: self.records.len(),
            })
    }

    /// Ordinal of the entry starting exactly at `offset`.
    ///
    /// Offsets increase strictly with ordinal, so this is a binary search.
    pub fn ordinal_of(&self, offset: ObjOffset) -> Option<usize> {
        self.records
            .binary_search_by_key(&offset.0, |r| r.offset)
            .ok()
    }

    /// The `len` bytes starting at `offset`, bounds-checked.
    pub fn bytes_at(&self, offset: ObjOffset, len: usize) -> Result<&'a [u8], ArenaError> {
        let out_of_bounds = ArenaError::OffsetOutOfBounds {
            offset: offset.0,
            len,
            size: self.bytes.len(),
        };
        let start = usize::try_from(offset.0).map_err(|_| out_of_bounds.clone())?;
        let end = start.checked_add(len).ok_or(out_of_bounds.clone())?;
        self.bytes.get(start..end).ok_or(out_of_bounds)
    }

    /// Decode the value a `{tag, offset}` pair refers to.
    ///
    /// This is the single dispatch point: unknown tags fail fast instead of
    /// reinterpreting arbitrary bytes.
    pub fn decode(&self, tag: u32, offset: ObjOffset) -> Result<Object, ArenaError> {
        let ty = ObjType::from_tag(tag).ok_or(ArenaError::UnknownTag {
            tag,
            offset: offset.0,
        })?;
        let size = ty.value_size();
        let bytes = self.bytes_at(offset, size)?;
        Object::decode(ty, bytes).ok_or(ArenaError::OffsetOutOfBounds {
            offset: offset.0,
            len: size,
            size: self.bytes.len(),
        })
    }

    /// Decode the `ordinal`-th entry.
    pub fn object(&self, ordinal: usize) -> Result<Object, ArenaError> {
        let record = self.record(ordinal)?;
        self.decode(record.tag, record.offset())
    }

    /// Read the `ordinal`-th entry as a `T`, checking its tag.
    pub fn get<T: SceneObject>(&self, ordinal: usize) -> Result<T, ArenaError> {
        let record = self.record(ordinal)?;
        self.typed(record)
    }

    /// Read the entry starting at `offset` as a `T`, checking its tag.
    pub fn read_at<T: SceneObject>(&self, offset: ObjOffset) -> Result<T, ArenaError> {
        let ordinal = self
            .ordinal_of(offset)
            .ok_or(ArenaError::NoEntry { offset: offset.0 })?;
        self.typed(self.records[ordinal])
    }

    fn typed<T: SceneObject>(&self, record: MetaRecord) -> Result<T, ArenaError> {
        let found = record.ty().ok_or(ArenaError::UnknownTag {
            tag: record.tag,
            offset: record.offset,
        })?;
        if found != T::TYPE {
            return Err(ArenaError::TypeMismatch {
                expected: T::TYPE,
                found,
            });
        }
        let bytes = self.bytes_at(record.offset(), std::mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    /// Decode every entry in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Result<Object, ArenaError>> + 'a {
        let view = *self;
        (0..self.records.len()).map(move |ordinal| view.object(ordinal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::ObjectArena;
    use prism_core::{MaterialHandle, Plane, Sphere, Vec3};

    fn populated() -> ObjectArena {
        let mut arena = ObjectArena::new(&ArenaConfig::default());
        arena
            .insert(&Sphere::new(Vec3::ZERO, 1.0, MaterialHandle(0)))
            .unwrap();
        arena
            .insert(&Plane::new(Vec3::ZERO, Vec3::Y, MaterialHandle(1)))
            .unwrap();
        arena
    }

    #[test]
    fn object_dispatches_on_tag() {
        let arena = populated();
        let view = arena.view();
        assert!(matches!(view.object(0), Ok(Object::Sphere(_))));
        assert!(matches!(view.object(1), Ok(Object::Plane(_))));
        assert!(matches!(
            view.object(2),
            Err(ArenaError::OrdinalOutOfRange { ordinal: 2, count: 2 })
        ));
    }

    #[test]
    fn unknown_tag_fails_fast() {
        let arena = populated();
        let mut records = arena.index().as_slice().to_vec();
        records[1].tag = 9;
        let view = ArenaView::new(arena.as_bytes(), &records);
        assert_eq!(
            view.object(1),
            Err(ArenaError::UnknownTag { tag: 9, offset: 20 })
        );
        assert!(view.object(0).is_ok());
    }

    #[test]
    fn offset_past_end_is_rejected() {
        let arena = populated();
        let mut records = arena.index().as_slice().to_vec();
        records[0].offset = 40;
        let view = ArenaView::new(arena.as_bytes(), &records);
        assert!(matches!(
            view.object(0),
            Err(ArenaError::OffsetOutOfBounds { offset: 40, .. })
        ));
    }

    #[test]
    fn read_at_requires_entry_start() {
        let arena = populated();
        let view = arena.view();
        assert!(view.read_at::<Plane>(ObjOffset(20)).is_ok());
        assert_eq!(
            view.read_at::<Plane>(ObjOffset(4)),
            Err(ArenaError::NoEntry { offset: 4 })
        );
    }

    #[test]
    fn from_raw_rejects_partial_records() {
        let arena = populated();
        let meta = arena.index().as_bytes();
        assert!(ArenaView::from_raw(arena.as_bytes(), meta).is_ok());
        assert!(matches!(
            ArenaView::from_raw(arena.as_bytes(), &meta[..20]),
            Err(ArenaError::MalformedMetadata { len: 20 })
        ));
    }

    #[test]
    fn iter_yields_every_entry() {
        let arena = populated();
        let tags: Vec<_> = arena
            .view()
            .iter()
            .map(|o| o.unwrap().tag())
            .collect();
        assert_eq!(tags, vec![ObjType::Sphere, ObjType::Plane]);
    }
}
