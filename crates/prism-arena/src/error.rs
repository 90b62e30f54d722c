//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use prism_core::{MaterialHandle, ObjType};

/// Which of the scene stores an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// The object byte arena.
    Objects,
    /// The metadata index kept in lockstep with the arena.
    Metadata,
    /// The light registry.
    Lights,
    /// The material registry.
    Materials,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Objects => "object arena",
            Self::Metadata => "metadata index",
            Self::Lights => "light registry",
            Self::Materials => "material registry",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// A store could not grow: either the allocator refused or the
    /// configured limit would be exceeded. The store is left unchanged.
    OutOfMemory {
        /// The store that failed to grow.
        store: StoreKind,
        /// Units requested (bytes for the arena, entries otherwise).
        requested: usize,
        /// Configured limit in the same units.
        capacity: usize,
    },
    /// A metadata or light record carries a tag outside [`ObjType`].
    UnknownTag {
        /// The raw tag.
        tag: u32,
        /// Offset the record points at.
        offset: u64,
    },
    /// A record points past the end of the arena.
    OffsetOutOfBounds {
        /// Start of the requested range.
        offset: u64,
        /// Length of the requested range in bytes.
        len: usize,
        /// Current arena size in bytes.
        size: usize,
    },
    /// No entry starts at the given offset.
    NoEntry {
        /// The offset that was looked up.
        offset: u64,
    },
    /// A typed read found a different tag at the requested entry.
    TypeMismatch {
        /// Type the caller asked for.
        expected: ObjType,
        /// Type recorded in the metadata index.
        found: ObjType,
    },
    /// Ordinal past the end of the metadata index or light registry.
    OrdinalOutOfRange {
        /// The requested ordinal.
        ordinal: usize,
        /// Number of entries present.
        count: usize,
    },
    /// Material handle not issued by this registry.
    UnknownMaterial {
        /// The handle.
        handle: MaterialHandle,
        /// Number of registered materials.
        count: usize,
    },
    /// Raw metadata bytes are not a whole, aligned array of records.
    MalformedMetadata {
        /// Length of the rejected byte slice.
        len: usize,
    },
    /// Configuration rejected at construction.
    InvalidConfig {
        /// Human-readable reason.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                store,
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "{store} out of memory: requested {requested}, limit {capacity}"
                )
            }
            Self::UnknownTag { tag, offset } => {
                write!(f, "unknown type tag {tag} at offset {offset}")
            }
            Self::OffsetOutOfBounds { offset, len, size } => {
                write!(
                    f,
                    "range {offset}..{offset}+{len} out of bounds for arena of {size} bytes"
                )
            }
            Self::NoEntry { offset } => {
                write!(f, "no arena entry starts at offset {offset}")
            }
            Self::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {expected}, found {found}")
            }
            Self::OrdinalOutOfRange { ordinal, count } => {
                write!(f, "ordinal {ordinal} out of range ({count} entries)")
            }
            Self::UnknownMaterial { handle, count } => {
                write!(f, "unknown material {handle} ({count} registered)")
            }
            Self::MalformedMetadata { len } => {
                write!(f, "malformed metadata buffer of {len} bytes")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
