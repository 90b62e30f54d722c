//! Flat heterogeneous storage for Prism scenes.
//!
//! Objects of different kinds and sizes live back-to-back in a single
//! byte buffer. A parallel metadata index records each entry's type tag
//! and byte offset, which is all that is needed to reinterpret it, so
//! the whole store is pointer-free and survives both reallocation and a
//! bulk copy into device memory unchanged.
//!
//! # Architecture
//!
//! ```text
//! ObjectArena
//! ├── Vec<u8>         value bytes, offsets handed out as ObjOffset
//! └── MetadataIndex   Vec<MetaRecord { tag, offset }>, lockstep with the bytes
//! LightRegistry       Vec<LightEntry { tag, offset }>, emitters into the arena
//! MaterialRegistry    Vec<Material>, addressed by MaterialHandle
//! ArenaView           (&[u8], &[MetaRecord]) -> tag-dispatched Object
//! ```
//!
//! # Growth
//!
//! Growth always moves the buffer (see [`ObjectArena`]), so the relocation
//! hazard is exercised on every growth rather than only when the
//! allocator happens to be unable to extend in place.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod light;
pub mod material;
pub mod meta;
pub mod view;

// Public re-exports for the primary API surface.
pub use arena::ObjectArena;
pub use config::{ArenaConfig, GrowthPolicy};
pub use error::{ArenaError, StoreKind};
pub use light::{LightEntry, LightRegistry};
pub use material::MaterialRegistry;
pub use meta::{MetaRecord, MetadataIndex};
pub use view::ArenaView;
