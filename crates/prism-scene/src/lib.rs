//! Scene lifecycle and device transfer for Prism.
//!
//! A [`Scene`] owns the object arena, metadata index, light registry and
//! material registry for one build/render cycle. Construction is
//! single-threaded; [`Scene::freeze`] ends it and yields a
//! [`TransferContract`] describing each store as `(bytes, count, stride)`.
//! [`upload_scene`] copies those buffers into a [`DeviceMemory`], and
//! [`launch`] runs a [`Kernel`] on many threads against the read-only copy.
//!
//! ```text
//! Scene ──freeze()──▶ TransferContract ──upload_scene()──▶ DeviceScene
//!   ▲                                                          │
//!   └──────────── destroy() ◀──── launch(kernel) ◀─────────────┘
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod census;
pub mod device;
pub mod error;
pub mod kernel;
pub mod scene;
pub mod transfer;

pub use census::{Census, CensusKernel};
pub use device::{
    upload_scene, DeviceBuffer, DeviceMemory, DeviceScene, DeviceView, HostBuffer, HostDevice,
};
pub use error::{DeviceError, TransferError};
pub use kernel::{launch, Kernel, LaunchConfig, ThreadIndex};
pub use scene::Scene;
pub use transfer::{BufferLayout, Stride, TransferContract};
