//! Device memory and the uploaded, read-only scene.
//!
//! [`DeviceMemory`] is the seam to whatever second memory space the
//! traversal kernel runs against. [`HostDevice`] implements it with
//! separate host allocations, which is what tests and the CLI use.

use prism_arena::{ArenaError, ArenaView, LightEntry};
use prism_core::{Camera, Material, MaterialHandle, Object, RenderConfig};

use crate::error::{DeviceError, TransferError};
use crate::transfer::{BufferLayout, TransferContract};

/// A buffer resident in device memory.
pub trait DeviceBuffer: Send + Sync {
    /// Length in bytes.
    fn len(&self) -> usize;

    /// Whether the buffer holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The buffer contents as seen by kernels.
    fn as_bytes(&self) -> &[u8];
}

/// A memory space scene buffers can be copied into.
pub trait DeviceMemory {
    /// Buffer type produced by uploads.
    type Buffer: DeviceBuffer;

    /// Allocate a buffer and copy `bytes` into it in one transfer.
    fn upload(&mut self, label: &str, bytes: &[u8]) -> Result<Self::Buffer, DeviceError>;
}

/// Device memory backed by independent host allocations.
///
/// Buffers are 8-byte aligned so record arrays can be cast in place, the
/// same guarantee a GPU allocator gives. An optional byte budget makes
/// out-of-memory paths testable.
#[derive(Debug, Default)]
pub struct HostDevice {
    budget: Option<usize>,
    uploaded: usize,
}

impl HostDevice {
    /// An unbounded device.
    pub fn new() -> Self {
        Self::default()
    }

    /// A device that refuses uploads once `budget` bytes have been copied.
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget: Some(budget),
            uploaded: 0,
        }
    }

    /// Total bytes uploaded so far.
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded
    }
}

impl DeviceMemory for HostDevice {
    type Buffer = HostBuffer;

    fn upload(&mut self, label: &str, bytes: &[u8]) -> Result<HostBuffer, DeviceError> {
        if let Some(budget) = self.budget {
            let available = budget.saturating_sub(self.uploaded);
            if bytes.len() > available {
                return Err(DeviceError::OutOfMemory {
                    label: label.to_string(),
                    requested: bytes.len(),
                    available,
                });
            }
        }
        let buffer = HostBuffer::copy_from(label, bytes)?;
        self.uploaded += bytes.len();
        Ok(buffer)
    }
}

/// A [`HostDevice`] allocation.
#[derive(Clone, Debug)]
pub struct HostBuffer {
    words: Vec<u64>,
    len: usize,
}

impl HostBuffer {
    fn copy_from(label: &str, bytes: &[u8]) -> Result<Self, DeviceError> {
        let word_count = bytes.len().div_ceil(std::mem::size_of::<u64>());
        let mut words = Vec::new();
        words
            .try_reserve_exact(word_count)
            .map_err(|e| DeviceError::CopyFailed {
                label: label.to_string(),
                reason: e.to_string(),
            })?;
        words.resize(word_count, 0);
        bytemuck::cast_slice_mut::<u64, u8>(&mut words)[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            words,
            len: bytes.len(),
        })
    }
}

impl DeviceBuffer for HostBuffer {
    fn len(&self) -> usize {
        self.len
    }

    fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u64, u8>(&self.words)[..self.len]
    }
}

/// A frozen scene resident in device memory.
pub struct DeviceScene<B: DeviceBuffer> {
    objects: B,
    metadata: B,
    lights: B,
    materials: B,
    camera: Camera,
    render: RenderConfig,
}

/// Copy every store described by `contract` into `device`.
///
/// Each buffer is copied once. After the copy each device buffer has the
/// same length and bytes as its source, so arena offsets and material
/// handles resolve unchanged on the device side.
pub fn upload_scene<D: DeviceMemory>(
    device: &mut D,
    contract: &TransferContract<'_>,
) -> Result<DeviceScene<D::Buffer>, TransferError> {
    let objects = upload_one(device, &contract.objects)?;
    let metadata = upload_one(device, &contract.metadata)?;
    let lights = upload_one(device, &contract.lights)?;
    let materials = upload_one(device, &contract.materials)?;

    log::info!(
        "uploaded scene: {} bytes ({} objects, {} lights, {} materials)",
        contract.total_bytes(),
        contract.objects.count(),
        contract.lights.count(),
        contract.materials.count(),
    );

    Ok(DeviceScene {
        objects,
        metadata,
        lights,
        materials,
        camera: contract.camera,
        render: contract.render,
    })
}

fn upload_one<D: DeviceMemory>(
    device: &mut D,
    layout: &BufferLayout<'_>,
) -> Result<D::Buffer, TransferError> {
    let buffer = device.upload(layout.label(), layout.bytes())?;
    if buffer.len() != layout.len_bytes() {
        return Err(TransferError::SizeMismatch {
            label: layout.label(),
            expected: layout.len_bytes(),
            actual: buffer.len(),
        });
    }
    log::debug!("uploaded '{}': {} bytes", layout.label(), buffer.len());
    Ok(buffer)
}

impl<B: DeviceBuffer> DeviceScene<B> {
    /// Typed read-only view for kernels.
    ///
    /// Fails if a record buffer is not a whole, aligned array.
    pub fn view(&self) -> Result<DeviceView<'_>, ArenaError> {
        let arena = ArenaView::from_raw(self.objects.as_bytes(), self.metadata.as_bytes())?;
        let lights = bytemuck::try_cast_slice(self.lights.as_bytes()).map_err(|_| {
            ArenaError::MalformedMetadata {
                len: self.lights.len(),
            }
        })?;
        let materials = bytemuck::try_cast_slice(self.materials.as_bytes()).map_err(|_| {
            ArenaError::MalformedMetadata {
                len: self.materials.len(),
            }
        })?;
        Ok(DeviceView {
            arena,
            lights,
            materials,
            camera: self.camera,
            render: self.render,
        })
    }

    /// The object buffer.
    pub fn objects(&self) -> &B {
        &self.objects
    }

    /// The metadata buffer.
    pub fn metadata(&self) -> &B {
        &self.metadata
    }

    /// The light buffer.
    pub fn lights(&self) -> &B {
        &self.lights
    }

    /// The material buffer.
    pub fn materials(&self) -> &B {
        &self.materials
    }

    /// The camera blob.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The render configuration blob.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

/// What a kernel thread sees: typed slices over device buffers.
///
/// Immutable and `Sync`; any number of threads may read it at once.
#[derive(Clone, Copy, Debug)]
pub struct DeviceView<'a> {
    arena: ArenaView<'a>,
    lights: &'a [LightEntry],
    materials: &'a [Material],
    camera: Camera,
    render: RenderConfig,
}

impl<'a> DeviceView<'a> {
    /// Geometry entries.
    pub fn objects(&self) -> ArenaView<'a> {
        self.arena
    }

    /// Number of geometry entries.
    pub fn object_count(&self) -> usize {
        self.arena.len()
    }

    /// Light entries.
    pub fn lights(&self) -> &'a [LightEntry] {
        self.lights
    }

    /// Resolve the `ordinal`-th light to its geometry.
    pub fn light(&self, ordinal: usize) -> Result<Object, ArenaError> {
        let entry = self
            .lights
            .get(ordinal)
            .ok_or(ArenaError::OrdinalOutOfRange {
                ordinal,
                count: self.lights.len(),
            })?;
        self.arena.decode(entry.tag, entry.offset())
    }

    /// Resolve a material handle.
    pub fn material(&self, handle: MaterialHandle) -> Result<&'a Material, ArenaError> {
        self.materials
            .get(handle.index())
            .ok_or(ArenaError::UnknownMaterial {
                handle,
                count: self.materials.len(),
            })
    }

    /// Number of materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// The camera blob.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The render configuration blob.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_buffer_preserves_bytes_and_length() {
        let mut device = HostDevice::new();
        let src: Vec<u8> = (0..13).collect();
        let buf = device.upload("odd", &src).unwrap();
        assert_eq!(buf.len(), 13);
        assert_eq!(buf.as_bytes(), &src[..]);
        assert_eq!(buf.as_bytes().as_ptr() as usize % 8, 0);
    }

    #[test]
    fn host_buffer_is_a_separate_allocation() {
        let mut device = HostDevice::new();
        let src = vec![7u8; 64];
        let buf = device.upload("copy", &src).unwrap();
        assert_ne!(buf.as_bytes().as_ptr(), src.as_ptr());
    }

    #[test]
    fn empty_upload_is_allowed() {
        let mut device = HostDevice::new();
        let buf = device.upload("empty", &[]).unwrap();
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
    }

    #[test]
    fn budget_rejects_oversized_upload() {
        let mut device = HostDevice::with_budget(16);
        device.upload("a", &[0; 10]).unwrap();
        assert_eq!(
            device.upload("b", &[0; 10]).unwrap_err(),
            DeviceError::OutOfMemory {
                label: "b".to_string(),
                requested: 10,
                available: 6,
            }
        );
        assert_eq!(device.uploaded_bytes(), 10);
    }
}
