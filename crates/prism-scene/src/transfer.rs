//! The freeze-point description of a scene's stores.
//!
//! A [`TransferContract`] lists, for each of the four stores, the bytes
//! to copy, how many elements they hold, and how those elements are
//! strided. Copying each buffer verbatim into another memory space is
//! enough: offsets and handles inside the copy need no adjustment.

use prism_arena::{LightEntry, LightRegistry, MaterialRegistry, MetaRecord, ObjectArena};
use prism_core::{Camera, Material, RenderConfig};

/// How elements are laid out inside a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stride {
    /// Variable-size elements located through the metadata index.
    Tagged,
    /// Fixed-size elements of the given byte size.
    Fixed(usize),
}

/// One store's bytes plus the facts needed to copy and index them.
#[derive(Clone, Copy, Debug)]
pub struct BufferLayout<'a> {
    label: &'static str,
    bytes: &'a [u8],
    count: usize,
    stride: Stride,
}

impl<'a> BufferLayout<'a> {
    fn new(label: &'static str, bytes: &'a [u8], count: usize, stride: Stride) -> Self {
        Self {
            label,
            bytes,
            count,
            stride,
        }
    }

    /// Diagnostic name of the store.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The bytes to copy.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Base address of the bytes, valid while the contract lives.
    pub fn base_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Element layout.
    pub fn stride(&self) -> Stride {
        self.stride
    }

    /// Byte length.
    pub fn len_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Read-only description of a frozen scene.
///
/// Holding a contract keeps the [`Scene`](crate::Scene) borrowed, so the
/// stores cannot change while a transfer is in flight.
#[derive(Clone, Copy, Debug)]
pub struct TransferContract<'a> {
    /// Object arena bytes.
    pub objects: BufferLayout<'a>,
    /// Metadata index records.
    pub metadata: BufferLayout<'a>,
    /// Light entries.
    pub lights: BufferLayout<'a>,
    /// Material records.
    pub materials: BufferLayout<'a>,
    /// Camera blob, moved by value.
    pub camera: Camera,
    /// Render configuration blob, moved by value.
    pub render: RenderConfig,
}

impl<'a> TransferContract<'a> {
    pub(crate) fn new(
        objects: &'a ObjectArena,
        lights: &'a LightRegistry,
        materials: &'a MaterialRegistry,
        camera: Camera,
        render: RenderConfig,
    ) -> Self {
        Self {
            objects: BufferLayout::new(
                "objects",
                objects.as_bytes(),
                objects.entry_count(),
                Stride::Tagged,
            ),
            metadata: BufferLayout::new(
                "metadata",
                objects.index().as_bytes(),
                objects.index().len(),
                Stride::Fixed(std::mem::size_of::<MetaRecord>()),
            ),
            lights: BufferLayout::new(
                "lights",
                lights.as_bytes(),
                lights.len(),
                Stride::Fixed(std::mem::size_of::<LightEntry>()),
            ),
            materials: BufferLayout::new(
                "materials",
                materials.as_bytes(),
                materials.len(),
                Stride::Fixed(std::mem::size_of::<Material>()),
            ),
            camera,
            render,
        }
    }

    /// The four buffers in upload order.
    pub fn buffers(&self) -> [BufferLayout<'a>; 4] {
        [self.objects, self.metadata, self.lights, self.materials]
    }

    /// Total bytes across the four buffers.
    pub fn total_bytes(&self) -> usize {
        self.buffers().iter().map(BufferLayout::len_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::Scene;
    use prism_core::{Material, Plane, Sphere, Vec3};

    use super::*;

    #[test]
    fn layouts_describe_every_store() {
        let mut scene = Scene::default();
        let m = scene.register_material(&Material::default()).unwrap();
        scene.insert(&Sphere::new(Vec3::ZERO, 1.0, m)).unwrap();
        scene
            .insert_emitter(&Plane::new(Vec3::ZERO, Vec3::Y, m))
            .unwrap();

        let contract = scene.freeze();
        assert_eq!(contract.objects.count(), 2);
        assert_eq!(contract.objects.len_bytes(), 48);
        assert_eq!(contract.objects.stride(), Stride::Tagged);
        assert_eq!(contract.metadata.count(), 2);
        assert_eq!(contract.metadata.len_bytes(), 32);
        assert_eq!(contract.lights.count(), 1);
        assert_eq!(contract.materials.stride(), Stride::Fixed(48));
        assert_eq!(contract.total_bytes(), 48 + 32 + 16 + 48);
    }

    #[test]
    fn fixed_strides_divide_buffer_lengths() {
        let mut scene = Scene::default();
        for i in 0..7 {
            let m = scene.register_material(&Material::default()).unwrap();
            scene
                .insert_emitter(&Sphere::new(Vec3::splat(i as f32), 1.0, m))
                .unwrap();
        }
        let contract = scene.freeze();
        for layout in contract.buffers() {
            if let Stride::Fixed(size) = layout.stride() {
                assert_eq!(layout.len_bytes(), size * layout.count(), "{}", layout.label());
            }
        }
    }

    #[test]
    fn base_pointer_is_the_arena_base() {
        let mut scene = Scene::default();
        scene
            .insert(&Sphere::new(Vec3::ZERO, 1.0, Default::default()))
            .unwrap();
        let contract = scene.freeze();
        assert_eq!(contract.objects.base_ptr(), scene.objects().base_ptr());
    }
}
