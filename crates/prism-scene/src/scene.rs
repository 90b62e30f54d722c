//! The scene context: owner of every store for one build/render cycle.
//!
//! A [`Scene`] is created empty, populated by insertion calls while a
//! scene script runs, frozen for transfer, and finally destroyed. It is
//! passed explicitly to every operation; there is no process-wide scene.

use prism_arena::{
    ArenaConfig, ArenaError, ArenaView, LightEntry, LightRegistry, MaterialRegistry, MetaRecord,
    ObjectArena,
};
use prism_core::{
    Camera, Material, MaterialHandle, ObjOffset, ObjType, Object, RenderConfig, SceneObject,
};

use crate::transfer::TransferContract;

/// Object arena, metadata index, light and material registries, and the
/// camera/render blobs for one scene.
///
/// # Lifecycle
///
/// ```text
/// Scene::new ─▶ insert / insert_emitter / register_* ─▶ freeze ─▶ destroy
///                      (single-threaded, &mut self)       (&self)
/// ```
///
/// [`Scene::freeze`] borrows the scene immutably, so no insertion can run
/// while a [`TransferContract`] is alive. [`Scene::destroy`] may be called
/// at any point, any number of times, and leaves the scene
/// indistinguishable from a freshly constructed one.
pub struct Scene {
    config: ArenaConfig,
    objects: ObjectArena,
    lights: LightRegistry,
    materials: MaterialRegistry,
    camera: Camera,
    render: RenderConfig,
}

impl Scene {
    /// Create an empty scene after validating `config`.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: ArenaConfig) -> Self {
        Self {
            objects: ObjectArena::new(&config),
            lights: LightRegistry::new(&config),
            materials: MaterialRegistry::new(&config),
            camera: Camera::default(),
            render: RenderConfig::default(),
            config,
        }
    }

    /// The configuration the scene was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    // ── Insertion ───────────────────────────────────────────────

    /// Insert a geometry value, returning its arena offset.
    pub fn insert<T: SceneObject>(&mut self, value: &T) -> Result<ObjOffset, ArenaError> {
        self.objects.insert(value)
    }

    /// Insert whichever geometry `object` holds.
    pub fn insert_object(&mut self, object: &Object) -> Result<ObjOffset, ArenaError> {
        self.objects.insert_object(object)
    }

    /// Insert a geometry value and register it as a light.
    ///
    /// The geometry is visible both through the metadata index and the
    /// light registry. Both stores reserve before either appends, so on
    /// error neither the geometry nor the light entry is added.
    pub fn insert_emitter<T: SceneObject>(&mut self, value: &T) -> Result<ObjOffset, ArenaError> {
        self.lights.reserve_one()?;
        let offset = self.objects.insert(value)?;
        self.lights.register(T::TYPE, offset)?;
        Ok(offset)
    }

    /// Register an already-inserted entry as a light.
    ///
    /// `offset` is not checked against the arena here; a dangling entry
    /// surfaces as an error when the light is resolved.
    pub fn register_light(&mut self, ty: ObjType, offset: ObjOffset) -> Result<usize, ArenaError> {
        self.lights.register(ty, offset)
    }

    /// Store a copy of `material`.
    pub fn register_material(&mut self, material: &Material) -> Result<MaterialHandle, ArenaError> {
        self.materials.register(material)
    }

    /// Replace the camera blob.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Replace the render configuration blob.
    pub fn set_render(&mut self, render: RenderConfig) {
        self.render = render;
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Number of geometry entries.
    pub fn object_count(&self) -> usize {
        self.objects.entry_count()
    }

    /// Number of registered lights.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Number of registered materials.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Whether every store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.lights.is_empty() && self.materials.is_empty()
    }

    /// Metadata record for the `ordinal`-th geometry insertion.
    pub fn lookup(&self, ordinal: usize) -> Option<MetaRecord> {
        self.objects.lookup(ordinal)
    }

    /// Decode the `ordinal`-th geometry entry.
    pub fn object(&self, ordinal: usize) -> Result<Object, ArenaError> {
        self.objects.view().object(ordinal)
    }

    /// Read the entry at `offset` as a `T`.
    pub fn read<T: SceneObject>(&self, offset: ObjOffset) -> Result<T, ArenaError> {
        self.objects.read(offset)
    }

    /// The `ordinal`-th light entry.
    pub fn light(&self, ordinal: usize) -> Option<LightEntry> {
        self.lights.get(ordinal)
    }

    /// Resolve a material handle.
    pub fn material(&self, handle: MaterialHandle) -> Result<&Material, ArenaError> {
        self.materials.get(handle)
    }

    /// The camera blob.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The render configuration blob.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Tag-dispatching view of the geometry entries.
    pub fn view(&self) -> ArenaView<'_> {
        self.objects.view()
    }

    /// The object arena.
    pub fn objects(&self) -> &ObjectArena {
        &self.objects
    }

    /// The light registry.
    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    /// The material registry.
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Bytes currently allocated across all stores.
    pub fn memory_bytes(&self) -> usize {
        self.objects.memory_bytes() + self.lights.memory_bytes() + self.materials.memory_bytes()
    }

    // ── Freeze and teardown ─────────────────────────────────────

    /// End construction and describe every store for a bulk copy.
    pub fn freeze(&self) -> TransferContract<'_> {
        log::info!(
            "scene frozen: {} objects ({} bytes), {} lights, {} materials",
            self.object_count(),
            self.objects.len_bytes(),
            self.light_count(),
            self.material_count(),
        );
        TransferContract::new(
            &self.objects,
            &self.lights,
            &self.materials,
            self.camera,
            self.render,
        )
    }

    /// Release every store and reset the blobs to their defaults.
    ///
    /// Safe on an empty or partially built scene and safe to repeat.
    pub fn destroy(&mut self) {
        if !self.is_empty() {
            log::debug!(
                "destroying scene: {} objects, {} lights, {} materials, {} bytes",
                self.object_count(),
                self.light_count(),
                self.material_count(),
                self.memory_bytes(),
            );
        }
        self.objects.release();
        self.lights.release();
        self.materials.release();
        self.camera = Camera::default();
        self.render = RenderConfig::default();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_valid(ArenaConfig::default())
    }
}
