//! Statement execution against a [`Scene`].

use std::path::Path;

use indexmap::IndexMap;
use prism_arena::ArenaError;
use prism_core::{Material, MaterialHandle, Plane, Sphere};
use prism_scene::Scene;

use crate::error::ScriptError;
use crate::statement::{
    plane_shape, sphere_shape, LightShape, MaterialRef, NamedMaterial, Statement,
};

/// What a script added to the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Statements executed.
    pub statements: usize,
    /// Geometry entries inserted, lights included.
    pub objects: usize,
    /// Light entries registered.
    pub lights: usize,
    /// Materials registered, named and inline.
    pub materials: usize,
}

/// Read and run the script at `path`.
pub fn run_file(path: impl AsRef<Path>, scene: &mut Scene) -> Result<ScriptSummary, ScriptError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded script '{}' ({} bytes)", path.display(), source.len());
    run_str(&source, scene)
}

/// Parse `source` and run its statements in order.
///
/// The whole script is parsed before anything is inserted, so a syntax
/// error leaves the scene untouched. A statement that fails validation or
/// insertion stops execution; earlier statements stay applied.
pub fn run_str(source: &str, scene: &mut Scene) -> Result<ScriptSummary, ScriptError> {
    let statements: Vec<Statement> = serde_json::from_str(source)?;
    let mut interp = Interpreter::new(scene);
    for (i, statement) in statements.iter().enumerate() {
        if let Err(e) = interp.execute(i + 1, statement) {
            log::warn!("script aborted at statement {} ({}): {e}", i + 1, statement.keyword());
            return Err(e);
        }
    }
    log::info!(
        "script done: {} statements, {} objects, {} lights, {} materials",
        interp.summary.statements,
        interp.summary.objects,
        interp.summary.lights,
        interp.summary.materials,
    );
    Ok(interp.summary)
}

struct Interpreter<'s> {
    scene: &'s mut Scene,
    names: IndexMap<String, MaterialHandle>,
    summary: ScriptSummary,
}

impl<'s> Interpreter<'s> {
    fn new(scene: &'s mut Scene) -> Self {
        Self {
            scene,
            names: IndexMap::new(),
            summary: ScriptSummary::default(),
        }
    }

    fn execute(&mut self, n: usize, statement: &Statement) -> Result<(), ScriptError> {
        let invalid = |reason: String| ScriptError::Invalid {
            statement: n,
            reason,
        };
        let arena = |source: ArenaError| ScriptError::Arena {
            statement: n,
            source,
        };

        match statement {
            Statement::Render(def) => {
                self.scene.set_render(def.to_config().map_err(invalid)?);
            }
            Statement::Camera(def) => {
                self.scene.set_camera(def.to_camera().map_err(invalid)?);
            }
            Statement::Material(NamedMaterial { name, material }) => {
                if self.names.contains_key(name) {
                    return Err(invalid(format!("material '{name}' is already defined")));
                }
                let material = material.to_material().map_err(invalid)?;
                let handle = self.register(&material).map_err(arena)?;
                self.names.insert(name.clone(), handle);
            }
            Statement::Sphere(def) => {
                let (center, radius) = sphere_shape(def.center, def.radius).map_err(invalid)?;
                let material = self.resolve(&def.material).map_err(|e| e.at(n))?;
                self.scene
                    .insert(&Sphere::new(center, radius, material))
                    .map_err(arena)?;
                self.summary.objects += 1;
            }
            Statement::Plane(def) => {
                let (point, normal) = plane_shape(def.point, def.normal).map_err(invalid)?;
                let material = self.resolve(&def.material).map_err(|e| e.at(n))?;
                self.scene
                    .insert(&Plane::new(point, normal, material))
                    .map_err(arena)?;
                self.summary.objects += 1;
            }
            Statement::Light(def) => {
                let material = def.to_material().map_err(invalid)?;
                match def.shape {
                    LightShape::Sphere { center, radius } => {
                        let (center, radius) = sphere_shape(center, radius).map_err(invalid)?;
                        let handle = self.register(&material).map_err(arena)?;
                        self.scene
                            .insert_emitter(&Sphere::new(center, radius, handle))
                            .map_err(arena)?;
                    }
                    LightShape::Plane { point, normal } => {
                        let (point, normal) = plane_shape(point, normal).map_err(invalid)?;
                        let handle = self.register(&material).map_err(arena)?;
                        self.scene
                            .insert_emitter(&Plane::new(point, normal, handle))
                            .map_err(arena)?;
                    }
                }
                self.summary.objects += 1;
                self.summary.lights += 1;
            }
        }
        self.summary.statements += 1;
        Ok(())
    }

    fn register(&mut self, material: &Material) -> Result<MaterialHandle, ArenaError> {
        let handle = self.scene.register_material(material)?;
        self.summary.materials += 1;
        Ok(handle)
    }

    fn resolve(&mut self, material: &MaterialRef) -> Result<MaterialHandle, Unresolved> {
        match material {
            MaterialRef::Named(name) => self
                .names
                .get(name)
                .copied()
                .ok_or_else(|| Unresolved::Unknown(name.clone())),
            MaterialRef::Inline(def) => {
                let material = def.to_material().map_err(Unresolved::Invalid)?;
                self.register(&material).map_err(Unresolved::Arena)
            }
        }
    }
}

enum Unresolved {
    Unknown(String),
    Invalid(String),
    Arena(ArenaError),
}

impl Unresolved {
    fn at(self, statement: usize) -> ScriptError {
        match self {
            Self::Unknown(name) => ScriptError::Invalid {
                statement,
                reason: format!("unknown material '{name}'"),
            },
            Self::Invalid(reason) => ScriptError::Invalid { statement, reason },
            Self::Arena(source) => ScriptError::Arena { statement, source },
        }
    }
}
