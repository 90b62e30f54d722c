//! Script statement schema and value validation.
//!
//! A script is a JSON array of single-key objects, one per statement:
//!
//! ```json
//! [
//!   { "render": { "width": 320, "height": 240, "samples": 4 } },
//!   { "camera": { "position": [0, 1, 6], "look_at": [0, 0, 0] } },
//!   { "material": { "name": "red", "color": [0.9, 0.1, 0.1] } },
//!   { "sphere": { "center": [0, 0, 0], "radius": 1, "material": "red" } },
//!   { "plane": { "point": [0, -1, 0], "normal": [0, 1, 0], "material": { "color": [0.5, 0.5, 0.5] } } },
//!   { "light": { "shape": { "sphere": { "center": [0, 5, 0], "radius": 0.5 } }, "emission": [8, 8, 8] } }
//! ]
//! ```
//!
//! Omitted fields take the defaults of the corresponding core type.

use prism_core::{Camera, Material, RenderConfig, Vec3};
use serde::Deserialize;

/// One script statement.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// Replace the render configuration.
    Render(RenderDef),
    /// Replace the camera.
    Camera(CameraDef),
    /// Register a material under a name.
    Material(NamedMaterial),
    /// Insert a sphere.
    Sphere(SphereDef),
    /// Insert a plane.
    Plane(PlaneDef),
    /// Insert emitting geometry and register it as a light.
    Light(LightDef),
}

impl Statement {
    /// Statement keyword, for diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Render(_) => "render",
            Self::Camera(_) => "camera",
            Self::Material(_) => "material",
            Self::Sphere(_) => "sphere",
            Self::Plane(_) => "plane",
            Self::Light(_) => "light",
        }
    }
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

fn finite(name: &str, v: Vec3) -> Result<Vec3, String> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{name} must be finite, got {v}"))
    }
}

/// `render` statement.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderDef {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Samples per pixel.
    pub samples: u32,
    /// Maximum bounce depth.
    pub max_depth: u32,
    /// Background colour.
    pub background: [f32; 3],
    /// Exposure multiplier.
    pub exposure: f32,
}

impl Default for RenderDef {
    fn default() -> Self {
        let d = RenderConfig::default();
        Self {
            width: d.width,
            height: d.height,
            samples: d.samples,
            max_depth: d.max_depth,
            background: d.background.to_array(),
            exposure: d.exposure,
        }
    }
}

impl RenderDef {
    /// Validate and convert.
    pub fn to_config(&self) -> Result<RenderConfig, String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if self.samples == 0 {
            return Err("samples must be at least 1".to_string());
        }
        if !(self.exposure.is_finite() && self.exposure > 0.0) {
            return Err(format!("exposure must be positive, got {}", self.exposure));
        }
        Ok(RenderConfig {
            width: self.width,
            height: self.height,
            samples: self.samples,
            max_depth: self.max_depth,
            background: finite("background", vec3(self.background))?,
            exposure: self.exposure,
        })
    }
}

/// `camera` statement.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraDef {
    /// Eye position.
    pub position: [f32; 3],
    /// Target point.
    pub look_at: [f32; 3],
    /// Up direction.
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Lens aperture.
    pub aperture: f32,
    /// Focus distance.
    pub focus_distance: f32,
}

impl Default for CameraDef {
    fn default() -> Self {
        let d = Camera::default();
        Self {
            position: d.position.to_array(),
            look_at: d.look_at.to_array(),
            up: d.up.to_array(),
            fov: d.fov,
            aperture: d.aperture,
            focus_distance: d.focus_distance,
        }
    }
}

impl CameraDef {
    /// Validate and convert.
    pub fn to_camera(&self) -> Result<Camera, String> {
        let position = finite("camera position", vec3(self.position))?;
        let look_at = finite("camera look_at", vec3(self.look_at))?;
        let up = finite("camera up", vec3(self.up))?;
        if position == look_at {
            return Err("camera position and look_at coincide".to_string());
        }
        if up == Vec3::ZERO {
            return Err("camera up vector is zero".to_string());
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(format!("fov must be in (0, 180) degrees, got {}", self.fov));
        }
        if self.aperture < 0.0 {
            return Err(format!("aperture must be non-negative, got {}", self.aperture));
        }
        Ok(Camera {
            position,
            look_at,
            up,
            fov: self.fov,
            aperture: self.aperture,
            focus_distance: self.focus_distance,
        })
    }
}

/// Surface parameters as written in a script.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialDef {
    /// Base colour.
    pub color: [f32; 3],
    /// Emitted radiance.
    pub emission: [f32; 3],
    /// Diffuse coefficient.
    pub diffuse: f32,
    /// Specular coefficient.
    pub specular: f32,
    /// Phong exponent.
    pub shininess: f32,
    /// Mirror reflectivity.
    pub reflectivity: f32,
    /// Transmission.
    pub transparency: f32,
    /// Index of refraction.
    pub ior: f32,
}

impl Default for MaterialDef {
    fn default() -> Self {
        let d = Material::default();
        Self {
            color: d.color.to_array(),
            emission: d.emission.to_array(),
            diffuse: d.diffuse,
            specular: d.specular,
            shininess: d.shininess,
            reflectivity: d.reflectivity,
            transparency: d.transparency,
            ior: d.ior,
        }
    }
}

impl MaterialDef {
    /// Validate and convert.
    pub fn to_material(&self) -> Result<Material, String> {
        let emission = finite("emission", vec3(self.emission))?;
        if emission.min_element() < 0.0 {
            return Err(format!("emission must be non-negative, got {emission}"));
        }
        for (name, value) in [
            ("reflectivity", self.reflectivity),
            ("transparency", self.transparency),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        if !(self.ior.is_finite() && self.ior > 0.0) {
            return Err(format!("ior must be positive, got {}", self.ior));
        }
        Ok(Material {
            color: finite("color", vec3(self.color))?,
            emission,
            diffuse: self.diffuse,
            specular: self.specular,
            shininess: self.shininess,
            reflectivity: self.reflectivity,
            transparency: self.transparency,
            ior: self.ior,
        })
    }
}

/// `material` statement: a material other statements can name.
///
/// Written as one flat table: `name` next to the [`MaterialDef`] fields.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "NamedMaterialFields")]
pub struct NamedMaterial {
    /// Name later statements refer to.
    pub name: String,
    /// The surface parameters.
    pub material: MaterialDef,
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NamedMaterialFields {
    name: Option<String>,
    color: [f32; 3],
    emission: [f32; 3],
    diffuse: f32,
    specular: f32,
    shininess: f32,
    reflectivity: f32,
    transparency: f32,
    ior: f32,
}

impl Default for NamedMaterialFields {
    fn default() -> Self {
        let d = MaterialDef::default();
        Self {
            name: None,
            color: d.color,
            emission: d.emission,
            diffuse: d.diffuse,
            specular: d.specular,
            shininess: d.shininess,
            reflectivity: d.reflectivity,
            transparency: d.transparency,
            ior: d.ior,
        }
    }
}

impl TryFrom<NamedMaterialFields> for NamedMaterial {
    type Error = String;

    fn try_from(fields: NamedMaterialFields) -> Result<Self, String> {
        let name = match fields.name {
            Some(name) if !name.is_empty() => name,
            Some(_) => return Err("material name must not be empty".to_string()),
            None => return Err("material statement needs a name".to_string()),
        };
        Ok(Self {
            name,
            material: MaterialDef {
                color: fields.color,
                emission: fields.emission,
                diffuse: fields.diffuse,
                specular: fields.specular,
                shininess: fields.shininess,
                reflectivity: fields.reflectivity,
                transparency: fields.transparency,
                ior: fields.ior,
            },
        })
    }
}

/// How geometry picks its material.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    /// A material declared by an earlier `material` statement.
    Named(String),
    /// A one-off material registered for this geometry alone.
    Inline(MaterialDef),
}

/// `sphere` statement.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDef {
    /// Centre.
    pub center: [f32; 3],
    /// Radius, positive.
    pub radius: f32,
    /// Surface.
    pub material: MaterialRef,
}

/// `plane` statement.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaneDef {
    /// A point on the plane.
    pub point: [f32; 3],
    /// Plane normal, non-zero.
    pub normal: [f32; 3],
    /// Surface.
    pub material: MaterialRef,
}

/// Geometry of a light, without a material.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightShape {
    /// Spherical emitter.
    Sphere {
        /// Centre.
        center: [f32; 3],
        /// Radius.
        radius: f32,
    },
    /// Planar emitter.
    Plane {
        /// A point on the plane.
        point: [f32; 3],
        /// Plane normal.
        normal: [f32; 3],
    },
}

/// `light` statement.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDef {
    /// Emitting geometry.
    pub shape: LightShape,
    /// Emitted radiance.
    pub emission: [f32; 3],
    /// Surface colour. Default: white.
    #[serde(default = "white")]
    pub color: [f32; 3],
}

fn white() -> [f32; 3] {
    [1.0; 3]
}

impl LightDef {
    /// The emissive material the light's geometry is given.
    pub fn to_material(&self) -> Result<Material, String> {
        let emission = finite("light emission", vec3(self.emission))?;
        if emission.min_element() < 0.0 || emission.max_element() <= 0.0 {
            return Err(format!(
                "light emission must be non-negative and positive in some channel, got {emission}"
            ));
        }
        Ok(Material::diffuse(finite("light color", vec3(self.color))?).with_emission(emission))
    }
}

/// Sphere centre and radius, validated.
pub fn sphere_shape(center: [f32; 3], radius: f32) -> Result<(Vec3, f32), String> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(format!("sphere radius must be positive, got {radius}"));
    }
    Ok((finite("sphere center", vec3(center))?, radius))
}

/// Plane point and unit normal, validated.
///
/// The normal is rescaled by its largest component before normalising, so
/// directions whose squared length overflows or underflows an `f32` still
/// yield a unit vector.
pub fn plane_shape(point: [f32; 3], normal: [f32; 3]) -> Result<(Vec3, Vec3), String> {
    let normal = finite("plane normal", vec3(normal))?;
    let unit = (normal / normal.abs().max_element())
        .try_normalize()
        .ok_or_else(|| format!("plane normal {normal} has no direction"))?;
    Ok((finite("plane point", vec3(point))?, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Statement {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn statements_are_keyed_by_name() {
        let s = parse(r#"{ "sphere": { "center": [0, 0, 0], "radius": 2, "material": "red" } }"#);
        assert_eq!(s.keyword(), "sphere");
        match s {
            Statement::Sphere(def) => {
                assert_eq!(def.radius, 2.0);
                assert!(matches!(def.material, MaterialRef::Named(ref n) if n == "red"));
            }
            other => panic!("parsed as {}", other.keyword()),
        }
    }

    #[test]
    fn inline_material_uses_defaults() {
        let s = parse(r#"{ "plane": { "point": [0, 0, 0], "normal": [0, 1, 0], "material": { "color": [1, 0, 0] } } }"#);
        let Statement::Plane(def) = s else {
            panic!("not a plane");
        };
        let MaterialRef::Inline(m) = def.material else {
            panic!("not inline");
        };
        let material = m.to_material().unwrap();
        assert_eq!(material.color, Vec3::X);
        assert_eq!(material.ior, Material::default().ior);
    }

    #[test]
    fn named_material_takes_surface_fields() {
        let s = parse(r#"{ "material": { "name": "mirror", "reflectivity": 1 } }"#);
        let Statement::Material(named) = s else {
            panic!("not a material");
        };
        assert_eq!(named.name, "mirror");
        assert_eq!(named.material.to_material().unwrap().reflectivity, 1.0);
    }

    #[test]
    fn empty_render_is_the_default() {
        let Statement::Render(def) = parse(r#"{ "render": {} }"#) else {
            panic!("not a render");
        };
        assert_eq!(def.to_config().unwrap(), RenderConfig::default());
    }

    #[test]
    fn unknown_statement_fails_to_parse() {
        assert!(serde_json::from_str::<Statement>(r#"{ "cube": {} }"#).is_err());
    }

    #[test]
    fn negative_emission_rejected() {
        let def = MaterialDef {
            emission: [0.0, -1.0, 0.0],
            ..MaterialDef::default()
        };
        assert!(def.to_material().unwrap_err().contains("emission"));
    }

    #[test]
    fn dark_light_rejected() {
        let def = LightDef {
            shape: LightShape::Sphere {
                center: [0.0; 3],
                radius: 1.0,
            },
            emission: [0.0; 3],
            color: white(),
        };
        assert!(def.to_material().is_err());
    }

    #[test]
    fn degenerate_shapes_rejected() {
        assert!(sphere_shape([0.0; 3], 0.0).is_err());
        assert!(sphere_shape([0.0; 3], -1.0).is_err());
        assert!(sphere_shape([0.0; 3], f32::NAN).is_err());
        assert!(plane_shape([0.0; 3], [0.0; 3]).is_err());
        assert!(plane_shape([0.0; 3], [0.0, f32::INFINITY, 0.0]).is_err());
        assert_eq!(plane_shape([0.0; 3], [0.0, 2.0, 0.0]).unwrap().1, Vec3::Y);
    }

    #[test]
    fn extreme_normals_still_normalise() {
        for normal in [[0.0, 1e20, 0.0], [0.0, 1e-30, 0.0], [-3e38, 0.0, 0.0]] {
            let (_, unit) = plane_shape([0.0; 3], normal).unwrap();
            assert_ne!(unit, Vec3::ZERO);
            assert!((unit.length() - 1.0).abs() < 1e-6, "{normal:?} -> {unit}");
        }
        let (_, unit) = plane_shape([0.0; 3], [0.0, 1e20, 0.0]).unwrap();
        assert_eq!(unit, Vec3::Y);
    }

    #[test]
    fn misspelled_material_field_is_rejected() {
        let inline = r#"{ "sphere": { "center": [0, 0, 0], "radius": 1, "material": { "colr": [1, 0, 0] } } }"#;
        assert!(serde_json::from_str::<Statement>(inline).is_err());
        let named = r#"{ "material": { "name": "red", "colr": [1, 0, 0] } }"#;
        assert!(serde_json::from_str::<Statement>(named).is_err());
    }

    #[test]
    fn named_material_requires_a_name() {
        assert!(serde_json::from_str::<Statement>(r#"{ "material": { "color": [1, 0, 0] } }"#).is_err());
        assert!(serde_json::from_str::<Statement>(r#"{ "material": { "name": "" } }"#).is_err());
    }

    #[test]
    fn camera_must_look_somewhere() {
        let def = CameraDef {
            look_at: CameraDef::default().position,
            ..CameraDef::default()
        };
        assert!(def.to_camera().is_err());
        assert_eq!(CameraDef::default().to_camera().unwrap(), Camera::default());
    }
}
