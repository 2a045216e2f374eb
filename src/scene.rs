use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{ info, warn };
use serde::Deserialize;
use serde_json::Value;

use crate::camera::Camera;
use crate::color::Color;
use crate::error::{ Error, Result };
use crate::light::{ Material, PointLight };
use crate::matrix::Matrix4D;
use crate::pattern::Pattern;
use crate::shape::Shape;
use crate::tuple::Tuple4D;
use crate::world::World;

/// A fully assembled scene, ready to render.
#[derive(Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Reads and validates a JSON scene description from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let text = fs::read_to_string(path.as_ref())?;
        let scene: Scene = text.parse()?;

        info!("Loaded scene {}: {} objects, {}x{} camera",
            path.as_ref().display(), scene.world.objects.len(),
            scene.camera.hsize, scene.camera.vsize);

        Ok(scene)
    }
}

impl FromStr for Scene {
    type Err = Error;

    fn from_str(s: &str) -> Result<Scene> {
        let json: SceneJson = serde_json::from_str(s)?;
        json.build()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneJson {
    camera: CameraJson,
    light: LightJson,

    #[serde(default)]
    materials: HashMap<String, MaterialJson>,

    #[serde(default)]
    objects: Vec<ShapeJson>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraJson {
    width: usize,
    height: usize,

    #[serde(alias = "field-of-view")]
    field_of_view: f64,

    from: [f64; 3],
    to: [f64; 3],
    up: [f64; 3],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightJson {
    at: [f64; 3],

    #[serde(default = "white")]
    intensity: [f64; 3],
}

fn white() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

/// Either the name of an entry in the `materials` table, or a material
/// written out in place.
#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialRef {
    Named(String),
    Inline(MaterialJson),
}

/// Material overrides. Anything left out keeps the `Material` default.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MaterialJson {
    color: Option<[f64; 3]>,
    pattern: Option<PatternJson>,

    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,

    reflective: Option<f64>,
    transparency: Option<f64>,

    #[serde(alias = "refractive-index")]
    refractive_index: Option<f64>,
}

#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternJson {
    #[serde(rename = "type")]
    ty: String,

    #[serde(default)]
    colors: Vec<[f64; 3]>,

    #[serde(default)]
    transform: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeJson {
    #[serde(rename = "type")]
    ty: String,

    material: Option<MaterialRef>,

    #[serde(default)]
    transform: Vec<Vec<Value>>,
}

fn scene_error<T>(message: String) -> Result<T> {
    Err(Error::Scene(message))
}

fn color_from(c: &[f64; 3]) -> Color {
    Color::rgb(c[0], c[1], c[2])
}

impl SceneJson {
    fn build(self) -> Result<Scene> {
        let c = &self.camera;
        let view = Matrix4D::view_transform(
            Tuple4D::point(c.from[0], c.from[1], c.from[2]),
            Tuple4D::point(c.to[0], c.to[1], c.to[2]),
            Tuple4D::vector(c.up[0], c.up[1], c.up[2]),
        )?;
        let camera = Camera::new(c.width, c.height, c.field_of_view, view)?;

        let at = &self.light.at;
        let mut world = World::empty();
        world.light_source = PointLight::new(
            color_from(&self.light.intensity),
            Tuple4D::point(at[0], at[1], at[2]),
        );

        for (index, shape) in self.objects.iter().enumerate() {
            let material = match shape.material {
                None => Material::default(),
                Some(MaterialRef::Inline(ref m)) => m.build()?,
                Some(MaterialRef::Named(ref name)) => match self.materials.get(name) {
                    Some(m) => m.build()?,
                    None => return scene_error(
                        format!("object {} uses undefined material '{}'", index, name)
                    ),
                },
            };

            let base = match shape.ty.as_str() {
                "sphere" => Shape::sphere(),
                "plane" => Shape::plane(),
                other => return scene_error(
                    format!("object {} has unknown type '{}'", index, other)
                ),
            };

            let transform = parse_transforms(&shape.transform)?;
            world.objects.push(base.with_material(material).with_transform(transform)?);
        }

        Ok(Scene { world, camera })
    }
}

impl MaterialJson {
    fn build(&self) -> Result<Material> {
        let mut m = Material::default();

        if let Some(ref c) = self.color { m.color = color_from(c); }
        if let Some(v) = self.ambient { m.ambient = v; }
        if let Some(v) = self.diffuse { m.diffuse = v; }
        if let Some(v) = self.specular { m.specular = v; }
        if let Some(v) = self.shininess { m.shininess = v; }
        if let Some(v) = self.reflective { m.reflective = v; }
        if let Some(v) = self.transparency { m.transparency = v; }
        if let Some(v) = self.refractive_index { m.refractive_index = v; }

        if let Some(ref p) = self.pattern {
            m.pattern = Some(p.build()?);
        }

        if m.refractive_index <= 0.0 {
            return scene_error(
                format!("refractive index must be positive, got {}", m.refractive_index)
            );
        }

        for (name, value) in [("reflective", m.reflective),
            ("transparency", m.transparency)].iter() {
            if !(0.0..=1.0).contains(value) {
                return scene_error(
                    format!("{} must be between 0 and 1, got {}", name, value)
                );
            }
        }

        if m.reflective + m.transparency > 1.0 {
            warn!("Material reflects and transmits more light than it receives \
                (reflective {} + transparency {})", m.reflective, m.transparency);
        }

        Ok(m)
    }
}

impl PatternJson {
    fn build(&self) -> Result<Pattern> {
        let two_colors = || match self.colors.as_slice() {
            [a, b] => Ok((color_from(a), color_from(b))),
            _ => scene_error(format!("pattern '{}' needs exactly two colors, got {}",
                self.ty, self.colors.len())),
        };

        let pattern = match self.ty.as_str() {
            "stripes" => {
                let (a, b) = two_colors()?;
                Pattern::stripe(a, b)
            },
            "checkers" => {
                let (a, b) = two_colors()?;
                Pattern::checker(a, b)
            },
            "test" => Pattern::test(),
            other => return scene_error(format!("unknown pattern type '{}'", other)),
        };

        pattern.with_transform(parse_transforms(&self.transform)?)
    }
}

/// Composes a list of transform entries such as `["translate", 0, -1, 0]`.
///
/// Entries are applied in listed order, so the result is `Tn * ... * T1`.
fn parse_transforms(entries: &[Vec<Value>]) -> Result<Matrix4D> {
    let mut m = Matrix4D::identity();
    for entry in entries {
        m = parse_transform(entry)? * m;
    }

    Ok(m)
}

fn parse_transform(entry: &[Value]) -> Result<Matrix4D> {
    let (name, args) = match entry.split_first() {
        Some((Value::String(name), args)) => (name.as_str(), args),
        _ => return scene_error(
            "transform entries must start with an operation name".to_string()
        ),
    };

    let args: Vec<f64> = args.iter().map(|v| v.as_f64().ok_or_else(||
        Error::Scene(format!("'{}' arguments must be numbers, got {}", name, v))
    )).collect::<Result<_>>()?;

    let expected = match name {
        "translate" | "scale" => 3,
        "rotate-x" | "rotate-y" | "rotate-z" => 1,
        "shear" => 6,
        other => return scene_error(format!("unknown transform '{}'", other)),
    };

    if args.len() != expected {
        return scene_error(format!("'{}' takes {} arguments, got {}",
            name, expected, args.len()));
    }

    let a = &args;
    Ok(match name {
        "translate" => Matrix4D::translation(a[0], a[1], a[2]),
        "scale" => Matrix4D::scaling(a[0], a[1], a[2]),
        "rotate-x" => Matrix4D::rotation_x(a[0]),
        "rotate-y" => Matrix4D::rotation_y(a[0]),
        "rotate-z" => Matrix4D::rotation_z(a[0]),
        _ => Matrix4D::shearing(a[0], a[1], a[2], a[3], a[4], a[5]),
    })
}

/* Tests */

#[cfg(test)]
const MINIMAL: &str = r#"{
    "camera": { "width": 10, "height": 5, "field_of_view": 1.0,
                "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
    "light": { "at": [-10, 10, -10] }
}"#;

#[cfg(test)]
fn with_objects(objects: &str) -> String {
    MINIMAL.trim_end().trim_end_matches('}').to_string()
        + ", \"objects\": " + objects + "}"
}

#[test]
fn minimal_scene() {
    let scene: Scene = MINIMAL.parse().unwrap();

    assert_eq!(scene.camera.hsize, 10);
    assert_eq!(scene.camera.vsize, 5);
    assert!(scene.world.objects.is_empty());
    assert_eq!(scene.world.light_source.intensity, Color::white());
    assert_eq!(scene.world.light_source.position,
        Tuple4D::point(-10.0, 10.0, -10.0));
}

#[test]
fn transforms_apply_in_listed_order() {
    let m = parse_transforms(&serde_json::from_str::<Vec<Vec<Value>>>(
        r#"[["scale", 2, 2, 2], ["translate", 1, 0, 0]]"#).unwrap()).unwrap();

    assert_eq!(m * Tuple4D::point(1.0, 1.0, 1.0), Tuple4D::point(3.0, 2.0, 2.0));
}

#[test]
fn shear_and_rotations_parse() {
    let m = parse_transforms(&serde_json::from_str::<Vec<Vec<Value>>>(
        r#"[["shear", 1, 0, 0, 0, 0, 0], ["rotate-z", 0]]"#).unwrap()).unwrap();

    assert_eq!(m, Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0));
}

#[test]
fn bad_transforms_are_rejected() {
    for bad in [
        r#"[["spin", 1]]"#,
        r#"[["translate", 1, 2]]"#,
        r#"[["rotate-x", "fast"]]"#,
        r#"[[1, 2, 3]]"#,
        r#"[[]]"#,
    ].iter() {
        let entries: Vec<Vec<Value>> = serde_json::from_str(bad).unwrap();
        assert!(parse_transforms(&entries).is_err(), "accepted {}", bad);
    }
}

#[test]
fn inline_and_named_materials() {
    let text = MINIMAL.trim_end().trim_end_matches('}').to_string() + r#",
        "materials": { "glass": { "transparency": 1.0, "refractive_index": 1.5 } },
        "objects": [
            { "type": "sphere", "material": "glass" },
            { "type": "plane", "material": { "color": [1, 0, 0], "reflective": 0.5 } }
        ]
    }"#;
    let scene: Scene = text.parse().unwrap();

    let glass = scene.world.objects[0].material();
    assert_eq!(glass.transparency, 1.0);
    assert_eq!(glass.refractive_index, 1.5);
    assert_eq!(glass.ambient, 0.1);

    let red = scene.world.objects[1].material();
    assert_eq!(red.color, Color::red());
    assert_eq!(red.reflective, 0.5);
}

#[test]
fn pattern_in_material() {
    let scene: Scene = with_objects(r#"[{ "type": "sphere", "material": {
        "pattern": { "type": "checkers", "colors": [[1, 1, 1], [0, 0, 0]],
                     "transform": [["scale", 0.5, 0.5, 0.5]] } } }]"#)
        .parse().unwrap();

    let sphere = &scene.world.objects[0];
    let pattern = sphere.material().pattern.unwrap();
    assert_eq!(*pattern.transform(), Matrix4D::scaling(0.5, 0.5, 0.5));
    assert_eq!(pattern.pattern_at_shape(sphere, Tuple4D::point(0.75, 0.0, 0.0)),
        Color::black());
}

#[test]
fn object_transform_is_applied() {
    let scene: Scene = with_objects(
        r#"[{ "type": "sphere", "transform": [["translate", 0, -1, 0]] }]"#)
        .parse().unwrap();

    assert_eq!(*scene.world.objects[0].transform(),
        Matrix4D::translation(0.0, -1.0, 0.0));
}

#[test]
fn invalid_scenes_are_rejected() {
    let bad = [
        with_objects(r#"[{ "type": "cube" }]"#),
        with_objects(r#"[{ "type": "sphere", "material": "missing" }]"#),
        with_objects(r#"[{ "type": "sphere",
            "material": { "refractive_index": 0 } }]"#),
        with_objects(r#"[{ "type": "sphere",
            "transform": [["scale", 1, 0, 1]] }]"#),
        with_objects(r#"[{ "type": "sphere", "material": { "pattern":
            { "type": "stripes", "colors": [[1, 1, 1]] } } }]"#),
        with_objects(r#"[{ "type": "sphere", "material": { "pattern":
            { "type": "marble" } } }]"#),
        MINIMAL.replace("\"width\": 10", "\"width\": 0"),
        MINIMAL.replace("[0, 1, 0]", "[0, 0, 1]"),
        MINIMAL.replace("[-10, 10, -10]", "[1, 2]"),
        "not json".to_string(),
    ];

    for text in bad.iter() {
        assert!(text.parse::<Scene>().is_err(), "accepted {}", text);
    }
}

#[test]
fn out_of_range_materials_are_rejected() {
    let bad = [
        with_objects(r#"[{ "type": "sphere", "material": { "reflective": 3 } }]"#),
        with_objects(r#"[{ "type": "sphere", "material": { "reflective": -0.1 } }]"#),
        with_objects(r#"[{ "type": "sphere", "material": { "transparency": -2 } }]"#),
        with_objects(r#"[{ "type": "sphere", "material": { "transparency": 1.5 } }]"#),
    ];

    for text in bad.iter() {
        assert!(matches!(text.parse::<Scene>(), Err(Error::Scene(_))),
            "accepted {}", text);
    }

    let edge: Scene = with_objects(r#"[{ "type": "sphere",
        "material": { "reflective": 0, "transparency": 1 } }]"#).parse().unwrap();
    assert_eq!(edge.world.objects[0].material().transparency, 1.0);
}

#[test]
fn field_of_view_out_of_range_is_rejected() {
    for fov in ["0", "-1", "3.2"].iter() {
        let text = MINIMAL.replace("\"field_of_view\": 1.0",
            &format!("\"field_of_view\": {}", fov));

        assert!(matches!(text.parse::<Scene>(), Err(Error::Scene(_))),
            "accepted fov {}", fov);
    }
}
