use crate::color::Color;
use crate::consts::{ VACUUM_RI, GLASS_RI };
use crate::pattern::Pattern;
use crate::tuple::Tuple4D;
use crate::shape::Shape;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from. A scene has exactly one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl Default for PointLight {
    fn default() -> PointLight {
        PointLight::new(Color::white(), Tuple4D::point(-10.0, 10.0, -10.0))
    }
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        if !position.is_point() {
            position.w = 1.0;
        }

        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess. On top of that, `reflective` and `transparency`
/// (both in `0.0..=1.0`) scale the recursive reflection and refraction
/// contributions, and `refractive_index` (vacuum is `1.0`) drives how
/// transmitted rays bend.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub pattern: Option<Pattern>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::rgb(1.0, 1.0, 1.0),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
            transparency: 0.0,
            refractive_index: VACUUM_RI,
        }
    }
}

impl Material {
    /// A fully transparent glass material.
    pub fn glass() -> Material {
        Material {
            transparency: 1.0,
            refractive_index: GLASS_RI,
            ..Default::default()
        }
    }
}

/// Calculate the lighting of a point on a shape.
///
/// Implements the Phong model: the sum of an ambient term, a diffuse term
/// proportional to the cosine between the light and the normal, and a
/// specular highlight that falls off with `shininess`. The base color comes
/// from the material's pattern when one is set.
///
/// If this point is in a shadow (parameter `in_shadow`), only ambient light is
/// used. The result is not clamped.
pub fn lighting(obj: &Shape, light: &PointLight, point: Tuple4D,
    eyev: Tuple4D, normalv: Tuple4D, in_shadow: bool) -> Color {
    let m = obj.material();

    // If the material has some pattern, use that for color
    let color = match m.pattern {
        Some(ref pat) => pat.pattern_at_shape(obj, point),
        None => m.color,
    };

    // Combine surface color with light's color
    let effective_color = color * light.intensity;

    // Find direction to light source
    let lightv = (light.position - point).normalize();

    let ambient = effective_color * m.ambient;

    // A negative cosine means the light is on the other side of the surface
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal < 0.0 || in_shadow {
        return ambient;
    }

    let diffuse = effective_color * m.diffuse * light_dot_normal;

    // A negative cosine means the light reflects away from the eye
    let reflectv = (-lightv).reflect(&normalv);
    let reflect_dot_eye = reflectv.dot(&eyev);

    let specular = if reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        let factor = reflect_dot_eye.powf(m.shininess);
        light.intensity * m.specular * factor
    };

    ambient + diffuse + specular
}

/* Tests */

#[cfg(test)]
fn lit_from(light_position: Tuple4D, eyev: Tuple4D, in_shadow: bool) -> Color {
    let s = Shape::sphere();
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(Color::white(), light_position);

    lighting(&s, &light, Tuple4D::origin(), eyev, normalv, in_shadow)
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.reflective, 0.0);
    assert_eq!(m.transparency, 0.0);
    assert_eq!(m.refractive_index, 1.0);
}

#[test]
fn eye_between_light_and_surface() {
    let c = lit_from(Tuple4D::point(0.0, 0.0, -10.0),
        Tuple4D::vector(0.0, 0.0, -1.0), false);

    assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let c = lit_from(Tuple4D::point(0.0, 0.0, -10.0),
        Tuple4D::vector(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0), false);

    assert_eq!(c, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let c = lit_from(Tuple4D::point(0.0, 10.0, -10.0),
        Tuple4D::vector(0.0, 0.0, -1.0), false);

    assert_eq!(c, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let c = lit_from(Tuple4D::point(0.0, 10.0, -10.0),
        Tuple4D::vector(0.0, -(2.0f64.sqrt()) / 2.0, -(2.0f64.sqrt()) / 2.0),
        false);

    assert_eq!(c, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let c = lit_from(Tuple4D::point(0.0, 0.0, 10.0),
        Tuple4D::vector(0.0, 0.0, -1.0), false);

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let c = lit_from(Tuple4D::point(0.0, 0.0, -10.0),
        Tuple4D::vector(0.0, 0.0, -1.0), true);

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_with_stripe_pattern() {
    // Only ambient light, so the pattern color comes through unchanged.
    let m = Material {
        color: Color::rgb(0.5, 0.5, 0.5),
        pattern: Some(Pattern::stripe(Color::white(), Color::black())),
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };
    let s = Shape::sphere().with_material(m);

    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, -10.0)
    );

    assert_eq!(
        lighting(&s, &light, Tuple4D::point(0.9, 0.0, 0.0),
            eyev, normalv, false),
        Color::white()
    );

    assert_eq!(
        lighting(&s, &light, Tuple4D::point(1.1, 0.0, 0.0),
            eyev, normalv, false),
        Color::black()
    );
}
