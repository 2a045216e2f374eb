use crate::color::Color;
use crate::intersect::{ Intersections, IntersectionComputation };
use crate::light::{ PointLight, Material, lighting };
use crate::matrix::Matrix4D;
use crate::ray::Ray4D;
use crate::shape::{ Shape, intersect };
use crate::tuple::Tuple4D;

/// A world with objects and light.
///
/// Worlds collect all objects as well as light for rendering. Most logic is
/// performed within worlds for the ray tracer. A world is never mutated while
/// it is being rendered, so it can be shared between threads by reference.
#[derive(Debug)]
pub struct World {
    pub objects: Vec<Shape>,
    pub light_source: PointLight,
}

/// The reference world: a white light up and to the left, and two concentric
/// spheres at the origin.
impl Default for World {
    fn default() -> World {
        let outer = Shape::sphere().with_material(Material {
            color: Color::rgb(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });

        let inner = Shape::sphere()
            .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5))
            .expect("uniform scale is invertible");

        World {
            objects: vec![outer, inner],
            light_source: Default::default(),
        }
    }
}

impl World {
    /// Creates a default world with two spheres.
    pub fn new() -> World {
        Default::default()
    }

    /// Creates an empty world with no objects and the default light source.
    pub fn empty() -> World {
        World { objects: Vec::new(), light_source: Default::default() }
    }

    /// Intersects a ray against all objects in a world.
    ///
    /// The result is sorted by ascending `t`.
    pub fn intersect(&self, r: &Ray4D) -> Intersections<'_> {
        let mut intersections = Intersections::new();
        for obj in self.objects.iter() {
            let mut is = intersect(obj, r);
            intersections.intersections.append(&mut is.intersections);
        }

        intersections.sort();
        intersections
    }

    /// Determines whether a point is shadowed.
    ///
    /// A point is in shadow when something sits strictly between it and the
    /// light source.
    pub fn is_shadowed(&self, p: Tuple4D) -> bool {
        let v = self.light_source.position - p;
        let distance = v.magnitude();
        let direction = v.normalize();

        let r = Ray4D::new(p, direction);

        match self.intersect(&r).hit() {
            Some(i) => i.t < distance,
            None => false,
        }
    }

    /// Calculates the color for a hit, based on shadows, light, reflection
    /// and refraction.
    ///
    /// `remaining` is the number of bounces left for reflected and refracted
    /// rays.
    pub fn shade_hit(&self, comps: &IntersectionComputation, remaining: usize)
        -> Color {
        let shadowed = self.is_shadowed(comps.over_point);

        let surface = lighting(comps.obj,
            &self.light_source, comps.over_point, comps.eyev, comps.normalv,
            shadowed);

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        let material = comps.obj.material();
        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// Determines a color based on the intersection of a ray and the objects.
    ///
    /// Rays that hit nothing are black.
    pub fn color_at(&self, r: &Ray4D, remaining: usize) -> Color {
        let is = self.intersect(r);

        match is.hit() {
            None => Color::black(),
            Some(i) => {
                let comps = IntersectionComputation::new(r, &i, &is);
                self.shade_hit(&comps, remaining)
            },
        }
    }

    /// The color seen along the reflection vector, scaled by the material's
    /// reflectivity.
    pub fn reflected_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let reflective = comps.obj.material().reflective;
        if reflective == 0.0 || remaining == 0 {
            return Color::black();
        }

        let reflect_ray = Ray4D::new(comps.over_point, comps.reflectv);
        self.color_at(&reflect_ray, remaining - 1) * reflective
    }

    /// The color seen through the surface, bent by Snell's law and scaled by
    /// the material's transparency.
    ///
    /// Black under total internal reflection; that light shows up in the
    /// reflected color instead.
    pub fn refracted_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let transparency = comps.obj.material().transparency;
        if transparency == 0.0 || remaining == 0 {
            return Color::black();
        }

        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = n_ratio.powi(2) * (1.0 - cos_i.powi(2));

        if sin2_t > 1.0 {
            return Color::black();
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t)
            - comps.eyev * n_ratio;

        let refract_ray = Ray4D::new(comps.under_point, direction);
        self.color_at(&refract_ray, remaining - 1) * transparency
    }
}

/* Tests */

#[cfg(test)]
use crate::{ consts::MAX_RECURSION_DEPTH, intersect::Intersection,
    pattern::Pattern };

#[cfg(test)]
fn comps_for<'a>(r: &Ray4D, xs: &Intersections<'a>, index: usize)
    -> IntersectionComputation<'a> {
    IntersectionComputation::new(r, &xs.intersections[index], xs)
}

#[cfg(test)]
fn diagonal_down_ray() -> Ray4D {
    let k = 2.0f64.sqrt() / 2.0;
    Ray4D::new(Tuple4D::point(0.0, 0.0, -3.0), Tuple4D::vector(0.0, -k, k))
}

#[test]
fn default_world_contents() {
    let w = World::new();

    assert_eq!(w.objects.len(), 2);
    assert_eq!(w.light_source.position, Tuple4D::point(-10.0, 10.0, -10.0));
    assert_eq!(w.objects[0].material().color, Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(*w.objects[1].transform(), Matrix4D::scaling(0.5, 0.5, 0.5));
    assert_eq!(*w.objects[1].inverse(), Matrix4D::scaling(2.0, 2.0, 2.0));
}

#[test]
fn intersect_default_world_with_ray() {
    let w = World::new();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let is = w.intersect(&r);
    let ts: Vec<f64> = is.intersections.iter().map(|i| i.t).collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection_from_outside() {
    let w = World::new();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    let xs = w.intersect(&r);
    let c = w.shade_hit(&comps_for(&r, &xs, 0), MAX_RECURSION_DEPTH);

    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w = World::new();
    w.light_source = PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.25, 0.0),
    );

    let r = Ray4D::new(
        Tuple4D::origin(),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let xs = Intersections { intersections: vec![
        Intersection::new(0.5, &w.objects[1])
    ]};
    let c = w.shade_hit(&comps_for(&r, &xs, 0), MAX_RECURSION_DEPTH);

    assert_eq!(c, Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    let mut w = World::empty();
    w.light_source = PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.0, -10.0),
    );

    w.objects.push(Shape::sphere());
    w.objects.push(Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 10.0)).unwrap());

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let xs = Intersections { intersections: vec![
        Intersection::new(4.0, &w.objects[1])
    ]};
    let c = w.shade_hit(&comps_for(&r, &xs, 0), MAX_RECURSION_DEPTH);

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn color_ray_miss() {
    let w = World::new();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(w.color_at(&r, MAX_RECURSION_DEPTH), Color::black());
}

#[test]
fn color_ray_hit() {
    let w = World::new();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at(&r, MAX_RECURSION_DEPTH),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_behind_ray() {
    let mut w = World::new();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.75),
        Tuple4D::vector(0.0, 0.0, -1.0)
    );

    let inner_color = w.objects[1].material().color;
    assert_eq!(w.color_at(&r, MAX_RECURSION_DEPTH), inner_color);
}

#[test]
fn shadow_collinear_point_and_light() {
    assert!(!World::new().is_shadowed(Tuple4D::point(0.0, 10.0, 0.0)));
}

#[test]
fn shadow_object_between_point_and_light() {
    assert!(World::new().is_shadowed(Tuple4D::point(10.0, -10.0, 10.0)));
}

#[test]
fn shadow_object_behind_light() {
    assert!(!World::new().is_shadowed(Tuple4D::point(-20.0, 20.0, -20.0)));
}

#[test]
fn shadow_object_behind_point() {
    assert!(!World::new().is_shadowed(Tuple4D::point(-2.0, 2.0, -2.0)));
}

#[test]
fn reflected_color_of_nonreflective_material() {
    let mut w = World::new();
    w.objects[1].material.ambient = 1.0;

    let r = Ray4D::new(
        Tuple4D::origin(),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let xs = Intersections { intersections: vec![
        Intersection::new(1.0, &w.objects[1])
    ]};

    assert_eq!(w.reflected_color(&comps_for(&r, &xs, 0), MAX_RECURSION_DEPTH),
        Color::black());
}

#[cfg(test)]
fn world_with_reflective_floor() -> World {
    let mut w = World::new();
    w.objects.push(Shape::plane()
        .with_material(Material { reflective: 0.5, ..Default::default() })
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0)).unwrap());

    w
}

#[test]
fn reflected_color_of_reflective_material() {
    let w = world_with_reflective_floor();
    let r = diagonal_down_ray();
    let xs = Intersections { intersections: vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2])
    ]};
    let comps = comps_for(&r, &xs, 0);

    assert_eq!(w.reflected_color(&comps, MAX_RECURSION_DEPTH),
        Color::rgb(0.190332, 0.237915, 0.142749));
}

#[test]
fn shade_hit_with_reflective_material() {
    let w = world_with_reflective_floor();
    let r = diagonal_down_ray();
    let xs = Intersections { intersections: vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2])
    ]};
    let comps = comps_for(&r, &xs, 0);

    assert_eq!(w.shade_hit(&comps, MAX_RECURSION_DEPTH),
        Color::rgb(0.876757, 0.924340, 0.829174));
}

#[test]
fn reflected_color_at_recursion_floor() {
    let w = world_with_reflective_floor();
    let r = diagonal_down_ray();
    let xs = Intersections { intersections: vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2])
    ]};

    assert_eq!(w.reflected_color(&comps_for(&r, &xs, 0), 0), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mut w = World::empty();
    w.light_source = PointLight::new(Color::white(), Tuple4D::origin());

    let mirror = Material { reflective: 1.0, ..Default::default() };
    w.objects.push(Shape::plane().with_material(mirror)
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0)).unwrap());
    w.objects.push(Shape::plane().with_material(mirror)
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0)).unwrap());

    let r = Ray4D::new(Tuple4D::origin(), Tuple4D::vector(0.0, 1.0, 0.0));

    assert!(w.color_at(&r, MAX_RECURSION_DEPTH).is_finite());
}

#[test]
fn refracted_color_of_opaque_surface() {
    let w = World::new();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let xs = w.intersect(&r);

    assert_eq!(w.refracted_color(&comps_for(&r, &xs, 0), MAX_RECURSION_DEPTH),
        Color::black());
}

#[test]
fn refracted_color_at_recursion_floor() {
    let mut w = World::new();
    w.objects[0].material = Material::glass();

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let xs = w.intersect(&r);

    assert_eq!(w.refracted_color(&comps_for(&r, &xs, 0), 0), Color::black());
}

#[test]
fn refracted_color_under_total_internal_reflection() {
    let k = 2.0f64.sqrt() / 2.0;
    let mut w = World::new();
    w.objects[0].material = Material::glass();

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, k),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );
    let xs = Intersections { intersections: vec![
        Intersection::new(-k, &w.objects[0]),
        Intersection::new(k, &w.objects[0]),
    ]};

    // Inside the sphere, so the second intersection is the one that matters.
    assert_eq!(w.refracted_color(&comps_for(&r, &xs, 1), MAX_RECURSION_DEPTH),
        Color::black());
}

#[test]
fn refracted_color_with_refracted_ray() {
    let mut w = World::new();
    w.objects[0].material.ambient = 1.0;
    w.objects[0].material.pattern = Some(Pattern::test());
    w.objects[1].material.transparency = 1.0;
    w.objects[1].material.refractive_index = 1.5;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.1),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );
    let xs = w.intersect(&r);

    assert_eq!(xs.len(), 4);
    assert_eq!(w.refracted_color(&comps_for(&r, &xs, 2), MAX_RECURSION_DEPTH),
        Color::rgb(0.0, 0.998875, 0.047219));
}

#[cfg(test)]
fn world_with_glass_floor(reflective: f64) -> World {
    let mut w = World::new();

    w.objects.push(Shape::plane()
        .with_material(Material {
            reflective,
            transparency: 0.5,
            refractive_index: 1.5,
            ..Default::default()
        })
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0)).unwrap());

    w.objects.push(Shape::sphere()
        .with_material(Material {
            color: Color::red(),
            ambient: 0.5,
            ..Default::default()
        })
        .with_transform(Matrix4D::translation(0.0, -3.5, -0.5)).unwrap());

    w
}

#[test]
fn shade_hit_with_transparent_material() {
    let w = world_with_glass_floor(0.0);
    let r = diagonal_down_ray();
    let xs = Intersections { intersections: vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2])
    ]};

    assert_eq!(w.shade_hit(&comps_for(&r, &xs, 0), MAX_RECURSION_DEPTH),
        Color::rgb(0.936425, 0.686425, 0.686425));
}

#[test]
fn shade_hit_blends_with_schlick() {
    let w = world_with_glass_floor(0.5);
    let r = diagonal_down_ray();
    let xs = Intersections { intersections: vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2])
    ]};

    assert_eq!(w.shade_hit(&comps_for(&r, &xs, 0), MAX_RECURSION_DEPTH),
        Color::rgb(0.933915, 0.696434, 0.692430));
}
