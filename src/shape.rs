use std::sync::atomic::{ AtomicUsize, Ordering };

use crate::consts::FEQ_EPSILON;
use crate::error::Result;
use crate::intersect::{ Intersection, Intersections };
use crate::light::Material;
use crate::matrix::Matrix4D;
use crate::ray::Ray4D;
use crate::tuple::Tuple4D;

static NEXT_SHAPE_ID: AtomicUsize = AtomicUsize::new(0);

/// An opaque identity for a shape.
///
/// Every constructed shape gets a fresh id. Two intersections belong to the
/// same object exactly when their shapes' ids match, which is what the
/// refraction containment stack relies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeId(usize);

impl ShapeId {
    fn next() -> ShapeId {
        ShapeId(NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// A unit sphere with its center at the object-space origin.
    Sphere,

    /// The object-space XZ plane, with its normal pointing up along Y.
    Plane,
}

/// A primitive placed in the world.
///
/// The transform is private: it can only be replaced through
/// `set_transform`/`with_transform`, which also recompute the cached inverse
/// and inverse-transpose. Those caches are what the intersection and normal
/// code actually use, so they can never go stale.
#[derive(Debug)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,

    id: ShapeId,
    transform: Matrix4D,
    inverse: Matrix4D,
    inverse_transpose: Matrix4D,
}

/// Shapes are equal when they are the same object.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Shape {
    fn with_type(ty: ShapeType) -> Shape {
        Shape {
            ty,
            material: Default::default(),
            id: ShapeId::next(),
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
            inverse_transpose: Matrix4D::identity(),
        }
    }

    /// Creates a unit sphere with identity transform and default material.
    pub fn sphere() -> Shape {
        Shape::with_type(ShapeType::Sphere)
    }

    /// Creates a plane with a normal pointing up along the Y axis.
    pub fn plane() -> Shape {
        Shape::with_type(ShapeType::Plane)
    }

    /// Creates a unit sphere made of glass.
    pub fn glass_sphere() -> Shape {
        Shape::sphere().with_material(Material::glass())
    }

    /// Replaces the material, builder style.
    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Replaces the transform, builder style.
    ///
    /// Fails if `transform` is not invertible.
    pub fn with_transform(mut self, transform: Matrix4D) -> Result<Shape> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Sets the transform property on a Shape, recomputing the cached inverse
    /// and inverse-transpose.
    ///
    /// Fails (leaving the shape untouched) if `transform` is singular.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        let inverse = transform.inverse()?;

        self.transform = transform;
        self.inverse = inverse;
        self.inverse_transpose = inverse.transposition();

        Ok(())
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Returns a reference to the Shape transform.
    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Returns the cached inverse of the Shape transform.
    pub fn inverse(&self) -> &Matrix4D {
        &self.inverse
    }

    /// Returns a reference to this Shape's material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Converts a point from world to object space.
    pub fn world_to_object(&self, point: Tuple4D) -> Tuple4D {
        self.inverse * point
    }

    /// Converts a normal from object to world space.
    ///
    /// The inverse-transpose keeps the normal perpendicular to the surface
    /// under non-uniform scaling. It can leave garbage in `w` (from the
    /// translation column), which is zeroed before normalizing.
    pub fn normal_to_world(&self, normal: Tuple4D) -> Tuple4D {
        let mut world_normal = self.inverse_transpose * normal;
        world_normal.w = 0.0;

        world_normal.normalize()
    }

    /// Intersect an object-space ray with a Shape.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections<'_> {
        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(ray),
            ShapeType::Plane => self.intersect_plane(ray),
        }
    }

    /// Obtain the object-space normal vector of a Shape at an object-space
    /// point.
    pub fn local_normal_at(&self, at: &Tuple4D) -> Tuple4D {
        match self.ty {
            ShapeType::Sphere => Self::normal_at_sphere(at),
            ShapeType::Plane => Self::normal_at_plane(at),
        }
    }

    /// Solves `|O + tD|^2 = 1` for `t`.
    ///
    /// Returns either no intersections, or both roots in ascending order. A
    /// tangent ray yields the same root twice. Roots behind the ray origin are
    /// kept; picking the visible one is the job of `Intersections::hit`.
    fn intersect_sphere(&self, ray: &Ray4D) -> Intersections<'_> {
        // Note that subtracting a point removes the 'w' part of the origin.
        let sphere_to_ray = ray.origin - Tuple4D::origin();

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);

        if discriminant < 0.0 {
            return Intersections::new()
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Intersections {
            intersections: vec![
                Intersection::new(t1, self),
                Intersection::new(t2, self),
            ]
        }
    }

    /// The vector from the sphere's center to the surface point.
    fn normal_at_sphere(at: &Tuple4D) -> Tuple4D {
        *at - Tuple4D::origin()
    }

    /// Intersects a ray with the XZ plane.
    ///
    /// A ray with (almost) no Y component is parallel to the plane and never
    /// hits it. That includes a coplanar ray, which would technically hit
    /// everywhere; it is reported as a miss.
    fn intersect_plane(&self, ray: &Ray4D) -> Intersections<'_> {
        if ray.direction.y.abs() < FEQ_EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;

        Intersections { intersections: vec![Intersection::new(t, self)] }
    }

    /// A plane has the same normal vector at all points across itself.
    fn normal_at_plane(_at: &Tuple4D) -> Tuple4D {
        Tuple4D::vector(0.0, 1.0, 0.0)
    }
}

/// Intersects a world-space ray with a `Shape`.
///
/// The ray is brought into object space with the shape's cached inverse
/// transform, then handed to `local_intersect`. The `t` values are valid for
/// the original ray, since the transformation preserves them.
pub fn intersect<'a>(s: &'a Shape, r: &Ray4D) -> Intersections<'a> {
    let transformed_ray = r.transform(s.inverse());
    s.local_intersect(&transformed_ray)
}

/// Computes the world-space surface normal of `s` at `world_point`.
pub fn normal_at(s: &Shape, world_point: Tuple4D) -> Tuple4D {
    let local_point = s.world_to_object(world_point);
    let local_normal = s.local_normal_at(&local_point);

    s.normal_to_world(local_normal)
}

/* Tests */

#[test]
fn shapes_have_distinct_ids() {
    let a = Shape::sphere();
    let b = Shape::sphere();

    assert_ne!(a.id(), b.id());
    assert!(a == a);
    assert!(a != b);
}

#[test]
fn default_transform_is_identity() {
    let s = Shape::sphere();

    assert_eq!(*s.transform(), Matrix4D::identity());
    assert_eq!(*s.inverse(), Matrix4D::identity());
}

#[test]
fn setting_transform_caches_inverse() {
    let t = Matrix4D::translation(2.0, 3.0, 4.0);
    let s = Shape::sphere().with_transform(t).unwrap();

    assert_eq!(*s.transform(), t);
    assert_eq!(*s.inverse(), Matrix4D::translation(-2.0, -3.0, -4.0));
}

#[test]
fn singular_transform_is_rejected() {
    let mut s = Shape::plane();

    assert!(s.set_transform(Matrix4D::scaling(1.0, 0.0, 1.0)).is_err());
    assert_eq!(*s.transform(), Matrix4D::identity());
    assert!(Shape::sphere().with_transform(Matrix4D::new()).is_err());
}

#[test]
fn glass_sphere_material() {
    let s = Shape::glass_sphere();

    assert_eq!(s.material().transparency, 1.0);
    assert_eq!(s.material().refractive_index, 1.5);
}

#[test]
fn ray_pierces_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = intersect(&s, &r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, 4.0);
    assert_eq!(xs.intersections[1].t, 6.0);
    assert!(std::ptr::eq(xs.intersections[0].what, &s));
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = intersect(&s, &r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, 5.0);
    assert_eq!(xs.intersections[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 2.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert!(intersect(&Shape::sphere(), &r).intersections.is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = s.local_intersect(&r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, -1.0);
    assert_eq!(xs.intersections[1].t, 1.0);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = intersect(&s, &r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, -6.0);
    assert_eq!(xs.intersections[1].t, -4.0);
}

#[test]
fn intersections_outlive_the_ray() {
    let s = Shape::sphere();
    let xs = {
        let r = Ray4D::new(
            Tuple4D::point(0.0, 0.0, -5.0),
            Tuple4D::vector(0.0, 0.0, 1.0)
        );
        intersect(&s, &r)
    };

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].what.id(), s.id());
}

#[test]
fn ray_hits_scaled_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    let xs = intersect(&s, &r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, 3.0);
    assert_eq!(xs.intersections[1].t, 7.0);
}

#[test]
fn ray_misses_translated_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0)).unwrap();

    assert!(intersect(&s, &r).intersections.is_empty());
}

#[test]
fn normal_on_sphere_axes() {
    let s = Shape::sphere();

    assert_eq!(normal_at(&s, Tuple4D::point(1.0, 0.0, 0.0)),
        Tuple4D::vector(1.0, 0.0, 0.0));
    assert_eq!(normal_at(&s, Tuple4D::point(0.0, 1.0, 0.0)),
        Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(normal_at(&s, Tuple4D::point(0.0, 0.0, 1.0)),
        Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let k = 3.0f64.sqrt() / 3.0;
    let n = normal_at(&Shape::sphere(), Tuple4D::point(k, k, k));

    assert_eq!(n, Tuple4D::vector(k, k, k));
    assert_eq!(n, n.normalize());
}

#[test]
fn compute_normal_on_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0)).unwrap();

    let n = normal_at(&s, Tuple4D::point(0.0, 1.70711, -0.70711));

    assert_eq!(n, Tuple4D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn compute_normal_on_transformed_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(1.0, 0.5, 1.0)
            * Matrix4D::rotation_z(std::f64::consts::PI / 5.0)).unwrap();

    let p = Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0);
    let n = normal_at(&s, p);

    assert_eq!(n, Tuple4D::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane();

    for at in [
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(10.0, 0.0, -10.0),
        Tuple4D::point(-5.0, 0.0, 150.0),
    ].iter() {
        assert_eq!(p.local_normal_at(at), Tuple4D::vector(0.0, 1.0, 0.0));
    }
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();

    let above = Ray4D::new(
        Tuple4D::point(0.0, 10.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let coplanar = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert!(p.local_intersect(&above).intersections.is_empty());
    assert!(p.local_intersect(&coplanar).intersections.is_empty());
}

#[test]
fn ray_intersecting_plane_from_above() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(0.0, -1.0, 0.0)
    );

    let is = p.local_intersect(&r);

    assert_eq!(is.intersections.len(), 1);
    assert_eq!(is.intersections[0].t, 1.0);
    assert!(std::ptr::eq(is.intersections[0].what, &p));
}

#[test]
fn ray_intersecting_plane_from_below() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, -1.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );

    let is = p.local_intersect(&r);

    assert_eq!(is.intersections.len(), 1);
    assert_eq!(is.intersections[0].t, 1.0);
}

#[test]
fn transformed_plane_normal() {
    let p = Shape::plane()
        .with_transform(Matrix4D::rotation_z(std::f64::consts::PI / 2.0))
        .unwrap();

    assert_eq!(normal_at(&p, Tuple4D::point(0.0, 3.0, 1.0)),
        Tuple4D::vector(-1.0, 0.0, 0.0));
}
