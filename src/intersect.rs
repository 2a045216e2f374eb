use crate::consts::FEQ_EPSILON;
use crate::ray::Ray4D;
use crate::shape::{ Shape, normal_at };
use crate::tuple::Tuple4D;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin), and may be
/// negative.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Shape,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if they intersect the same shape.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && self.what.id() == other.what.id()
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, what: &'a Shape) -> Intersection<'a> {
        Intersection { t, what }
    }
}

/// A collection of intersections.
///
/// Mostly a wrapper for a vector of `Intersection` objects. See the
/// `Intersection` documentation for more information.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    /// Creates a new list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    /// Returns the intersection with the lowest strictly positive `t`.
    ///
    /// If no hit is registered, this function returns `None`. The list does
    /// not need to be sorted; when several intersections share the lowest
    /// `t`, the first one encountered wins.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        let mut best: Option<Intersection<'a>> = None;

        for i in self.intersections.iter() {
            if i.t <= 0.0 {
                continue;
            }

            match best {
                Some(b) if b.t <= i.t => {},
                _ => best = Some(*i),
            }
        }

        best
    }

    /// Sorts the intersections by ascending `t`.
    ///
    /// The sort is stable, and NaN offsets compare as equal to anything.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`; it is everything the shading code
/// needs to know about a single hit.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple4D,

    /// A point slightly above the intersected surface. Used to prevent an
    /// object from shadowing itself (this causes "acne").
    pub over_point: Tuple4D,

    /// A point slightly below the intersected surface. Used as the origin of
    /// refracted rays.
    pub under_point: Tuple4D,

    /// The eye vector for the intersection.
    pub eyev: Tuple4D,

    /// The normal vector of the object being intersected, always facing the
    /// eye.
    pub normalv: Tuple4D,

    /// The intersection ray, reflected across the normal.
    pub reflectv: Tuple4D,

    /// Whether the intersection occurs within the object or not.
    pub inside: bool,

    /// The refractive index of the material being exited.
    pub n1: f64,

    /// The refractive index of the material being entered.
    pub n2: f64,
}

impl<'a> IntersectionComputation<'a> {
    /// Prepares the shading state of `hit`, an intersection of ray `r`.
    ///
    /// `xs` must hold every intersection along `r`, sorted by `t`, so the
    /// refractive indices on both sides of the surface can be worked out.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>, xs: &Intersections<'a>)
        -> IntersectionComputation<'a> {
        let t = hit.t;
        let obj = hit.what;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = normal_at(obj, point);

        let inside = if normalv.dot(&eyev) < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        let over_point = point + normalv * FEQ_EPSILON;
        let under_point = point - normalv * FEQ_EPSILON;

        let reflectv = r.direction.reflect(&normalv);
        let (n1, n2) = Self::refraction_indices(hit, xs);

        IntersectionComputation {
            t, obj,
            point, over_point, under_point,
            eyev, normalv, reflectv,
            inside,
            n1, n2,
        }
    }

    /// Finds the refractive indices on either side of `hit`.
    ///
    /// Walks the intersections in order, keeping a stack of the shapes the
    /// ray is currently inside. The top of the stack just before and just
    /// after `hit` gives `n1` and `n2`; an empty stack means vacuum.
    fn refraction_indices(hit: &Intersection<'a>, xs: &Intersections<'a>)
        -> (f64, f64) {
        fn top_index(containers: &[&Shape]) -> f64 {
            containers.last().map_or(1.0, |s| s.material().refractive_index)
        }

        let mut containers: Vec<&'a Shape> = Vec::new();

        for i in xs.intersections.iter() {
            let is_hit = i == hit;
            let n1 = top_index(&containers);

            match containers.iter().position(|s| s.id() == i.what.id()) {
                Some(j) => { containers.remove(j); },
                None => containers.push(i.what),
            }

            if is_hit {
                return (n1, top_index(&containers));
            }
        }

        (1.0, 1.0)
    }

    /// Calculates the reflectance of a hit.
    ///
    /// The reflectance is a number between 0 and 1, representing what fraction
    /// of the light is reflected for the hit. Under total internal reflection
    /// this is exactly 1.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(&self.normalv);

        // Total internal reflection can only occur if n1 > n2.
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));

            if sin2_t > 1.0 {
                return 1.0
            }

            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

/* Tests */

#[cfg(test)]
use crate::{ consts::feq, matrix::Matrix4D, shape::intersect };

#[test]
fn hit_all_positive() {
    let s = Shape::sphere();
    let xs = Intersections { intersections: vec![
        Intersection::new(1.0, &s),
        Intersection::new(2.0, &s),
    ]};

    assert_eq!(xs.hit(), Some(xs.intersections[0]));
}

#[test]
fn hit_some_negative() {
    let s = Shape::sphere();
    let xs = Intersections { intersections: vec![
        Intersection::new(-1.0, &s),
        Intersection::new(1.0, &s),
    ]};

    assert_eq!(xs.hit(), Some(xs.intersections[1]));
}

#[test]
fn hit_all_negative() {
    let s = Shape::sphere();
    let xs = Intersections { intersections: vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ]};

    assert_eq!(xs.hit(), None);
    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn hit_is_lowest_positive_in_unsorted_list() {
    let s = Shape::sphere();
    let xs = Intersections { intersections: vec![
        Intersection::new(5.0, &s),
        Intersection::new(7.0, &s),
        Intersection::new(-3.0, &s),
        Intersection::new(2.0, &s),
    ]};

    assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
}

#[test]
fn hit_ignores_zero() {
    let s = Shape::sphere();
    let xs = Intersections { intersections: vec![
        Intersection::new(0.0, &s),
        Intersection::new(3.0, &s),
    ]};

    assert_eq!(xs.hit().map(|i| i.t), Some(3.0));
}

#[test]
fn hit_tie_keeps_first() {
    let a = Shape::sphere();
    let b = Shape::sphere();
    let xs = Intersections { intersections: vec![
        Intersection::new(4.0, &a),
        Intersection::new(4.0, &b),
    ]};

    assert_eq!(xs.hit().map(|i| i.what.id()), Some(a.id()));
}

#[test]
fn sort_orders_by_t() {
    let s = Shape::sphere();
    let mut xs = Intersections { intersections: vec![
        Intersection::new(5.0, &s),
        Intersection::new(-3.0, &s),
        Intersection::new(2.0, &s),
    ]};
    xs.sort();

    let ts: Vec<f64> = xs.intersections.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![-3.0, 2.0, 5.0]);
}

#[test]
fn precompute_outside_hit() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = intersect(&s, &r);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs);

    assert_eq!(comps.t, 4.0);
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_hit() {
    let r = Ray4D::new(
        Tuple4D::origin(),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = intersect(&s, &r);
    let comps = IntersectionComputation::new(&r, &xs.intersections[1], &xs);

    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
}

#[test]
fn hit_offsets_over_point() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0)).unwrap();
    let xs = intersect(&s, &r);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs);

    assert!(comps.over_point.z < -FEQ_EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}

#[test]
fn hit_offsets_under_point() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0)).unwrap();
    let xs = intersect(&s, &r);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs);

    assert!(comps.under_point.z > FEQ_EPSILON / 2.0);
    assert!(comps.point.z < comps.under_point.z);
}

#[test]
fn precompute_reflection_vector() {
    let k = 2.0f64.sqrt() / 2.0;
    let s = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -1.0),
        Tuple4D::vector(0.0, -k, k)
    );
    let xs = Intersections { intersections: vec![
        Intersection::new(2.0f64.sqrt(), &s)
    ]};
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs);

    assert_eq!(comps.reflectv, Tuple4D::vector(0.0, k, k));
}

#[test]
fn refraction_indices_of_nested_glass() {
    let mut a = Shape::glass_sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    a.material.refractive_index = 1.5;

    let mut b = Shape::glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, -0.25)).unwrap();
    b.material.refractive_index = 2.0;

    let mut c = Shape::glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 0.25)).unwrap();
    c.material.refractive_index = 2.5;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -4.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections { intersections: vec![
        Intersection::new(2.0, &a),
        Intersection::new(2.75, &b),
        Intersection::new(3.25, &c),
        Intersection::new(4.75, &b),
        Intersection::new(5.25, &c),
        Intersection::new(6.0, &a),
    ]};

    let expected = [
        (1.0, 1.5), (1.5, 2.0), (2.0, 2.5),
        (2.5, 2.5), (2.5, 1.5), (1.5, 1.0),
    ];

    for (i, (n1, n2)) in xs.intersections.iter().zip(expected.iter()) {
        let comps = IntersectionComputation::new(&r, i, &xs);
        assert_eq!(comps.n1, *n1);
        assert_eq!(comps.n2, *n2);
    }
}

#[test]
fn schlick_under_total_internal_reflection() {
    let k = 2.0f64.sqrt() / 2.0;
    let s = Shape::glass_sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, k),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = intersect(&s, &r);
    let comps = IntersectionComputation::new(&r, &xs.intersections[1], &xs);

    assert_eq!(comps.schlick(), 1.0);
}

#[test]
fn schlick_with_perpendicular_ray() {
    let s = Shape::glass_sphere();
    let r = Ray4D::new(
        Tuple4D::origin(),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = intersect(&s, &r);
    let comps = IntersectionComputation::new(&r, &xs.intersections[1], &xs);

    assert!(feq(comps.schlick(), 0.04));
}

#[test]
fn schlick_with_small_angle_and_denser_second_medium() {
    let s = Shape::glass_sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.99, -2.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = intersect(&s, &r);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs);

    assert!(feq(comps.schlick(), 0.48881));
}
