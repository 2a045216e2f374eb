use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;

/// A ray with an origin point and a direction vector.
///
/// The direction is not required to be unit length; a ray transformed into a
/// scaled shape's local space generally isn't, and the intersection math
/// accounts for that.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray4D {
    pub origin: Tuple4D,
    pub direction: Tuple4D,
}

impl Ray4D {
    /// Creates a ray, coercing `origin` to a point and `direction` to a
    /// vector.
    pub fn new(mut origin: Tuple4D, mut direction: Tuple4D) -> Ray4D {
        if !origin.is_point() {
            origin.w = 1.0;
        }

        if !direction.is_vector() {
            direction.w = 0.0;
        }

        Ray4D { origin, direction }
    }

    /// The point at distance `t` along the ray.
    pub fn position(&self, t: f64) -> Tuple4D {
        self.origin + (t * self.direction)
    }

    /// Maps both the origin and the direction through `m`.
    pub fn transform(&self, m: &Matrix4D) -> Ray4D {
        Ray4D {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }
}

/* Tests */

#[test]
fn positions_along_ray() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 2.0)
    );

    assert_eq!(r.position(0.0), r.origin);
    assert_eq!(r.position(2.5), Tuple4D::point(0.0, 1.0, 0.0));
    assert_eq!(r.position(-0.5), Tuple4D::point(0.0, 1.0, -6.0));
}

#[test]
fn ray_coerces_components() {
    let r = Ray4D::new(
        Tuple4D::tuple(1.0, 2.0, 3.0, 0.0),
        Tuple4D::tuple(0.0, 1.0, 0.0, 1.0)
    );

    assert!(r.origin.is_point());
    assert!(r.direction.is_vector());
}

#[test]
fn translating_ray_moves_origin_only() {
    let r = Ray4D::new(
        Tuple4D::point(-1.0, 0.0, 2.0),
        Tuple4D::vector(1.0, 1.0, 0.0)
    );
    let moved = r.transform(&Matrix4D::translation(0.5, -2.0, 0.0));

    assert_eq!(moved.origin, Tuple4D::point(-0.5, -2.0, 2.0));
    assert_eq!(moved.direction, r.direction);
}

#[test]
fn scaling_ray_stretches_direction() {
    let r = Ray4D::new(
        Tuple4D::point(-1.0, 0.0, 2.0),
        Tuple4D::vector(1.0, 1.0, 0.0)
    );
    let scaled = r.transform(&Matrix4D::scaling(0.5, 4.0, 1.0));

    assert_eq!(scaled.origin, Tuple4D::point(-0.5, 0.0, 2.0));
    assert_eq!(scaled.direction, Tuple4D::vector(0.5, 4.0, 0.0));
}
