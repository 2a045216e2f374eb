use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::consts::feq;
use crate::error::{ Error, Result };

/// A homogeneous 4D coordinate.
///
/// Points carry `w == 1.0` and vectors carry `w == 0.0`. Arithmetic is defined
/// for any `w`, so subtracting two points yields a vector and adding a vector
/// to a point yields a point, without any special casing.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple4D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64
}

/// Approximate equality, component-wise within `FEQ_EPSILON`.
impl PartialEq for Tuple4D {
    fn eq(&self, other: &Tuple4D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple4D {
    pub fn tuple(x: f64, y: f64, z: f64, w: f64) -> Tuple4D {
        Tuple4D { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 0.0 }
    }

    /// The point at the origin.
    pub fn origin() -> Tuple4D {
        Tuple4D::point(0.0, 0.0, 0.0)
    }

    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
            && self.w.is_finite()
    }

    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
            + self.w.powi(2)
        )
    }

    /// Scales a tuple to unit length.
    ///
    /// A zero-length tuple is returned unchanged rather than turned into NaNs.
    /// Use `try_normalize` where a degenerate input is a caller error.
    pub fn normalize(&self) -> Tuple4D {
        let mag = self.magnitude();
        if mag == 0.0 {
            return *self;
        }

        *self / mag
    }

    /// Scales a tuple to unit length, failing on a zero-length input.
    pub fn try_normalize(&self) -> Result<Tuple4D> {
        let mag = self.magnitude();
        if mag == 0.0 || !mag.is_finite() {
            return Err(Error::DegenerateVector);
        }

        Ok(*self / mag)
    }

    pub fn dot(&self, other: &Tuple4D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    /// The cross product of two vectors. Always yields a vector.
    pub fn cross(&self, other: &Tuple4D) -> Tuple4D {
        Tuple4D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 0.0
        }
    }

    /// Mirrors an incoming direction about `normal`, which must be unit
    /// length.
    pub fn reflect(&self, normal: &Tuple4D) -> Tuple4D {
        *self - (*normal * 2.0 * self.dot(normal))
    }
}

impl Add for Tuple4D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w
        }
    }
}

impl Sub for Tuple4D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w
        }
    }
}

impl Neg for Tuple4D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w
        }
    }
}

/// Scales every component, `w` included.
///
/// ```
/// # use whitted_tracer::tuple::Tuple4D;
/// let step = Tuple4D::vector(0.0, -0.5, 2.0);
/// assert_eq!(step * 4.0, Tuple4D::vector(0.0, -2.0, 8.0));
/// assert_eq!(4.0 * step, step * 4.0);
/// ```
impl Mul<f64> for Tuple4D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
            w: self.w * other
        }
    }
}

impl Mul<Tuple4D> for f64 {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        other * self
    }
}

impl Div<f64> for Tuple4D {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
            w: self.w / other
        }
    }
}

/* Tests */

#[test]
fn point_and_vector_constructors() {
    let p = Tuple4D::point(-0.5, 9.0, 2.25);
    let v = Tuple4D::vector(-0.5, 9.0, 2.25);

    assert!(p.is_point() && !p.is_vector());
    assert!(v.is_vector() && !v.is_point());
    assert_eq!(Tuple4D::origin(), Tuple4D::tuple(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn point_plus_vector_is_point() {
    let p = Tuple4D::point(1.0, -4.0, 2.0);
    let v = Tuple4D::vector(0.5, 4.0, -7.0);

    assert_eq!(p + v, Tuple4D::point(1.5, 0.0, -5.0));
    assert!((p + v).is_point());
}

#[test]
fn difference_of_points_is_vector() {
    let eye = Tuple4D::point(0.0, 1.5, -5.0);
    let target = Tuple4D::point(2.0, 1.0, 3.0);

    assert_eq!(target - eye, Tuple4D::vector(2.0, -0.5, 8.0));
}

#[test]
fn point_minus_vector_is_point() {
    let p = Tuple4D::point(0.0, 0.0, 0.0);
    let v = Tuple4D::vector(0.0, 1e-3, 0.0);

    assert_eq!(p - v, Tuple4D::point(0.0, -1e-3, 0.0));
}

#[test]
fn negation_flips_every_component() {
    let t = Tuple4D::tuple(0.0, 6.0, -2.5, 1.0);

    assert_eq!(-t, Tuple4D::tuple(0.0, -6.0, 2.5, -1.0));
    assert_eq!(-(-t), t);
}

#[test]
fn mul_and_div_scalar() {
    let t = Tuple4D::tuple(2.0, 0.0, -6.0, 1.0);

    assert_eq!(t * 1.5, Tuple4D::tuple(3.0, 0.0, -9.0, 1.5));
    assert_eq!(t * -1.0, -t);
    assert_eq!(t / 4.0, Tuple4D::tuple(0.5, 0.0, -1.5, 0.25));
}

#[test]
fn magnitude_of_vectors() {
    assert_eq!(Tuple4D::vector(0.0, -7.0, 0.0).magnitude(), 7.0);
    assert_eq!(Tuple4D::vector(2.0, -3.0, 6.0).magnitude(), 7.0);
}

#[test]
fn normalize_scales_to_unit_length() {
    let v = Tuple4D::vector(2.0, -3.0, 6.0);

    assert_eq!(v.normalize(), Tuple4D::vector(2.0 / 7.0, -3.0 / 7.0, 6.0 / 7.0));
}

#[test]
fn normalize_has_unit_magnitude() {
    let vs = [
        Tuple4D::vector(4.0, 0.0, 0.0),
        Tuple4D::vector(-0.001, 0.002, 0.0),
        Tuple4D::vector(1e6, -3e5, 42.0),
    ];

    for v in vs.iter() {
        assert!(crate::consts::feq(v.normalize().magnitude(), 1.0));
    }
}

#[test]
fn normalize_zero_vector() {
    let zero = Tuple4D::vector(0.0, 0.0, 0.0);

    assert_eq!(zero.normalize(), zero);
    assert!(matches!(zero.try_normalize(), Err(Error::DegenerateVector)));
    assert!(Tuple4D::vector(0.0, 3.0, 0.0).try_normalize().is_ok());
}

#[test]
fn dot_product() {
    let a = Tuple4D::vector(3.0, -1.0, 2.0);
    let b = Tuple4D::vector(1.0, 5.0, 4.0);

    assert_eq!(a.dot(&b), 6.0);
    assert_eq!(Tuple4D::vector(1.0, 0.0, 0.0).dot(&Tuple4D::vector(0.0, 0.0, 9.0)), 0.0);
}

#[test]
fn cross_product_is_anticommutative() {
    let a = Tuple4D::vector(3.0, -1.0, 2.0);
    let b = Tuple4D::vector(1.0, 5.0, 4.0);

    assert_eq!(a.cross(&b), Tuple4D::vector(-14.0, -10.0, 16.0));
    assert_eq!(b.cross(&a), Tuple4D::vector(14.0, 10.0, -16.0));
    assert_eq!(a.cross(&b).dot(&a), 0.0);
}

#[test]
fn reflect_off_floor() {
    let down_right = Tuple4D::vector(2.0, -3.0, 0.5);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(down_right.reflect(&up), Tuple4D::vector(2.0, 3.0, 0.5));
}

#[test]
fn reflect_off_slope() {
    let h = 2.0f64.sqrt() / 2.0;
    let v = Tuple4D::vector(-1.0, 0.0, 0.0);
    let n = Tuple4D::vector(h, 0.0, h);

    assert_eq!(v.reflect(&n), Tuple4D::vector(0.0, 0.0, 1.0));
}
