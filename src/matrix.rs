use std::fmt;
use std::ops::{ Index, IndexMut, Mul };
use std::convert::From;

use crate::consts::feq;
use crate::error::{ Error, Result };
use crate::tuple::Tuple4D;

/// Row-major 2x2 block, the base case of cofactor expansion.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
struct Matrix2D {
    data: [f64; 4],
}

impl From<[f64; 4]> for Matrix2D {
    fn from(data: [f64; 4]) -> Matrix2D {
        Matrix2D { data }
    }
}

impl Index<(usize, usize)> for Matrix2D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 2) + index.1]
    }
}

/// Row-major 3x3 block.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
struct Matrix3D {
    data: [f64; 9],
}

impl From<[f64; 9]> for Matrix3D {
    fn from(data: [f64; 9]) -> Matrix3D {
        Matrix3D { data }
    }
}

impl Index<(usize, usize)> for Matrix3D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 3) + index.1]
    }
}

/// Homogeneous 4x4 transform, stored row-major.
///
/// Every transformation in the renderer is one of these: shape and pattern
/// transforms, and the camera's view transform. Points (`w == 1.0`) pick up
/// the translation column, vectors (`w == 0.0`) ignore it.
///
/// The private `Matrix2D` and `Matrix3D` blocks exist only for cofactor
/// expansion.
///
/// # Examples
///
/// Transforms compose right to left:
///
/// ```
/// # use whitted_tracer::tuple::Tuple4D;
/// # use whitted_tracer::matrix::Matrix4D;
/// let grow_then_lift = Matrix4D::translation(0.0, 1.0, 0.0)
///     * Matrix4D::scaling(3.0, 3.0, 3.0);
/// assert_eq!(grow_then_lift * Tuple4D::point(1.0, 1.0, 0.0),
///     Tuple4D::point(3.0, 4.0, 0.0));
/// ```
///
/// A camera at `z = 4` looking back at the origin:
///
/// ```
/// # use whitted_tracer::tuple::Tuple4D;
/// # use whitted_tracer::matrix::Matrix4D;
/// let view = Matrix4D::view_transform(
///     Tuple4D::point(0.0, 0.0, 4.0),
///     Tuple4D::point(0.0, 0.0, 0.0),
///     Tuple4D::vector(0.0, 1.0, 0.0),
/// ).unwrap();
/// assert_eq!(view * Tuple4D::point(0.0, 0.0, 0.0),
///     Tuple4D::point(0.0, 0.0, -4.0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix4D {
    data: [f64; 16],
}

impl Matrix2D {
    /// `ad - bc`.
    fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

impl Matrix3D {
    /// Returns the submatrix of a `Matrix3D`, dropping `row` and `col`.
    fn submatrix(&self, row: usize, col: usize) -> Matrix2D {
        let mut buf: [f64; 4] = [0.0; 4];
        let mut count = 0;

        for r in 0..3 {
            for c in 0..3 {
                if !(r == row || c == col) {
                    buf[count] = self[(r, c)];
                    count += 1;
                }
            }
        }

        Matrix2D { data: buf }
    }

    fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        m * if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
    }

    fn determinant(&self) -> f64 {
        (0..3).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }
}

/// Element-wise comparison within `FEQ_EPSILON`.
impl PartialEq for Matrix4D {
    fn eq(&self, other: &Matrix4D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Matrix4D {
    /// The zero matrix.
    pub fn new() -> Matrix4D {
        Matrix4D { data: [0.0; 16] }
    }

    /// The multiplicative identity.
    pub fn identity() -> Matrix4D {
        let mut buf = [0.0; 16];
        buf[0] = 1.0; buf[5] = 1.0; buf[10] = 1.0; buf[15] = 1.0;

        Matrix4D { data: buf }
    }

    /// Moves points by `(x, y, z)`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Per-axis scale factors. A negative factor mirrors across that axis.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Left-handed rotation by `r` radians around the X axis.
    ///
    /// ```
    /// # use whitted_tracer::tuple::Tuple4D;
    /// # use whitted_tracer::matrix::Matrix4D;
    /// let quarter = Matrix4D::rotation_x(std::f64::consts::FRAC_PI_2);
    /// assert_eq!(quarter * Tuple4D::vector(0.0, 0.0, 2.0),
    ///     Tuple4D::vector(0.0, -2.0, 0.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotation by `r` radians around the Y axis.
    pub fn rotation_y(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotation by `r` radians around the Z axis.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Shear where `ab` adds `ab * b` to component `a`.
    ///
    /// ```
    /// # use whitted_tracer::tuple::Tuple4D;
    /// # use whitted_tracer::matrix::Matrix4D;
    /// let lean = Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 0.5);
    /// assert_eq!(lean * Tuple4D::point(1.0, 4.0, 1.0),
    ///     Tuple4D::point(1.0, 4.0, 3.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// World-to-eye transform for an eye at `from` looking at `to`, with `up`
    /// as a rough hint for the vertical.
    ///
    /// Fails with `DegenerateVector` if `from == to`, or if `up` is zero or
    /// parallel to the viewing direction.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D)
        -> Result<Matrix4D> {
        let forward = (to - from).try_normalize()?;
        let left = forward.cross(&up.try_normalize()?);
        let true_up = left.cross(&forward);

        // An `up` parallel to `forward` leaves no sideways axis.
        left.try_normalize()?;

        let mut orientation = Matrix4D::identity();
        orientation[(0, 0)] = left.x;
        orientation[(0, 1)] = left.y;
        orientation[(0, 2)] = left.z;

        orientation[(1, 0)] = true_up.x;
        orientation[(1, 1)] = true_up.y;
        orientation[(1, 2)] = true_up.z;

        orientation[(2, 0)] = -forward.x;
        orientation[(2, 1)] = -forward.y;
        orientation[(2, 2)] = -forward.z;

        Ok(orientation * Matrix4D::translation(-from.x, -from.y, -from.z))
    }

    /// Rows become columns.
    pub fn transposition(&self) -> Matrix4D {
        let mut buf = *self;

        for r in 0..4 {
            for c in (r+1)..4 {
                buf[(r, c)] = self[(c, r)];
                buf[(c, r)] = self[(r, c)];
            }
        }

        buf
    }

    /// Returns the 3x3 submatrix left after removing `row` and `col`.
    fn submatrix(&self, row: usize, col: usize) -> Matrix3D {
        let mut buf: [f64; 9] = [0.0; 9];
        let mut count = 0;

        for r in 0..4 {
            for c in 0..4 {
                if !(r == row || c == col) {
                    buf[count] = self[(r, c)];
                    count += 1;
                }
            }
        }

        Matrix3D { data: buf }
    }

    /// Determinant of the 3x3 block left after removing `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self.submatrix(row, col).determinant()
    }

    /// The minor, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        let m = self.minor(row, col);
        m * if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
    }

    /// Cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        (0..4).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }

    /// Adjugate over determinant.
    ///
    /// Fails with `Error::SingularMatrix` if the determinant is zero or not
    /// finite.
    pub fn inverse(&self) -> Result<Matrix4D> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(Error::SingularMatrix);
        }

        let mut inv = Matrix4D::new();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / det;
            }
        }

        Ok(inv)
    }
}

impl From<[f64; 16]> for Matrix4D {
    fn from(data: [f64; 16]) -> Matrix4D {
        Matrix4D { data }
    }
}

impl Index<(usize, usize)> for Matrix4D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

/// Matrix product. `a * b` applies `b` first, then `a`.
impl Mul<Matrix4D> for Matrix4D {
    type Output = Matrix4D;

    fn mul(self, other: Matrix4D) -> Matrix4D {
        let mut res = Matrix4D::new();

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = self[(r, 0)] * other[(0, c)]
                    + self[(r, 1)] * other[(1, c)]
                    + self[(r, 2)] * other[(2, c)]
                    + self[(r, 3)] * other[(3, c)]
            }
        }

        res
    }
}

/// Transforms a tuple, treated as a column.
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        let mut buf: [f64; 4] = Default::default();

        for (r, v) in buf.iter_mut().enumerate() {
            *v = self[(r, 0)] * other.x
                + self[(r, 1)] * other.y
                + self[(r, 2)] * other.z
                + self[(r, 3)] * other.w;
        }

        Tuple4D { x: buf[0], y: buf[1], z: buf[2], w: buf[3] }
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            write!(f, "|")?;
            for c in 0..4 {
                write!(f, " {} |", self[(r, c)])?;
            }

            // No trailing newline.
            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

/* Tests */

#[test]
fn identity_is_neutral() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 2.0, -1.0,  0.0,  3.0,
                        4.0,  1.0,  5.0, -2.0,
                        0.0,  3.0, -1.0,  1.0,
                        1.0,  0.0,  2.0,  6.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i * Tuple4D::tuple(-1.0, 0.5, 7.0, 1.0),
        Tuple4D::tuple(-1.0, 0.5, 7.0, 1.0));
}

#[test]
fn product_of_two_matrices() {
    let a: Matrix4D = [ 2.0, -1.0,  0.0,  3.0,
                        4.0,  1.0,  5.0, -2.0,
                        0.0,  3.0, -1.0,  1.0,
                        1.0,  0.0,  2.0,  6.0, ].into();

    let b: Matrix4D = [  1.0, 0.0, -2.0,  1.0,
                         3.0, 2.0,  1.0,  0.0,
                        -1.0, 4.0,  0.0,  2.0,
                         0.0, 1.0,  3.0, -1.0, ].into();

    let ab: Matrix4D = [ -1.0,  1.0,   4.0, -1.0,
                          2.0, 20.0, -13.0, 16.0,
                         10.0,  3.0,   6.0, -3.0,
                         -1.0, 14.0,  16.0, -1.0, ].into();

    assert_eq!(a * b, ab);
    assert!(b * a != ab);
}

#[test]
fn matrix_times_tuple() {
    let m: Matrix4D = [ 1.0, 3.0, 0.0, 2.0,
                        0.0, 2.0, 4.0, 1.0,
                        5.0, 1.0, 3.0, 0.0,
                        2.0, 0.0, 1.0, 4.0, ].into();

    assert_eq!(m * Tuple4D::tuple(2.0, -1.0, 3.0, 1.0),
        Tuple4D::tuple(1.0, 11.0, 18.0, 11.0));
}

#[test]
fn transposition_swaps_rows_and_columns() {
    let a: Matrix4D = [ 1.0,  2.0,  3.0,  4.0,
                        5.0,  6.0,  7.0,  8.0,
                        9.0, 10.0, 11.0, 12.0,
                       13.0, 14.0, 15.0, 16.0, ].into();

    let t: Matrix4D = [ 1.0, 5.0,  9.0, 13.0,
                        2.0, 6.0, 10.0, 14.0,
                        3.0, 7.0, 11.0, 15.0,
                        4.0, 8.0, 12.0, 16.0, ].into();

    assert_eq!(a.transposition(), t);
    assert_eq!(t.transposition(), a);
    assert_eq!(Matrix4D::identity().transposition(), Matrix4D::identity());
}

#[test]
fn submatrices_drop_a_row_and_column() {
    let a: Matrix3D = [  4.0, -2.0, 7.0,
                         1.0,  0.0, 3.0,
                        -5.0,  6.0, 2.0, ].into();

    assert_eq!(a.submatrix(1, 1), Matrix2D::from([ 4.0, 7.0,
                                                  -5.0, 2.0 ]));

    let b: Matrix4D = [  3.0,  1.0, -4.0,  2.0,
                         0.0,  5.0,  1.0, -3.0,
                         2.0, -2.0,  6.0,  1.0,
                        -1.0,  4.0,  0.0,  7.0, ].into();

    let s: Matrix3D = [  3.0,  1.0,  2.0,
                         0.0,  5.0, -3.0,
                        -1.0,  4.0,  7.0, ].into();

    assert_eq!(b.submatrix(2, 2), s);
}

#[test]
fn cofactors_of_3x3() {
    let a: Matrix3D = [  4.0, -2.0, 7.0,
                         1.0,  0.0, 3.0,
                        -5.0,  6.0, 2.0, ].into();

    assert_eq!(a.minor(1, 0), -46.0);
    assert_eq!(a.cofactor(1, 0), 46.0);
    assert_eq!(a.cofactor(0, 0), -18.0);
    assert_eq!(a.cofactor(0, 1), -17.0);
    assert_eq!(a.cofactor(0, 2), 6.0);
    assert_eq!(a.determinant(), 4.0);
}

#[test]
fn determinant_of_4x4() {
    let a: Matrix4D = [  3.0,  1.0, -4.0,  2.0,
                         0.0,  5.0,  1.0, -3.0,
                         2.0, -2.0,  6.0,  1.0,
                        -1.0,  4.0,  0.0,  7.0, ].into();

    assert_eq!(a.cofactor(0, 0), 300.0);
    assert_eq!(a.cofactor(0, 1), 33.0);
    assert_eq!(a.cofactor(0, 2), -93.0);
    assert_eq!(a.cofactor(0, 3), 24.0);
    assert_eq!(a.determinant(), 1353.0);
}

#[test]
fn singular_matrix_has_no_inverse() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        2.0, 4.0, 6.0, 8.0,
                        0.0, 1.0, 0.0, 1.0,
                        5.0, 0.0, 2.0, 1.0, ].into();

    assert_eq!(a.determinant(), 0.0);
    assert!(matches!(a.inverse(), Err(Error::SingularMatrix)));
    assert!(Matrix4D::scaling(1.0, 0.0, 1.0).inverse().is_err());
}

#[test]
fn inverse_of_4x4() {
    let a: Matrix4D = [ 2.0,  0.0,  1.0, -1.0,
                        1.0,  3.0,  0.0,  2.0,
                        0.0, -1.0,  4.0,  1.0,
                        3.0,  1.0, -2.0,  5.0, ].into();

    let i: Matrix4D = [  0.37126, -0.04790, -0.04192,  0.10180,
                         0.01198,  0.35329, -0.06587, -0.12575,
                         0.05389,  0.08982,  0.20359, -0.06587,
                        -0.20359, -0.00599,  0.11976,  0.13772, ].into();

    assert_eq!(a.determinant(), 167.0);
    assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn inverse_undoes_transform() {
    let ms: [Matrix4D; 3] = [
        [ 2.0,  0.0,  1.0, -1.0,
          1.0,  3.0,  0.0,  2.0,
          0.0, -1.0,  4.0,  1.0,
          3.0,  1.0, -2.0,  5.0, ].into(),
        Matrix4D::translation(1.0, -2.0, 3.0)
            * Matrix4D::rotation_y(0.7)
            * Matrix4D::scaling(2.0, 0.5, 3.0),
        Matrix4D::shearing(1.0, 0.5, 0.0, 0.2, 0.0, 0.3),
    ];

    for m in ms.iter() {
        assert_eq!(m.inverse().unwrap() * *m, Matrix4D::identity());
    }

    let a = ms[0];
    let b = ms[1];
    assert_eq!((a * b) * b.inverse().unwrap(), a);
}

#[test]
fn translation_moves_points_only() {
    let t = Matrix4D::translation(-2.0, 0.5, 4.0);
    let p = Tuple4D::point(1.0, 1.0, 1.0);
    let v = Tuple4D::vector(1.0, 1.0, 1.0);

    assert_eq!(t * p, Tuple4D::point(-1.0, 1.5, 5.0));
    assert_eq!(t.inverse().unwrap() * p, Tuple4D::point(3.0, 0.5, -3.0));
    assert_eq!(t * v, v);
}

#[test]
fn scaling_and_mirroring() {
    let s = Matrix4D::scaling(0.5, -1.0, 3.0);
    let v = Tuple4D::vector(4.0, 2.0, -1.0);

    assert_eq!(s * v, Tuple4D::vector(2.0, -2.0, -3.0));
    assert_eq!(s.inverse().unwrap() * v, Tuple4D::vector(8.0, -2.0, -1.0 / 3.0));
}

#[test]
fn rotations_turn_axes_into_each_other() {
    let quarter = std::f64::consts::FRAC_PI_2;
    let eighth = std::f64::consts::FRAC_PI_4;
    let h = 2.0f64.sqrt() / 2.0;

    assert_eq!(Matrix4D::rotation_y(quarter) * Tuple4D::point(0.0, 0.0, 3.0),
        Tuple4D::point(3.0, 0.0, 0.0));
    assert_eq!(Matrix4D::rotation_z(quarter) * Tuple4D::point(2.0, 0.0, 0.0),
        Tuple4D::point(0.0, 2.0, 0.0));
    assert_eq!(Matrix4D::rotation_z(eighth) * Tuple4D::point(1.0, 0.0, 0.0),
        Tuple4D::point(h, h, 0.0));
    assert_eq!(Matrix4D::rotation_x(-quarter) * Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::point(0.0, 0.0, -1.0));
}

#[test]
fn shear_each_axis() {
    let p = Tuple4D::point(1.0, 2.0, 3.0);
    let shear = |i: usize| {
        let mut k = [0.0; 6];
        k[i] = 2.0;
        Matrix4D::shearing(k[0], k[1], k[2], k[3], k[4], k[5]) * p
    };

    assert_eq!(shear(0), Tuple4D::point(5.0, 2.0, 3.0));
    assert_eq!(shear(1), Tuple4D::point(7.0, 2.0, 3.0));
    assert_eq!(shear(2), Tuple4D::point(1.0, 4.0, 3.0));
    assert_eq!(shear(3), Tuple4D::point(1.0, 8.0, 3.0));
    assert_eq!(shear(4), Tuple4D::point(1.0, 2.0, 5.0));
    assert_eq!(shear(5), Tuple4D::point(1.0, 2.0, 7.0));
}

#[test]
fn composed_transforms_apply_right_to_left() {
    let spin = Matrix4D::rotation_y(std::f64::consts::FRAC_PI_2);
    let grow = Matrix4D::scaling(2.0, 2.0, 2.0);
    let lift = Matrix4D::translation(0.0, 3.0, 0.0);
    let p = Tuple4D::point(0.0, 1.0, 1.0);

    assert_eq!(lift * grow * spin * p, Tuple4D::point(2.0, 5.0, 0.0));
    assert_eq!(spin * grow * lift * p, Tuple4D::point(2.0, 8.0, 0.0));
}

#[test]
fn view_along_negative_z_is_identity() {
    let view = Matrix4D::view_transform(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(0.0, 0.0, -3.0),
        Tuple4D::vector(0.0, 2.0, 0.0),
    ).unwrap();

    assert_eq!(view, Matrix4D::identity());
}

#[test]
fn view_along_positive_z_mirrors() {
    let view = Matrix4D::view_transform(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(0.0, 0.0, 2.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    ).unwrap();

    assert_eq!(view, Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_translates_world_away_from_eye() {
    let view = Matrix4D::view_transform(
        Tuple4D::point(1.0, 2.0, 6.0),
        Tuple4D::point(1.0, 2.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    ).unwrap();

    assert_eq!(view, Matrix4D::translation(-1.0, -2.0, -6.0));
}

#[test]
fn view_from_oblique_eye() {
    let view = Matrix4D::view_transform(
        Tuple4D::point(2.0, 1.0, -3.0),
        Tuple4D::point(-1.0, 4.0, 5.0),
        Tuple4D::vector(0.0, 1.0, 1.0),
    ).unwrap();

    let expected: Matrix4D = [ -0.39043,  0.23426, -0.23426, -0.15617,
                                0.28457,  0.42254, -0.05174, -1.14689,
                                0.33129, -0.33129, -0.88345, -2.98165,
                                0.00000,  0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(view, expected);
}

#[test]
fn degenerate_views() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    // Looking at the eye itself.
    assert!(Matrix4D::view_transform(from, from, up).is_err());

    // Looking straight up.
    assert!(Matrix4D::view_transform(
        from, Tuple4D::point(0.0, 5.0, 0.0), up).is_err());

    // No up hint at all.
    assert!(Matrix4D::view_transform(
        from, Tuple4D::point(0.0, 0.0, 1.0), Tuple4D::vector(0.0, 0.0, 0.0)).is_err());
}
