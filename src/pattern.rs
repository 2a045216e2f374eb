use crate::color::Color;
use crate::error::Result;
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::tuple::Tuple4D;

/// The kinds of procedural patterns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternType {
    /// Alternates between two colors on each unit step along X.
    ///
    /// For a point `(x, y, z)`, if `floor(x) % 2 == 0` the first color is
    /// used; otherwise, the second.
    Stripe(Color, Color),

    /// Alternates between two colors in a 3D checkerboard of unit cubes.
    Checkers(Color, Color),

    /// Returns the pattern-space point itself as a color. Only useful for
    /// checking that points are transformed correctly.
    Test,
}

/// A procedural color pattern with its own transform.
///
/// A pattern is sampled in *pattern space*: a world point is first brought
/// into the owning shape's object space, then through the inverse of the
/// pattern's transform. The inverse is cached whenever the transform is set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub ty: PatternType,

    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Pattern {
    fn with_type(ty: PatternType) -> Pattern {
        Pattern {
            ty,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    pub fn stripe(primary: Color, secondary: Color) -> Pattern {
        Pattern::with_type(PatternType::Stripe(primary, secondary))
    }

    pub fn checker(primary: Color, secondary: Color) -> Pattern {
        Pattern::with_type(PatternType::Checkers(primary, secondary))
    }

    pub fn test() -> Pattern {
        Pattern::with_type(PatternType::Test)
    }

    /// Builder form of `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D) -> Result<Pattern> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Sets the pattern transform, caching its inverse.
    ///
    /// Fails (leaving the pattern untouched) if `transform` is singular.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Samples the pattern at a point in pattern space.
    pub fn pattern_at(&self, p: Tuple4D) -> Color {
        match self.ty {
            PatternType::Stripe(a, b) => {
                if p.x.floor().rem_euclid(2.0) == 0.0 { a } else { b }
            },

            PatternType::Checkers(a, b) => {
                let sum = p.x.floor() + p.y.floor() + p.z.floor();
                if sum.rem_euclid(2.0) == 0.0 { a } else { b }
            },

            PatternType::Test => Color::rgb(p.x, p.y, p.z),
        }
    }

    /// Samples the pattern at a world-space point on `shape`.
    pub fn pattern_at_shape(&self, shape: &Shape, world_point: Tuple4D)
        -> Color {
        let object_point = shape.world_to_object(world_point);
        let pattern_point = self.inverse * object_point;

        self.pattern_at(pattern_point)
    }
}

/* Tests */

#[test]
fn stripe_pattern_is_constant_along_y_and_z() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    for i in 0..3 {
        let d = i as f64;
        assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, d, 0.0)),
            Color::white());
        assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, d)),
            Color::white());
    }
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.9, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point( 1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.1, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.0, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.1, 0.0, 0.0)),
        Color::white());
}

#[test]
fn checkers_repeat_in_each_axis() {
    let pattern = Pattern::checker(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.99, 0.0, 0.0)),
        Color::white());
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.01, 0.0, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 1.01, 0.0)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.01)),
        Color::black());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.5, -0.5, 0.5)),
        Color::white());
}

#[test]
fn stripes_with_object_transformation() {
    let shape = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_pattern_transformation() {
    let shape = Shape::sphere();
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn test_pattern_with_both_transformations() {
    let shape = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    let pattern = Pattern::test()
        .with_transform(Matrix4D::translation(0.5, 1.0, 1.5)).unwrap();

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(2.5, 3.0, 3.5)),
        Color::rgb(0.75, 0.5, 0.25));
}

#[test]
fn singular_pattern_transform_is_rejected() {
    let mut pattern = Pattern::test();

    assert!(pattern.set_transform(Matrix4D::scaling(0.0, 1.0, 1.0)).is_err());
    assert_eq!(*pattern.transform(), Matrix4D::identity());
}
