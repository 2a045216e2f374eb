use std::f64::consts::PI;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{ Error, Result };
use crate::matrix::Matrix4D;
use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::world::World;

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. Based on camera parameters,
/// different perspectives can be produced. The canvas sits one unit in front
/// of the camera; `pixel_size` is the world-space width of one pixel on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    pub half_width: f64,
    pub half_height: f64,
    pub pixel_size: f64,

    /// The angle describing "how much" the camera can see.
    pub field_of_view: f64,

    /// A matrix describing how the world should be oriented relative to the
    /// camera (typically a view transformation).
    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Camera {
    /// Creates a camera, computing its pixel geometry once.
    ///
    /// Fails if either dimension is zero, the field of view is not strictly
    /// between 0 and pi, or `transform` is not invertible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whitted_tracer::camera::Camera;
    /// # use whitted_tracer::matrix::Matrix4D;
    /// let c = Camera::new(200, 125, std::f64::consts::PI / 2.0,
    ///     Matrix4D::identity()).unwrap();
    /// assert!((c.pixel_size - 0.01).abs() < 1e-9);
    /// ```
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64,
        transform: Matrix4D) -> Result<Camera> {
        if hsize == 0 || vsize == 0 {
            return Err(Error::Scene(
                format!("camera size {}x{} has no pixels", hsize, vsize)
            ));
        }

        if !(field_of_view > 0.0 && field_of_view < PI) {
            return Err(Error::Scene(
                format!("field of view {} is outside (0, pi)", field_of_view)
            ));
        }

        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = half_width * 2.0 / (hsize as f64);

        Ok(Camera {
            hsize,
            vsize,
            half_width,
            half_height,
            pixel_size,
            field_of_view,
            inverse: transform.inverse()?,
            transform,
        })
    }

    /// Replaces the camera transform, recomputing its inverse.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// The world-space ray through the center of pixel (`px`, `py`).
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray4D {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The untransformed coordinates of the pixel in world space
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        // Using the camera matrix, transform the canvas point and origin,
        // computing the ray's direction vector
        let pixel = self.inverse * Tuple4D::point(world_x, world_y, -1.0);
        let origin = self.inverse * Tuple4D::origin();
        let direction = (pixel - origin).normalize();

        Ray4D::new(origin, direction)
    }

    /// Shades every pixel of row `y` into `row`.
    pub(crate) fn render_row(&self, world: &World, y: usize, row: &mut [Color],
        depth: usize) {
        for (x, pixel) in row.iter_mut().enumerate() {
            let ray = self.ray_for_pixel(x, y);
            *pixel = world.color_at(&ray, depth);
        }
    }

    /// Renders `world` on the calling thread.
    ///
    /// `depth` bounds the reflection/refraction bounces of every camera ray.
    /// See `parallel::render` for the multi-threaded equivalent.
    pub fn render(&self, world: &World, depth: usize) -> Canvas {
        let mut image = Canvas::new(self.hsize, self.vsize);

        for (y, row) in image.rows_mut().enumerate() {
            self.render_row(world, y, row, depth);
        }

        image
    }
}

/* Tests */

#[test]
fn construct_camera() {
    let c = Camera::new(160, 120, PI / 2.0, Matrix4D::identity()).unwrap();

    assert_eq!(c.hsize, 160);
    assert_eq!(c.vsize, 120);
    assert_eq!(c.field_of_view, PI / 2.0);
    assert_eq!(*c.transform(), Matrix4D::identity());
}

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, PI / 2.0, Matrix4D::identity()).unwrap();

    assert!((c.pixel_size - 0.01).abs() < 1e-9);
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, PI / 2.0, Matrix4D::identity()).unwrap();

    assert!((c.pixel_size - 0.01).abs() < 1e-9);
}

#[test]
fn zero_sized_camera_is_rejected() {
    assert!(Camera::new(0, 10, PI / 2.0, Matrix4D::identity()).is_err());
    assert!(Camera::new(10, 0, PI / 2.0, Matrix4D::identity()).is_err());
}

#[test]
fn field_of_view_must_be_between_zero_and_pi() {
    for fov in [0.0, -1.0, PI, 4.0, std::f64::NAN].iter() {
        assert!(Camera::new(10, 10, *fov, Matrix4D::identity()).is_err(),
            "accepted fov {}", fov);
    }

    assert!(Camera::new(10, 10, PI - 0.01, Matrix4D::identity()).is_ok());
}

#[test]
fn singular_camera_transform_is_rejected() {
    assert!(Camera::new(10, 10, PI / 2.0, Matrix4D::new()).is_err());

    let mut c = Camera::new(10, 10, PI / 2.0, Matrix4D::identity()).unwrap();
    assert!(c.set_transform(Matrix4D::scaling(1.0, 1.0, 0.0)).is_err());
    assert_eq!(*c.transform(), Matrix4D::identity());
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix4D::identity()).unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix4D::identity()).unwrap();
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, PI / 2.0,
        Matrix4D::rotation_y(PI / 4.0)
            * Matrix4D::translation(0.0, -2.0, 5.0)).unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple4D::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Tuple4D::vector(2.0f64.sqrt() / 2.0, 0.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn render_world_with_camera() {
    use crate::consts::MAX_RECURSION_DEPTH;

    let w = World::new();

    let from = Tuple4D::point(0.0, 0.0, -5.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    let c = Camera::new(11, 11, PI / 2.0,
        Matrix4D::view_transform(from, to, up).unwrap()).unwrap();

    let image = c.render(&w, MAX_RECURSION_DEPTH);
    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}
