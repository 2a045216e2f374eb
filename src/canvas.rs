use std::fs;
use std::path::Path;
use std::slice::ChunksMut;

use image::{ Rgb, RgbImage };

use crate::color::Color;
use crate::error::Result;

/// Maximum line length of a PPM file.
const PPM_LINE_WIDTH: usize = 70;

/// A canvas for drawing pixels.
///
/// The frame buffer of a render. The `Camera` casts one ray per pixel and the
/// resulting color is written here; once rendering finishes the canvas is
/// handed to an encoder (PPM or PNG).
///
/// Pixels are stored row-major, so row `y` occupies the contiguous range
/// `y * width .. (y + 1) * width`.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `x` is the column and `y` is the row,
    /// both zero-indexed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whitted_tracer::color::Color;
    /// # use whitted_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Returns `None` if the location is out-of-bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable access to every row as its own disjoint slice.
    ///
    /// The renderer hands these out to worker threads; since no two slices
    /// overlap, workers write pixels without any locking.
    pub(crate) fn rows_mut(&mut self) -> ChunksMut<'_, Color> {
        self.pixels.chunks_mut(self.width.max(1))
    }

    /// Encodes the canvas as a plain (P3) PPM image.
    ///
    /// Every row starts a new line, and no line exceeds 70 columns; a row that
    /// would is wrapped between components.
    pub fn to_ppm(&self) -> String {
        let mut ppm = format!("P3\n{} {}\n255\n", self.width, self.height);

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line = String::new();

            for component in row.iter().flat_map(|p| p.to_rgb8().to_vec()) {
                let token = component.to_string();

                if !line.is_empty()
                    && line.len() + 1 + token.len() > PPM_LINE_WIDTH {
                    ppm.push_str(&line);
                    ppm.push('\n');
                    line.clear();
                }

                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&token);
            }

            ppm.push_str(&line);
            ppm.push('\n');
        }

        ppm
    }

    /// Converts the canvas to an 8-bit RGB image, quantizing each pixel with
    /// `Color::to_rgb8`.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let index = (y as usize) * self.width + (x as usize);
            Rgb(self.pixels[index].to_rgb8())
        })
    }

    /// Saves a canvas to a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Saves a canvas, picking the encoder from the file extension.
    ///
    /// `.png` (in any case) writes a PNG; everything else is written as a
    /// plain PPM.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let is_png = path.as_ref().extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("png"));

        if is_png {
            self.save_png(path)
        } else {
            fs::write(path, self.to_ppm())?;
            Ok(())
        }
    }
}

/* Tests */

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    assert!(c.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn out_of_bounds_pixels_are_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::red());
    c.write_pixel(0, 5, &Color::red());

    assert_eq!(c.read_pixel(2, 0), None);
    assert!(c.pixels().iter().all(|p| *p == Color::black()));
}

#[test]
fn rows_are_disjoint_and_row_major() {
    let mut c = Canvas::new(3, 2);
    for (y, row) in c.rows_mut().enumerate() {
        assert_eq!(row.len(), 3);
        row[1] = Color::rgb(y as f64, 0.0, 0.0);
    }

    assert_eq!(c.read_pixel(1, 0).unwrap(), Color::black());
    assert_eq!(c.read_pixel(1, 1).unwrap(), Color::rgb(1.0, 0.0, 0.0));
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);
    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(lines, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(ppm.lines().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_newline() {
    assert!(Canvas::new(5, 3).to_ppm().ends_with('\n'));
}

#[test]
fn image_matches_quantized_pixels() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(2, 1, &Color::rgb(1.5, 0.5, -0.5));

    let img = c.to_image();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [255, 128, 0]);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
}

#[test]
fn save_picks_encoder_from_extension() {
    let mut c = Canvas::new(4, 3);
    c.write_pixel(1, 2, &Color::rgb(0.2, 0.4, 1.0));

    let dir = std::env::temp_dir();
    let png = dir.join(format!("canvas-{}.PNG", std::process::id()));
    let ppm = dir.join(format!("canvas-{}.ppm", std::process::id()));
    c.save(&png).unwrap();
    c.save(&ppm).unwrap();

    let decoded = image::load_from_memory_with_format(&fs::read(&png).unwrap(),
        image::ImageFormat::Png).unwrap().to_rgb8();
    let text = fs::read_to_string(&ppm).unwrap();
    let _ = fs::remove_file(&png);
    let _ = fs::remove_file(&ppm);

    assert_eq!(decoded, c.to_image());
    assert_eq!(decoded.get_pixel(1, 2).0, [51, 102, 255]);
    assert_eq!(text, c.to_ppm());
}
