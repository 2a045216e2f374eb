use std::ops::{ Add, Sub, Mul };

use crate::consts::feq;

/// Linear RGB radiance.
///
/// Shading works on unbounded values; a channel only gets clamped to the
/// displayable `0.0..=1.0` range when the color is quantized for output.
///
/// # Examples
///
/// Combine a surface color with a light's intensity:
///
/// ```
/// # use whitted_tracer::color::Color;
/// let surface = Color::rgb(1.0, 0.2, 0.4);
/// let light = Color::rgb(0.9, 1.0, 0.1);
/// assert_eq!(surface * light, Color::rgb(0.9, 0.2, 0.04));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Channel-wise comparison within `FEQ_EPSILON`, like `Tuple4D`.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl From<[f64; 3]> for Color {
    fn from(v: [f64; 3]) -> Color {
        Color { r: v[0], g: v[1], b: v[2] }
    }
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black. Also the background color of every render.
    pub fn black() -> Color {
        Color { r: 0.0, g: 0.0, b: 0.0 }
    }

    pub fn white() -> Color {
        Color { r: 1.0, g: 1.0, b: 1.0 }
    }

    pub fn red() -> Color {
        Color { r: 1.0, g: 0.0, b: 0.0 }
    }

    pub fn green() -> Color {
        Color { r: 0.0, g: 1.0, b: 0.0 }
    }

    pub fn blue() -> Color {
        Color { r: 0.0, g: 0.0, b: 1.0 }
    }

    /// Channel-wise product; how a light's intensity filters a surface color.
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        let r = c1.r * c2.r;
        let g = c1.g * c2.g;
        let b = c1.b * c2.b;

        Color { r, g, b }
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Quantizes the color to 8-bit channels.
    ///
    /// Each channel is scaled to `0..=255`, rounded, and clamped. NaN channels
    /// quantize to zero.
    ///
    /// ```
    /// # use whitted_tracer::color::Color;
    /// let c = Color::rgb(1.5, 0.5, -0.5);
    /// assert_eq!(c.to_rgb8(), [255, 128, 0]);
    /// ```
    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |v: f64| -> u8 {
            if v.is_nan() {
                return 0;
            }

            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

/// Shorthand for `Color::hadamard`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

/* Tests */

#[test]
fn sum_and_difference() {
    let sky = Color::rgb(0.25, 0.5, 1.0);
    let haze = Color::rgb(0.5, 0.25, 0.125);

    assert_eq!(sky + haze, Color::rgb(0.75, 0.75, 1.125));
    assert_eq!(sky - haze, Color::rgb(-0.25, 0.25, 0.875));
}

#[test]
fn scale_and_filter() {
    let c = Color::rgb(0.1, 0.6, 0.9);

    assert_eq!(c * 0.5, Color::rgb(0.05, 0.3, 0.45));
    assert_eq!(3.0 * c, c * 3.0);
    assert_eq!(c * Color::rgb(1.0, 0.0, 0.5), Color::rgb(0.1, 0.0, 0.45));
    assert_eq!(Color::green() * Color::blue(), Color::black());
}

#[test]
fn quantize_clamps_and_rounds() {
    assert_eq!(Color::black().to_rgb8(), [0, 0, 0]);
    assert_eq!(Color::white().to_rgb8(), [255, 255, 255]);
    assert_eq!(Color::rgb(0.0, 0.5, 1.0).to_rgb8(), [0, 128, 255]);
    assert_eq!(Color::rgb(f64::NAN, 7.0, -3.0).to_rgb8(), [0, 255, 0]);
}
