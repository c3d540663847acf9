//! The immutable color value placed on the canvas.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A quantized RGB color with precomputed hue, saturation and brightness.
///
/// Equality and hashing consider the channels only; the derived HSB values
/// are a pure function of them and are computed once in [`Color::new`].
#[derive(Debug, Clone, Copy)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    /// Hue in `0.0..1.0`
    hue: f32,
    /// Saturation in `0.0..=1.0`
    saturation: f32,
    /// Brightness (HSV value) in `0.0..=1.0`
    brightness: f32,
}

impl Color {
    /// Create a color from channel intensities.
    ///
    /// # Example
    /// ```
    /// use color_placement::Color;
    /// let red = Color::new(255, 0, 0);
    /// assert_eq!(red.hue(), 0.0);
    /// assert_eq!(red.saturation(), 1.0);
    /// ```
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        let (hue, saturation, brightness) = hsb(r, g, b);
        Self {
            r,
            g,
            b,
            hue,
            saturation,
            brightness,
        }
    }

    #[inline]
    pub fn r(&self) -> u8 {
        self.r
    }

    #[inline]
    pub fn g(&self) -> u8 {
        self.g
    }

    #[inline]
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Channels as `[R, G, B]`.
    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    #[inline]
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    #[inline]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Squared Euclidean distance between the channel triples.
    ///
    /// The maximum is `3 * 255^2`, which fits comfortably in a `u32`.
    #[inline]
    pub fn squared_distance(&self, other: &Color) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Squared distance to a fractional color, such as a neighborhood mean.
    #[inline]
    pub fn squared_distance_to(&self, other: [f64; 3]) -> f64 {
        let dr = self.r as f64 - other[0];
        let dg = self.g as f64 - other[1];
        let db = self.b as f64 - other[2];
        dr * dr + dg * dg + db * db
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.channels() == other.channels()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.channels().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// HSV decomposition with every component normalized to the unit range.
fn hsb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    (hue, saturation, max)
}
