//! Enumeration of a quantized RGB color space.

use super::rgb::Color;
use crate::error::ConfigError;

/// Smallest accepted bit depth (one bit per channel).
pub const MIN_BITS: u32 = 3;
/// Largest accepted bit depth (eight bits per channel).
pub const MAX_BITS: u32 = 24;

/// A quantized RGB color space of `levels^3` colors.
///
/// Each channel takes `levels = 2^(bits/3)` values spaced `step = 256 / levels`
/// apart, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpace {
    bits: u32,
    levels: usize,
    step: u32,
}

impl ColorSpace {
    /// Validate `bits` and derive the quantization.
    ///
    /// # Errors
    ///
    /// [`ConfigError::BitDepthNotDivisible`] when `bits % 3 != 0`, and
    /// [`ConfigError::BitDepthOutOfRange`] outside `3..=24`.
    ///
    /// # Example
    /// ```
    /// use color_placement::ColorSpace;
    /// let space = ColorSpace::new(15).unwrap();
    /// assert_eq!(space.levels(), 32);
    /// assert_eq!(space.step(), 8);
    /// assert_eq!(space.len(), 32 * 32 * 32);
    /// ```
    pub fn new(bits: u32) -> Result<Self, ConfigError> {
        if bits % 3 != 0 {
            return Err(ConfigError::BitDepthNotDivisible(bits));
        }
        if !(MIN_BITS..=MAX_BITS).contains(&bits) {
            return Err(ConfigError::BitDepthOutOfRange {
                bits,
                min: MIN_BITS,
                max: MAX_BITS,
            });
        }

        let levels = 1usize << (bits / 3);
        Ok(Self {
            bits,
            levels,
            step: 256 / levels as u32,
        })
    }

    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Values per channel.
    #[inline]
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Distance between adjacent channel values.
    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Total number of colors, `levels^3`.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels * self.levels * self.levels
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The color at channel indices `(r, g, b)`, each in `0..levels`.
    #[inline]
    pub fn color_at(&self, r: usize, g: usize, b: usize) -> Color {
        Color::new(self.scale(r), self.scale(g), self.scale(b))
    }

    /// Channel indices of a color belonging to this space.
    #[inline]
    pub fn index_of(&self, color: &Color) -> [usize; 3] {
        let step = self.step;
        [
            (color.r() as u32 / step) as usize,
            (color.g() as u32 / step) as usize,
            (color.b() as u32 / step) as usize,
        ]
    }

    /// Flat index of a color in [`ColorSpace::colors`] order.
    #[inline]
    pub fn flat_index_of(&self, color: &Color) -> usize {
        let [r, g, b] = self.index_of(color);
        (r * self.levels + g) * self.levels + b
    }

    /// Darkest color of the space.
    pub fn black(&self) -> Color {
        self.color_at(0, 0, 0)
    }

    /// Brightest color of the space (top level on every channel).
    pub fn white(&self) -> Color {
        let top = self.levels - 1;
        self.color_at(top, top, top)
    }

    /// Every color, red outermost and blue innermost.
    pub fn colors(&self) -> Vec<Color> {
        let mut colors = Vec::with_capacity(self.len());
        for r in 0..self.levels {
            for g in 0..self.levels {
                for b in 0..self.levels {
                    colors.push(self.color_at(r, g, b));
                }
            }
        }
        colors
    }

    #[inline]
    fn scale(&self, index: usize) -> u8 {
        (index as u32 * self.step) as u8
    }
}
