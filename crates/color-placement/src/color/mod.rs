//! Color values and the quantized RGB color space.
//!
//! - [`Color`]: an immutable channel triple with precomputed hue,
//!   saturation and brightness
//! - [`ColorSpace`]: the `levels^3` colors of a given bit depth
//!
//! # Example
//!
//! ```
//! use color_placement::ColorSpace;
//!
//! let space = ColorSpace::new(3).unwrap();
//! let colors = space.colors();
//! assert_eq!(colors.len(), 8);
//! assert_eq!(colors[1].channels(), [0, 0, 128]);
//! ```

mod rgb;
mod space;

pub use rgb::Color;
pub use space::{ColorSpace, MAX_BITS, MIN_BITS};
