//! Output of the placement engine.
//!
//! [`Mosaic`] is an owned, read-only copy of a canvas: the final result of a
//! run, or an intermediate checkpoint taken while the run continues.
//!
//! # Output Formats
//!
//! - **Cells** ([`Mosaic::cells`]): `Option<Color>` per cell, row-major
//! - **RGB** ([`Mosaic::to_rgb`]): packed bytes with a background color for
//!   cells that are still empty

mod mosaic;

pub use mosaic::Mosaic;
