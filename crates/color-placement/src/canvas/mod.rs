//! The placement grid.
//!
//! [`Canvas`] owns every cell of the run and enforces write-once placement.
//! [`Coordinate`] addresses a cell as `(row, col)` and knows its clipped
//! neighborhoods.

mod coordinate;
mod grid;

pub use coordinate::Coordinate;
pub use grid::Canvas;
