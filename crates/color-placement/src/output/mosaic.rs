//! Mosaic struct with packed RGB output.

use crate::canvas::Coordinate;
use crate::color::Color;
use crate::error::ConfigError;

/// Owned copy of a canvas.
///
/// Stores one `Option<Color>` per cell in row-major order along with the
/// grid dimensions. A mosaic never shares storage with the live canvas, so a
/// collaborator can hold on to it (or encode it) while placement continues.
///
/// # Example
///
/// ```
/// use color_placement::{Color, Mosaic};
///
/// let cells = vec![Some(Color::new(0, 0, 0)), None];
/// let mosaic = Mosaic::new(cells, 2, 1).unwrap();
///
/// assert_eq!(mosaic.placed(), 1);
/// assert!(!mosaic.is_complete());
/// assert_eq!(mosaic.to_rgb([255, 255, 255]), vec![0, 0, 0, 255, 255, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mosaic {
    /// Cell colors, row-major order.
    cells: Vec<Option<Color>>,
    width: usize,
    height: usize,
}

impl Mosaic {
    /// Create a mosaic from row-major cells.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MosaicShape`] unless `cells.len() == width * height`.
    pub fn new(cells: Vec<Option<Color>>, width: usize, height: usize) -> Result<Self, ConfigError> {
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(ConfigError::MosaicShape {
                cells: cells.len(),
                width,
                height,
            });
        }
        Ok(Self::from_grid(cells, width, height))
    }

    /// Cells straight from a canvas, whose shape is fixed at construction.
    pub(crate) fn from_grid(cells: Vec<Option<Color>>, width: usize, height: usize) -> Self {
        Self {
            cells,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cells.
    #[inline]
    pub fn cells(&self) -> &[Option<Color>] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, coordinate: Coordinate) -> Option<Color> {
        if coordinate.row >= self.height || coordinate.col >= self.width {
            return None;
        }
        self.cells[coordinate.row * self.width + coordinate.col]
    }

    /// Number of filled cells.
    pub fn placed(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Filled cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Color)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|color| (Coordinate::new(i / width, i % width), color))
        })
    }

    /// Packed `[R, G, B, R, G, B, ...]` bytes, row-major.
    ///
    /// Empty cells are written as `background`. The returned buffer has
    /// length `width * height * 3`.
    pub fn to_rgb(&self, background: [u8; 3]) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.cells.len() * 3);
        for cell in &self.cells {
            let [r, g, b] = cell.map_or(background, |c| c.channels());
            rgb.push(r);
            rgb.push(g);
            rgb.push(b);
        }
        rgb
    }
}
