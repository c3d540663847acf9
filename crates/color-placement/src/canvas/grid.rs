use super::Coordinate;
use crate::color::Color;
use crate::error::{ConfigError, PlacementError};
use crate::output::Mosaic;

/// The write-once grid of colors being filled.
///
/// Cells are stored row-major. A cell goes from empty to filled exactly once;
/// [`Canvas::place`] refuses to overwrite.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Option<Color>>,
    filled: usize,
}

impl Canvas {
    /// Create an empty `width x height` canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            filled: 0,
        }
    }

    /// Create an empty canvas with exactly `count` cells.
    pub fn for_colors(count: usize) -> Result<Self, ConfigError> {
        let (width, height) = Self::dimensions_for(count)?;
        Ok(Self::new(width, height))
    }

    /// Derive `(width, height)` with `width * height == count`.
    ///
    /// A perfect square is used when possible. Otherwise the height is
    /// `floor(sqrt(count / 2))` and the width `count / height`, which is
    /// exact for every power of two. If that pair does not multiply out,
    /// the divisor pair closest to a square is used instead.
    ///
    /// # Example
    /// ```
    /// use color_placement::Canvas;
    /// assert_eq!(Canvas::dimensions_for(64).unwrap(), (8, 8));
    /// assert_eq!(Canvas::dimensions_for(8).unwrap(), (4, 2));
    /// assert_eq!(Canvas::dimensions_for(12).unwrap(), (4, 3));
    /// ```
    pub fn dimensions_for(count: usize) -> Result<(usize, usize), ConfigError> {
        if count == 0 {
            return Err(ConfigError::Sizing { colors: count });
        }

        let root = isqrt(count);
        if root * root == count {
            return Ok((root, root));
        }

        let height = isqrt(count / 2).max(1);
        let width = count / height;
        if width * height == count {
            return Ok((width, height));
        }

        // Largest divisor not above the square root is always >= 1.
        let height = (1..=root).rev().find(|d| count % d == 0).unwrap_or(1);
        Ok((count / height, height))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.filled
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.filled == self.cells.len()
    }

    #[inline]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.row < self.height && coordinate.col < self.width
    }

    /// The color at `coordinate`, or `None` if empty or out of bounds.
    #[inline]
    pub fn get(&self, coordinate: Coordinate) -> Option<Color> {
        if !self.contains(coordinate) {
            return None;
        }
        self.cells[self.index(coordinate)]
    }

    #[inline]
    pub fn is_filled(&self, coordinate: Coordinate) -> bool {
        self.get(coordinate).is_some()
    }

    /// Write `color` into an empty cell.
    ///
    /// # Errors
    ///
    /// [`PlacementError::OutOfBounds`] for a coordinate outside the grid and
    /// [`PlacementError::CellOccupied`] if the cell already holds a color.
    pub fn place(&mut self, coordinate: Coordinate, color: Color) -> Result<(), PlacementError> {
        if !self.contains(coordinate) {
            return Err(PlacementError::OutOfBounds {
                coordinate,
                width: self.width,
                height: self.height,
            });
        }
        let index = self.index(coordinate);
        let cell = &mut self.cells[index];
        if cell.is_some() {
            return Err(PlacementError::CellOccupied(coordinate));
        }
        *cell = Some(color);
        self.filled += 1;
        Ok(())
    }

    /// In-bounds 8-neighbors of `coordinate`.
    pub fn neighbors(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> {
        coordinate.neighbors(self.width, self.height)
    }

    /// Colors of the filled 8-neighbors of `coordinate`.
    pub fn filled_neighbors(&self, coordinate: Coordinate) -> impl Iterator<Item = Color> + '_ {
        self.neighbors(coordinate).filter_map(|n| self.get(n))
    }

    /// Empty 8-neighbors of `coordinate`.
    pub fn empty_neighbors(&self, coordinate: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        self.neighbors(coordinate).filter(|&n| !self.is_filled(n))
    }

    /// Owned copy of the current cells. Later placements do not affect it.
    pub fn snapshot(&self) -> Mosaic {
        Mosaic::from_grid(self.cells.clone(), self.width, self.height)
    }

    /// Consume the canvas into its final mosaic.
    pub fn into_mosaic(self) -> Mosaic {
        Mosaic::from_grid(self.cells, self.width, self.height)
    }

    #[inline]
    fn index(&self, coordinate: Coordinate) -> usize {
        coordinate.row * self.width + coordinate.col
    }
}

/// Integer square root (floor).
fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
