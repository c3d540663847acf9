use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{ColorCube, Phase, Placement, PlacementStrategy};
use crate::canvas::{Canvas, Coordinate};
use crate::color::{Color, ColorSpace};
use crate::error::{ConfigError, PlacementError};

/// Randomized walk with backtracking over the grid.
///
/// The walk moves to the empty edge-sharing neighbors of the current cell in
/// shuffled order. When none are left it backtracks along the trail of
/// placed cells. Each visited empty cell receives the available color
/// closest to the weighted mean of its filled neighborhood, found by a shell
/// search in a [`ColorCube`] starting at the previously placed color.
#[derive(Debug, Clone)]
pub struct CubeWalk {
    space: ColorSpace,
    cube: ColorCube,
    start: Coordinate,
    start_color: Color,
    radius: usize,
    position: Coordinate,
    /// Level index of the most recently placed color.
    cursor: [usize; 3],
    pending: VecDeque<Coordinate>,
    trail: Vec<Coordinate>,
    phase: Phase,
}

impl CubeWalk {
    /// Prepare a walk over `canvas` starting at `start` with `start_color`.
    ///
    /// `radius` is the half-width of the square window averaged around each
    /// visited cell; a neighbor at Manhattan distance `d` weighs
    /// `2 * radius - d`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SizeMismatch`] if `canvas` is not empty or does not
    /// hold one cell per color, and [`ConfigError::ZeroValue`] for a zero
    /// radius.
    pub fn new(
        space: ColorSpace,
        canvas: &Canvas,
        start: Coordinate,
        start_color: Color,
        radius: usize,
    ) -> Result<Self, ConfigError> {
        if canvas.len() != space.len() || canvas.filled_count() != 0 {
            return Err(ConfigError::SizeMismatch {
                cells: canvas.empty_count(),
                colors: space.len(),
            });
        }
        if radius == 0 {
            return Err(ConfigError::ZeroValue {
                name: "neighborhood radius",
            });
        }

        Ok(Self {
            space,
            cube: ColorCube::new(space),
            start,
            start_color,
            radius,
            position: start,
            cursor: space.index_of(&start_color),
            pending: VecDeque::new(),
            trail: Vec::new(),
            phase: Phase::Seeding,
        })
    }

    /// Move to the next empty cell, refilling the pending list from the
    /// current cell and backtracking when it runs dry.
    fn advance(&mut self, canvas: &Canvas, rng: &mut StdRng) -> Result<Coordinate, PlacementError> {
        loop {
            if self.pending.is_empty() {
                let mut around: Vec<Coordinate> = self
                    .position
                    .orthogonal_neighbors(canvas.width(), canvas.height())
                    .filter(|&c| !canvas.is_filled(c))
                    .collect();
                around.shuffle(rng);
                self.pending.extend(around);
            }

            let next = match self.pending.pop_front() {
                Some(cell) => cell,
                None => self.trail.pop().ok_or(PlacementError::WalkStalled {
                    remaining: self.cube.remaining(),
                })?,
            };
            self.position = next;
            if !canvas.is_filled(next) {
                return Ok(next);
            }
        }
    }

    /// Weighted mean of the filled cells in the window around `cell`.
    fn neighborhood_mean(&self, canvas: &Canvas, cell: Coordinate) -> Option<[f64; 3]> {
        let r = self.radius;
        let max_weight = 2 * r;
        let rows = cell.row.saturating_sub(r)..=(cell.row + r).min(canvas.height() - 1);
        let cols = cell.col.saturating_sub(r)..=(cell.col + r).min(canvas.width() - 1);

        let mut sum = [0.0f64; 3];
        let mut total = 0usize;
        for row in rows {
            for col in cols.clone() {
                let other = Coordinate::new(row, col);
                if other == cell {
                    continue;
                }
                let Some(color) = canvas.get(other) else {
                    continue;
                };
                let weight = max_weight.saturating_sub(cell.manhattan(other));
                if weight == 0 {
                    continue;
                }
                for (acc, channel) in sum.iter_mut().zip(color.channels()) {
                    *acc += channel as f64 * weight as f64;
                }
                total += weight;
            }
        }

        (total > 0).then(|| sum.map(|s| s / total as f64))
    }

    fn commit(
        &mut self,
        canvas: &mut Canvas,
        cell: Coordinate,
        index: [usize; 3],
    ) -> Result<Placement, PlacementError> {
        let phase = self.phase;
        let color = self
            .cube
            .take(index)
            .ok_or(PlacementError::ColorsExhausted {
                empty: canvas.empty_count(),
            })?;
        canvas.place(cell, color)?;
        self.cursor = index;
        self.trail.push(cell);

        if self.cube.remaining() == 0 {
            if !canvas.is_complete() {
                return Err(PlacementError::Incomplete {
                    placed: canvas.filled_count(),
                    total: canvas.len(),
                });
            }
            self.phase = Phase::Done;
            tracing::debug!("walk done");
        } else if phase == Phase::Seeding {
            self.phase = Phase::Growing;
        }

        Ok(Placement {
            coordinate: cell,
            color,
            phase,
        })
    }
}

impl PlacementStrategy for CubeWalk {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn remaining(&self) -> usize {
        self.cube.remaining()
    }

    fn step(
        &mut self,
        canvas: &mut Canvas,
        rng: &mut StdRng,
    ) -> Result<Option<Placement>, PlacementError> {
        match self.phase {
            Phase::Done => Ok(None),
            Phase::Seeding => {
                tracing::debug!(start = %self.start, color = %self.start_color, "walk seeded");
                let index = self.space.index_of(&self.start_color);
                self.commit(canvas, self.start, index).map(Some)
            }
            Phase::Growing => {
                let cell = self.advance(canvas, rng)?;
                let mean = self
                    .neighborhood_mean(canvas, cell)
                    .ok_or(PlacementError::UnscoredCell(cell))?;
                let (index, _) =
                    self.cube
                        .nearest(self.cursor, mean)
                        .ok_or(PlacementError::ColorsExhausted {
                            empty: canvas.empty_count(),
                        })?;
                self.commit(canvas, cell, index).map(Some)
            }
        }
    }
}
