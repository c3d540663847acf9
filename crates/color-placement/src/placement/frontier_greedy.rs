use std::collections::VecDeque;

use rand::rngs::StdRng;

use super::{Phase, Placement, PlacementStrategy};
use crate::canvas::{Canvas, Coordinate};
use crate::color::Color;
use crate::error::{ConfigError, PlacementError};
use crate::frontier::Frontier;
use crate::policy::{ColorQueue, DistanceMetric};

/// Greedy growth from seed cells.
///
/// Seeding writes the first colors of the queue onto the seed cells. After
/// that, each color is scored against every frontier cell and goes to the
/// lowest score; among equal scores the first in frontier order wins. Each
/// step costs `O(frontier * 8)`.
#[derive(Debug, Clone)]
pub struct FrontierGreedy {
    queue: ColorQueue,
    seeds: VecDeque<Coordinate>,
    frontier: Frontier,
    metric: DistanceMetric,
    phase: Phase,
}

impl FrontierGreedy {
    /// Prepare a run over `canvas`.
    ///
    /// `seeds` must be distinct cells of the canvas; they enter the frontier
    /// immediately and are filled, in order, by the first colors of `queue`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::SizeMismatch`] if the queue does not hold exactly one
    /// color per empty cell.
    pub fn new(
        canvas: &Canvas,
        queue: ColorQueue,
        seeds: Vec<Coordinate>,
        metric: DistanceMetric,
    ) -> Result<Self, ConfigError> {
        if queue.len() != canvas.empty_count() {
            return Err(ConfigError::SizeMismatch {
                cells: canvas.empty_count(),
                colors: queue.len(),
            });
        }

        let mut frontier = Frontier::new(canvas.width(), canvas.height());
        for &seed in &seeds {
            frontier.insert(seed);
        }

        let phase = if queue.is_empty() {
            Phase::Done
        } else {
            Phase::Seeding
        };

        Ok(Self {
            queue,
            seeds: seeds.into(),
            frontier,
            metric,
            phase,
        })
    }

    /// Current frontier, for inspection.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Lowest-scoring frontier cell for `color`.
    fn best_cell(&self, canvas: &Canvas, color: &Color) -> Result<Coordinate, PlacementError> {
        let mut best: Option<(Coordinate, f64)> = None;
        for cell in self.frontier.iter() {
            let score = self
                .metric
                .score(color, canvas.filled_neighbors(cell))
                .ok_or(PlacementError::UnscoredCell(cell))?;
            if best.map_or(true, |(_, lowest)| score < lowest) {
                best = Some((cell, score));
                if score == 0.0 {
                    break;
                }
            }
        }
        best.map(|(cell, _)| cell)
            .ok_or(PlacementError::FrontierExhausted {
                remaining: self.queue.len() + 1,
            })
    }

    fn commit(
        &mut self,
        canvas: &mut Canvas,
        rng: &mut StdRng,
        cell: Coordinate,
        color: Color,
    ) -> Result<Placement, PlacementError> {
        let phase = self.phase;
        canvas.place(cell, color)?;
        self.frontier.grow(canvas, cell, rng);

        if self.queue.is_empty() {
            if !canvas.is_complete() {
                return Err(PlacementError::Incomplete {
                    placed: canvas.filled_count(),
                    total: canvas.len(),
                });
            }
            self.phase = Phase::Done;
            tracing::debug!("placement done");
        } else if phase == Phase::Seeding && self.seeds.is_empty() {
            self.phase = Phase::Growing;
            tracing::debug!(
                frontier = self.frontier.len(),
                remaining = self.queue.len(),
                "seeding complete"
            );
        }

        Ok(Placement {
            coordinate: cell,
            color,
            phase,
        })
    }
}

impl PlacementStrategy for FrontierGreedy {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn remaining(&self) -> usize {
        self.queue.len()
    }

    fn step(
        &mut self,
        canvas: &mut Canvas,
        rng: &mut StdRng,
    ) -> Result<Option<Placement>, PlacementError> {
        if self.phase == Phase::Done {
            return Ok(None);
        }

        let Some(color) = self.queue.pop() else {
            return Err(PlacementError::ColorsExhausted {
                empty: canvas.empty_count(),
            });
        };

        let seed = if self.phase == Phase::Seeding {
            self.seeds.pop_front()
        } else {
            None
        };
        let cell = match seed {
            Some(cell) => cell,
            None => {
                self.phase = Phase::Growing;
                self.best_cell(canvas, &color)?
            }
        };

        self.commit(canvas, rng, cell, color).map(Some)
    }
}
