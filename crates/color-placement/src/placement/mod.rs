//! Placement strategies.
//!
//! A strategy decides, one placement at a time, which unused color goes into
//! which empty cell. Both implementations satisfy the same contract: given
//! the same inputs and RNG stream they produce the same write-once,
//! bijective assignment of colors to cells.
//!
//! - [`FrontierGreedy`]: pulls colors in queue order and puts each on the
//!   frontier cell whose filled neighbors are closest to it
//! - [`CubeWalk`]: walks the grid with backtracking and, for each visited
//!   cell, searches a 3-D color index outward from the previous color for
//!   the available color closest to the cell's neighborhood mean
//!
//! Strategies are driven by [`PlacementEngine`](crate::PlacementEngine),
//! which owns the canvas and the RNG and handles progress and pausing.

mod color_cube;
mod cube_walk;
mod frontier_greedy;

use rand::rngs::StdRng;
use serde::Deserialize;

use crate::canvas::{Canvas, Coordinate};
use crate::color::Color;
use crate::error::PlacementError;
use crate::policy::policy_names;

pub use color_cube::ColorCube;
pub use cube_walk::CubeWalk;
pub use frontier_greedy::FrontierGreedy;

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Seed cells are being written directly.
    Seeding,
    /// Colors are competing for frontier cells.
    Growing,
    /// Every color has been placed.
    Done,
}

/// One committed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub coordinate: Coordinate,
    pub color: Color,
    /// Phase the placement was made in.
    pub phase: Phase,
}

/// A step-wise placement algorithm.
pub trait PlacementStrategy {
    /// Current phase.
    fn phase(&self) -> Phase;

    /// Colors not yet placed.
    fn remaining(&self) -> usize;

    /// Commit the next color to `canvas`.
    ///
    /// Returns `Ok(None)` once the strategy is [`Phase::Done`]. Any error is
    /// an internal-consistency violation and ends the run.
    fn step(
        &mut self,
        canvas: &mut Canvas,
        rng: &mut StdRng,
    ) -> Result<Option<Placement>, PlacementError>;
}

/// Which strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StrategyKind {
    #[default]
    Frontier,
    CubeWalk,
}

policy_names!(StrategyKind, "strategy", {
    Frontier => "frontier",
    CubeWalk => "cube-walk",
});
