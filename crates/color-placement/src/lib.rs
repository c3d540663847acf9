//! color-placement: lay every color of a quantized RGB space onto a grid
//!
//! Each color of the space is written to exactly one cell of a grid with
//! exactly as many cells, so that neighboring cells hold close colors. The
//! result is an organic, gradient-like mosaic that contains every color once.
//!
//! # Quick Start
//!
//! [`PlacementEngine`] is the entry point:
//!
//! ```
//! use color_placement::{PlacementEngine, PlacementOptions, SeedPolicy, StartColor};
//!
//! let options = PlacementOptions::new()
//!     .bits(9)
//!     .seeds(SeedPolicy::corners(4))
//!     .start_color(Some(StartColor::Black))
//!     .rng_seed(7);
//!
//! let outcome = PlacementEngine::new(&options)
//!     .unwrap()
//!     .run(&mut (), &mut || false)
//!     .unwrap();
//!
//! assert_eq!(outcome.mosaic.placed(), 512);
//! ```
//!
//! # Pipeline
//!
//! 1. [`ColorSpace`] enumerates the `levels^3` colors of a bit depth
//! 2. [`Canvas::dimensions_for`] sizes a grid with exactly that many cells
//! 3. [`SeedPolicy`] picks the seed cells, [`ColorQueue`] orders the colors
//! 4. a [`PlacementStrategy`] commits one color per step until the canvas
//!    is full
//! 5. the final [`Mosaic`] goes to whoever encodes it
//!
//! # Strategies
//!
//! - [`FrontierGreedy`] (default): every color in queue order goes to the
//!   [`Frontier`] cell whose filled neighbors are closest under the
//!   [`DistanceMetric`]
//! - [`CubeWalk`]: a backtracking walk over the grid that gives each visited
//!   cell the available color closest to its neighborhood mean
//!
//! Both produce a write-once bijection between colors and cells, and both
//! are deterministic for a given RNG seed. All randomness comes from one
//! [`StdRng`](rand::rngs::StdRng) created per run and passed explicitly to
//! every step that draws from it.
//!
//! # Long runs
//!
//! At 24 bits a run places 16.7 million colors. The engine reports
//! [`Progress`] after every placement together with a read-only view of the
//! canvas, so a reporter can take snapshots on its own cadence. It also
//! hands out [`Checkpoint`] snapshots on a fixed schedule; no snapshot
//! aliases the live canvas. The engine polls a [`PauseController`] so a
//! run can be suspended (and optionally stopped) from outside. Paused time
//! is tracked separately so elapsed time and ETA stay meaningful.

pub mod canvas;
pub mod color;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod output;
pub mod placement;
pub mod policy;


pub use canvas::{Canvas, Coordinate};
pub use color::{Color, ColorSpace, MAX_BITS, MIN_BITS};
pub use engine::{
    Checkpoint, CheckpointSchedule, Clock, PauseController, PlacementEngine, PlacementOptions,
    Progress, ProgressReporter, RunOutcome, SystemClock,
};
pub use error::{ConfigError, Error, PlacementError};
pub use frontier::Frontier;
pub use output::Mosaic;
pub use placement::{
    ColorCube, CubeWalk, FrontierGreedy, Phase, Placement, PlacementStrategy, StrategyKind,
};
pub use policy::{ColorOrder, ColorQueue, DistanceMetric, SeedPolicy, StartColor, StartPosition};
