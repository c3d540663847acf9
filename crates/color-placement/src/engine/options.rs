//! Run configuration for the placement engine.

use std::time::Duration;

use crate::canvas::Canvas;
use crate::color::ColorSpace;
use crate::error::ConfigError;
use crate::placement::StrategyKind;
use crate::policy::{ColorOrder, DistanceMetric, SeedPolicy, StartColor};

/// Configuration for one placement run.
///
/// Everything that influences the result is in here, so two runs with equal
/// options produce identical mosaics.
///
/// # Defaults
///
/// - 15 bits (32768 colors on a 256x128 canvas)
/// - one center seed, white first, identity order, `min` distance
/// - frontier strategy, no checkpoints, RNG seed 0
/// - cube-walk neighborhood radius 5, pause poll interval 500 ms
///
/// # Example
///
/// ```
/// use color_placement::{ColorOrder, PlacementOptions, SeedPolicy};
///
/// let options = PlacementOptions::new()
///     .bits(9)
///     .seeds(SeedPolicy::corners(4))
///     .order(ColorOrder::Hue)
///     .rng_seed(42);
/// assert_eq!(options.bits, 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOptions {
    /// Total color depth, shared equally by the three channels.
    pub bits: u32,

    /// Where the first colors go.
    pub seeds: SeedPolicy,

    /// Color moved to the front of the queue. `None` leaves the order
    /// policy in charge of the first color as well.
    pub start_color: Option<StartColor>,

    pub order: ColorOrder,
    pub distance: DistanceMetric,
    pub strategy: StrategyKind,

    /// Number of intermediate snapshots handed to the reporter.
    pub checkpoints: usize,

    /// Seed of the run's only RNG stream.
    pub rng_seed: u64,

    /// Averaging radius of the cube-walk strategy.
    pub neighborhood_radius: usize,

    /// Sleep between pause polls while paused.
    pub poll_interval: Duration,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            bits: 15,
            seeds: SeedPolicy::default(),
            start_color: Some(StartColor::White),
            order: ColorOrder::default(),
            distance: DistanceMetric::default(),
            strategy: StrategyKind::default(),
            checkpoints: 0,
            rng_seed: 0,
            neighborhood_radius: 5,
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl PlacementOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bits(mut self, bits: u32) -> Self {
        self.bits = bits;
        self
    }

    #[inline]
    pub fn seeds(mut self, seeds: SeedPolicy) -> Self {
        self.seeds = seeds;
        self
    }

    #[inline]
    pub fn start_color(mut self, start_color: Option<StartColor>) -> Self {
        self.start_color = start_color;
        self
    }

    #[inline]
    pub fn order(mut self, order: ColorOrder) -> Self {
        self.order = order;
        self
    }

    #[inline]
    pub fn distance(mut self, distance: DistanceMetric) -> Self {
        self.distance = distance;
        self
    }

    #[inline]
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn checkpoints(mut self, count: usize) -> Self {
        self.checkpoints = count;
        self
    }

    #[inline]
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    #[inline]
    pub fn neighborhood_radius(mut self, radius: usize) -> Self {
        self.neighborhood_radius = radius;
        self
    }

    #[inline]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Check the options without allocating the canvas.
    ///
    /// [`PlacementEngine::new`](crate::PlacementEngine::new) rejects the
    /// same options, but only after its setup work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let space = ColorSpace::new(self.bits)?;
        Canvas::dimensions_for(space.len())?;
        if self.strategy == StrategyKind::CubeWalk && self.neighborhood_radius == 0 {
            return Err(ConfigError::ZeroValue {
                name: "neighborhood radius",
            });
        }
        Ok(())
    }
}
