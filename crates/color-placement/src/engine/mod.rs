//! The run loop around a placement strategy.
//!
//! [`PlacementEngine`] owns the canvas, the RNG stream and the strategy. It
//! steps the strategy until every color is placed, and between placements
//! it polls the [`PauseController`] and reports [`Progress`]. Reporters see
//! the canvas read-only after every placement and also receive
//! [`Checkpoint`] snapshots on the [`CheckpointSchedule`].

mod options;
mod pause;
mod progress;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::canvas::Canvas;
use crate::color::ColorSpace;
use crate::error::{Error, PlacementError};
use crate::output::Mosaic;
use crate::placement::{CubeWalk, FrontierGreedy, Phase, PlacementStrategy, StrategyKind};
use crate::policy::ColorQueue;

pub use options::PlacementOptions;
pub use pause::{Clock, PauseController, SystemClock};
pub use progress::{Checkpoint, CheckpointSchedule, Progress, ProgressReporter};

#[cfg(test)]
pub(crate) use pause::testing::ManualClock;

/// Result of [`PlacementEngine::run`].
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub mosaic: Mosaic,
    /// `false` if the pause controller requested an early stop.
    pub completed: bool,
    /// State after the last placement.
    pub progress: Progress,
}

/// Drives one placement run.
///
/// # Example
///
/// ```
/// use color_placement::{PlacementEngine, PlacementOptions};
///
/// let engine = PlacementEngine::new(&PlacementOptions::new().bits(6)).unwrap();
/// let outcome = engine.run(&mut (), &mut || false).unwrap();
///
/// assert!(outcome.completed);
/// assert!(outcome.mosaic.is_complete());
/// assert_eq!((outcome.mosaic.width(), outcome.mosaic.height()), (8, 8));
/// ```
pub struct PlacementEngine {
    canvas: Canvas,
    strategy: Box<dyn PlacementStrategy>,
    rng: StdRng,
    checkpoints: usize,
    poll_interval: Duration,
}

impl PlacementEngine {
    /// Validate `options` and set up the run.
    ///
    /// All RNG draws for seeding and ordering happen here, before the first
    /// placement, in a fixed order: seed cells, start color, order shuffle.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for an unsupported bit depth or a zero
    /// neighborhood radius with the cube-walk strategy.
    pub fn new(options: &PlacementOptions) -> Result<Self, Error> {
        let space = ColorSpace::new(options.bits)?;
        let canvas = Canvas::for_colors(space.len())?;
        let mut rng = StdRng::seed_from_u64(options.rng_seed);

        let seeds = options
            .seeds
            .seed_cells(canvas.width(), canvas.height(), &mut rng);

        let strategy: Box<dyn PlacementStrategy> = match options.strategy {
            StrategyKind::Frontier => {
                let queue = ColorQueue::build(&space, options.order, options.start_color, &mut rng);
                Box::new(FrontierGreedy::new(&canvas, queue, seeds, options.distance)?)
            }
            StrategyKind::CubeWalk => {
                let start = seeds.first().copied().ok_or(PlacementError::FrontierExhausted {
                    remaining: space.len(),
                })?;
                let color = options
                    .start_color
                    .unwrap_or_default()
                    .pick(&space, &mut rng);
                Box::new(CubeWalk::new(
                    space,
                    &canvas,
                    start,
                    color,
                    options.neighborhood_radius,
                )?)
            }
        };

        tracing::debug!(
            bits = space.bits(),
            colors = space.len(),
            width = canvas.width(),
            height = canvas.height(),
            strategy = %options.strategy,
            "placement engine ready"
        );

        Ok(Self {
            canvas,
            strategy,
            rng,
            checkpoints: options.checkpoints,
            poll_interval: options.poll_interval,
        })
    }

    /// Run a custom strategy on an empty `canvas`.
    ///
    /// Only the checkpoint count, RNG seed and poll interval of `options`
    /// are used.
    pub fn with_strategy(
        canvas: Canvas,
        strategy: Box<dyn PlacementStrategy>,
        options: &PlacementOptions,
    ) -> Self {
        Self {
            canvas,
            strategy,
            rng: StdRng::seed_from_u64(options.rng_seed),
            checkpoints: options.checkpoints,
            poll_interval: options.poll_interval,
        }
    }

    /// Read-only view of the live canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Run to completion (or an early stop) on the system clock.
    pub fn run<R, P>(self, reporter: &mut R, pause: &mut P) -> Result<RunOutcome, Error>
    where
        R: ProgressReporter + ?Sized,
        P: PauseController + ?Sized,
    {
        self.run_with_clock(reporter, pause, &mut SystemClock::new())
    }

    /// Run against an explicit time source.
    ///
    /// # Errors
    ///
    /// [`Error::Placement`] if the strategy breaks an invariant. The run is
    /// abandoned; no partial result is returned.
    pub fn run_with_clock<R, P, C>(
        mut self,
        reporter: &mut R,
        pause: &mut P,
        clock: &mut C,
    ) -> Result<RunOutcome, Error>
    where
        R: ProgressReporter + ?Sized,
        P: PauseController + ?Sized,
        C: Clock + ?Sized,
    {
        let total = self.canvas.len();
        let mut schedule = CheckpointSchedule::new(self.checkpoints, total);
        let started = clock.now();
        let mut paused = Duration::ZERO;
        let mut completed = true;

        let progress_at = |clock: &C, paused: Duration, placed: usize| Progress {
            placed,
            total,
            elapsed: clock.now().saturating_sub(started).saturating_sub(paused),
            paused,
        };

        while self.strategy.phase() != Phase::Done {
            if pause.should_stop() {
                completed = false;
                break;
            }
            if pause.is_paused() {
                tracing::debug!(placed = self.canvas.filled_count(), "paused");
                let mut stopped = false;
                loop {
                    let before = clock.now();
                    clock.sleep(self.poll_interval);
                    paused += clock.now().saturating_sub(before);
                    if pause.should_stop() {
                        stopped = true;
                        break;
                    }
                    if !pause.is_paused() {
                        break;
                    }
                }
                tracing::debug!(paused_ms = paused.as_millis() as u64, "resumed");
                if stopped {
                    completed = false;
                    break;
                }
            }

            if self.strategy.step(&mut self.canvas, &mut self.rng)?.is_none() {
                break;
            }

            let placed = self.canvas.filled_count();
            reporter.on_progress(&progress_at(&*clock, paused, placed), &self.canvas);
            if let Some(index) = schedule.due(placed) {
                reporter.on_checkpoint(Checkpoint {
                    index,
                    placed,
                    total,
                    mosaic: self.canvas.snapshot(),
                });
            }
        }

        if completed && !self.canvas.is_complete() {
            return Err(PlacementError::Incomplete {
                placed: self.canvas.filled_count(),
                total,
            }
            .into());
        }
        if !completed {
            tracing::debug!(placed = self.canvas.filled_count(), total, "stopped early");
        }

        let progress = progress_at(&*clock, paused, self.canvas.filled_count());
        Ok(RunOutcome {
            mosaic: self.canvas.into_mosaic(),
            completed,
            progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::policy::{SeedPolicy, StartColor};

    #[derive(Default)]
    struct Recorder {
        progress: Vec<Progress>,
        checkpoints: Vec<Checkpoint>,
    }

    impl ProgressReporter for Recorder {
        fn on_progress(&mut self, progress: &Progress, _canvas: &Canvas) {
            self.progress.push(*progress);
        }

        fn on_checkpoint(&mut self, checkpoint: Checkpoint) {
            self.checkpoints.push(checkpoint);
        }
    }

    #[test]
    fn test_reports_after_every_placement() {
        let engine = PlacementEngine::new(&PlacementOptions::new().bits(6)).unwrap();
        let mut recorder = Recorder::default();
        let outcome = engine.run(&mut recorder, &mut || false).unwrap();

        let placed: Vec<usize> = recorder.progress.iter().map(|p| p.placed).collect();
        assert_eq!(placed, (1..=64).collect::<Vec<_>>());
        assert!(recorder.progress.iter().all(|p| p.total == 64));
        assert_eq!(outcome.progress.placed, 64);
    }

    #[test]
    fn test_checkpoints_are_snapshots() {
        let options = PlacementOptions::new().bits(6).checkpoints(3);
        let mut recorder = Recorder::default();
        let outcome = PlacementEngine::new(&options)
            .unwrap()
            .run(&mut recorder, &mut || false)
            .unwrap();

        let at: Vec<(usize, usize)> = recorder
            .checkpoints
            .iter()
            .map(|c| (c.index, c.placed))
            .collect();
        assert_eq!(at, vec![(1, 16), (2, 32), (3, 48)]);
        for checkpoint in &recorder.checkpoints {
            assert_eq!(checkpoint.mosaic.placed(), checkpoint.placed);
            // every snapshot cell agrees with the final mosaic
            for (cell, color) in checkpoint.mosaic.iter() {
                assert_eq!(outcome.mosaic.get(cell), Some(color));
            }
        }
    }

    #[test]
    fn test_reporter_takes_snapshots_on_its_own_cadence() {
        struct EveryTenth(Vec<(usize, Mosaic)>);
        impl ProgressReporter for EveryTenth {
            fn on_progress(&mut self, progress: &Progress, canvas: &Canvas) {
                if progress.placed % 10 == 0 {
                    self.0.push((progress.placed, canvas.snapshot()));
                }
            }
        }

        let mut reporter = EveryTenth(Vec::new());
        let outcome = PlacementEngine::new(&PlacementOptions::new().bits(6))
            .unwrap()
            .run(&mut reporter, &mut || false)
            .unwrap();

        let at: Vec<usize> = reporter.0.iter().map(|(placed, _)| *placed).collect();
        assert_eq!(at, vec![10, 20, 30, 40, 50, 60]);
        for (placed, mosaic) in &reporter.0 {
            // later placements never show up in an earlier snapshot
            assert_eq!(mosaic.placed(), *placed);
            for (cell, color) in mosaic.iter() {
                assert_eq!(outcome.mosaic.get(cell), Some(color));
            }
        }
    }

    #[test]
    fn test_stop_returns_partial_canvas() {
        struct StopAfter(usize);
        impl PauseController for StopAfter {
            fn is_paused(&mut self) -> bool {
                false
            }
            fn should_stop(&mut self) -> bool {
                if self.0 == 0 {
                    return true;
                }
                self.0 -= 1;
                false
            }
        }

        let engine = PlacementEngine::new(&PlacementOptions::new().bits(6)).unwrap();
        let outcome = engine.run(&mut (), &mut StopAfter(10)).unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.mosaic.placed(), 10);
        assert_eq!(outcome.progress.placed, 10);
    }

    #[test]
    fn test_pause_accrues_paused_time() {
        let interval = Duration::from_millis(100);
        let options = PlacementOptions::new().bits(3).poll_interval(interval);
        let mut polls = 0;
        let mut pause = || {
            polls += 1;
            (3..=5).contains(&polls)
        };
        let mut clock = ManualClock::default();
        let mut recorder = Recorder::default();

        let outcome = PlacementEngine::new(&options)
            .unwrap()
            .run_with_clock(&mut recorder, &mut pause, &mut clock)
            .unwrap();

        assert_eq!(clock.sleeps, 3);
        assert_eq!(outcome.progress.paused, interval * 3);
        assert_eq!(outcome.progress.elapsed, Duration::ZERO);
        // paused before the third placement
        assert_eq!(recorder.progress[1].paused, Duration::ZERO);
        assert_eq!(recorder.progress[2].paused, interval * 3);
    }

    #[test]
    fn test_invalid_configuration_is_rejected_up_front() {
        assert!(matches!(
            PlacementEngine::new(&PlacementOptions::new().bits(16)),
            Err(Error::Config(ConfigError::BitDepthNotDivisible(16)))
        ));
        let options = PlacementOptions::new()
            .bits(6)
            .strategy(StrategyKind::CubeWalk)
            .neighborhood_radius(0);
        assert!(matches!(
            PlacementEngine::new(&options),
            Err(Error::Config(ConfigError::ZeroValue { .. }))
        ));
    }

    #[test]
    fn test_cube_walk_uses_first_seed_and_start_color() {
        let options = PlacementOptions::new()
            .bits(6)
            .strategy(StrategyKind::CubeWalk)
            .seeds(SeedPolicy::corners(4))
            .start_color(Some(StartColor::Black));
        let outcome = PlacementEngine::new(&options)
            .unwrap()
            .run(&mut (), &mut || false)
            .unwrap();
        assert!(outcome.mosaic.is_complete());
        assert_eq!(
            outcome.mosaic.get(crate::canvas::Coordinate::new(0, 0)),
            Some(crate::color::Color::new(0, 0, 0))
        );
    }
}
