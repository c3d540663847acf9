//! Progress callbacks and checkpoint scheduling.

use std::time::Duration;

use crate::canvas::Canvas;
use crate::output::Mosaic;

/// Where a run stands after a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub placed: usize,
    pub total: usize,
    /// Wall-clock time since the run started, minus time spent paused.
    pub elapsed: Duration,
    /// Time spent paused so far.
    pub paused: Duration,
}

impl Progress {
    /// Fraction of colors placed, in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.placed as f64 / self.total as f64
    }

    /// Estimated time left at the average rate so far.
    ///
    /// `None` before the first placement.
    pub fn eta(&self) -> Option<Duration> {
        if self.placed == 0 {
            return None;
        }
        let remaining = self.total.saturating_sub(self.placed) as f64;
        Some(Duration::from_secs_f64(
            self.elapsed.as_secs_f64() * remaining / self.placed as f64,
        ))
    }
}

/// An intermediate snapshot handed to the reporter.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    /// 1-based position in the schedule.
    pub index: usize,
    pub placed: usize,
    pub total: usize,
    /// Copy of the canvas at `placed` colors. Unaffected by later placements.
    pub mosaic: Mosaic,
}

impl Checkpoint {
    pub fn fraction(&self) -> f64 {
        self.placed as f64 / self.total as f64
    }
}

/// Receives engine callbacks. Sampling cadence and persistence are up to the
/// implementation.
///
/// Reporters that want snapshots on their own cadence take them from the
/// canvas passed to [`on_progress`](Self::on_progress) with
/// [`Canvas::snapshot`]. The engine's own [`CheckpointSchedule`] feeds
/// [`on_checkpoint`](Self::on_checkpoint).
pub trait ProgressReporter {
    /// Called after every placement with a read-only view of the live
    /// canvas.
    fn on_progress(&mut self, _progress: &Progress, _canvas: &Canvas) {}

    /// Called when a scheduled checkpoint is reached.
    fn on_checkpoint(&mut self, _checkpoint: Checkpoint) {}
}

/// Ignores every callback.
impl ProgressReporter for () {}

/// Placement counts at which checkpoints fire.
///
/// For `count` checkpoints over `total` placements the boundaries are
/// `total * i / (count + 1)` for `i` in `1..=count`, rounded down. Zero,
/// `total` itself and duplicates are dropped, so small runs may get fewer
/// checkpoints than requested. The final result is never a checkpoint.
///
/// # Example
/// ```
/// use color_placement::CheckpointSchedule;
///
/// let schedule = CheckpointSchedule::new(4, 100);
/// assert_eq!(schedule.boundaries(), &[20, 40, 60, 80]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointSchedule {
    boundaries: Vec<usize>,
    next: usize,
}

impl CheckpointSchedule {
    pub fn new(count: usize, total: usize) -> Self {
        let mut boundaries: Vec<usize> = (1..=count)
            .map(|i| (total as u128 * i as u128 / (count as u128 + 1)) as usize)
            .filter(|&b| b > 0 && b < total)
            .collect();
        boundaries.dedup();
        Self {
            boundaries,
            next: 0,
        }
    }

    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    /// If `placed` is the next boundary, consume it and return its 1-based
    /// index.
    pub fn due(&mut self, placed: usize) -> Option<usize> {
        if self.boundaries.get(self.next) != Some(&placed) {
            return None;
        }
        self.next += 1;
        Some(self.next)
    }
}
