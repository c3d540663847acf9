//! Progress logging and checkpoint images.

use std::path::PathBuf;
use std::time::Duration;

use color_placement::{Canvas, Checkpoint, Progress, ProgressReporter};

use crate::error::OutputError;
use crate::rendering::write_png;

/// Logs progress once per whole percent and writes checkpoint snapshots as
/// `{stem}-progress-{percent}.png`.
///
/// Callbacks cannot fail, so the first write error is kept and returned by
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct LoggingReporter {
    label: String,
    dir: PathBuf,
    stem: String,
    optimize: bool,
    last_percent: usize,
    written: Vec<PathBuf>,
    failure: Option<OutputError>,
}

impl LoggingReporter {
    pub fn new(label: impl Into<String>, dir: PathBuf, stem: impl Into<String>, optimize: bool) -> Self {
        Self {
            label: label.into(),
            dir,
            stem: stem.into(),
            optimize,
            last_percent: 0,
            written: Vec::new(),
            failure: None,
        }
    }

    /// Path a checkpoint at `fraction` is written to.
    pub fn checkpoint_path(&self, fraction: f64) -> PathBuf {
        self.dir
            .join(format!("{}-progress-{:.2}.png", self.stem, fraction * 100.0))
    }

    /// Checkpoint files written so far, or the first write error.
    pub fn finish(self) -> Result<Vec<PathBuf>, OutputError> {
        match self.failure {
            Some(error) => Err(error),
            None => Ok(self.written),
        }
    }
}

impl ProgressReporter for LoggingReporter {
    fn on_progress(&mut self, progress: &Progress, _canvas: &Canvas) {
        let percent = progress.placed * 100 / progress.total.max(1);
        if percent <= self.last_percent {
            return;
        }
        self.last_percent = percent;

        let remaining = progress
            .eta()
            .map(format_duration)
            .unwrap_or_else(|| "unknown".to_string());
        tracing::info!(
            image = %self.label,
            placed = progress.placed,
            total = progress.total,
            "Progress: {percent}%, elapsed: {}, remaining: {remaining}",
            format_duration(progress.elapsed)
        );
    }

    fn on_checkpoint(&mut self, checkpoint: Checkpoint) {
        if self.failure.is_some() {
            return;
        }
        let path = self.checkpoint_path(checkpoint.fraction());
        match write_png(&path, &checkpoint.mosaic, self.optimize) {
            Ok(bytes) => {
                tracing::info!(
                    image = %self.label,
                    path = %path.display(),
                    bytes,
                    "Progress image {} saved at {} of {} colors",
                    checkpoint.index,
                    checkpoint.placed,
                    checkpoint.total
                );
                self.written.push(path);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), %e, "Failed to save progress image");
                self.failure = Some(e);
            }
        }
    }
}

/// `HH:MM:SS`, hours unbounded.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, secs % 3600 / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_placement::{Color, Mosaic};
    use tempfile::TempDir;

    fn progress(placed: usize, total: usize) -> Progress {
        Progress {
            placed,
            total,
            elapsed: Duration::from_secs(placed as u64),
            paused: Duration::ZERO,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "00:00:00");
        assert_eq!(format_duration(Duration::from_secs(3725)), "01:02:05");
        assert_eq!(format_duration(Duration::from_secs(100 * 3600)), "100:00:00");
    }

    #[test]
    fn test_logs_each_percent_once() {
        let dir = TempDir::new().unwrap();
        let mut reporter = LoggingReporter::new("1/1", dir.path().to_path_buf(), "x", false);
        let canvas = Canvas::new(1, 1);
        for placed in 1..=250 {
            reporter.on_progress(&progress(placed, 1000), &canvas);
        }
        assert_eq!(reporter.last_percent, 25);
    }

    #[test]
    fn test_checkpoint_path_format() {
        let reporter = LoggingReporter::new("1/1", PathBuf::from("out"), "20240101-000000-every-color", false);
        assert_eq!(
            reporter.checkpoint_path(0.2),
            PathBuf::from("out/20240101-000000-every-color-progress-20.00.png")
        );
    }

    #[test]
    fn test_checkpoint_is_written() {
        let dir = TempDir::new().unwrap();
        let mut reporter = LoggingReporter::new("1/1", dir.path().to_path_buf(), "img", false);
        reporter.on_checkpoint(Checkpoint {
            index: 1,
            placed: 1,
            total: 4,
            mosaic: Mosaic::new(vec![Some(Color::new(1, 1, 1)), None, None, None], 2, 2).unwrap(),
        });

        let written = reporter.finish().unwrap();
        assert_eq!(written, vec![dir.path().join("img-progress-25.00.png")]);
        assert!(written[0].exists());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut reporter = LoggingReporter::new("1/1", missing, "img", false);
        reporter.on_checkpoint(Checkpoint {
            index: 1,
            placed: 1,
            total: 1,
            mosaic: Mosaic::new(vec![Some(Color::new(0, 0, 0))], 1, 1).unwrap(),
        });
        assert!(matches!(reporter.finish(), Err(OutputError::Io(_))));
    }
}
