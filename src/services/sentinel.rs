//! Pause and stop requests signalled by the presence of files.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use color_placement::PauseController;

/// [`PauseController`] backed by sentinel files.
///
/// Placement pauses while `pause_file` exists and stops for good once
/// `stop_file` has been seen. The filesystem is checked at most once per
/// `check_every`; between checks the last answer is reused.
#[derive(Debug)]
pub struct SentinelFiles {
    pause_file: Option<PathBuf>,
    stop_file: Option<PathBuf>,
    check_every: Duration,
    last_check: Option<Instant>,
    paused: bool,
    stop: bool,
}

impl SentinelFiles {
    pub fn new(
        pause_file: Option<PathBuf>,
        stop_file: Option<PathBuf>,
        check_every: Duration,
    ) -> Self {
        Self {
            pause_file,
            stop_file,
            check_every,
            last_check: None,
            paused: false,
            stop: false,
        }
    }

    fn refresh(&mut self) {
        if self
            .last_check
            .is_some_and(|last| last.elapsed() < self.check_every)
        {
            return;
        }
        self.last_check = Some(Instant::now());

        let paused = self.pause_file.as_deref().is_some_and(Path::exists);
        if paused != self.paused {
            if paused {
                tracing::info!("Pause file found, placement paused");
            } else {
                tracing::info!("Pause file removed, placement resumed");
            }
            self.paused = paused;
        }

        if !self.stop && self.stop_file.as_deref().is_some_and(Path::exists) {
            tracing::info!("Stop file found, stopping after the current placement");
            self.stop = true;
        }
    }
}

impl PauseController for SentinelFiles {
    fn is_paused(&mut self) -> bool {
        self.refresh();
        self.paused
    }

    fn should_stop(&mut self) -> bool {
        self.refresh();
        self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sentinels(dir: &TempDir) -> SentinelFiles {
        SentinelFiles::new(
            Some(dir.path().join("pause")),
            Some(dir.path().join("stop")),
            Duration::ZERO,
        )
    }

    #[test]
    fn test_pause_follows_file() {
        let dir = TempDir::new().unwrap();
        let mut controller = sentinels(&dir);
        assert!(!controller.is_paused());

        std::fs::write(dir.path().join("pause"), "").unwrap();
        assert!(controller.is_paused());

        std::fs::remove_file(dir.path().join("pause")).unwrap();
        assert!(!controller.is_paused());
    }

    #[test]
    fn test_stop_is_sticky() {
        let dir = TempDir::new().unwrap();
        let mut controller = sentinels(&dir);
        assert!(!controller.should_stop());

        std::fs::write(dir.path().join("stop"), "").unwrap();
        assert!(controller.should_stop());

        std::fs::remove_file(dir.path().join("stop")).unwrap();
        assert!(controller.should_stop());
    }

    #[test]
    fn test_checks_are_rate_limited() {
        let dir = TempDir::new().unwrap();
        let mut controller = SentinelFiles::new(
            Some(dir.path().join("pause")),
            None,
            Duration::from_secs(3600),
        );
        assert!(!controller.is_paused());

        std::fs::write(dir.path().join("pause"), "").unwrap();
        assert!(!controller.is_paused(), "checked again before the interval");
    }

    #[test]
    fn test_without_files_never_pauses() {
        let mut controller = SentinelFiles::new(None, None, Duration::ZERO);
        assert!(!controller.is_paused());
        assert!(!controller.should_stop());
    }
}
