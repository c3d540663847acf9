//! Cooperative pause and the time source the engine measures against.

use std::time::{Duration, Instant};

/// Polled by the engine once per placement.
///
/// While [`is_paused`](Self::is_paused) returns `true` the engine sleeps in
/// poll-interval steps without touching the canvas. Any `FnMut() -> bool`
/// works as a controller that never requests a stop.
pub trait PauseController {
    fn is_paused(&mut self) -> bool;

    /// Stop after the current placement and return the partial canvas.
    fn should_stop(&mut self) -> bool {
        false
    }
}

impl<F: FnMut() -> bool> PauseController for F {
    fn is_paused(&mut self) -> bool {
        self()
    }
}

/// Monotonic time source.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// [`Clock`] backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;

    #[test]
    fn test_closure_is_a_controller() {
        let mut polls = 0;
        let mut controller = || {
            polls += 1;
            polls == 2
        };
        assert!(!controller.is_paused());
        assert!(controller.is_paused());
        assert!(!controller.should_stop());
    }

    #[test]
    fn test_manual_clock_advances_on_sleep() {
        let mut clock = ManualClock::default();
        clock.sleep(Duration::from_millis(250));
        clock.sleep(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(500));
        assert_eq!(clock.sleeps, 2);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
