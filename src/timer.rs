//! Cancellable one-shot timer.
//!
//! A [`Timer`] is a deadline that is polled from the tick loop instead of a
//! spawned sleep. Scheduling replaces any pending deadline, so a component
//! owning a timer can never have two callbacks in flight for it.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm the timer to fire `delay` after `now`, dropping any pending deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub const fn cancel(&mut self) {
        self.deadline = None;
    }

    #[cfg(test)]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarm and return `true` if the deadline has been reached.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_at_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(start, Duration::from_millis(300));

        assert!(!timer.fire(start + Duration::from_millis(299)));
        assert!(timer.fire(start + Duration::from_millis(300)));
        assert!(!timer.fire(start + Duration::from_millis(400)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(start, Duration::from_millis(300));
        timer.schedule(start + Duration::from_millis(100), Duration::from_millis(300));

        assert!(!timer.fire(start + Duration::from_millis(300)));
        assert!(timer.fire(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = Timer::new();
        timer.schedule(start, Duration::ZERO);
        timer.cancel();

        assert!(!timer.fire(start + Duration::from_secs(1)));
    }
}
