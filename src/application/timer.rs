//! One-shot delayed transitions.
//!
//! Presentation timers (the inspect-mode scan) are modelled as an explicit
//! deadline that the event loop polls with the current time. Cancelling
//! clears the deadline, so a stale transition can never fire later.

use std::time::{Duration, Instant};

/// How long the inspect-mode scan runs before markers appear.
pub const SCAN_DURATION: Duration = Duration::from_millis(3500);

/// A cancellable one-shot timer driven by caller-supplied time.
#[derive(Debug, Clone)]
pub struct DelayedTransition {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DelayedTransition {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start (or restart) the countdown from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any pending transition.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether the transition is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire if the deadline has passed. Returns `true` exactly once per arm.
    pub fn poll(&mut self, now: Instant) -> bool {
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
    fn test_fires_once_after_delay() {
        let t0 = Instant::now();
        let mut timer = DelayedTransition::new(SCAN_DURATION);
        timer.arm(t0);

        assert!(!timer.poll(t0 + Duration::from_millis(3499)));
        assert!(timer.is_pending());
        assert!(timer.poll(t0 + SCAN_DURATION));
        assert!(!timer.is_pending());
        assert!(!timer.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let t0 = Instant::now();
        let mut timer = DelayedTransition::new(SCAN_DURATION);
        timer.arm(t0);
        timer.cancel();

        assert!(!timer.poll(t0 + Duration::from_secs(10)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_rearm_moves_deadline() {
        let t0 = Instant::now();
        let mut timer = DelayedTransition::new(SCAN_DURATION);
        timer.arm(t0);
        timer.arm(t0 + Duration::from_secs(2));

        assert!(!timer.poll(t0 + Duration::from_secs(4)));
        assert!(timer.poll(t0 + Duration::from_millis(5500)));
    }
}
