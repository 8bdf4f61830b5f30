//! Injectable time source so expiry logic can be tested without sleeping.

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

pub trait Clock {
    fn now(&self) -> Instant;
}

/// Reads the host monotonic clock. Default for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same instant,
/// so a test can hold one handle while the component under test holds
/// another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let before = clock.now();

        handle.advance(Duration::from_secs(5));

        assert_eq!(clock.now() - before, Duration::from_secs(5));
    }
}
