//! Wheel hijacking with an inactivity debounce

use std::time::{Duration, Instant};

/// Scales wheel deltas and remembers when the wheel was last used
#[derive(Debug, Clone)]
pub struct WheelGate {
    speed: f64,
    debounce: Duration,
    wheeling_until: Option<Instant>,
}

impl WheelGate {
    pub fn new(speed: f64, debounce: Duration) -> Self {
        Self {
            speed,
            debounce,
            wheeling_until: None,
        }
    }

    /// Record a wheel event and return the scaled offset delta
    pub fn accept(&mut self, delta: f64, now: Instant) -> f64 {
        self.wheeling_until = Some(now + self.debounce);
        delta * self.speed
    }

    /// Whether a wheel event arrived within the debounce window
    pub fn is_wheeling(&self, now: Instant) -> bool {
        self.wheeling_until.is_some_and(|until| now < until)
    }

    pub fn reset(&mut self) {
        self.wheeling_until = None;
    }
}
