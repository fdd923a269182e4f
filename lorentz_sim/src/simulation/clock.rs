//! Time delta providers
//!
//! The simulator never reads a clock itself. Callers either pass `dt`
//! directly to `Simulator::step` or hand a `DeltaSource` to `step_with`.

use std::time::Instant;

/// Produces the time delta for the next simulation step
pub trait DeltaSource {
    fn next_delta(&mut self) -> f32;
}

/// Constant step, used for headless runs and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedDelta(pub f32);

impl DeltaSource for FixedDelta {
    fn next_delta(&mut self) -> f32 {
        self.0
    }
}

/// Real elapsed seconds since the previous call
#[derive(Debug, Clone)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl DeltaSource for WallClock {
    fn next_delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}
