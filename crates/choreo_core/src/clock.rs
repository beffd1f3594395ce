// SPDX-License-Identifier: MIT OR Apache-2.0
//! Time sources for the choreographer.
//!
//! The choreographer never reads the system time on its own; it asks a
//! [`Clock`] for the current time when a run starts and otherwise works
//! with the times handed to [`tick`](crate::Choreographer::tick).

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time source
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`], measured from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock reading 0 now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for frame simulation and tests
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock at `start_ms`
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Jump to `now_ms`
    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    /// Move forward by `delta_ms`
    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
