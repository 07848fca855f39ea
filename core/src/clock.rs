//! Stopwatch over a monotonic time source.
//!
//! The scheduler measures elapsed time since phase start, never wall-clock
//! dates. Reads go through the `TimeSource` trait so tests and scripted
//! drivers can advance time by hand instead of sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic reading since some arbitrary epoch.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Monotonic source backed by `Instant`.
pub struct SystemSource {
    origin: Instant,
}

impl SystemSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced source for tests and simulated runs.
/// Clones share the underlying reading (single-threaded model).
#[derive(Debug, Clone, Default)]
pub struct ManualSource(Rc<Cell<Duration>>);

impl ManualSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.0.set(to);
    }
}

impl TimeSource for ManualSource {
    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// Stopwatch semantics: `start()` begins from zero (a running stopwatch is
/// reset first), `stop()` halts and resets to zero.
pub struct Stopwatch {
    source: Box<dyn TimeSource>,
    started_at: Option<Duration>,
}

impl Stopwatch {
    pub fn new(source: Box<dyn TimeSource>) -> Self {
        Self {
            source,
            started_at: None,
        }
    }

    /// Begin counting from zero. Restart semantics, not resume.
    pub fn start(&mut self) {
        self.started_at = Some(self.source.now());
    }

    /// Halt and reset to zero. Idempotent.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Accumulated time since `start()`; zero while stopped.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(at) => self.source.now().saturating_sub(at),
            None => Duration::ZERO,
        }
    }
}
