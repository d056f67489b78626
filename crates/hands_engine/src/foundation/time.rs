//! Time management utilities
//!
//! The simulation advances in fixed ticks. [`FixedTimestep`] hands out one
//! [`FrameTime`] per tick; everything that runs inside a tick (movement,
//! sleep checks, collision) receives the same value.

use std::time::{Duration, Instant};

/// Timing information for a single simulation tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Tick number, starting at 1 for the first tick
    pub frame: u64,
    /// Seconds covered by this tick
    pub delta: f32,
    /// Simulated seconds since the clock started, including this tick
    pub total: f32,
}

impl FrameTime {
    /// Build a frame time directly, mostly useful in tests
    pub fn new(frame: u64, delta: f32) -> Self {
        Self {
            frame,
            delta,
            total: frame as f32 * delta,
        }
    }

    /// Tick length in milliseconds
    pub fn delta_millis(&self) -> f32 {
        self.delta * 1000.0
    }
}

/// Fixed-step simulation clock
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    frame: u64,
    total: f32,
}

impl FixedTimestep {
    /// Create a clock that advances by `step` seconds per tick
    pub fn new(step: f32) -> Self {
        debug_assert!(step > 0.0, "fixed timestep must be positive");
        Self {
            step,
            frame: 0,
            total: 0.0,
        }
    }

    /// Create a clock ticking `hz` times per simulated second
    pub fn from_hz(hz: u32) -> Self {
        Self::new(1.0 / hz.max(1) as f32)
    }

    /// Advance by one tick and return its timing
    pub fn tick(&mut self) -> FrameTime {
        self.frame += 1;
        self.total += self.step;
        FrameTime {
            frame: self.frame,
            delta: self.step,
            total: self.total,
        }
    }

    /// Number of ticks produced so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }
}

/// Simple stopwatch for measuring elapsed wall-clock time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self
            .start_time
            .map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed().as_secs_f32() * 1000.0
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}
