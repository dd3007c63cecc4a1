//! Threshold-crossing clocks driving window emission.
//!
//! A [`Clock`] is opaque state with three operations — [`tick`](Clock::tick),
//! [`is_elapsed`](Clock::is_elapsed), [`reset`](Clock::reset) — that together
//! implement a threshold-crossing detector. The same interface serves two
//! usages:
//!
//! - **Logical**: ticked once per incoming value
//!   ([`MonotonicWindow`](crate::window::MonotonicWindow)).
//! - **Wall**: ticked once per scheduler firing
//!   ([`TimedWindow`](crate::window::TimedWindow)).
//!
//! Applications supply their own clock instance at window construction;
//! [`TickClock`] is the bundled implementation for both usages.

/// A threshold-crossing detector advanced one unit at a time.
///
/// All three operations are expected to complete without blocking.
pub trait Clock {
  /// Advances the clock by one unit of its own definition (one value for a
  /// logical clock, one period for a wall clock).
  fn tick(&mut self);

  /// Returns true once the configured threshold has been reached.
  fn is_elapsed(&self) -> bool;

  /// Returns the clock to its post-construction baseline.
  fn reset(&mut self);
}

/// A clock that elapses once every `period` ticks after a reset.
#[derive(Debug, Clone)]
pub struct TickClock {
  period: u64,
  ticks: u64,
}

impl TickClock {
  /// Creates a clock that elapses on every `period`-th tick.
  ///
  /// # Panics
  ///
  /// Panics if `period` is zero.
  pub fn every(period: u64) -> Self {
    assert!(period > 0, "tick clock period must be greater than zero");
    Self { period, ticks: 0 }
  }

  /// Returns the configured period.
  pub fn period(&self) -> u64 {
    self.period
  }

  /// Returns the ticks counted since construction or the last reset.
  pub fn ticks(&self) -> u64 {
    self.ticks
  }
}

impl Clock for TickClock {
  fn tick(&mut self) {
    self.ticks = self.ticks.saturating_add(1);
  }

  fn is_elapsed(&self) -> bool {
    self.ticks >= self.period
  }

  fn reset(&mut self) {
    self.ticks = 0;
  }
}
