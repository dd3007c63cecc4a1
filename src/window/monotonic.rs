//! Size-free windows driven by a logical clock.

use super::Window;
use crate::buffer::RingBuffer;
use crate::clock::Clock;
use tracing::trace;

/// Window whose emission boundary is a logical clock ticked once per value.
///
/// On each consumed value the clock is advanced; when it reports elapsed,
/// the buffered values are aggregated and emitted, the buffer is cleared,
/// and the clock is reset. The value is appended *after* the elapsed check,
/// so the value whose tick crosses the threshold is excluded from the
/// aggregate it triggers and becomes the first element of the next window.
/// This check-then-append order lets the clock be driven purely by tick
/// count or content rather than buffer size; the emitted aggregate always
/// lags the triggering value by one.
///
/// The buffer is unbounded: only emission clears it.
///
/// Single-threaded contract: invoke from one logical caller at a time.
pub struct MonotonicWindow<T, C, A, E> {
  buffer: RingBuffer<T>,
  clock: C,
  aggregate: A,
  emit: E,
  name: Option<String>,
}

impl<T, C, R, A, E> MonotonicWindow<T, C, A, E>
where
  C: Clock,
  A: Fn(&RingBuffer<T>) -> R,
  E: FnMut(R),
{
  /// Creates a monotonic window driven by the given clock.
  ///
  /// The clock is application-defined configuration honoring the
  /// tick/is-elapsed/reset contract; there is nothing to validate here, so
  /// construction cannot fail.
  pub fn new(clock: C, aggregate: A, emit: E) -> Self {
    Self {
      buffer: RingBuffer::unbounded(),
      clock,
      aggregate,
      emit,
      name: None,
    }
  }

  /// Sets the component name used in trace events.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Returns the number of values accumulated toward the current window.
  pub fn buffered_len(&self) -> usize {
    self.buffer.len()
  }

  fn component_name(&self) -> &str {
    self.name.as_deref().unwrap_or("monotonic_window")
  }
}

impl<T, C, R, A, E> Window<T> for MonotonicWindow<T, C, A, E>
where
  C: Clock,
  A: Fn(&RingBuffer<T>) -> R,
  E: FnMut(R),
{
  fn consume(&mut self, value: T) {
    self.clock.tick();
    if self.clock.is_elapsed() {
      let result = (self.aggregate)(&self.buffer);
      trace!(
        window = %self.component_name(),
        buffered = self.buffer.len(),
        "Emitting window aggregate"
      );
      (self.emit)(result);
      self.buffer.clear();
      self.clock.reset();
    }
    self.buffer.append(value);
  }
}
