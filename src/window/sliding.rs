//! Fixed-size, overlapping windows.

use super::Window;
use crate::buffer::RingBuffer;
use crate::error::{WindowError, WindowResult};
use tracing::trace;

/// Overlapping fixed-size window with step 1.
///
/// The first `size - 1` values are silent warm-up; from the `size`-th value
/// onward, every [`consume`](Window::consume) emits an aggregate of the most
/// recent `size` values in arrival order. No reset ever occurs — the oldest
/// value is evicted continuously as new ones arrive.
///
/// Single-threaded contract: invoke from one logical caller at a time.
pub struct SlidingWindow<T, A, E> {
  size: usize,
  buffer: RingBuffer<T>,
  aggregate: A,
  emit: E,
  name: Option<String>,
}

impl<T, R, A, E> SlidingWindow<T, A, E>
where
  A: Fn(&RingBuffer<T>) -> R,
  E: FnMut(R),
{
  /// Creates a sliding window over the most recent `size` values.
  ///
  /// `aggregate` reads the buffered values; `emit` receives its result on
  /// each emission. Returns [`WindowError::ZeroWindowSize`] if `size` is
  /// zero, before any value is accepted.
  pub fn new(size: usize, aggregate: A, emit: E) -> WindowResult<Self> {
    if size == 0 {
      return Err(WindowError::ZeroWindowSize);
    }
    Ok(Self {
      size,
      buffer: RingBuffer::bounded(size),
      aggregate,
      emit,
      name: None,
    })
  }

  /// Sets the component name used in trace events.
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Returns the window size.
  pub fn size(&self) -> usize {
    self.size
  }

  /// Returns the number of currently buffered values:
  /// `min(size, values consumed so far)`.
  pub fn buffered_len(&self) -> usize {
    self.buffer.len()
  }

  fn component_name(&self) -> &str {
    self.name.as_deref().unwrap_or("sliding_window")
  }
}

impl<T, R, A, E> Window<T> for SlidingWindow<T, A, E>
where
  A: Fn(&RingBuffer<T>) -> R,
  E: FnMut(R),
{
  fn consume(&mut self, value: T) {
    self.buffer.append(value);
    if self.buffer.is_full() {
      let result = (self.aggregate)(&self.buffer);
      trace!(
        window = %self.component_name(),
        buffered = self.buffer.len(),
        "Emitting window aggregate"
      );
      (self.emit)(result);
    }
  }
}
