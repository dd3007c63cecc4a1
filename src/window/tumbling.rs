//! Fixed-size, non-overlapping windows.

use super::Window;
use crate::buffer::RingBuffer;
use crate::error::{WindowError, WindowResult};
use tracing::trace;

/// Non-overlapping fixed-size window, reset on emission.
///
/// Emissions occur exactly on the `size`-th, `2·size`-th, … values, each
/// covering a disjoint consecutive block of `size` values; intervening calls
/// accumulate silently. The buffer is cleared after every emission, so no
/// value ever appears in two emitted aggregates.
///
/// Single-threaded contract: invoke from one logical caller at a time.
pub struct TumblingWindow<T, A, E> {
  size: usize,
  buffer: RingBuffer<T>,
  aggregate: A,
  emit: E,
  name: Option<String>,
}

impl<T, R, A, E> TumblingWindow<T, A, E>
where
  A: Fn(&RingBuffer<T>) -> R,
  E: FnMut(R),
{
  /// Creates a tumbling window of `size` values.
  ///
  /// Returns [`WindowError::ZeroWindowSize`] if `size` is zero, before any
  /// value is accepted.
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

  /// Returns the number of values accumulated toward the current window.
  ///
  /// Always strictly less than `size` between calls, and zero immediately
  /// after an emission.
  pub fn buffered_len(&self) -> usize {
    self.buffer.len()
  }

  fn component_name(&self) -> &str {
    self.name.as_deref().unwrap_or("tumbling_window")
  }
}

impl<T, R, A, E> Window<T> for TumblingWindow<T, A, E>
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
      self.buffer.clear();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn sum(buffer: &RingBuffer<i64>) -> i64 {
    buffer.iter().sum()
  }

  #[test]
  fn test_emits_on_multiples_of_size() {
    let mut emitted = Vec::new();
    {
      let mut window = TumblingWindow::new(2, sum, |s| emitted.push(s)).unwrap();
      for value in [1, 2, 3, 4] {
        window.consume(value);
      }
    }
    assert_eq!(emitted, vec![3, 7]);
  }

  #[test]
  fn test_blocks_are_disjoint_and_consecutive() {
    let mut emitted = Vec::new();
    {
      let mut window = TumblingWindow::new(
        3,
        |buffer: &RingBuffer<i64>| buffer.iter().copied().collect::<Vec<_>>(),
        |values| emitted.push(values),
      )
      .unwrap();
      for value in [1, 2, 3, 4, 5, 6, 7] {
        window.consume(value);
      }
    }
    assert_eq!(emitted, vec![vec![1, 2, 3], vec![4, 5, 6]]);
  }

  #[test]
  fn test_buffer_empty_immediately_after_emission() {
    let mut window = TumblingWindow::new(2, sum, |_| {}).unwrap();
    window.consume(1);
    assert_eq!(window.buffered_len(), 1);
    window.consume(2);
    assert_eq!(window.buffered_len(), 0);
    window.consume(3);
    assert_eq!(window.buffered_len(), 1);
  }

  #[test]
  fn test_zero_size_fails_fast() {
    let result = TumblingWindow::new(0, sum, |_| {});
    assert_eq!(result.err(), Some(WindowError::ZeroWindowSize));
  }

  proptest! {
    #[test]
    fn prop_emission_count(values in prop::collection::vec(any::<i64>(), 0..64), size in 1usize..8) {
      let mut emissions = 0usize;
      {
        let mut window = TumblingWindow::new(size, sum, |_| emissions += 1).unwrap();
        for value in &values {
          window.consume(*value);
        }
      }
      prop_assert_eq!(emissions, values.len() / size);
    }

    #[test]
    fn prop_emissions_partition_the_input(
      values in prop::collection::vec(any::<i64>(), 0..48),
      size in 1usize..6,
    ) {
      let mut emitted = Vec::new();
      {
        let mut window = TumblingWindow::new(
          size,
          |buffer: &RingBuffer<i64>| buffer.iter().copied().collect::<Vec<_>>(),
          |window_values| emitted.push(window_values),
        )
        .unwrap();
        for value in &values {
          window.consume(*value);
        }
      }
      let covered: Vec<i64> = emitted.iter().flatten().copied().collect();
      let complete_blocks = values.len() / size * size;
      prop_assert_eq!(covered.as_slice(), &values[..complete_blocks]);
      for window_values in &emitted {
        prop_assert_eq!(window_values.len(), size);
      }
    }
  }
}
